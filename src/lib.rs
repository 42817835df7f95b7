#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod document;
pub mod error;
pub mod export;
pub mod geometry;
pub mod gesture;
pub mod history;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod tools;

pub use app::SketchApp;
pub use canvas::{CANVAS_HEIGHT, CANVAS_WIDTH, CanvasSurface, Snapshot};
pub use document::Document;
pub use error::{ExportError, TransitionError};
pub use gesture::GestureHandler;
pub use history::History;
pub use input::{InputEvent, InputLocation};
pub use state::EditorState;
pub use tools::{Shape, ToolKind, ToolState};
