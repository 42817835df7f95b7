use egui::{PointerButton, Pos2};

use crate::canvas::CanvasSurface;
use crate::error::ExportError;
use crate::export;
use crate::gesture::GestureHandler;
use crate::history::History;
use crate::input::InputEvent;
use crate::tools::ToolState;

/// One drawing session: the pixel buffer, its history and the gesture in progress.
///
/// History operations are refused while a gesture is in progress, since the
/// preview would otherwise be drawn on a base snapshot that no longer matches
/// the history.
#[derive(Debug, Default)]
pub struct Document {
    canvas: CanvasSurface,
    history: History,
    gesture: GestureHandler,
}

impl Document {
    /// Creates a document with a cleared 800x600 canvas and no history
    pub fn new() -> Self {
        Self::default()
    }

    pub fn canvas(&self) -> &CanvasSurface {
        &self.canvas
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn gesture(&self) -> &GestureHandler {
        &self.gesture
    }

    pub fn pointer_down(&mut self, pos: Pos2) -> bool {
        self.gesture.pointer_down(pos, &self.canvas, &self.history)
    }

    pub fn pointer_move(&mut self, pos: Pos2, tools: &ToolState) -> bool {
        self.gesture.pointer_move(pos, tools, &mut self.canvas)
    }

    pub fn pointer_up(&mut self, pos: Pos2, tools: &ToolState) -> bool {
        self.gesture
            .pointer_up(pos, tools, &mut self.canvas, &mut self.history)
    }

    /// Routes a pointer event to the gesture handler.
    ///
    /// Only a primary press inside the canvas starts a gesture; a release
    /// anywhere ends it.
    pub fn handle_event(&mut self, event: &InputEvent, tools: &ToolState) {
        match event {
            InputEvent::PointerDown { location, button } => {
                if *button == PointerButton::Primary && location.is_in_canvas {
                    self.pointer_down(location.position);
                }
            }
            InputEvent::PointerMove { location } => {
                self.pointer_move(location.position, tools);
            }
            InputEvent::PointerUp { location, button } => {
                if *button == PointerButton::Primary {
                    self.pointer_up(location.position, tools);
                }
            }
            InputEvent::KeyDown { .. } => {}
        }
    }

    pub fn undo(&mut self) -> bool {
        if self.refuse_during_gesture("undo") {
            return false;
        }
        let undone = self.history.undo(&mut self.canvas);
        if undone {
            log::info!("Undo (history: {})", self.history.undo_stack().len());
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        if self.refuse_during_gesture("redo") {
            return false;
        }
        let redone = self.history.redo(&mut self.canvas);
        if redone {
            log::info!("Redo (history: {})", self.history.undo_stack().len());
        }
        redone
    }

    /// Empties the history and clears the canvas
    pub fn clear(&mut self) -> bool {
        if self.refuse_during_gesture("clear") {
            return false;
        }
        self.history.clear(&mut self.canvas);
        log::info!("Canvas cleared");
        true
    }

    /// PNG bytes of exactly what the canvas shows right now
    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        export::encode_png(&self.canvas)
    }

    /// Hands the PNG to the user as `canvas.png`
    pub fn save(&self) -> Result<(), ExportError> {
        export::save(&self.canvas)
    }

    fn refuse_during_gesture(&self, action: &str) -> bool {
        let dragging = self.gesture.is_dragging();
        if dragging {
            log::debug!("Ignoring {} while a gesture is in progress", action);
        }
        dragging
    }
}
