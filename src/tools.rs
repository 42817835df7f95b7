use egui::{Color32, Pos2, Vec2};

use crate::canvas::CanvasSurface;
use crate::geometry;

/// The tools a user can pick from
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    #[default]
    Rectangle,
    Circle,
    Line,
    /// Selectable, but has no drawing behavior yet
    Text,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Line,
        ToolKind::Text,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Line => "Line",
            ToolKind::Text => "Text",
        }
    }

    /// The shape a drag from `start` to `current` describes with this tool.
    ///
    /// Returns `None` for the text tool, which draws nothing.
    pub fn shape(&self, start: Pos2, current: Pos2) -> Option<Shape> {
        match self {
            ToolKind::Rectangle => Some(Shape::Rectangle {
                origin: start,
                extent: current - start,
            }),
            ToolKind::Circle => Some(Shape::Circle {
                center: start,
                radius: geometry::distance(start, current),
            }),
            ToolKind::Line => Some(Shape::Line {
                start,
                end: current,
            }),
            ToolKind::Text => None,
        }
    }
}

/// Geometry of one shape, ready to be rasterized
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Box from `origin` to `origin + extent`; the extent may be negative
    Rectangle { origin: Pos2, extent: Vec2 },
    Circle { center: Pos2, radius: f32 },
    Line { start: Pos2, end: Pos2 },
}

impl Shape {
    /// Rasterizes the shape with the colors and width in `tools`
    pub fn draw(&self, canvas: &mut CanvasSurface, tools: &ToolState) {
        match *self {
            Shape::Rectangle { origin, extent } => canvas.draw_rectangle(
                origin,
                extent,
                tools.stroke_color(),
                tools.fill_color(),
                tools.line_width(),
            ),
            Shape::Circle { center, radius } => canvas.draw_circle(
                center,
                radius,
                tools.stroke_color(),
                tools.fill_color(),
                tools.line_width(),
            ),
            Shape::Line { start, end } => {
                canvas.draw_line(start, end, tools.stroke_color(), tools.line_width())
            }
        }
    }
}

/// Current tool selection and drawing settings.
///
/// Created once per session and changed only through its setters. Values are
/// not validated: a negative line width is stored as given and simply
/// produces no stroke when drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    tool: ToolKind,
    stroke_color: Color32,
    fill_color: Color32,
    line_width: f32,
    font_size: f32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: ToolKind::Rectangle,
            stroke_color: Color32::BLACK,
            fill_color: Color32::WHITE,
            line_width: 2.0,
            font_size: 16.0,
        }
    }
}

impl ToolState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.tool != tool {
            log::info!("Tool changed: {} -> {}", self.tool.name(), tool.name());
        }
        self.tool = tool;
    }

    pub fn stroke_color(&self) -> Color32 {
        self.stroke_color
    }

    pub fn set_stroke_color(&mut self, color: Color32) {
        self.stroke_color = color;
    }

    pub fn fill_color(&self) -> Color32 {
        self.fill_color
    }

    pub fn set_fill_color(&mut self, color: Color32) {
        self.fill_color = color;
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    /// Only used by the text tool, which has no drawing behavior yet
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }
}
