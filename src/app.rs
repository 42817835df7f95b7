use crate::document::Document;
use crate::input::{HistoryShortcut, InputEvent, InputHandler};
use crate::panels::{central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::tools::ToolState;

/// The drawing widget: tool settings plus one drawing session.
///
/// Everything lives in memory for the session; the exported PNG is the only
/// thing that outlives it.
#[derive(Debug, Default)]
pub struct SketchApp {
    tools: ToolState,
    document: Document,
    renderer: Renderer,
    input: InputHandler,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolState {
        &mut self.tools
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn undo(&mut self) {
        self.document.undo();
    }

    pub fn redo(&mut self) {
        self.document.redo();
    }

    pub fn clear(&mut self) {
        self.document.clear();
    }

    pub fn save_png(&mut self) {
        if let Err(err) = self.document.save() {
            log::error!("Failed to save canvas: {}", err);
        }
    }

    /// Feeds this frame's input to the document.
    pub fn handle_input(
        &mut self,
        ctx: &egui::Context,
        canvas_rect: egui::Rect,
        canvas_hovered: bool,
    ) {
        self.input.set_canvas_rect(canvas_rect);
        let events = self.input.process_input(ctx);
        self.route_events(events, canvas_hovered, ctx.wants_keyboard_input());
    }

    /// Dispatches translated events.
    ///
    /// A press only starts a gesture when the canvas itself is hovered, so
    /// clicks on popups floating above it do not draw. History shortcuts are
    /// left alone while a text field has keyboard focus.
    pub fn route_events(
        &mut self,
        events: Vec<InputEvent>,
        canvas_hovered: bool,
        keyboard_taken: bool,
    ) {
        for event in events {
            match event.history_shortcut() {
                Some(_) if keyboard_taken => {}
                Some(HistoryShortcut::Undo) => self.undo(),
                Some(HistoryShortcut::Redo) => self.redo(),
                None => {
                    if matches!(event, InputEvent::PointerDown { .. }) && !canvas_hovered {
                        continue;
                    }
                    self.document.handle_event(&event, &self.tools);
                }
            }
        }
    }

    pub fn render_canvas(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        rect: egui::Rect,
    ) {
        self.renderer.render(ctx, painter, rect, self.document.canvas());
    }
}

impl eframe::App for SketchApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
