use egui::Pos2;

use crate::canvas::{CanvasSurface, Snapshot};
use crate::history::History;
use crate::state::EditorState;
use crate::tools::ToolState;

/// Turns pointer down/move/up into previews and commits.
///
/// The handler is driven by one persistent set of pointer callbacks and
/// decides what each event means from its current state. Events that make
/// no sense in that state (a move while idle, a second press while
/// dragging) are ignored.
#[derive(Debug, Default)]
pub struct GestureHandler {
    state: EditorState,
}

impl GestureHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// Starts a gesture at `pos`, remembering the last committed snapshot as
    /// the base every preview frame is drawn on.
    pub fn pointer_down(&mut self, pos: Pos2, canvas: &CanvasSurface, history: &History) -> bool {
        let base = history
            .last()
            .cloned()
            .unwrap_or_else(|| Snapshot::blank(canvas.width(), canvas.height()));

        match self.state.transition_to(EditorState::Dragging { start: pos, base }) {
            Ok(_) => {
                log::debug!("Gesture started at {:?}", pos);
                true
            }
            Err(err) => {
                log::debug!("Ignoring pointer down: {}", err);
                false
            }
        }
    }

    /// Replaces the previous preview with the shape from the start point to `pos`.
    pub fn pointer_move(
        &mut self,
        pos: Pos2,
        tools: &ToolState,
        canvas: &mut CanvasSurface,
    ) -> bool {
        let EditorState::Dragging { start, base } = &self.state else {
            return false;
        };

        canvas.restore(base);
        if let Some(shape) = tools.tool().shape(*start, pos) {
            shape.draw(canvas, tools);
        }
        true
    }

    /// Finishes the gesture: draws the final shape at `pos` and commits the
    /// resulting buffer as a new snapshot.
    pub fn pointer_up(
        &mut self,
        pos: Pos2,
        tools: &ToolState,
        canvas: &mut CanvasSurface,
        history: &mut History,
    ) -> bool {
        if !self.pointer_move(pos, tools, canvas) {
            log::debug!("Ignoring pointer up while {}", self.state.name());
            return false;
        }

        if let Err(err) = self.state.transition_to(EditorState::Idle) {
            log::warn!("Could not finish gesture: {}", err);
            return false;
        }

        history.commit(canvas.capture_snapshot());
        log::info!(
            "Committed {} (history: {})",
            tools.tool().name(),
            history.undo_stack().len()
        );
        true
    }
}
