//! The gesture state machine.
//!
//! ```text
//!   ┌──────────┐  pointer down   ┌────────────┐
//!   │          ├────────────────►│            │
//!   │   Idle   │                 │  Dragging  ├──┐ pointer move
//!   │          │◄────────────────┤            │◄─┘ (preview)
//!   └──────────┘  pointer up     └────────────┘
//!                 (commit)
//! ```
//!
//! A drag cannot be cancelled; releasing the pointer always ends it.
use egui::Pos2;

use crate::canvas::Snapshot;
use crate::error::TransitionError;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditorState {
    /// No gesture in progress
    #[default]
    Idle,
    /// Pointer is held down; every move restores `base` and redraws the preview
    Dragging {
        /// Where the pointer went down, relative to the canvas origin
        start: Pos2,
        /// The buffer as it was when the gesture started
        base: Snapshot,
    },
}

impl EditorState {
    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "Idle",
            EditorState::Dragging { .. } => "Dragging",
        }
    }

    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        matches!(
            (self, new_state),
            (EditorState::Idle, EditorState::Dragging { .. })
                | (EditorState::Dragging { .. }, EditorState::Idle)
        )
    }

    /// Moves to `new_state`, returning the previous state
    pub fn transition_to(
        &mut self,
        new_state: EditorState,
    ) -> Result<EditorState, TransitionError> {
        if !self.can_transition_to(&new_state) {
            return Err(TransitionError::InvalidTransition {
                from: self.name(),
                to: new_state.name(),
            });
        }
        log::debug!("Gesture state: {} -> {}", self.name(), new_state.name());
        Ok(std::mem::replace(self, new_state))
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, EditorState::Dragging { .. })
    }
}
