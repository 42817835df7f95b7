use crate::canvas::{CanvasSurface, Snapshot};

/// Undo/redo history built on full-buffer snapshots.
///
/// The last entry of the undo stack always matches what the canvas shows
/// while no gesture is in progress. Every operation is defined for every
/// state, so undo and redo on empty stacks are no-ops that return `false`.
#[derive(Debug, Default)]
pub struct History {
    /// One snapshot per committed shape, oldest first
    undo_stack: Vec<Snapshot>,
    /// Snapshots popped by undo, most recently undone last
    redo_stack: Vec<Snapshot>,
}

impl History {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a snapshot and discards the redo branch
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        if !self.redo_stack.is_empty() {
            log::debug!("Discarding {} redo entries", self.redo_stack.len());
            self.redo_stack.clear();
        }
    }

    /// Steps back one snapshot and shows the previous one, or a cleared
    /// buffer when nothing is left.
    pub fn undo(&mut self, canvas: &mut CanvasSurface) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(snapshot);

        match self.undo_stack.last() {
            Some(previous) => canvas.restore(previous),
            None => canvas.clear(),
        }
        true
    }

    /// Re-applies the most recently undone snapshot
    pub fn redo(&mut self, canvas: &mut CanvasSurface) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        canvas.restore(&snapshot);
        self.undo_stack.push(snapshot);
        true
    }

    /// Empties both stacks and clears the canvas
    pub fn clear(&mut self, canvas: &mut CanvasSurface) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        canvas.clear();
    }

    /// The most recent committed snapshot
    pub fn last(&self) -> Option<&Snapshot> {
        self.undo_stack.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_stack(&self) -> &[Snapshot] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Snapshot] {
        &self.redo_stack
    }
}
