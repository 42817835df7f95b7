use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// Position relative to the canvas origin; may lie outside the canvas
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

/// Represents different types of input events that can occur in the application
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button was pressed
    PointerDown {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse button was released
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse moved (with or without buttons pressed)
    PointerMove { location: InputLocation },
    /// Key was pressed
    KeyDown { key: Key, modifiers: Modifiers },
}

/// History action bound to a keyboard shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryShortcut {
    Undo,
    Redo,
}

impl InputEvent {
    /// Ctrl/Cmd+Z undoes, Ctrl/Cmd+Shift+Z and Ctrl/Cmd+Y redo
    pub fn history_shortcut(&self) -> Option<HistoryShortcut> {
        let InputEvent::KeyDown { key, modifiers } = self else {
            return None;
        };
        if !modifiers.command {
            return None;
        }
        match key {
            Key::Z if modifiers.shift => Some(HistoryShortcut::Redo),
            Key::Z => Some(HistoryShortcut::Undo),
            Key::Y => Some(HistoryShortcut::Redo),
            _ => None,
        }
    }
}

/// Handles converting raw egui input into canvas-relative InputEvents
#[derive(Debug)]
pub struct InputHandler {
    canvas_rect: Rect,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(Rect::NOTHING)
    }
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self { canvas_rect }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Creates an InputLocation from a screen position
    pub fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: (pos - self.canvas_rect.min).to_pos2(),
            is_in_canvas: self.canvas_rect.contains(pos),
        }
    }

    /// Process raw egui input and generate our InputEvents, in arrival order
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        ctx.input(|input| {
            input
                .events
                .iter()
                .filter_map(|event| self.translate(event))
                .collect()
        })
    }

    fn translate(&self, event: &egui::Event) -> Option<InputEvent> {
        match event {
            egui::Event::PointerMoved(pos) => Some(InputEvent::PointerMove {
                location: self.make_location(*pos),
            }),
            egui::Event::PointerButton {
                pos,
                button,
                pressed,
                ..
            } => {
                let location = self.make_location(*pos);
                Some(if *pressed {
                    InputEvent::PointerDown {
                        location,
                        button: *button,
                    }
                } else {
                    InputEvent::PointerUp {
                        location,
                        button: *button,
                    }
                })
            }
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => Some(InputEvent::KeyDown {
                key: *key,
                modifiers: *modifiers,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn handler() -> InputHandler {
        InputHandler::new(Rect::from_min_size(pos2(200.0, 40.0), vec2(800.0, 600.0)))
    }

    #[test]
    fn test_positions_are_canvas_relative() {
        let location = handler().make_location(pos2(210.0, 90.0));
        assert_eq!(location.position, pos2(10.0, 50.0));
        assert!(location.is_in_canvas);

        let outside = handler().make_location(pos2(100.0, 20.0));
        assert_eq!(outside.position, pos2(-100.0, -20.0));
        assert!(!outside.is_in_canvas);
    }

    #[test]
    fn test_translates_pointer_buttons() {
        let handler = handler();
        let event = egui::Event::PointerButton {
            pos: pos2(300.0, 140.0),
            button: PointerButton::Primary,
            pressed: false,
            modifiers: Modifiers::NONE,
        };
        assert_eq!(
            handler.translate(&event),
            Some(InputEvent::PointerUp {
                location: InputLocation {
                    position: pos2(100.0, 100.0),
                    is_in_canvas: true,
                },
                button: PointerButton::Primary,
            })
        );
        assert_eq!(handler.translate(&egui::Event::PointerGone), None);
    }

    #[test]
    fn test_history_shortcuts() {
        let key = |key, modifiers| InputEvent::KeyDown { key, modifiers };

        assert_eq!(key(Key::Z, Modifiers::COMMAND).history_shortcut(), Some(HistoryShortcut::Undo));
        assert_eq!(
            key(Key::Z, Modifiers::COMMAND | Modifiers::SHIFT).history_shortcut(),
            Some(HistoryShortcut::Redo)
        );
        assert_eq!(key(Key::Y, Modifiers::COMMAND).history_shortcut(), Some(HistoryShortcut::Redo));
        assert_eq!(key(Key::Z, Modifiers::NONE).history_shortcut(), None);
    }
}
