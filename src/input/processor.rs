//! Converts raw platform events into viewer commands.
//!
//! The `InputProcessor` owns the transient input state (cursor position,
//! button and modifier state) and the key-binding map. It is the only thing
//! that sits between raw events and
//! [`OrbitViewer::execute`](crate::engine::OrbitViewer::execute).

use glam::Vec2;

use super::event::{InputEvent, Modifiers, MouseButton};
use super::keyboard::KeyAction;
use crate::engine::ViewerCommand;
use crate::options::{KeybindingOptions, TiltModifier};

impl KeyAction {
    /// The parameterless command this action triggers.
    #[must_use]
    pub fn to_command(self) -> ViewerCommand {
        match self {
            Self::ResetCamera => ViewerCommand::ResetCamera,
            Self::DismissSelection => ViewerCommand::ClearSelection,
        }
    }
}

/// Converts raw input events into [`ViewerCommand`]s.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = processor.handle_event(&event) {
///     viewer.execute(cmd, now);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    cursor: Vec2,
    mouse_pressed: bool,
    modifiers: Modifiers,
    tilt_modifier: TiltModifier,
    tilt_held: bool,
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Processor with default bindings and the shift tilt modifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Processor with custom bindings and tilt modifier.
    #[must_use]
    pub fn with_bindings(
        key_bindings: KeybindingOptions,
        tilt_modifier: TiltModifier,
    ) -> Self {
        Self {
            key_bindings,
            tilt_modifier,
            ..Self::default()
        }
    }

    /// Last cursor position in surface pixels.
    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Whether the primary button is held.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    /// Whether the tilt modifier is held.
    #[must_use]
    pub fn tilt_held(&self) -> bool {
        self.tilt_held
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Replace bindings and modifier after an options change.
    pub fn reconfigure(
        &mut self,
        key_bindings: KeybindingOptions,
        tilt_modifier: TiltModifier,
    ) {
        self.key_bindings = key_bindings;
        self.tilt_modifier = tilt_modifier;
    }

    /// Look up a key press.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ViewerCommand> {
        self.key_bindings.lookup(key).map(KeyAction::to_command)
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
    ) -> Option<ViewerCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.cursor = Vec2::new(*x, *y);
                Some(if self.mouse_pressed {
                    ViewerCommand::DragTo { at: self.cursor }
                } else {
                    ViewerCommand::Hover { at: self.cursor }
                })
            }
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(*button, *pressed)
            }
            InputEvent::Scroll { delta } => {
                Some(ViewerCommand::Zoom { delta: *delta })
            }
            InputEvent::ModifiersChanged { modifiers } => {
                self.modifiers = *modifiers;
                let held = modifiers.holds(self.tilt_modifier);
                if held == self.tilt_held {
                    return None;
                }
                self.tilt_held = held;
                Some(ViewerCommand::SetTiltHeld { held })
            }
            InputEvent::KeyPressed { code } => self.handle_key_press(code),
            InputEvent::Resized { width, height } => {
                Some(ViewerCommand::Resize {
                    width: *width,
                    height: *height,
                })
            }
        }
    }

    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<ViewerCommand> {
        if button != MouseButton::Left {
            return None;
        }
        if pressed {
            if self.mouse_pressed {
                return None;
            }
            self.mouse_pressed = true;
            return Some(ViewerCommand::BeginDrag { at: self.cursor });
        }
        if !self.mouse_pressed {
            return None;
        }
        self.mouse_pressed = false;
        Some(ViewerCommand::EndDrag { at: self.cursor })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(held: bool) -> InputEvent {
        InputEvent::ModifiersChanged {
            modifiers: Modifiers {
                shift: held,
                ..Modifiers::default()
            },
        }
    }

    #[test]
    fn cursor_hovers_until_pressed() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(&InputEvent::CursorMoved { x: 3.0, y: 4.0 }),
            Some(ViewerCommand::Hover {
                at: Vec2::new(3.0, 4.0)
            })
        );
        assert_eq!(
            p.handle_event(&InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            }),
            Some(ViewerCommand::BeginDrag {
                at: Vec2::new(3.0, 4.0)
            })
        );
        assert_eq!(
            p.handle_event(&InputEvent::CursorMoved { x: 9.0, y: 4.0 }),
            Some(ViewerCommand::DragTo {
                at: Vec2::new(9.0, 4.0)
            })
        );
        assert_eq!(
            p.handle_event(&InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: false,
            }),
            Some(ViewerCommand::EndDrag {
                at: Vec2::new(9.0, 4.0)
            })
        );
    }

    #[test]
    fn other_buttons_and_stray_releases_are_ignored() {
        let mut p = InputProcessor::new();
        let release = InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        };
        assert_eq!(p.handle_event(&release), None);
        assert_eq!(
            p.handle_event(&InputEvent::MouseButton {
                button: MouseButton::Right,
                pressed: true,
            }),
            None
        );
    }

    #[test]
    fn modifier_reports_only_transitions() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(&shift(true)),
            Some(ViewerCommand::SetTiltHeld { held: true })
        );
        assert_eq!(p.handle_event(&shift(true)), None);
        assert_eq!(
            p.handle_event(&shift(false)),
            Some(ViewerCommand::SetTiltHeld { held: false })
        );
    }

    #[test]
    fn configured_modifier_is_respected() {
        let mut p = InputProcessor::with_bindings(
            KeybindingOptions::default(),
            TiltModifier::Alt,
        );
        assert_eq!(p.handle_event(&shift(true)), None);
        assert!(!p.tilt_held());
    }

    #[test]
    fn bound_keys_map_to_commands() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(&InputEvent::KeyPressed {
                code: "Escape".into()
            }),
            Some(ViewerCommand::ClearSelection)
        );
        assert_eq!(
            p.handle_key_press("KeyR"),
            Some(ViewerCommand::ResetCamera)
        );
        assert_eq!(p.handle_key_press("KeyZ"), None);
    }

    #[test]
    fn scroll_and_resize_pass_through() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(&InputEvent::Scroll { delta: -1.5 }),
            Some(ViewerCommand::Zoom { delta: -1.5 })
        );
        assert_eq!(
            p.handle_event(&InputEvent::Resized {
                width: 640,
                height: 480
            }),
            Some(ViewerCommand::Resize {
                width: 640,
                height: 480
            })
        );
    }
}
