use glam::Vec2;

use crate::options::TiltModifier;

/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts them into [`ViewerCommand`](crate::engine::ViewerCommand)
/// values.
///
/// # Example
///
/// ```ignore
/// let now = web_time::Instant::now();
/// viewer.handle_input(&InputEvent::CursorMoved { x: 100.0, y: 200.0 }, now);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute surface position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel (positive = zoom in).
    Scroll {
        /// Scroll amount in wheel steps.
        delta: f32,
    },
    /// Modifier key state changed.
    ModifiersChanged {
        /// Currently held modifiers.
        modifiers: Modifiers,
    },
    /// A non-modifier key went down.
    KeyPressed {
        /// Physical key code, e.g. `"Escape"` or `"KeyR"`.
        code: String,
    },
    /// The render surface changed size.
    Resized {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

/// Held modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Either shift key.
    pub shift: bool,
    /// Either control key.
    pub control: bool,
    /// Either alt/option key.
    pub alt: bool,
}

impl Modifiers {
    /// Whether the configured tilt modifier is held.
    #[must_use]
    pub fn holds(self, modifier: TiltModifier) -> bool {
        match modifier {
            TiltModifier::Shift => self.shift,
            TiltModifier::Control => self.control,
            TiltModifier::Alt => self.alt,
        }
    }
}

/// A click delivered to shape handlers before it reaches the empty-space
/// handler.
///
/// A handler that consumes the click calls
/// [`stop_propagation`](Self::stop_propagation); the camera rig then does
/// not treat the release as a click on empty space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    position: Vec2,
    propagation_stopped: bool,
}

impl ClickEvent {
    /// A click at `position` (surface pixels).
    #[must_use]
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            propagation_stopped: false,
        }
    }

    /// Where the click happened.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Prevent outer handlers from seeing this click.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether a handler consumed the click.
    #[must_use]
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::keyboard::ModifiersState> for Modifiers {
    fn from(state: winit::keyboard::ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            control: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_match_configured_key() {
        let held = Modifiers {
            shift: false,
            control: true,
            alt: false,
        };
        assert!(held.holds(TiltModifier::Control));
        assert!(!held.holds(TiltModifier::Shift));
        assert!(!Modifiers::default().holds(TiltModifier::Alt));
    }

    #[test]
    fn click_propagation_is_one_way() {
        let mut click = ClickEvent::new(Vec2::new(4.0, 5.0));
        assert!(!click.propagation_stopped());
        click.stop_propagation();
        assert!(click.propagation_stopped());
        assert_eq!(click.position(), Vec2::new(4.0, 5.0));
    }
}
