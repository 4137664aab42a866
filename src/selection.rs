//! Selected-shape state backing the info popup.

use glam::Vec3;

use crate::camera::ScreenPoint;
use crate::scene::ShapeId;

/// The selected shape and where its popup sits.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Selected shape.
    pub shape: ShapeId,
    /// Popup title.
    pub name: String,
    /// Popup body.
    pub description: String,
    /// World point the popup is anchored to, captured at click time.
    pub anchor: Vec3,
    /// Latest projected popup position.
    pub screen: ScreenPoint,
}

/// Holds at most one [`Selection`]. Never touches the camera.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    current: Option<Selection>,
}

impl SelectionState {
    /// No selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection.
    pub fn select(&mut self, selection: Selection) {
        log::info!(
            "selected '{}' at ({:.1}, {:.1})",
            selection.name,
            selection.screen.x,
            selection.screen.y
        );
        self.current = Some(selection);
    }

    /// Drop the selection. Returns `true` if there was one.
    pub fn clear(&mut self) -> bool {
        let had = self.current.take().is_some();
        if had {
            log::debug!("selection cleared");
        }
        had
    }

    /// The current selection.
    #[must_use]
    pub fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    /// Whether the popup is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Move the popup to a freshly projected point.
    pub fn update_screen(&mut self, screen: ScreenPoint) {
        if let Some(selection) = &mut self.current {
            selection.screen = screen;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(shape: ShapeId) -> Selection {
        Selection {
            shape,
            name: "Cube".into(),
            description: "hello".into(),
            anchor: Vec3::ZERO,
            screen: ScreenPoint { x: 10.0, y: 20.0 },
        }
    }

    #[test]
    fn select_update_clear() {
        let mut state = SelectionState::new();
        assert!(!state.clear());

        state.select(selection(1));
        state.update_screen(ScreenPoint { x: 5.0, y: 6.0 });
        let current = state.current().cloned();
        assert_eq!(
            current.map(|s| s.screen),
            Some(ScreenPoint { x: 5.0, y: 6.0 })
        );

        assert!(state.clear());
        assert!(!state.is_open());
    }

    #[test]
    fn update_without_selection_is_a_no_op() {
        let mut state = SelectionState::new();
        state.update_screen(ScreenPoint::default());
        assert_eq!(state.current(), None);
    }
}
