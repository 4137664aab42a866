//! The viewer's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, a pointer
//! gesture or a programmatic call, is a `ViewerCommand`. Consumers pass
//! commands to [`OrbitViewer::execute`](super::OrbitViewer::execute).

use glam::Vec2;

use crate::scene::ShapeId;

/// A discrete operation on the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    /// Pointer moved with no button held.
    Hover {
        /// Cursor position in surface pixels.
        at: Vec2,
    },
    /// Primary button went down.
    BeginDrag {
        /// Cursor position in surface pixels.
        at: Vec2,
    },
    /// Pointer moved with the primary button held.
    DragTo {
        /// Cursor position in surface pixels.
        at: Vec2,
    },
    /// Primary button went up.
    EndDrag {
        /// Cursor position in surface pixels.
        at: Vec2,
    },
    /// Wheel input (positive = zoom in).
    Zoom {
        /// Wheel steps.
        delta: f32,
    },
    /// Tilt modifier pressed or released.
    SetTiltHeld {
        /// Whether the modifier is now held.
        held: bool,
    },
    /// Restore the initial camera pose.
    ResetCamera,
    /// Close the selection popup.
    ClearSelection,
    /// Render surface changed size.
    Resize {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
    /// Change a shape's opacity (clamped to `[0, 1]`).
    SetOpacity {
        /// Target shape.
        shape: ShapeId,
        /// New opacity.
        opacity: f32,
    },
}
