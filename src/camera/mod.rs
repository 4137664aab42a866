//! Camera system for the orbit viewer.
//!
//! Provides the orbit/tilt pose and its mode transitions, the rig that
//! turns pointer input into pose changes, and world-to-screen projection
//! for anchoring popups.

/// Core camera and viewport types.
pub mod core;
/// Orbit pose, mode transitions and limits.
pub mod pose;
/// Screen projection of world anchors.
pub mod projection;
/// Pointer-driven orbit/tilt rig.
pub mod rig;

pub use self::core::{Camera, Viewport};
pub use pose::{CameraMode, CameraPose, OrbitMode, PoseLimits};
pub use projection::{project_to_screen, ScreenPoint, ScreenProjector};
pub use rig::{CameraRig, RigSignal};
