//! Shared utilities.

/// Animation clock and FPS smoothing.
pub mod frame_timing;
