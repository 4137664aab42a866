//! World-to-screen projection for anchoring popups to 3D points.

use glam::{Vec2, Vec3};

use super::core::{Camera, Viewport};

/// Smallest clip-space `w` used for the perspective divide. Points on the
/// camera plane would otherwise divide by zero.
const MIN_CLIP_W: f32 = 1e-6;

/// A viewport coordinate in pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    /// Horizontal pixel coordinate.
    pub x: f32,
    /// Vertical pixel coordinate (grows downward).
    pub y: f32,
}

impl ScreenPoint {
    /// As a vector.
    #[must_use]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Project a world point into viewport pixels.
///
/// NDC y grows upward while screen y grows downward, so y is flipped.
#[must_use]
pub fn project_to_screen(
    camera: &Camera,
    world: Vec3,
    viewport: Viewport,
) -> ScreenPoint {
    let clip = camera.build_matrix() * world.extend(1.0);
    let w = if clip.w.abs() < MIN_CLIP_W {
        MIN_CLIP_W.copysign(clip.w)
    } else {
        clip.w
    };
    let ndc = clip.truncate() / w;

    ScreenPoint {
        x: (ndc.x * 0.5 + 0.5) * viewport.width as f32,
        y: (-ndc.y * 0.5 + 0.5) * viewport.height as f32,
    }
}

/// Re-projects the current anchor every frame.
///
/// Holds nothing but the anchor and the latest result; with no anchor
/// [`project`](Self::project) returns immediately.
#[derive(Debug, Clone, Default)]
pub struct ScreenProjector {
    anchor: Option<Vec3>,
    latest: Option<ScreenPoint>,
}

impl ScreenProjector {
    /// Projector with no anchor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `anchor`, replacing any previous one.
    pub fn track(&mut self, anchor: Vec3) {
        self.anchor = Some(anchor);
        self.latest = None;
    }

    /// Stop tracking.
    pub fn clear(&mut self) {
        self.anchor = None;
        self.latest = None;
    }

    /// The tracked anchor, if any.
    #[must_use]
    pub fn anchor(&self) -> Option<Vec3> {
        self.anchor
    }

    /// Whether an anchor is being tracked.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.anchor.is_some()
    }

    /// The most recent projection.
    #[must_use]
    pub fn latest(&self) -> Option<ScreenPoint> {
        self.latest
    }

    /// Project the anchor under `camera`. No smoothing is applied.
    pub fn project(
        &mut self,
        camera: &Camera,
        viewport: Viewport,
    ) -> Option<ScreenPoint> {
        let anchor = self.anchor?;
        let point = project_to_screen(camera, anchor, viewport);
        self.latest = Some(point);
        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CameraOptions;

    fn camera_at(eye: Vec3, viewport: Viewport) -> Camera {
        Camera::from_options(
            &CameraOptions::default(),
            eye,
            Vec3::ZERO,
            viewport.aspect(),
        )
    }

    #[test]
    fn target_projects_to_viewport_center() {
        let viewport = Viewport::new(1280, 720);
        for eye in [
            Vec3::new(0.0, 0.0, 8.0),
            Vec3::new(8.0, 0.0, 0.0),
            Vec3::new(-3.0, 4.0, -6.0),
        ] {
            let camera = camera_at(eye, viewport);
            let p = project_to_screen(&camera, Vec3::ZERO, viewport);
            assert!((p.x - 640.0).abs() < 0.5, "x = {}", p.x);
            assert!((p.y - 360.0).abs() < 0.5, "y = {}", p.y);
        }
    }

    #[test]
    fn screen_y_grows_downward() {
        let viewport = Viewport::new(800, 600);
        let camera = camera_at(Vec3::new(0.0, 0.0, 8.0), viewport);
        let above = project_to_screen(&camera, Vec3::Y, viewport);
        let right = project_to_screen(&camera, Vec3::X, viewport);
        assert!(above.y < 300.0);
        assert!(right.x > 400.0);
    }

    #[test]
    fn idle_frames_project_identically() {
        let viewport = Viewport::new(1024, 768);
        let camera = camera_at(Vec3::new(2.0, 1.0, 7.0), viewport);
        let mut projector = ScreenProjector::new();
        projector.track(Vec3::new(-3.0, 0.0, 0.0));

        let first = projector.project(&camera, viewport);
        for _ in 0..10 {
            assert_eq!(projector.project(&camera, viewport), first);
        }
    }

    #[test]
    fn no_anchor_means_no_projection() {
        let viewport = Viewport::new(100, 100);
        let camera = camera_at(Vec3::new(0.0, 0.0, 8.0), viewport);
        let mut projector = ScreenProjector::new();
        assert_eq!(projector.project(&camera, viewport), None);
        assert_eq!(projector.latest(), None);

        projector.track(Vec3::ZERO);
        assert!(projector.project(&camera, viewport).is_some());
        projector.clear();
        assert!(!projector.is_tracking());
        assert_eq!(projector.latest(), None);
    }

    #[test]
    fn point_on_camera_plane_stays_finite() {
        let viewport = Viewport::new(640, 480);
        let camera = camera_at(Vec3::new(0.0, 0.0, 8.0), viewport);
        let p = project_to_screen(&camera, Vec3::new(1.0, 0.0, 8.0), viewport);
        assert!(p.x.is_finite() && p.y.is_finite());
    }
}
