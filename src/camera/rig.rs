use glam::{Vec2, Vec3};
use web_time::{Duration, Instant};

use super::core::{Camera, Viewport};
use super::pose::{CameraMode, CameraPose, PoseLimits};
use crate::input::{ClickEvent, DragOutcome, DragSession};
use crate::options::{CameraOptions, InteractionOptions};

/// Signals the rig sends to the selection collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigSignal {
    /// A quick click landed on empty space.
    Deselect,
}

/// Per-pixel and per-step input gains.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Sensitivity {
    orbit: f64,
    vertical: f64,
    tilt: f64,
    zoom: f64,
}

/// Orbit/tilt camera rig.
///
/// Owns the pose, the drag session and the tilt-modifier state. Every
/// mutation re-places the camera immediately, and [`update`](Self::update)
/// re-places it once per frame so the camera stays locked on the target.
#[derive(Debug, Clone)]
pub struct CameraRig {
    pose: CameraPose,
    initial_pose: CameraPose,
    limits: PoseLimits,
    sensitivity: Sensitivity,
    target: Vec3,

    pub(crate) camera: Camera,

    drag: Option<DragSession>,
    drag_threshold: f32,
    click_timeout: Duration,
    tilt_held: bool,
}

impl CameraRig {
    /// Rig at the default distance, level with the target, looking down -Z.
    #[must_use]
    pub fn new(
        options: &CameraOptions,
        interaction: &InteractionOptions,
        viewport: Viewport,
    ) -> Self {
        let limits = PoseLimits::from(options);
        let pose = CameraPose::normal(0.0, limits.default_distance, 0.0);
        let target = Vec3::ZERO;
        let camera = Camera::from_options(
            options,
            target + pose.eye_offset().as_vec3(),
            target,
            viewport.aspect(),
        );

        Self {
            pose,
            initial_pose: pose,
            limits,
            sensitivity: Sensitivity {
                orbit: options.orbit_speed,
                vertical: options.vertical_speed,
                tilt: options.tilt_speed,
                zoom: options.zoom_speed,
            },
            target,
            camera,
            drag: None,
            drag_threshold: interaction.drag_threshold_px,
            click_timeout: interaction.click_timeout(),
            tilt_held: false,
        }
    }

    /// Re-read limits and sensitivities. The pose is kept, re-clamped by
    /// the next input that touches it.
    pub fn apply_options(
        &mut self,
        options: &CameraOptions,
        interaction: &InteractionOptions,
    ) {
        self.limits = PoseLimits::from(options);
        self.sensitivity = Sensitivity {
            orbit: options.orbit_speed,
            vertical: options.vertical_speed,
            tilt: options.tilt_speed,
            zoom: options.zoom_speed,
        };
        self.drag_threshold = interaction.drag_threshold_px;
        self.click_timeout = interaction.click_timeout();
        self.camera.fovy = options.fovy;
        self.camera.znear = options.znear;
        self.camera.zfar = options.zfar;
    }

    /// Current pose.
    #[must_use]
    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    /// Active mode.
    #[must_use]
    pub fn mode(&self) -> CameraMode {
        self.pose.kind()
    }

    /// Limits in effect.
    #[must_use]
    pub fn limits(&self) -> &PoseLimits {
        &self.limits
    }

    /// The placed camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Look target.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Whether a drag session is open.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The open drag session, if any.
    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Whether the tilt modifier is held.
    #[must_use]
    pub fn tilt_held(&self) -> bool {
        self.tilt_held
    }

    /// Replace the pose outright (keeps the mode the pose carries).
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.pose = pose;
        self.update_camera_pos();
    }

    /// Move the look target.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.update_camera_pos();
    }

    /// Restore the initial pose, honoring the currently held modifier.
    pub fn reset(&mut self) {
        let mode = if self.tilt_held {
            CameraMode::Tilt
        } else {
            CameraMode::Normal
        };
        self.pose = self.initial_pose.with_mode(mode, &self.limits);
        self.update_camera_pos();
        log::debug!("camera reset to {:?}", self.pose);
    }

    /// Track a render-surface resize.
    pub fn resize(&mut self, viewport: Viewport) {
        self.camera.aspect = viewport.aspect();
    }

    /// Primary button went down. Opens a drag session; the camera does not
    /// move.
    pub fn press(&mut self, at: Vec2, now: Instant) {
        self.drag = Some(DragSession::begin(at, now));
    }

    /// Pointer moved. Returns `true` if the pose changed.
    ///
    /// Horizontal motion orbits. Vertical motion tilts in tilt mode and
    /// raises/lowers in normal mode; in both, moving the pointer down moves
    /// the eye down.
    pub fn drag_to(&mut self, at: Vec2) -> bool {
        let Some(session) = self.drag.as_mut() else {
            return false;
        };
        let delta = session.advance(at, self.drag_threshold);
        if delta == Vec2::ZERO {
            return false;
        }

        let dx = f64::from(delta.x);
        let dy = f64::from(delta.y);
        self.pose.orbit(-dx * self.sensitivity.orbit);
        if dy != 0.0 {
            self.pose.shift_vertical(
                dy * self.sensitivity.tilt,
                -dy * self.sensitivity.vertical,
                &self.limits,
            );
        }
        self.update_camera_pos();
        true
    }

    /// Primary button went up.
    ///
    /// A press that never crossed the drag threshold and was released
    /// before the click timeout is a click on empty space, unless a shape
    /// handler already stopped the click's propagation.
    pub fn release(
        &mut self,
        now: Instant,
        click: &ClickEvent,
    ) -> Option<RigSignal> {
        let outcome = self.drag.take()?.finish(now);
        log::debug!("pointer released: {outcome:?}");
        match outcome {
            DragOutcome::Drag => None,
            DragOutcome::Click { .. } if click.propagation_stopped() => None,
            DragOutcome::Click { .. }
                if outcome.is_quick_click(self.click_timeout) =>
            {
                Some(RigSignal::Deselect)
            }
            DragOutcome::Click { .. } => None,
        }
    }

    /// Wheel input (positive = zoom in). Adjusts the active distance.
    pub fn scroll(&mut self, delta: f32) {
        self.pose
            .zoom(-f64::from(delta) * self.sensitivity.zoom, &self.limits);
        self.update_camera_pos();
    }

    /// Tilt modifier state changed. The mode switch and camera placement
    /// happen immediately, also in the middle of a drag.
    pub fn set_tilt_held(&mut self, held: bool) {
        if held == self.tilt_held {
            return;
        }
        self.tilt_held = held;
        let mode = if held {
            CameraMode::Tilt
        } else {
            CameraMode::Normal
        };
        self.pose = self.pose.with_mode(mode, &self.limits);
        self.update_camera_pos();
        log::debug!(
            "camera mode -> {mode:?} (distance {:.3}, height {:.3}, tilt {:.3})",
            self.pose.distance(),
            self.pose.vertical_offset(),
            self.pose.tilt_angle(),
        );
    }

    /// Per-frame placement.
    pub fn update(&mut self) {
        self.update_camera_pos();
    }

    fn update_camera_pos(&mut self) {
        self.camera.eye = self.target + self.pose.eye_offset().as_vec3();
        self.camera.target = self.target;
        self.camera.up = Vec3::Y;
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    fn rig() -> CameraRig {
        CameraRig::new(
            &CameraOptions::default(),
            &InteractionOptions::default(),
            Viewport::new(1280, 720),
        )
    }

    fn drag(rig: &mut CameraRig, from: Vec2, to: Vec2, now: Instant) {
        rig.press(from, now);
        let _ = rig.drag_to(to);
    }

    #[test]
    fn starts_at_default_distance_on_positive_z() {
        let rig = rig();
        assert_eq!(rig.mode(), CameraMode::Normal);
        assert_eq!(rig.camera().eye, Vec3::new(0.0, 0.0, 8.0));
        assert_eq!(rig.camera().target, Vec3::ZERO);
    }

    #[test]
    fn horizontal_drag_orbits() {
        let mut rig = rig();
        drag(&mut rig, Vec2::ZERO, Vec2::new(100.0, 0.0), Instant::now());

        assert!((rig.pose().orbit_angle + 1.0).abs() < 1e-9);
        let expected_x = 8.0 * (-1.0_f32).sin();
        assert!((rig.camera().eye.x - expected_x).abs() < 1e-4);
        assert!((rig.camera().eye.x + 6.73).abs() < 0.01);
    }

    #[test]
    fn press_alone_does_not_move_the_camera() {
        let mut rig = rig();
        let before = rig.camera().clone();
        rig.press(Vec2::new(50.0, 50.0), Instant::now());
        assert_eq!(rig.camera(), &before);
        assert!(rig.is_dragging());
    }

    #[test]
    fn moves_without_a_session_are_ignored() {
        let mut rig = rig();
        assert!(!rig.drag_to(Vec2::new(300.0, 0.0)));
        assert_eq!(rig.pose().orbit_angle, 0.0);
    }

    #[test]
    fn pointer_up_raises_camera_in_normal_mode() {
        let mut rig = rig();
        let now = Instant::now();
        drag(&mut rig, Vec2::new(0.0, 100.0), Vec2::new(0.0, 50.0), now);
        assert!(rig.pose().vertical_offset() > 0.0);
        assert!(rig.camera().eye.y > 0.0);
    }

    #[test]
    fn pointer_down_lowers_camera_in_tilt_mode() {
        let mut rig = rig();
        rig.set_tilt_held(true);
        let tilt_before = rig.pose().tilt_angle();
        let y_before = rig.camera().eye.y;
        drag(&mut rig, Vec2::ZERO, Vec2::new(0.0, 40.0), Instant::now());
        assert!(rig.pose().tilt_angle() > tilt_before);
        assert!(rig.camera().eye.y < y_before);
    }

    #[test]
    fn vertical_drags_stay_clamped() {
        let mut rig = rig();
        let now = Instant::now();
        rig.press(Vec2::ZERO, now);
        for step in 1..200 {
            let y = if step % 2 == 0 { -5000.0 } else { 9000.0 };
            let _ = rig.drag_to(Vec2::new(0.0, y * step as f32));
            let offset = rig.pose().vertical_offset();
            assert!((-10.0..=10.0).contains(&offset), "offset {offset}");
        }

        rig.set_tilt_held(true);
        for step in 1..200 {
            let y = if step % 3 == 0 { -700.0 } else { 1100.0 };
            let _ = rig.drag_to(Vec2::new(0.0, y * step as f32));
            let tilt = rig.pose().tilt_angle();
            assert!((0.1..=PI - 0.1).contains(&tilt), "tilt {tilt}");
        }
    }

    #[test]
    fn wheel_distance_stays_clamped() {
        let mut rig = rig();
        let deltas = [3.0, 50.0, -2.5, -400.0, 0.25, 17.0, -1.0, 1e6, -1e6];
        for (i, delta) in deltas.iter().enumerate() {
            if i == 4 {
                rig.set_tilt_held(true);
            }
            rig.scroll(*delta);
            let d = rig.pose().distance();
            assert!((3.0..=20.0).contains(&d), "distance {d}");
        }
    }

    #[test]
    fn mode_switch_does_not_move_the_eye() {
        let mut rig = rig();
        let now = Instant::now();
        drag(&mut rig, Vec2::ZERO, Vec2::new(37.0, -120.0), now);
        rig.scroll(-4.0);
        let eye = rig.camera().eye;

        rig.set_tilt_held(true);
        assert_eq!(rig.mode(), CameraMode::Tilt);
        assert!((rig.camera().eye - eye).length() < 1e-4);

        rig.set_tilt_held(false);
        assert_eq!(rig.mode(), CameraMode::Normal);
        assert!((rig.camera().eye - eye).length() < 1e-4);
    }

    #[test]
    fn modifier_change_mid_drag_continues_the_drag() {
        let mut rig = rig();
        rig.press(Vec2::ZERO, Instant::now());
        let _ = rig.drag_to(Vec2::new(10.0, 0.0));
        rig.set_tilt_held(true);
        assert!(rig.is_dragging());
        assert!(rig.drag_to(Vec2::new(20.0, 10.0)));
        assert!((rig.pose().orbit_angle + 0.2).abs() < 1e-9);
    }

    #[test]
    fn horizontal_drag_after_leaving_tilt_at_the_pole_does_not_jump() {
        let mut rig = rig();
        let now = Instant::now();
        rig.scroll(-1e6);
        rig.set_tilt_held(true);
        drag(&mut rig, Vec2::ZERO, Vec2::new(0.0, -10_000.0), now);
        let _ = rig.release(now, &ClickEvent::new(Vec2::ZERO));
        rig.set_tilt_held(false);

        let height = rig.pose().vertical_offset();
        assert!(height > 19.0, "height {height}");
        let eye = rig.camera().eye;

        drag(&mut rig, Vec2::ZERO, Vec2::new(1.0, 0.0), now);
        assert!((rig.camera().eye - eye).length() < 0.05);
        assert!((rig.pose().vertical_offset() - height).abs() < 1e-9);

        // pointer down eases the height back toward the limit
        assert!(rig.drag_to(Vec2::new(1.0, 10.0)));
        let eased = rig.pose().vertical_offset();
        assert!((eased - (height - 0.2)).abs() < 1e-9, "height {eased}");
        assert!((rig.camera().eye - eye).length() < 0.5);
    }

    #[test]
    fn zooming_out_beyond_max_radius_never_moves_the_camera_in() {
        let mut rig = rig();
        let now = Instant::now();
        rig.scroll(-1e6);
        drag(&mut rig, Vec2::ZERO, Vec2::new(0.0, -10_000.0), now);
        let _ = rig.release(now, &ClickEvent::new(Vec2::ZERO));
        rig.set_tilt_held(true);

        let radius = rig.pose().distance();
        assert!((radius - 500.0_f64.sqrt()).abs() < 1e-9);
        let eye = rig.camera().eye;

        rig.scroll(-0.01);
        assert_eq!(rig.pose().distance(), radius);
        assert_eq!(rig.camera().eye, eye);

        rig.scroll(0.5);
        let d = rig.pose().distance();
        assert!((d - (radius - 0.5)).abs() < 1e-9, "distance {d}");
        assert!(d > 20.0);
    }

    #[test]
    fn repeated_modifier_events_do_not_retransition() {
        let mut rig = rig();
        rig.set_tilt_held(true);
        let pose = *rig.pose();
        rig.set_tilt_held(true);
        assert_eq!(*rig.pose(), pose);
    }

    #[test]
    fn quick_still_click_deselects() {
        let mut rig = rig();
        let t0 = Instant::now();
        rig.press(Vec2::new(10.0, 10.0), t0);
        let _ = rig.drag_to(Vec2::new(11.0, 12.0));
        let click = ClickEvent::new(Vec2::new(11.0, 12.0));
        let signal = rig.release(t0 + Duration::from_millis(150), &click);
        assert_eq!(signal, Some(RigSignal::Deselect));
        assert!(!rig.is_dragging());
    }

    #[test]
    fn drag_never_deselects() {
        let mut rig = rig();
        let t0 = Instant::now();
        rig.press(Vec2::ZERO, t0);
        let _ = rig.drag_to(Vec2::new(5.0, 0.0));
        let click = ClickEvent::new(Vec2::new(5.0, 0.0));
        assert_eq!(rig.release(t0 + Duration::from_millis(10), &click), None);

        rig.press(Vec2::ZERO, t0);
        let _ = rig.drag_to(Vec2::new(5.0, 0.0));
        assert_eq!(rig.release(t0 + Duration::from_secs(3), &click), None);
    }

    #[test]
    fn long_still_press_does_not_deselect() {
        let mut rig = rig();
        let t0 = Instant::now();
        rig.press(Vec2::ZERO, t0);
        let click = ClickEvent::new(Vec2::ZERO);
        assert_eq!(rig.release(t0 + Duration::from_millis(200), &click), None);
    }

    #[test]
    fn stopped_click_does_not_deselect() {
        let mut rig = rig();
        let t0 = Instant::now();
        rig.press(Vec2::ZERO, t0);
        let mut click = ClickEvent::new(Vec2::ZERO);
        click.stop_propagation();
        assert_eq!(rig.release(t0 + Duration::from_millis(50), &click), None);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut rig = rig();
        let click = ClickEvent::new(Vec2::ZERO);
        assert_eq!(rig.release(Instant::now(), &click), None);
    }

    #[test]
    fn frame_update_follows_a_moved_target() {
        let mut rig = rig();
        rig.set_target(Vec3::new(1.0, 2.0, 3.0));
        rig.update();
        assert_eq!(rig.camera().target, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(rig.camera().eye, Vec3::new(1.0, 2.0, 11.0));
    }

    #[test]
    fn reset_restores_the_initial_pose() {
        let mut rig = rig();
        drag(&mut rig, Vec2::ZERO, Vec2::new(80.0, 30.0), Instant::now());
        rig.scroll(2.0);
        rig.reset();
        assert_eq!(rig.camera().eye, Vec3::new(0.0, 0.0, 8.0));
    }

    #[test]
    fn resize_updates_aspect() {
        let mut rig = rig();
        rig.resize(Viewport::new(500, 1000));
        assert_eq!(rig.camera().aspect, 0.5);
    }
}
