use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Modifier key that switches the rig into tilt mode while held.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TiltModifier {
    /// Either shift key.
    #[default]
    Shift,
    /// Either control key.
    Control,
    /// Either alt/option key.
    Alt,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection, orbit limits and drag sensitivities.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Closest the camera may get to the look target.
    #[schemars(title = "Min Distance", range(min = 1.0, max = 10.0), extend("step" = 0.5))]
    pub min_distance: f64,
    /// Farthest the camera may get from the look target.
    #[schemars(title = "Max Distance", range(min = 10.0, max = 100.0), extend("step" = 1.0))]
    pub max_distance: f64,
    /// Starting horizontal orbit radius, also used when leaving tilt mode
    /// from directly above or below the target.
    #[schemars(skip)]
    pub default_distance: f64,
    /// Radians of orbit per horizontal pixel of drag.
    #[schemars(title = "Orbit Speed", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub orbit_speed: f64,
    /// World units of height per vertical pixel of drag (normal mode).
    #[schemars(title = "Vertical Speed", range(min = 0.005, max = 0.2), extend("step" = 0.005))]
    pub vertical_speed: f64,
    /// Radians of tilt per vertical pixel of drag (tilt mode).
    #[schemars(title = "Tilt Speed", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub tilt_speed: f64,
    /// World units of distance per wheel step.
    #[schemars(title = "Zoom Speed", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub zoom_speed: f64,
    /// Normal-mode height is clamped to `[-vertical_limit, vertical_limit]`.
    #[schemars(skip)]
    pub vertical_limit: f64,
    /// Tilt is clamped to `[tilt_epsilon, PI - tilt_epsilon]`.
    #[schemars(skip)]
    pub tilt_epsilon: f64,
    /// Height/radius ratio clamp applied before the inverse cosine when
    /// entering tilt mode.
    #[schemars(skip)]
    pub pole_ratio_limit: f64,
    /// Key that holds the rig in tilt mode.
    #[schemars(skip)]
    pub tilt_modifier: TiltModifier,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 50.0,
            znear: 0.1,
            zfar: 200.0,
            min_distance: 3.0,
            max_distance: 20.0,
            default_distance: 8.0,
            orbit_speed: 0.01,
            vertical_speed: 0.02,
            tilt_speed: 0.01,
            zoom_speed: 1.0,
            vertical_limit: 10.0,
            tilt_epsilon: 0.1,
            pole_ratio_limit: 0.99,
            tilt_modifier: TiltModifier::Shift,
        }
    }
}
