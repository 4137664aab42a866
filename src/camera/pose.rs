//! Orbit pose and the normal/tilt mode state machine.
//!
//! The pose is plain data mutated in place by the rig. Mode switches go
//! through [`CameraPose::enter_tilt`] and [`CameraPose::exit_tilt`], which
//! convert between the cylindrical (normal) and spherical (tilt)
//! parameterizations without moving the eye.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec3;

use crate::options::CameraOptions;

/// Horizontal radius below which leaving tilt mode falls back to the
/// default distance instead of collapsing the orbit.
const POLE_EPSILON: f64 = 1e-3;

/// Clamp `next` into `[min, max]` without jumping.
///
/// A value already outside the range (left there by a mode transition) may
/// move back toward it but is never pulled onto the bound in one step nor
/// pushed further out.
fn clamp_toward(current: f64, next: f64, min: f64, max: f64) -> f64 {
    if next > max {
        max.max(current.min(next))
    } else if next < min {
        min.min(current.max(next))
    } else {
        next
    }
}

/// Which parameterization is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    /// Fixed horizontal orbit radius plus an independent height.
    Normal,
    /// Spherical coordinates around the target.
    Tilt,
}

/// Mode-specific pose parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitMode {
    /// Cylindrical orbit: horizontal radius and height.
    Normal {
        /// Horizontal distance from the vertical axis.
        distance: f64,
        /// Height of the eye above the target plane.
        vertical_offset: f64,
    },
    /// Spherical orbit: true radius and polar angle from +Y.
    Tilt {
        /// Eye-to-target distance.
        radius: f64,
        /// Polar angle in radians.
        tilt: f64,
    },
}

/// Bounds that keep a pose well-formed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseLimits {
    /// Smallest allowed distance (radius in tilt mode).
    pub min_distance: f64,
    /// Largest allowed distance (radius in tilt mode).
    pub max_distance: f64,
    /// Horizontal radius used when leaving tilt mode near a pole.
    pub default_distance: f64,
    /// Normal-mode height bound (symmetric).
    pub vertical_limit: f64,
    /// Tilt stays within `[tilt_epsilon, PI - tilt_epsilon]`.
    pub tilt_epsilon: f64,
    /// Clamp for the height/radius ratio before `acos`.
    pub pole_ratio_limit: f64,
}

impl From<&CameraOptions> for PoseLimits {
    fn from(options: &CameraOptions) -> Self {
        let min_distance = options.min_distance.max(0.0);
        let max_distance = options.max_distance.max(min_distance);
        Self {
            min_distance,
            max_distance,
            default_distance: options
                .default_distance
                .clamp(min_distance, max_distance),
            vertical_limit: options.vertical_limit.abs(),
            tilt_epsilon: options.tilt_epsilon.clamp(0.0, FRAC_PI_2),
            pole_ratio_limit: options.pole_ratio_limit.clamp(0.0, 1.0),
        }
    }
}

impl Default for PoseLimits {
    fn default() -> Self {
        Self::from(&CameraOptions::default())
    }
}

/// Camera pose around a fixed target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Azimuth about the vertical axis, radians. Zero looks down -Z from +Z.
    pub orbit_angle: f64,
    /// Active parameterization.
    pub mode: OrbitMode,
}

impl CameraPose {
    /// Normal-mode pose.
    #[must_use]
    pub fn normal(
        orbit_angle: f64,
        distance: f64,
        vertical_offset: f64,
    ) -> Self {
        Self {
            orbit_angle,
            mode: OrbitMode::Normal {
                distance,
                vertical_offset,
            },
        }
    }

    /// Tilt-mode pose.
    #[must_use]
    pub fn tilt(orbit_angle: f64, radius: f64, tilt: f64) -> Self {
        Self {
            orbit_angle,
            mode: OrbitMode::Tilt { radius, tilt },
        }
    }

    /// The active mode tag.
    #[must_use]
    pub fn kind(&self) -> CameraMode {
        match self.mode {
            OrbitMode::Normal { .. } => CameraMode::Normal,
            OrbitMode::Tilt { .. } => CameraMode::Tilt,
        }
    }

    /// Active distance: horizontal radius in normal mode, true radius in
    /// tilt mode. This is the value the wheel adjusts.
    #[must_use]
    pub fn distance(&self) -> f64 {
        match self.mode {
            OrbitMode::Normal { distance, .. } => distance,
            OrbitMode::Tilt { radius, .. } => radius,
        }
    }

    /// Height of the eye above the target plane.
    #[must_use]
    pub fn vertical_offset(&self) -> f64 {
        match self.mode {
            OrbitMode::Normal {
                vertical_offset, ..
            } => vertical_offset,
            OrbitMode::Tilt { radius, tilt } => radius * tilt.cos(),
        }
    }

    /// Polar angle of the eye measured from +Y.
    #[must_use]
    pub fn tilt_angle(&self) -> f64 {
        match self.mode {
            OrbitMode::Normal {
                distance,
                vertical_offset,
            } => distance.atan2(vertical_offset),
            OrbitMode::Tilt { tilt, .. } => tilt,
        }
    }

    /// Eye position relative to the target.
    #[must_use]
    pub fn eye_offset(&self) -> DVec3 {
        let (sin_orbit, cos_orbit) = self.orbit_angle.sin_cos();
        match self.mode {
            OrbitMode::Normal {
                distance,
                vertical_offset,
            } => DVec3::new(
                distance * sin_orbit,
                vertical_offset,
                distance * cos_orbit,
            ),
            OrbitMode::Tilt { radius, tilt } => {
                let (sin_tilt, cos_tilt) = tilt.sin_cos();
                DVec3::new(
                    radius * sin_tilt * sin_orbit,
                    radius * cos_tilt,
                    radius * sin_tilt * cos_orbit,
                )
            }
        }
    }

    /// Convert to tilt mode keeping the eye in place. No-op in tilt mode.
    #[must_use]
    pub fn enter_tilt(self, limits: &PoseLimits) -> Self {
        let OrbitMode::Normal {
            distance,
            vertical_offset,
        } = self.mode
        else {
            return self;
        };

        let radius = distance.hypot(vertical_offset);
        let tilt = if radius > f64::EPSILON {
            let ratio = (vertical_offset / radius)
                .clamp(-limits.pole_ratio_limit, limits.pole_ratio_limit);
            ratio.acos()
        } else {
            FRAC_PI_2
        };

        Self::tilt(self.orbit_angle, radius, tilt)
    }

    /// Convert to normal mode keeping the eye in place. No-op in normal
    /// mode.
    ///
    /// Near a pole the horizontal radius would collapse toward zero; the
    /// default distance is substituted so the orbit stays usable.
    #[must_use]
    pub fn exit_tilt(self, limits: &PoseLimits) -> Self {
        let OrbitMode::Tilt { radius, tilt } = self.mode else {
            return self;
        };

        let (sin_tilt, cos_tilt) = tilt.sin_cos();
        let horizontal = radius * sin_tilt;
        let distance = if horizontal.abs() < POLE_EPSILON {
            limits.default_distance
        } else {
            horizontal
        };

        Self::normal(self.orbit_angle, distance, radius * cos_tilt)
    }

    /// Switch to `mode`, converting as needed.
    #[must_use]
    pub fn with_mode(self, mode: CameraMode, limits: &PoseLimits) -> Self {
        match mode {
            CameraMode::Normal => self.exit_tilt(limits),
            CameraMode::Tilt => self.enter_tilt(limits),
        }
    }

    /// Rotate about the vertical axis.
    pub fn orbit(&mut self, delta: f64) {
        self.orbit_angle += delta;
    }

    /// Apply a vertical drag: adds to the tilt angle in tilt mode, adds to
    /// the height in normal mode. Both are clamped toward their range.
    pub fn shift_vertical(
        &mut self,
        tilt_delta: f64,
        height_delta: f64,
        limits: &PoseLimits,
    ) {
        match &mut self.mode {
            OrbitMode::Tilt { tilt, .. } => {
                *tilt = clamp_toward(
                    *tilt,
                    *tilt + tilt_delta,
                    limits.tilt_epsilon,
                    PI - limits.tilt_epsilon,
                );
            }
            OrbitMode::Normal {
                vertical_offset, ..
            } => {
                *vertical_offset = clamp_toward(
                    *vertical_offset,
                    *vertical_offset + height_delta,
                    -limits.vertical_limit,
                    limits.vertical_limit,
                );
            }
        }
    }

    /// Add to the active distance, clamped toward the limits.
    pub fn zoom(&mut self, delta: f64, limits: &PoseLimits) {
        let distance = match &mut self.mode {
            OrbitMode::Normal { distance, .. } => distance,
            OrbitMode::Tilt { radius, .. } => radius,
        };
        *distance = clamp_toward(
            *distance,
            *distance + delta,
            limits.min_distance,
            limits.max_distance,
        );
    }
}
