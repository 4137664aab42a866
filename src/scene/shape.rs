use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::options::{InteractionOptions, ShapeOptions};

/// Stable shape identifier, assigned in declaration order.
pub type ShapeId = u32;

/// Fallback albedo for unparseable colors.
const FALLBACK_COLOR: [f32; 3] = [0.5, 0.5, 0.5];

/// Primitive geometry of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Sphere of radius 0.8.
    Sphere,
    /// Cube with edge 1.3.
    Cube,
    /// Cylinder of radius 0.6 and height 1.5.
    Cylinder,
}

impl ShapeKind {
    /// Radius of the sphere enclosing the unscaled geometry.
    #[must_use]
    pub fn bounding_radius(self) -> f32 {
        match self {
            Self::Sphere => 0.8,
            // half the space diagonal
            Self::Cube => 1.3 * 3.0_f32.sqrt() * 0.5,
            Self::Cylinder => 0.6_f32.hypot(0.75),
        }
    }
}

/// Parse `#rrggbb` (leading `#` optional) into linear-ish RGB in `[0, 1]`.
#[must_use]
pub fn parse_hex_color(s: &str) -> Option<[f32; 3]> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 {
        return None;
    }
    let channel = |range| {
        let byte = u8::from_str_radix(s.get(range)?, 16).ok()?;
        Some(f32::from(byte) / 255.0)
    };
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

/// A pickable shape with idle animation and hover feedback.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
    name: String,
    description: String,
    base_position: Vec3,
    color: [f32; 3],

    position: Vec3,
    rotation_y: f32,
    hovered: bool,
    opacity: f32,
}

impl Shape {
    /// Build a shape from its options entry.
    #[must_use]
    pub fn from_options(id: ShapeId, options: &ShapeOptions) -> Self {
        let color = parse_hex_color(&options.color).unwrap_or_else(|| {
            log::warn!(
                "shape '{}': invalid color '{}', using gray",
                options.name,
                options.color
            );
            FALLBACK_COLOR
        });
        let base_position = Vec3::from_array(options.position);
        Self {
            id,
            kind: options.kind,
            name: options.name.clone(),
            description: options.description.clone(),
            base_position,
            color,
            position: base_position,
            rotation_y: 0.0,
            hovered: false,
            opacity: options.opacity.clamp(0.0, 1.0),
        }
    }

    /// Identifier.
    #[must_use]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Geometry.
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Popup body text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Rest position.
    #[must_use]
    pub fn base_position(&self) -> Vec3 {
        self.base_position
    }

    /// Live (animated) world position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Accumulated spin about +Y in radians.
    #[must_use]
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    /// RGB albedo in `[0, 1]`.
    #[must_use]
    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    /// Whether the cursor is over this shape.
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Opacity in `[0, 1]`.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Fully transparent shapes are neither drawn nor pickable.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Uniform scale including hover feedback.
    #[must_use]
    pub fn scale(&self, interaction: &InteractionOptions) -> f32 {
        if self.hovered {
            interaction.hover_scale
        } else {
            1.0
        }
    }

    /// Emissive strength including hover feedback.
    #[must_use]
    pub fn emissive_intensity(&self, interaction: &InteractionOptions) -> f32 {
        if self.hovered {
            interaction.hover_emissive
        } else {
            interaction.idle_emissive
        }
    }

    /// Advance the idle animation: spin by `spin`, and bob around the rest
    /// height with a phase offset by the rest x coordinate.
    pub fn animate(&mut self, elapsed: f32, spin: f32, bob_amplitude: f32) {
        self.rotation_y += spin;
        self.position.y = self.base_position.y
            + (elapsed + self.base_position.x).sin() * bob_amplitude;
    }

    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub(crate) fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
        if self.opacity == 0.0 {
            self.hovered = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(id: ShapeId, kind: ShapeKind, x: f32, color: &str) -> Shape {
        let options = ShapeOptions {
            kind,
            name: "Shape".into(),
            description: "hello".into(),
            position: [x, 0.0, 0.0],
            color: color.into(),
            opacity: 1.0,
        };
        Shape::from_options(id, &options)
    }

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_hex_color("#ff0000"), Some([1.0, 0.0, 0.0]));
        assert_eq!(parse_hex_color(" 000000 "), Some([0.0, 0.0, 0.0]));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
        assert_eq!(parse_hex_color("#é0000"), None);
    }

    #[test]
    fn bad_color_falls_back() {
        let shape = shape(0, ShapeKind::Cube, 0.0, "nope");
        assert_eq!(shape.color(), FALLBACK_COLOR);
    }

    #[test]
    fn bob_is_phase_shifted_by_rest_x() {
        let mut left = shape(0, ShapeKind::Sphere, -3.0, "#4f8ff7");
        let mut right = shape(1, ShapeKind::Cylinder, 3.0, "#22d3ee");
        left.animate(1.0, 0.005, 0.1);
        right.animate(1.0, 0.005, 0.1);

        assert!((left.position().y - (-2.0_f32).sin() * 0.1).abs() < 1e-6);
        assert!((right.position().y - 4.0_f32.sin() * 0.1).abs() < 1e-6);
        assert_eq!(left.position().x, -3.0);
    }

    #[test]
    fn spin_accumulates() {
        let mut shape = shape(0, ShapeKind::Cube, 0.0, "#8b5cf6");
        for _ in 0..200 {
            shape.animate(0.0, 0.005, 0.1);
        }
        assert!((shape.rotation_y() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn hover_feedback() {
        let interaction = InteractionOptions::default();
        let mut shape = shape(0, ShapeKind::Sphere, 0.0, "#4f8ff7");
        assert_eq!(shape.scale(&interaction), 1.0);
        assert_eq!(shape.emissive_intensity(&interaction), 0.1);
        shape.set_hovered(true);
        assert_eq!(shape.scale(&interaction), 1.1);
        assert_eq!(shape.emissive_intensity(&interaction), 0.4);
    }

    #[test]
    fn hiding_clears_hover() {
        let mut shape = shape(0, ShapeKind::Sphere, 0.0, "#4f8ff7");
        shape.set_hovered(true);
        shape.set_opacity(-2.0);
        assert!(!shape.is_visible());
        assert!(!shape.is_hovered());
    }

    #[test]
    fn bounding_radii_cover_geometry() {
        assert_eq!(ShapeKind::Sphere.bounding_radius(), 0.8);
        let half_diagonal = 0.65 * 3.0_f32.sqrt();
        assert!(ShapeKind::Cube.bounding_radius() > half_diagonal - 1e-6);
        assert!(ShapeKind::Cylinder.bounding_radius() > 0.75);
    }
}
