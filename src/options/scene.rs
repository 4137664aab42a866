use serde::{Deserialize, Serialize};

use crate::scene::ShapeKind;

/// One shape placed in the scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShapeOptions {
    /// Primitive to render.
    pub kind: ShapeKind,
    /// Display name shown in the selection popup.
    pub name: String,
    /// Body text shown in the selection popup.
    #[serde(default = "default_description")]
    pub description: String,
    /// Rest position in world space.
    pub position: [f32; 3],
    /// CSS-style hex color (`#rrggbb`).
    pub color: String,
    /// Initial opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

fn default_description() -> String {
    "hello".to_owned()
}

fn default_opacity() -> f32 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Shapes populating the scene and their idle animation.
pub struct SceneOptions {
    /// Radians of spin about Y added every frame.
    pub spin_per_frame: f32,
    /// Amplitude of the vertical bob in world units.
    pub bob_amplitude: f32,
    /// Shapes in draw/pick order.
    pub shapes: Vec<ShapeOptions>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        let shape = |kind, name: &str, x: f32, color: &str| ShapeOptions {
            kind,
            name: name.to_owned(),
            description: default_description(),
            position: [x, 0.0, 0.0],
            color: color.to_owned(),
            opacity: 1.0,
        };
        Self {
            spin_per_frame: 0.005,
            bob_amplitude: 0.1,
            shapes: vec![
                shape(ShapeKind::Sphere, "Sphere", -3.0, "#4f8ff7"),
                shape(ShapeKind::Cube, "Cube", 0.0, "#8b5cf6"),
                shape(ShapeKind::Cylinder, "Cylinder", 3.0, "#22d3ee"),
            ],
        }
    }
}
