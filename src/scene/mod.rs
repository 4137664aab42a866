//! Authoritative scene: flat shape storage, idle animation, hover and
//! opacity state, and ray picking.

mod picking;
mod shape;

use glam::Vec3;
pub use picking::{ray_sphere, screen_to_ray, Ray};
use rustc_hash::FxHashMap;
pub use shape::{parse_hex_color, Shape, ShapeId, ShapeKind};

use crate::options::{SceneOptions, ShapeOptions};

/// The shapes on screen. Owns every [`Shape`] in a flat list.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Shapes in declaration order.
    shapes: Vec<Shape>,
    /// Id → index into `shapes`.
    index: FxHashMap<ShapeId, usize>,
    hovered: Option<ShapeId>,
    spin_per_frame: f32,
    bob_amplitude: f32,
}

impl Scene {
    /// Empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate from options. Ids follow declaration order.
    #[must_use]
    pub fn from_options(options: &SceneOptions) -> Self {
        let mut scene = Self {
            spin_per_frame: options.spin_per_frame,
            bob_amplitude: options.bob_amplitude,
            ..Self::default()
        };
        for shape in &options.shapes {
            let _ = scene.add(shape);
        }
        log::debug!("scene built with {} shapes", scene.len());
        scene
    }

    /// Append a shape and return its id.
    pub fn add(&mut self, options: &ShapeOptions) -> ShapeId {
        let id = self.shapes.len() as ShapeId;
        let _ = self.index.insert(id, self.shapes.len());
        self.shapes.push(Shape::from_options(id, options));
        id
    }

    /// Number of shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the scene has no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// All shapes in declaration order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Look up a shape.
    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.index.get(&id).and_then(|&i| self.shapes.get(i))
    }

    fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        let i = *self.index.get(&id)?;
        self.shapes.get_mut(i)
    }

    /// Live world position of a shape.
    #[must_use]
    pub fn position(&self, id: ShapeId) -> Option<Vec3> {
        self.shape(id).map(Shape::position)
    }

    /// Hovered shape, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<ShapeId> {
        self.hovered
    }

    /// Per-frame idle animation.
    pub fn animate(&mut self, elapsed: f32) {
        let (spin, amplitude) = (self.spin_per_frame, self.bob_amplitude);
        for shape in &mut self.shapes {
            shape.animate(elapsed, spin, amplitude);
        }
    }

    /// Nearest visible shape whose bounding sphere `ray` hits.
    #[must_use]
    pub fn pick(&self, ray: &Ray) -> Option<ShapeId> {
        self.shapes
            .iter()
            .filter(|s| s.is_visible())
            .filter_map(|s| {
                ray_sphere(ray, s.position(), s.kind().bounding_radius())
                    .map(|t| (s.id(), t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Move hover to `id`. Returns `true` if the hovered shape changed.
    pub fn set_hovered(&mut self, id: Option<ShapeId>) -> bool {
        let id = id.filter(|&id| self.shape(id).is_some_and(Shape::is_visible));
        if id == self.hovered {
            return false;
        }
        let prev = self.hovered;
        if let Some(prev) = prev.and_then(|prev| self.shape_mut(prev)) {
            prev.set_hovered(false);
        }
        if let Some(next) = id.and_then(|next| self.shape_mut(next)) {
            next.set_hovered(true);
        }
        self.hovered = id;
        true
    }

    /// Set a shape's opacity (clamped to `[0, 1]`). Returns `false` for an
    /// unknown id. Hiding the hovered shape drops the hover.
    pub fn set_opacity(&mut self, id: ShapeId, opacity: f32) -> bool {
        let Some(shape) = self.shape_mut(id) else {
            return false;
        };
        shape.set_opacity(opacity);
        if !shape.is_visible() && self.hovered == Some(id) {
            self.hovered = None;
        }
        true
    }
}
