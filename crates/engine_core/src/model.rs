//! Model handles and the model utility layer.
//!
//! A [`Model`] is the engine-side view of a loaded asset: a root transform and
//! the local bounds of every mesh in its hierarchy. That is all the world
//! builder needs to normalize, ground-snap and clone decorations; vertex data
//! stays with whatever presents the scene.

use glam::Vec3;

use crate::bounds::Aabb;
use crate::transform::Transform;

/// A mesh inside a model hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshNode {
    pub name: String,
    /// Transform relative to the model root (node chain already flattened).
    pub local: Transform,
    /// Bounds in the mesh's own space.
    pub bounds: Aabb,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl MeshNode {
    pub fn new(name: impl Into<String>, local: Transform, bounds: Aabb) -> Self {
        Self {
            name: name.into(),
            local,
            bounds,
            cast_shadow: false,
            receive_shadow: false,
        }
    }
}

/// A placeable model: root transform plus its meshes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    pub name: String,
    pub transform: Transform,
    pub meshes: Vec<MeshNode>,
}

impl Model {
    pub fn new(name: impl Into<String>, meshes: Vec<MeshNode>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            meshes,
        }
    }

    /// A single axis-aligned box of the given size, resting centered on the origin.
    pub fn primitive_box(name: impl Into<String>, size: Vec3) -> Self {
        let name = name.into();
        let mesh = MeshNode::new(
            name.clone(),
            Transform::default(),
            Aabb::from_center_size(Vec3::ZERO, size),
        );
        Self::new(name, vec![mesh])
    }

    /// Cone fuselage plus a box wing, used when the aircraft asset is missing.
    /// The nose points along +Z.
    pub fn placeholder_aircraft() -> Self {
        let fuselage = MeshNode::new(
            "fallback_fuselage",
            Transform::default(),
            Aabb::from_center_size(Vec3::ZERO, Vec3::new(1.2, 1.2, 3.0)),
        );
        let wing = MeshNode::new(
            "fallback_wing",
            Transform::from_position(Vec3::new(0.0, 0.0, -0.2)),
            Aabb::from_center_size(Vec3::ZERO, Vec3::new(4.0, 0.15, 0.8)),
        );
        Self::new("fallback_aircraft", vec![fuselage, wing])
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.iter().all(|m| m.bounds.is_empty())
    }

    /// World-space bounds of every mesh under the current root transform.
    /// Recomputed on every call; nothing is cached.
    pub fn world_bounds(&self) -> Aabb {
        let root = self.transform.to_matrix();
        self.meshes.iter().fold(Aabb::empty(), |acc, mesh| {
            let matrix = root * mesh.local.to_matrix();
            acc.union(&mesh.bounds.transformed(&matrix))
        })
    }
}

/// Uniformly rescale `model` so its longest world-space extent equals `target_longest_axis`.
/// A model with no extent is treated as 1 unit long.
pub fn normalize_scale(model: &mut Model, target_longest_axis: f32) {
    let mut longest = model.world_bounds().longest_axis();
    if longest.is_nan() || longest <= f32::EPSILON {
        longest = 1.0;
    }
    model.transform.scale_by(target_longest_axis / longest);
}

/// Shift `model` vertically so the bottom of its bounds sits at `ground_y`.
/// Call after scaling and after any further transform change.
pub fn snap_to_ground(model: &mut Model, ground_y: f32) {
    let bounds = model.world_bounds();
    let min_y = if bounds.is_empty() {
        model.transform.position.y
    } else {
        bounds.min.y
    };
    model.transform.position.y += ground_y - min_y;
}

/// Mark every mesh as shadow caster and receiver. No-op when shadows are disabled.
pub fn enable_shadows(model: &mut Model, shadows_enabled: bool) {
    if !shadows_enabled {
        return;
    }
    for mesh in &mut model.meshes {
        mesh.cast_shadow = true;
        mesh.receive_shadow = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn house() -> Model {
        let roof = MeshNode::new(
            "roof",
            Transform::from_position(Vec3::new(0.0, 3.0, 0.0)),
            Aabb::from_center_size(Vec3::ZERO, Vec3::new(4.0, 1.0, 5.0)),
        );
        let walls = MeshNode::new(
            "walls",
            Transform::from_position(Vec3::new(0.0, 1.0, 0.0)),
            Aabb::from_center_size(Vec3::ZERO, Vec3::new(3.5, 3.0, 4.5)),
        );
        Model::new("house", vec![walls, roof])
    }

    #[test]
    fn normalize_scale_hits_target_from_any_scale() {
        for start in [0.01, 0.5, 1.0, 7.0, 300.0] {
            let mut m = house();
            m.transform.scale = Vec3::splat(start);
            m.transform.rotation = Quat::from_rotation_y(0.4);
            normalize_scale(&mut m, 12.0);
            let longest = m.world_bounds().longest_axis();
            assert!((longest - 12.0).abs() < 1e-3, "start {start}: got {longest}");
        }
    }

    #[test]
    fn normalize_scale_on_empty_model_uses_unit_extent() {
        let mut m = Model::new("empty", Vec::new());
        normalize_scale(&mut m, 10.0);
        assert_eq!(m.transform.scale, Vec3::splat(10.0));
    }

    #[test]
    fn snap_to_ground_puts_min_y_on_ground() {
        let mut m = house();
        m.transform.position = Vec3::new(5.0, 40.0, -3.0);
        normalize_scale(&mut m, 12.0);
        snap_to_ground(&mut m, -2.0);
        assert!((m.world_bounds().min.y + 2.0).abs() < 1e-4);

        m.transform.scale_by(1.3);
        snap_to_ground(&mut m, -2.0);
        assert!((m.world_bounds().min.y + 2.0).abs() < 1e-4);
    }

    #[test]
    fn snap_to_ground_on_empty_model_moves_origin() {
        let mut m = Model::new("empty", Vec::new());
        m.transform.position.y = 9.0;
        snap_to_ground(&mut m, 1.5);
        assert_eq!(m.transform.position.y, 1.5);
    }

    #[test]
    fn shadows_follow_quality_flag() {
        let mut m = house();
        enable_shadows(&mut m, false);
        assert!(m.meshes.iter().all(|n| !n.cast_shadow && !n.receive_shadow));
        enable_shadows(&mut m, true);
        assert!(m.meshes.iter().all(|n| n.cast_shadow && n.receive_shadow));
    }

    #[test]
    fn placeholder_aircraft_is_longest_along_wing() {
        let plane = Model::placeholder_aircraft();
        let size = plane.world_bounds().size();
        assert!((size.x - 4.0).abs() < 1e-4);
        assert!(!plane.is_empty());
    }
}
