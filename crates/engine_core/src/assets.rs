//! Asset loading: turns a model URL into a [`Model`].
//!
//! Only node transforms and per-primitive bounding boxes are read from glTF
//! files. Vertex and texture decoding belong to the presentation layer.

use std::path::{Path, PathBuf};

use glam::{Mat4, Vec3};
use thiserror::Error;

use crate::bounds::Aabb;
use crate::model::{MeshNode, Model};
use crate::transform::Transform;

/// Why an asset could not be turned into a model.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {url}: {source}")]
    Parse { url: String, source: gltf::Error },
    #[error("{0} contains no meshes")]
    Empty(String),
}

/// Resolves model URLs into models.
#[allow(async_fn_in_trait)]
pub trait AssetLoader {
    async fn load(&self, url: &str) -> Result<Model, AssetError>;
}

/// Loads `.glb` / `.gltf` files relative to a root directory.
#[derive(Debug, Clone)]
pub struct GltfLoader {
    root: PathBuf,
}

impl GltfLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a URL-style path (`./assets/x.glb`, `/assets/x.glb`) onto the root directory.
    pub fn resolve(&self, url: &str) -> PathBuf {
        let relative = url.trim_start_matches("./").trim_start_matches('/');
        self.root.join(Path::new(relative))
    }
}

impl AssetLoader for GltfLoader {
    async fn load(&self, url: &str) -> Result<Model, AssetError> {
        let path = self.resolve(url);
        log::debug!("Loading model {:?}", path);
        let bytes = std::fs::read(&path).map_err(|source| AssetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        model_from_gltf(url, &bytes)
    }
}

/// Build a model from glTF JSON or GLB bytes using the default scene (or the first one).
pub fn model_from_gltf(name: &str, bytes: &[u8]) -> Result<Model, AssetError> {
    let gltf = gltf::Gltf::from_slice(bytes).map_err(|source| AssetError::Parse {
        url: name.to_string(),
        source,
    })?;
    let scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .ok_or_else(|| AssetError::Empty(name.to_string()))?;

    let mut meshes = Vec::new();
    for node in scene.nodes() {
        collect_meshes(&node, Mat4::IDENTITY, &mut meshes);
    }
    if meshes.is_empty() {
        return Err(AssetError::Empty(name.to_string()));
    }
    Ok(Model::new(name, meshes))
}

fn collect_meshes(node: &gltf::Node, parent: Mat4, out: &mut Vec<MeshNode>) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        let bounds = mesh.primitives().fold(Aabb::empty(), |acc, primitive| {
            let bb = primitive.bounding_box();
            acc.union(&Aabb::from_min_max(Vec3::from(bb.min), Vec3::from(bb.max)))
        });
        let name = mesh.name().or(node.name()).unwrap_or("mesh");
        out.push(MeshNode::new(name, Transform::from_matrix(world), bounds));
    }
    for child in node.children() {
        collect_meshes(&child, world, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_NODE_SCENE: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [ { "nodes": [0] } ],
        "nodes": [
            { "mesh": 0, "translation": [0.0, 2.0, 0.0], "children": [1] },
            { "mesh": 0, "scale": [2.0, 2.0, 2.0] }
        ],
        "meshes": [ { "name": "crate", "primitives": [ { "attributes": { "POSITION": 0 } } ] } ],
        "accessors": [
            { "componentType": 5126, "count": 3, "type": "VEC3",
              "min": [-1.0, -1.0, -1.0], "max": [1.0, 1.0, 1.0] }
        ]
    }"#;

    #[test]
    fn gltf_hierarchy_is_flattened() {
        let model = model_from_gltf("crate.gltf", TWO_NODE_SCENE.as_bytes()).unwrap();
        assert_eq!(model.meshes.len(), 2);
        let bounds = model.world_bounds();
        assert!((bounds.min.y - 0.0).abs() < 1e-4);
        assert!((bounds.max.y - 4.0).abs() < 1e-4);
        assert!((bounds.longest_axis() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        let err = model_from_gltf("bad.glb", b"not a model").unwrap_err();
        assert!(matches!(err, AssetError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let loader = GltfLoader::new("/nonexistent-skyhop-root");
        let err = pollster::block_on(loader.load("./assets/models/plane.glb")).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
        assert!(err.to_string().contains("plane.glb"));
    }

    #[test]
    fn resolve_strips_url_prefixes() {
        let loader = GltfLoader::new("/srv/game");
        assert_eq!(
            loader.resolve("/assets/models/tree.glb"),
            PathBuf::from("/srv/game/assets/models/tree.glb")
        );
        assert_eq!(
            loader.resolve("./assets/models/tree.glb"),
            PathBuf::from("/srv/game/assets/models/tree.glb")
        );
    }
}
