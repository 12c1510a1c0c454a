//! Map layout persistence: decoration transforms saved wholesale as JSON under a fixed key.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use engine_core::Model;
use glam::{EulerRot, Quat, Vec3};
use hecs::{Entity, World};
use procgen::Decoration;
use serde::{Deserialize, Serialize};

/// Storage key; the save file is `<key>.json`.
pub const MAP_KEY: &str = "heli_map_v1";
pub const MAP_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for Vector3 {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vector3> for Vec3 {
    fn from(v: Vector3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

/// One decoration's transform. `rotation` holds XYZ Euler angles in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub position: Vector3,
    pub rotation: Vector3,
    pub scale: Vector3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub version: u32,
    #[serde(default)]
    pub items: Vec<MapItem>,
}

impl MapSnapshot {
    /// Capture every decoration in placement order.
    pub fn capture(world: &World) -> Self {
        let items = decorations_in_order(world)
            .into_iter()
            .filter_map(|entity| {
                let model = world.get::<&Model>(entity).ok()?;
                let deco = world.get::<&Decoration>(entity).ok()?;
                let (rx, ry, rz) = model.transform.rotation.to_euler(EulerRot::XYZ);
                Some(MapItem {
                    kind: deco.kind.name().to_string(),
                    name: format!("{}_{}", deco.kind.name(), deco.index),
                    position: model.transform.position.into(),
                    rotation: Vec3::new(rx, ry, rz).into(),
                    scale: model.transform.scale.into(),
                })
            })
            .collect();
        Self {
            version: MAP_VERSION,
            items,
        }
    }

    /// Write item transforms onto the decorations, pairing them up by order.
    /// Extra items or extra decorations are left alone. Returns how many were applied.
    pub fn apply(&self, world: &mut World) -> Result<usize> {
        if self.version != MAP_VERSION {
            bail!("unsupported map version {} (expected {})", self.version, MAP_VERSION);
        }
        let targets = decorations_in_order(world);
        let mut applied = 0;
        for (entity, item) in targets.into_iter().zip(&self.items) {
            if let Ok(mut model) = world.get::<&mut Model>(entity) {
                model.transform.position = item.position.into();
                model.transform.rotation = Quat::from_euler(
                    EulerRot::XYZ,
                    item.rotation.x,
                    item.rotation.y,
                    item.rotation.z,
                );
                model.transform.scale = item.scale.into();
                applied += 1;
            }
        }
        Ok(applied)
    }
}

/// Decoration entities sorted by category, then by index within the category.
fn decorations_in_order(world: &World) -> Vec<Entity> {
    let mut found: Vec<(u8, u32, Entity)> = world
        .query::<&Decoration>()
        .iter()
        .map(|(entity, deco)| (deco.kind as u8, deco.index, entity))
        .collect();
    found.sort_by_key(|(kind, index, _)| (*kind, *index));
    found.into_iter().map(|(_, _, entity)| entity).collect()
}

/// JSON file store keyed by name.
#[derive(Debug, Clone)]
pub struct MapStore {
    dir: PathBuf,
    key: String,
}

impl MapStore {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    /// Store under the fixed key in the current directory.
    pub fn in_current_dir() -> Self {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(dir, MAP_KEY)
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    pub fn save(&self, snapshot: &MapSnapshot) -> Result<()> {
        let path = self.path();
        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Saved {} map item(s) to {}", snapshot.items.len(), path.display());
        Ok(())
    }

    /// `Ok(None)` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<MapSnapshot>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        read_snapshot(&path).map(Some)
    }
}

fn read_snapshot(path: &Path) -> Result<MapSnapshot> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let snapshot = serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(snapshot)
}
