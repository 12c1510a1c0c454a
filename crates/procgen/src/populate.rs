//! World population: loads one base model per decoration category and spawns
//! normalized, ground-snapped clones into the scene.

use engine_core::{enable_shadows, normalize_scale, snap_to_ground, AssetLoader, Model, Transform};
use glam::Vec3;
use hecs::World;
use rand::Rng;

use crate::decorations::{default_categories, DecorationCategory, DecorationKind, Layout, Placement};
use crate::progress::LoadProgress;
use crate::scatter::scatter_placements;

/// Tags a spawned decoration. `index` counts placements within its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub index: u32,
}

/// The flat ground plane decorations stand on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ground {
    /// Side length (m) of the square plane.
    pub size: f32,
}

pub const DEFAULT_GROUND_SIZE: f32 = 700.0;

/// A category whose base model could not be loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFailure {
    pub kind: DecorationKind,
    pub url: String,
    pub reason: String,
}

/// What a populate pass produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulateReport {
    pub spawned: usize,
    pub failures: Vec<CategoryFailure>,
}

pub struct WorldPopulator {
    pub categories: Vec<DecorationCategory>,
    pub ground_size: f32,
    pub shadows_enabled: bool,
}

impl Default for WorldPopulator {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            ground_size: DEFAULT_GROUND_SIZE,
            shadows_enabled: true,
        }
    }
}

impl WorldPopulator {
    pub fn new(categories: Vec<DecorationCategory>, shadows_enabled: bool) -> Self {
        Self {
            categories,
            shadows_enabled,
            ..Default::default()
        }
    }

    /// Spawn the ground plane and every category that loads.
    ///
    /// Categories are awaited one after another. A failed load is logged,
    /// recorded in the report and skipped; later categories still run.
    pub async fn populate<L: AssetLoader, R: Rng + ?Sized>(
        &self,
        scene: &mut World,
        loader: &L,
        ground_y: f32,
        asset_base: &str,
        rng: &mut R,
        progress: &mut LoadProgress,
    ) -> PopulateReport {
        let mut report = PopulateReport::default();

        scene.spawn((
            Ground {
                size: self.ground_size,
            },
            Transform::from_position(Vec3::new(0.0, ground_y, 0.0)),
        ));

        progress.expect(self.categories.len() as u32);

        for category in &self.categories {
            let url = asset_url(asset_base, category.kind.model_path());
            let mut base = match loader.load(&url).await {
                Ok(model) => model,
                Err(e) => {
                    log::warn!("Skipping {} decorations: {}", category.kind.name(), e);
                    progress.fail();
                    report.failures.push(CategoryFailure {
                        kind: category.kind,
                        url,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            enable_shadows(&mut base, self.shadows_enabled);
            normalize_scale(&mut base, category.target_size);
            snap_to_ground(&mut base, ground_y);

            let placements = self.placements(category, rng);
            let count = placements.len();
            for (index, placement) in placements.into_iter().enumerate() {
                let model = place_clone(&base, &placement, ground_y);
                scene.spawn((
                    model,
                    Decoration {
                        kind: category.kind,
                        index: index as u32,
                    },
                ));
            }
            report.spawned += count;
            progress.complete();
            log::info!("Placed {} {} decoration(s)", count, category.kind.name());
        }

        report
    }

    fn placements<R: Rng + ?Sized>(&self, category: &DecorationCategory, rng: &mut R) -> Vec<Placement> {
        match &category.layout {
            Layout::Fixed(list) => list.clone(),
            Layout::Scatter(rule) => {
                let samples = scatter_placements(rule, rng);
                let exhausted = samples.iter().filter(|s| s.exhausted).count();
                if exhausted > 0 {
                    log::debug!(
                        "{} {} placement(s) ended inside the exclusion radius",
                        exhausted,
                        category.kind.name()
                    );
                }
                samples
                    .into_iter()
                    .map(|s| Placement::new(s.position.x, s.position.y, s.rotation_y, s.scale))
                    .collect()
            }
        }
    }
}

/// Clone the prepared base and move it onto its placement.
pub fn place_clone(base: &Model, placement: &Placement, ground_y: f32) -> Model {
    let mut model = base.clone();
    model.transform.position.x = placement.x;
    model.transform.position.z = placement.z;
    model.transform.set_yaw(placement.rotation_y);
    model.transform.scale_by(placement.scale);
    snap_to_ground(&mut model, ground_y);
    model
}

/// Join an asset base (`""`, `"."`, `"https://host/game/"`) with a relative model path.
pub fn asset_url(asset_base: &str, path: &str) -> String {
    let base = asset_base.trim_end_matches('/');
    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::AssetError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Serves unit boxes, except for URLs containing `missing`.
    struct FakeLoader {
        missing: &'static str,
    }

    impl AssetLoader for FakeLoader {
        async fn load(&self, url: &str) -> Result<Model, AssetError> {
            if !self.missing.is_empty() && url.contains(self.missing) {
                return Err(AssetError::Empty(url.to_string()));
            }
            Ok(Model::primitive_box(url, Vec3::new(1.0, 2.0, 1.0)))
        }
    }

    fn run(loader: &FakeLoader, seed: u64) -> (World, PopulateReport, LoadProgress) {
        let mut scene = World::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut progress = LoadProgress::new();
        let report = pollster::block_on(WorldPopulator::default().populate(
            &mut scene,
            loader,
            0.0,
            "",
            &mut rng,
            &mut progress,
        ));
        (scene, report, progress)
    }

    fn count(scene: &World, kind: DecorationKind) -> usize {
        scene
            .query::<&Decoration>()
            .iter()
            .filter(|(_, d)| d.kind == kind)
            .count()
    }

    #[test]
    fn populates_every_category() {
        let (scene, report, progress) = run(&FakeLoader { missing: "" }, 3);
        assert!(report.failures.is_empty());
        assert_eq!(count(&scene, DecorationKind::House), 2);
        assert_eq!(count(&scene, DecorationKind::Tree), 18);
        assert_eq!(count(&scene, DecorationKind::Billboard), 22);
        assert_eq!(report.spawned, 42);
        assert_eq!(scene.query::<&Ground>().iter().count(), 1);
        assert!(progress.is_done());
        assert_eq!(progress.completed, 3);
    }

    #[test]
    fn failed_category_does_not_block_others() {
        let (scene, report, progress) = run(&FakeLoader { missing: "tree" }, 3);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].kind, DecorationKind::Tree);
        assert_eq!(count(&scene, DecorationKind::Tree), 0);
        assert_eq!(count(&scene, DecorationKind::House), 2);
        assert_eq!(count(&scene, DecorationKind::Billboard), 22);
        assert!(progress.is_done());
        assert_eq!(progress.failed, 1);
    }

    #[test]
    fn decorations_stand_on_the_ground() {
        let (scene, _, _) = run(&FakeLoader { missing: "" }, 11);
        for (_, (model, deco)) in scene.query::<(&Model, &Decoration)>().iter() {
            let bounds = model.world_bounds();
            assert!(bounds.min.y.abs() < 1e-3, "{:?} floats at {}", deco, bounds.min.y);
        }
    }

    #[test]
    fn houses_are_normalized_to_target_size() {
        let (scene, _, _) = run(&FakeLoader { missing: "" }, 5);
        for (_, (model, deco)) in scene.query::<(&Model, &Decoration)>().iter() {
            if deco.kind == DecorationKind::House {
                let longest = model.world_bounds().longest_axis();
                assert!((longest - 12.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn same_seed_same_world() {
        let loader = FakeLoader { missing: "" };
        let positions = |scene: &World| {
            let mut v: Vec<(u32, [f32; 3])> = scene
                .query::<(&Model, &Decoration)>()
                .iter()
                .filter(|(_, (_, d))| d.kind == DecorationKind::Tree)
                .map(|(_, (m, d))| (d.index, m.transform.position.to_array()))
                .collect();
            v.sort_by_key(|(i, _)| *i);
            v
        };
        let (a, _, _) = run(&loader, 99);
        let (b, _, _) = run(&loader, 99);
        assert_eq!(positions(&a), positions(&b));
    }

    #[test]
    fn asset_url_joins_cleanly() {
        assert_eq!(asset_url("", "assets/models/tree.glb"), "assets/models/tree.glb");
        assert_eq!(asset_url("https://x.io/game/", "a.glb"), "https://x.io/game/a.glb");
        assert_eq!(asset_url(".", "a.glb"), "./a.glb");
    }
}
