//! Decoration tables: what goes into the world and where.

use std::f32::consts::TAU;

/// Decoration categories. Each loads one base model that is cloned per placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    House,
    Tree,
    Billboard,
}

impl DecorationKind {
    pub fn name(&self) -> &'static str {
        match self {
            DecorationKind::House => "house",
            DecorationKind::Tree => "tree",
            DecorationKind::Billboard => "billboard",
        }
    }

    /// Model path relative to the asset base.
    pub fn model_path(&self) -> &'static str {
        match self {
            DecorationKind::House => "assets/models/house.glb",
            DecorationKind::Tree => "assets/models/tree.glb",
            DecorationKind::Billboard => "assets/models/billboard.glb",
        }
    }

    /// Longest-axis size (m) the base model is normalized to.
    pub fn target_size(&self) -> f32 {
        match self {
            DecorationKind::House => 12.0,
            DecorationKind::Tree => 10.0,
            DecorationKind::Billboard => 40.0,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "house" => Some(DecorationKind::House),
            "tree" => Some(DecorationKind::Tree),
            "billboard" => Some(DecorationKind::Billboard),
            _ => None,
        }
    }
}

/// One fixed placement on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub z: f32,
    pub rotation_y: f32,
    /// Multiplier on top of the normalized size.
    pub scale: f32,
}

impl Placement {
    pub const fn new(x: f32, z: f32, rotation_y: f32, scale: f32) -> Self {
        Self {
            x,
            z,
            rotation_y,
            scale,
        }
    }
}

/// Random scatter rule. Positions are uniform in `[-area, area]²` and kept
/// outside `exclude_radius` of the origin when the retry budget allows.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterRule {
    pub area: f32,
    pub count_min: u32,
    pub count_max: u32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub exclude_radius: f32,
    /// Samples drawn per item before the last one is accepted anyway.
    pub max_attempts: u32,
    /// Rotation is uniform in `[0, max_rotation)`.
    pub max_rotation: f32,
}

impl Default for ScatterRule {
    fn default() -> Self {
        Self {
            area: 300.0,
            count_min: 18,
            count_max: 18,
            min_scale: 0.85,
            max_scale: 1.25,
            exclude_radius: 40.0,
            max_attempts: 30,
            max_rotation: TAU,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    Fixed(Vec<Placement>),
    Scatter(ScatterRule),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecorationCategory {
    pub kind: DecorationKind,
    pub target_size: f32,
    pub layout: Layout,
}

impl DecorationCategory {
    pub fn fixed(kind: DecorationKind, placements: &[Placement]) -> Self {
        Self {
            kind,
            target_size: kind.target_size(),
            layout: Layout::Fixed(placements.to_vec()),
        }
    }

    pub fn scatter(kind: DecorationKind, rule: ScatterRule) -> Self {
        Self {
            kind,
            target_size: kind.target_size(),
            layout: Layout::Scatter(rule),
        }
    }
}

pub const FIXED_HOUSES: [Placement; 2] = [
    Placement::new(-220.0, -140.0, 0.6, 1.0),
    Placement::new(200.0, 160.0, -1.2, 1.0),
];

pub const FIXED_BILLBOARDS: [Placement; 22] = [
    Placement::new(-320.0, 320.0, 0.3, 1.0),
    Placement::new(-210.0, 290.0, -0.2, 1.0),
    Placement::new(-90.0, 250.0, 0.7, 1.0),
    Placement::new(60.0, 320.0, -0.2, 1.0),
    Placement::new(250.0, 290.0, 0.4, 1.0),
    Placement::new(-60.0, 170.0, 0.2, 1.0),
    Placement::new(50.0, 140.0, -0.6, 1.0),
    Placement::new(150.0, 210.0, 0.9, 1.0),
    Placement::new(120.0, 30.0, 0.4, 1.3),
    Placement::new(-20.0, 20.0, -0.2, 1.0),
    Placement::new(-140.0, 70.0, 0.7, 1.0),
    Placement::new(-220.0, 120.0, -0.5, 1.0),
    Placement::new(-70.0, -40.0, 0.1, 1.0),
    Placement::new(40.0, -90.0, -0.4, 1.0),
    Placement::new(150.0, -40.0, 0.5, 1.0),
    Placement::new(-180.0, -120.0, 0.9, 1.0),
    Placement::new(-320.0, -220.0, 0.2, 1.0),
    Placement::new(-240.0, -280.0, -0.1, 1.0),
    Placement::new(-120.0, -300.0, 0.6, 1.0),
    Placement::new(10.0, -320.0, -0.3, 1.0),
    Placement::new(140.0, -290.0, 0.2, 1.0),
    Placement::new(260.0, -260.0, -0.4, 1.0),
];

/// Houses and billboards at fixed spots, trees scattered around the runway.
pub fn default_categories() -> Vec<DecorationCategory> {
    vec![
        DecorationCategory::fixed(DecorationKind::House, &FIXED_HOUSES),
        DecorationCategory::scatter(DecorationKind::Tree, ScatterRule::default()),
        DecorationCategory::fixed(DecorationKind::Billboard, &FIXED_BILLBOARDS),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip() {
        for kind in [DecorationKind::House, DecorationKind::Tree, DecorationKind::Billboard] {
            assert_eq!(DecorationKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(DecorationKind::from_name("windmill"), None);
    }

    #[test]
    fn fixed_placements_stay_inside_the_ground_plane() {
        for p in FIXED_HOUSES.iter().chain(FIXED_BILLBOARDS.iter()) {
            assert!(p.x.abs() <= 350.0 && p.z.abs() <= 350.0);
            assert!(p.scale > 0.0);
        }
    }
}
