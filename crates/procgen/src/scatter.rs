//! Random scatter with a bounded retry budget.
//!
//! Each item re-samples its position until it lands outside the exclusion
//! radius. If the budget runs out the last sample is used anyway, so a rule
//! whose area is mostly excluded still yields `count` items.

use glam::Vec2;
use rand::Rng;

use crate::decorations::ScatterRule;

/// One scattered item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterSample {
    /// Ground position (x, z).
    pub position: Vec2,
    pub rotation_y: f32,
    pub scale: f32,
    /// Position samples drawn for this item.
    pub attempts: u32,
    /// True when every attempt fell inside the exclusion radius.
    pub exhausted: bool,
}

/// Generate the items for one rule.
pub fn scatter_placements<R: Rng + ?Sized>(rule: &ScatterRule, rng: &mut R) -> Vec<ScatterSample> {
    let (count_lo, count_hi) = ordered(rule.count_min, rule.count_max);
    let count = rng.gen_range(count_lo..=count_hi);
    let (scale_lo, scale_hi) = ordered(rule.min_scale, rule.max_scale);

    (0..count)
        .map(|_| {
            let (position, attempts, exhausted) = sample_outside(rule, rng);
            let rotation_y = if rule.max_rotation > 0.0 {
                rng.gen_range(0.0..rule.max_rotation)
            } else {
                0.0
            };
            let scale = rng.gen_range(scale_lo..=scale_hi);
            ScatterSample {
                position,
                rotation_y,
                scale,
                attempts,
                exhausted,
            }
        })
        .collect()
}

fn sample_outside<R: Rng + ?Sized>(rule: &ScatterRule, rng: &mut R) -> (Vec2, u32, bool) {
    let area = rule.area.abs();
    let max_attempts = rule.max_attempts.max(1);
    let mut position = Vec2::ZERO;
    for attempt in 1..=max_attempts {
        position = Vec2::new(rng.gen_range(-area..=area), rng.gen_range(-area..=area));
        if position.length() >= rule.exclude_radius {
            return (position, attempt, false);
        }
    }
    (position, max_attempts, true)
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
