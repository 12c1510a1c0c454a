//! Frame-rate independent exponential smoothing.
//!
//! `rate` counts half-lives per second: after `1 / rate` seconds the gap to the
//! target has halved, no matter how that time was split into frames.

use glam::Vec3;

/// Base of the decay curve used by [`smoothing_factor`].
pub const DAMP_BASE: f32 = 0.5;

/// Blend factor in `[0, 1)` for a step of `dt` seconds.
#[inline]
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    if dt <= 0.0 || rate <= 0.0 {
        return 0.0;
    }
    1.0 - DAMP_BASE.powf(dt * rate)
}

/// Move `current` toward `target` by the frame-rate independent factor.
#[inline]
pub fn damp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * smoothing_factor(rate, dt)
}

/// Vector form of [`damp`].
#[inline]
pub fn damp_vec3(current: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    current.lerp(target, smoothing_factor(rate, dt))
}
