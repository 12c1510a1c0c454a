//! Chase camera: trails the aircraft with smoothed lag instead of a rigid mount.

use engine_core::damp_vec3;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;

/// Chase camera tuning. Offsets are in the aircraft's local frame (nose = +Z).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaseConfig {
    /// Distance behind the aircraft at a standstill.
    pub slow_distance: f32,
    /// Distance behind the aircraft at max speed.
    pub fast_distance: f32,
    pub slow_height: f32,
    pub fast_height: f32,
    /// How far ahead of the nose the camera aims.
    pub look_ahead: f32,
    pub look_up: f32,
    /// Position smoothing, half-lives per second.
    pub follow_rate: f32,
    /// Look target smoothing, half-lives per second.
    pub look_rate: f32,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            slow_distance: 14.0,
            fast_distance: 22.0,
            slow_height: 5.0,
            fast_height: 7.0,
            look_ahead: 10.0,
            look_up: 2.0,
            follow_rate: 4.0,
            look_rate: 6.0,
        }
    }
}

/// Smoothed camera position and look target.
#[derive(Debug, Clone)]
pub struct ChaseCamera {
    pub config: ChaseConfig,
    pub position: Vec3,
    pub look_target: Vec3,
}

impl ChaseCamera {
    pub fn new(config: ChaseConfig) -> Self {
        Self {
            config,
            position: Vec3::ZERO,
            look_target: Vec3::Z,
        }
    }

    /// Desired (position, look target) for the aircraft's pose. Both offsets
    /// scale between their slow and fast values with `speed_fraction`.
    pub fn desired(&self, target_pos: Vec3, target_rot: Quat, speed_fraction: f32) -> (Vec3, Vec3) {
        let cfg = &self.config;
        let t = speed_fraction.clamp(0.0, 1.0);
        let distance = cfg.slow_distance + (cfg.fast_distance - cfg.slow_distance) * t;
        let height = cfg.slow_height + (cfg.fast_height - cfg.slow_height) * t;

        let eye = target_pos + target_rot * Vec3::new(0.0, height, -distance);
        let look = target_pos + target_rot * Vec3::new(0.0, cfg.look_up, cfg.look_ahead);
        (eye, look)
    }

    /// Jump straight to the desired pose (spawn, respawn).
    pub fn snap(&mut self, target_pos: Vec3, target_rot: Quat, speed_fraction: f32) {
        let (eye, look) = self.desired(target_pos, target_rot, speed_fraction);
        self.position = eye;
        self.look_target = look;
    }

    /// Ease toward the desired pose; frame-rate independent.
    pub fn update(&mut self, dt: f32, target_pos: Vec3, target_rot: Quat, speed_fraction: f32) {
        let (eye, look) = self.desired(target_pos, target_rot, speed_fraction);
        self.position = damp_vec3(self.position, eye, self.config.follow_rate, dt);
        self.look_target = damp_vec3(self.look_target, look, self.config.look_rate, dt);
    }

    /// Write the smoothed pose into a render camera.
    pub fn apply(&self, camera: &mut Camera) {
        camera.set_look(self.position, self.look_target);
    }
}
