//! Aircraft state and per-frame integration.
//!
//! Grounded and airborne are not separate states: the aircraft is on the
//! ground whenever its altitude sits on the clearance floor. Below takeoff
//! speed the vertical target is a sink rate, so the floor clamp holds it down;
//! above takeoff speed lift pushes the target positive and it leaves the floor.

use std::f32::consts::{PI, TAU};

use engine_core::{damp, Transform};
use glam::{Quat, Vec3};
use input::ControlVector;

use crate::config::FlightConfig;

/// Nose direction in the aircraft's local frame.
pub const NOSE: Vec3 = Vec3::Z;

/// Altitude above the floor that counts as airborne.
const AIRBORNE_EPSILON: f32 = 0.01;

/// Wrap an angle to `[-PI, PI)`.
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Arcade aircraft. Owned by the simulation and mutated once per frame.
#[derive(Debug, Clone)]
pub struct Aircraft {
    pub config: FlightConfig,
    pub position: Vec3,
    /// Heading about world Y, wrapped to `[-PI, PI)`.
    pub yaw: f32,
    /// Cosmetic nose pitch derived from the flight path.
    pub pitch: f32,
    /// Roll about the nose; follows yaw input.
    pub bank: f32,
    /// Forward speed, always within `[0, max_speed]`.
    pub speed: f32,
    pub vertical_speed: f32,
    /// Height above ground, within `[min_clearance(bank), max_altitude]`.
    pub altitude: f32,
    /// Seconds until another edge bounce may trigger.
    pub bounce_cooldown: f32,
}

impl Aircraft {
    /// Parked at `position` (x/z used; y follows ground + altitude).
    pub fn new(config: FlightConfig, position: Vec3, ground_y: f32) -> Self {
        let altitude = config.min_clearance(0.0);
        Self {
            position: Vec3::new(position.x, ground_y + altitude, position.z),
            yaw: 0.0,
            pitch: 0.0,
            bank: 0.0,
            speed: 0.0,
            vertical_speed: 0.0,
            altitude,
            bounce_cooldown: 0.0,
            config,
        }
    }

    /// Orientation: yaw about Y, then pitch about X, then bank about the nose.
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
            * Quat::from_rotation_x(self.pitch)
            * Quat::from_rotation_z(self.bank)
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation() * NOSE
    }

    pub fn transform(&self) -> Transform {
        Transform::from_position_rotation(self.position, self.orientation())
    }

    /// Fraction of max speed in `[0, 1]`.
    pub fn speed_fraction(&self) -> f32 {
        (self.speed / self.config.max_speed).clamp(0.0, 1.0)
    }

    pub fn min_clearance(&self) -> f32 {
        self.config.min_clearance(self.bank)
    }

    pub fn is_airborne(&self) -> bool {
        self.altitude > self.min_clearance() + AIRBORNE_EPSILON
    }

    /// Advance one frame. `dt` is clamped to `[0, max_dt]`.
    pub fn update(&mut self, dt: f32, controls: &ControlVector, ground_y: f32) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.max_dt)
        } else {
            0.0
        };
        let yaw_input = controls.yaw.clamp(-1.0, 1.0);

        self.integrate_speed(dt, controls);
        self.integrate_heading(dt, yaw_input);

        let target = self.vertical_speed_target(controls.climb);
        self.vertical_speed = damp(self.vertical_speed, target, self.config.v_damp, dt);
        self.integrate_altitude(dt);

        let flight_path = self.vertical_speed.atan2(self.speed.max(1.0));
        self.pitch = (-flight_path * self.config.pitch_gain)
            .clamp(-self.config.pitch_max, self.config.pitch_max);

        self.position += self.forward() * self.speed * dt;

        self.bounce_cooldown = (self.bounce_cooldown - dt).max(0.0);
        self.handle_world_bounds();

        self.position.y = ground_y + self.altitude;
    }

    fn integrate_speed(&mut self, dt: f32, controls: &ControlVector) {
        let cfg = &self.config;
        if controls.throttle {
            let boost = if controls.boost { cfg.boost_multiplier } else { 1.0 };
            self.speed += cfg.accel * boost * dt;
        } else {
            self.speed -= cfg.drag * dt;
        }
        if controls.brake {
            self.speed -= cfg.brake * dt;
        }
        self.speed = self.speed.clamp(0.0, cfg.max_speed);
    }

    fn integrate_heading(&mut self, dt: f32, yaw_input: f32) {
        let cfg = &self.config;
        self.yaw = wrap_angle(self.yaw + yaw_input * cfg.yaw_rate * dt);
        let target_bank = (-yaw_input * cfg.bank_gain).clamp(-cfg.bank_max, cfg.bank_max);
        self.bank = damp(self.bank, target_bank, cfg.bank_smooth, dt);
    }

    /// Vertical speed the aircraft is easing toward at its current speed.
    ///
    /// Below takeoff speed the target is a sink rate, amplified below stall
    /// speed, and climb input has no authority. Above it, lift and climb input
    /// both ramp in with the speed margin.
    pub fn vertical_speed_target(&self, climb: bool) -> f32 {
        let cfg = &self.config;

        if self.speed < cfg.takeoff_speed {
            let deficit = if cfg.takeoff_speed > 0.0 {
                1.0 - self.speed / cfg.takeoff_speed
            } else {
                0.0
            };
            let mut descent = cfg.descent_min + (cfg.descent_max - cfg.descent_min) * deficit;
            if self.speed < cfg.stall_speed {
                descent *= cfg.stall_factor;
            }
            return -descent;
        }

        let margin = self.speed - cfg.takeoff_speed;
        let span = (cfg.max_speed - cfg.takeoff_speed).max(f32::EPSILON);
        let mut target = cfg.lift_rate * (margin / span).clamp(0.0, 1.0);
        if climb {
            target += cfg.climb_rate * (margin / cfg.climb_ramp.max(f32::EPSILON)).clamp(0.0, 1.0);
        }
        target
    }

    fn integrate_altitude(&mut self, dt: f32) {
        self.altitude += self.vertical_speed * dt;
        let floor = self.min_clearance();
        if self.altitude <= floor {
            self.altitude = floor;
            self.vertical_speed = self.vertical_speed.max(0.0);
        } else if self.altitude >= self.config.max_altitude {
            self.altitude = self.config.max_altitude;
            self.vertical_speed = self.vertical_speed.min(0.0);
        }
    }

    /// Keep the aircraft inside the world square. On leaving it, the position
    /// is clamped and, unless a bounce is cooling down, the heading flips and
    /// speed drops. Returns true when a bounce triggered.
    pub fn handle_world_bounds(&mut self) -> bool {
        let bound = self.config.bound();
        let clamped_x = self.position.x.clamp(-bound, bound);
        let clamped_z = self.position.z.clamp(-bound, bound);
        let outside = clamped_x != self.position.x || clamped_z != self.position.z;
        if !outside {
            return false;
        }

        self.position.x = clamped_x;
        self.position.z = clamped_z;

        if self.bounce_cooldown > 0.0 {
            return false;
        }

        self.yaw = wrap_angle(self.yaw + PI);
        self.speed *= self.config.bounce_speed_factor;
        self.bounce_cooldown = self.config.bounce_cooldown;
        log::debug!(
            "World edge bounce at ({:.1}, {:.1}), speed now {:.1}",
            self.position.x,
            self.position.z,
            self.speed
        );
        true
    }
}
