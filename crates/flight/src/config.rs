//! Flight tuning. Each historical feel of the game is just a different set of these numbers.

use serde::{Deserialize, Serialize};

/// Tunable constants for [`crate::Aircraft`]. Speeds in m/s, angles in radians,
/// smoothing rates in half-lives per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    pub max_speed: f32,
    /// Throttle acceleration (m/s²).
    pub accel: f32,
    /// Extra deceleration while braking (m/s²).
    pub brake: f32,
    /// Deceleration with throttle released (m/s²).
    pub drag: f32,
    /// Above this speed lift wins over descent.
    pub takeoff_speed: f32,
    /// Below this speed descent is amplified by `stall_factor`.
    pub stall_speed: f32,
    /// Yaw rate at full stick (rad/s).
    pub yaw_rate: f32,
    pub bank_max: f32,
    /// Bank angle per unit of yaw input.
    pub bank_gain: f32,
    pub bank_smooth: f32,
    /// Smoothing rate of vertical speed toward its target.
    pub v_damp: f32,
    pub boost_multiplier: f32,
    /// Vertical speed target while climb is held, once past `climb_ramp`.
    pub climb_rate: f32,
    /// Speed above takeoff (m/s) over which climb input reaches full authority.
    pub climb_ramp: f32,
    /// Extra climb at full speed with no input.
    pub lift_rate: f32,
    /// Sink rate just below takeoff speed.
    pub descent_min: f32,
    /// Sink rate at a standstill.
    pub descent_max: f32,
    pub stall_factor: f32,
    /// Altitude floor with wings level.
    pub ground_clearance: f32,
    /// Additional floor per radian of bank (wingtip clearance).
    pub bank_clearance: f32,
    pub max_altitude: f32,
    /// Nose pitch per radian of flight path angle (cosmetic).
    pub pitch_gain: f32,
    pub pitch_max: f32,
    /// Half size of the square world on X and Z.
    pub world_half_extent: f32,
    /// Inward margin from the world edge where the bounce happens.
    pub world_margin: f32,
    /// Seconds before another bounce may trigger.
    pub bounce_cooldown: f32,
    /// Speed multiplier applied on bounce.
    pub bounce_speed_factor: f32,
    /// Largest time step integrated at once (s).
    pub max_dt: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            max_speed: 60.0,
            accel: 14.0,
            brake: 20.0,
            drag: 5.0,
            takeoff_speed: 24.0,
            stall_speed: 16.0,
            yaw_rate: 1.1,
            bank_max: 0.7,
            bank_gain: 0.7,
            bank_smooth: 6.0,
            v_damp: 3.0,
            boost_multiplier: 1.8,
            climb_rate: 12.0,
            climb_ramp: 6.0,
            lift_rate: 4.0,
            descent_min: 2.0,
            descent_max: 14.0,
            stall_factor: 1.6,
            ground_clearance: 0.0,
            bank_clearance: 1.5,
            max_altitude: 120.0,
            pitch_gain: 1.0,
            pitch_max: 0.35,
            world_half_extent: 350.0,
            world_margin: 20.0,
            bounce_cooldown: 0.75,
            bounce_speed_factor: 0.5,
            max_dt: engine_core::DEFAULT_MAX_DELTA,
        }
    }
}

impl FlightConfig {
    /// Coordinate limit on X and Z after the inward margin.
    pub fn bound(&self) -> f32 {
        (self.world_half_extent - self.world_margin).max(0.0)
    }

    /// Altitude floor for a bank angle; non-decreasing in `|bank|`.
    pub fn min_clearance(&self, bank: f32) -> f32 {
        (self.ground_clearance + self.bank_clearance * bank.abs()).min(self.max_altitude)
    }

    /// Repair inconsistent tunings (typically from a hand-edited config file).
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.max_speed.is_nan() || self.max_speed <= 0.0 {
            log::warn!("max_speed {} is not positive, using {}", self.max_speed, defaults.max_speed);
            self.max_speed = defaults.max_speed;
        }
        if self.takeoff_speed > self.max_speed {
            log::warn!("takeoff_speed above max_speed, clamping");
            self.takeoff_speed = self.max_speed;
        }
        if self.stall_speed > self.takeoff_speed {
            log::warn!("stall_speed above takeoff_speed, clamping");
            self.stall_speed = self.takeoff_speed;
        }
        self.descent_min = self.descent_min.max(0.0);
        if self.descent_max < self.descent_min {
            log::warn!("descent_max below descent_min, raising it");
            self.descent_max = self.descent_min;
        }
        if self.climb_ramp.is_nan() || self.climb_ramp <= 0.0 {
            self.climb_ramp = defaults.climb_ramp;
        }
        if self.stall_factor < 1.0 {
            self.stall_factor = 1.0;
        }
        if self.max_altitude < self.ground_clearance {
            self.max_altitude = self.ground_clearance;
        }
        self.bank_max = self.bank_max.abs();
        self.bank_clearance = self.bank_clearance.max(0.0);
        self.bounce_speed_factor = self.bounce_speed_factor.clamp(0.0, 1.0);
        self.max_dt = self.max_dt.max(0.0);
        self
    }
}
