//! Per-frame flight simulation: aircraft, chase camera and elapsed flight time.

use flight::{Aircraft, FlightConfig};
use glam::Vec3;
use input::ControlVector;
use view::{Camera, ChaseCamera, ChaseConfig, QualityProfile};

/// Everything the renderer and HUD read after a step.
#[derive(Debug, Clone)]
pub struct GameState {
    pub aircraft: Aircraft,
    pub chase: ChaseCamera,
    pub camera: Camera,
    /// Simulated seconds (sum of clamped frame deltas).
    pub elapsed: f32,
    pub ground_y: f32,
}

/// Owns the game state and advances it one frame at a time.
pub struct Simulation {
    state: GameState,
}

impl Simulation {
    /// Aircraft parked at `spawn` with the camera snapped behind it.
    pub fn new(flight: FlightConfig, chase: ChaseConfig, spawn: Vec3, ground_y: f32) -> Self {
        let aircraft = Aircraft::new(flight, spawn, ground_y);
        let mut chase = ChaseCamera::new(chase);
        chase.snap(aircraft.position, aircraft.orientation(), aircraft.speed_fraction());
        let mut camera = Camera::default();
        chase.apply(&mut camera);
        Self {
            state: GameState {
                aircraft,
                chase,
                camera,
                elapsed: 0.0,
                ground_y,
            },
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn apply_quality(&mut self, quality: &QualityProfile) {
        self.state.camera.apply_quality(quality);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.state.camera.set_aspect(width, height);
    }

    /// Advance by `dt` seconds, clamped to the aircraft's step limit.
    pub fn update(&mut self, dt: f32, controls: &ControlVector) -> &GameState {
        let max_dt = self.state.aircraft.config.max_dt;
        let dt = if dt.is_finite() { dt.clamp(0.0, max_dt) } else { 0.0 };

        let state = &mut self.state;
        state.aircraft.update(dt, controls, state.ground_y);
        state.chase.update(
            dt,
            state.aircraft.position,
            state.aircraft.orientation(),
            state.aircraft.speed_fraction(),
        );
        state.chase.apply(&mut state.camera);
        state.elapsed += dt;
        &self.state
    }
}
