//! Arcade flight model: speed, yaw, bank and altitude integration with
//! takeoff/stall thresholds and a soft bounce at the edge of the world.

pub mod aircraft;
pub mod config;

pub use aircraft::*;
pub use config::*;
