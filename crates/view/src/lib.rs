//! Viewing: perspective camera, chase camera and device quality profile.

pub mod camera;
pub mod chase;
pub mod quality;

pub use camera::*;
pub use chase::*;
pub use quality::*;
