//! Core engine types and utilities for Skyhop.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and spatial bounds
//! - Frame timing
//! - Model handles and the model utility layer (scale, ground snap, shadows)
//! - Frame-rate independent smoothing
//! - Asset loading

pub mod assets;
pub mod bounds;
pub mod model;
pub mod smoothing;
pub mod time;
pub mod transform;

pub use assets::*;
pub use bounds::*;
pub use model::*;
pub use smoothing::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use hecs::{Entity, World};
