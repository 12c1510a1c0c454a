//! The per-frame control vector consumed by the flight model.

use crate::touch::{HoldButton, TouchControls};
use crate::InputState;

/// Snapshot of pilot intent for one frame. Built fresh every frame; keyboard
/// and touch are interchangeable sources.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlVector {
    /// Steering in [-1, 1]; positive turns left.
    pub yaw: f32,
    pub throttle: bool,
    pub brake: bool,
    pub climb: bool,
    pub boost: bool,
}

impl ControlVector {
    /// Merge keyboard and touch: yaw is summed and clamped, buttons are OR-ed.
    pub fn gather(keyboard: &InputState, touch: &TouchControls) -> Self {
        Self {
            yaw: (keyboard.yaw_axis() + touch.yaw()).clamp(-1.0, 1.0),
            throttle: keyboard.is_throttle_held() || touch.is_held(HoldButton::Throttle),
            brake: keyboard.is_brake_held() || touch.is_held(HoldButton::Brake),
            climb: keyboard.is_climb_held() || touch.is_held(HoldButton::Climb),
            boost: keyboard.is_boost_held() || touch.is_held(HoldButton::Boost),
        }
    }

    /// Full throttle, nothing else.
    pub fn throttle() -> Self {
        Self {
            throttle: true,
            ..Default::default()
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}
