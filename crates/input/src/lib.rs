//! Input handling for keyboard and touch, unified into one control vector.

pub mod controls;
pub mod touch;

pub use controls::*;
pub use touch::*;

use std::collections::HashSet;

/// Keyboard state for the current frame. The flight model samples held keys,
/// so there is no key-repeat handling.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
                self.keys_released.insert(key);
            }
        }
    }

    /// Drop every held key (window lost focus, so release events will never arrive).
    pub fn release_all(&mut self) {
        let held: Vec<KeyCode> = self.keys_held.drain().collect();
        if !held.is_empty() {
            log::debug!("Released {} held key(s)", held.len());
        }
        self.keys_released.extend(held);
    }

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key was released this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.is_key_held(*k))
    }

    /// Yaw from the keyboard: +1 turns left (A / Left), -1 turns right (D / Right).
    pub fn yaw_axis(&self) -> f32 {
        let mut yaw = 0.0;
        if self.any_held(&[KeyCode::KeyA, KeyCode::ArrowLeft]) {
            yaw += 1.0;
        }
        if self.any_held(&[KeyCode::KeyD, KeyCode::ArrowRight]) {
            yaw -= 1.0;
        }
        yaw
    }

    /// Check if throttle is held (W / Up).
    pub fn is_throttle_held(&self) -> bool {
        self.any_held(&[KeyCode::KeyW, KeyCode::ArrowUp])
    }

    /// Check if brake is held (S / Down).
    pub fn is_brake_held(&self) -> bool {
        self.any_held(&[KeyCode::KeyS, KeyCode::ArrowDown])
    }

    /// Check if climb is held (Space / Q).
    pub fn is_climb_held(&self) -> bool {
        self.any_held(&[KeyCode::Space, KeyCode::KeyQ])
    }

    /// Check if boost is held (Shift).
    pub fn is_boost_held(&self) -> bool {
        self.any_held(&[KeyCode::ShiftLeft, KeyCode::ShiftRight])
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressed_is_edge_held_is_level() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        assert!(input.is_key_pressed(KeyCode::KeyW));
        assert!(input.is_throttle_held());

        input.begin_frame();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        assert!(!input.is_key_pressed(KeyCode::KeyW));
        assert!(input.is_throttle_held());

        input.process_keyboard(KeyCode::KeyW, ElementState::Released);
        assert!(input.is_key_released(KeyCode::KeyW));
        assert!(!input.is_throttle_held());
    }

    #[test]
    fn opposite_yaw_keys_cancel() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyA, ElementState::Pressed);
        assert_eq!(input.yaw_axis(), 1.0);
        input.process_keyboard(KeyCode::ArrowRight, ElementState::Pressed);
        assert_eq!(input.yaw_axis(), 0.0);
    }

    #[test]
    fn release_all_clears_held_keys() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::ShiftLeft, ElementState::Pressed);
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        input.release_all();
        assert!(!input.is_boost_held());
        assert!(!input.is_climb_held());
        assert!(input.is_key_released(KeyCode::Space));
    }
}
