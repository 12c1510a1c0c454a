//! Window event handling for Game.
//! Keyboard, touch, mouse, focus and resize feed the input layer; RedrawRequested drives the frame.
//! The left mouse button drives the touch overlay as one more pointer.

use glam::Vec2;
use input::MOUSE_POINTER;
use winit::event::{ElementState, MouseButton, Touch, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

impl crate::Game {
    /// Handle a window event. Returns true if the app should exit.
    pub(crate) fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                self.running = false;
                true
            }
            WindowEvent::Resized(size) => {
                self.simulation.resize(size.width, size.height);
                self.touch.resize(size.width as f32, size.height as f32);
                false
            }
            WindowEvent::Focused(false) => {
                self.input.release_all();
                self.touch.release_all();
                false
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.input.process_keyboard(key, event.state);

                    if event.state.is_pressed() && !event.repeat {
                        match key {
                            KeyCode::F5 => self.save_map(),
                            KeyCode::F9 => self.load_map(),
                            _ => {}
                        }
                    }
                }
                false
            }
            WindowEvent::Touch(Touch {
                id, phase, location, ..
            }) => {
                let pos = Vec2::new(location.x as f32, location.y as f32);
                match phase {
                    TouchPhase::Started => self.touch.pointer_down(id, pos),
                    TouchPhase::Moved => self.touch.pointer_move(id, pos),
                    TouchPhase::Ended => self.touch.pointer_up(id),
                    TouchPhase::Cancelled => self.touch.pointer_cancel(id),
                }
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                self.touch.pointer_move(MOUSE_POINTER, self.cursor);
                false
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                match state {
                    ElementState::Pressed => self.touch.pointer_down(MOUSE_POINTER, self.cursor),
                    ElementState::Released => self.touch.pointer_up(MOUSE_POINTER),
                }
                false
            }
            WindowEvent::CursorLeft { .. } => {
                self.touch.pointer_leave(MOUSE_POINTER);
                false
            }
            WindowEvent::RedrawRequested => {
                self.frame();
                self.window.request_redraw();
                false
            }
            _ => false,
        }
    }
}
