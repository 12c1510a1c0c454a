//! On-screen touch controls: a floating joystick for steering and hold buttons
//! for throttle, brake, climb and boost. Drawing the widgets is someone else's
//! job; this tracks pointers and exposes the resulting state.

use std::collections::HashMap;

use glam::Vec2;

/// Identifier the host assigns to a touch / pointer.
pub type PointerId = u64;

/// Pointer id used for the mouse, which drives the overlay like a single finger.
pub const MOUSE_POINTER: PointerId = u64::MAX;

/// Hold buttons on the touch overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoldButton {
    Throttle,
    Brake,
    Climb,
    Boost,
}

impl HoldButton {
    pub const ALL: [HoldButton; 4] = [
        HoldButton::Throttle,
        HoldButton::Brake,
        HoldButton::Climb,
        HoldButton::Boost,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HoldButton::Throttle => "GAS",
            HoldButton::Brake => "BRAKE",
            HoldButton::Climb => "UP",
            HoldButton::Boost => "BOOST",
        }
    }
}

/// Screen-space rectangle (pixels, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Floating joystick: the base appears where the owning pointer went down.
#[derive(Debug, Clone)]
pub struct VirtualJoystick {
    /// Drag distance (pixels) that maps to full deflection.
    pub radius: f32,
    /// Deflection below this magnitude reads as zero.
    pub dead_zone: f32,
    owner: Option<PointerId>,
    base: Vec2,
    vector: Vec2,
}

impl VirtualJoystick {
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(1.0),
            dead_zone: 0.08,
            owner: None,
            base: Vec2::ZERO,
            vector: Vec2::ZERO,
        }
    }

    /// Grab the stick. Ignored while another pointer owns it.
    pub fn press(&mut self, id: PointerId, pos: Vec2) -> bool {
        if self.owner.is_some() {
            return false;
        }
        self.owner = Some(id);
        self.base = pos;
        self.vector = Vec2::ZERO;
        true
    }

    /// Move the knob; the result is clamped to the unit circle.
    pub fn drag(&mut self, id: PointerId, pos: Vec2) {
        if self.owner != Some(id) {
            return;
        }
        self.vector = ((pos - self.base) / self.radius).clamp_length_max(1.0);
    }

    pub fn release(&mut self, id: PointerId) {
        if self.owner == Some(id) {
            self.owner = None;
            self.vector = Vec2::ZERO;
        }
    }

    pub fn is_active(&self) -> bool {
        self.owner.is_some()
    }

    /// Knob offset in the unit circle (x right, y down).
    pub fn vector(&self) -> Vec2 {
        if self.vector.length() < self.dead_zone {
            Vec2::ZERO
        } else {
            self.vector
        }
    }

    /// Signed yaw: dragging left turns left (+1).
    pub fn yaw(&self) -> f32 {
        -self.vector().x
    }
}

/// Where the touch widgets sit for a given viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchLayout {
    /// Pointers going down inside this rect grab the joystick.
    pub joystick_zone: Rect,
    pub buttons: Vec<(HoldButton, Rect)>,
    pub joystick_radius: f32,
}

impl TouchLayout {
    /// Joystick on the left half, buttons stacked bottom-up along the right edge.
    pub fn for_viewport(width: f32, height: f32) -> Self {
        let short = width.min(height).max(1.0);
        let size = (short * 0.14).clamp(48.0, 120.0);
        let margin = size * 0.25;
        let gap = size * 0.15;

        let buttons = [
            HoldButton::Boost,
            HoldButton::Climb,
            HoldButton::Brake,
            HoldButton::Throttle,
        ]
        .iter()
        .enumerate()
        .map(|(i, &button)| {
            let bottom = height - margin - i as f32 * (size + gap);
            let rect = Rect {
                min: Vec2::new(width - margin - size, bottom - size),
                max: Vec2::new(width - margin, bottom),
            };
            (button, rect)
        })
        .collect();

        Self {
            joystick_zone: Rect {
                min: Vec2::ZERO,
                max: Vec2::new(width * 0.5, height),
            },
            buttons,
            joystick_radius: size,
        }
    }

    pub fn button_at(&self, pos: Vec2) -> Option<HoldButton> {
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(button, _)| *button)
    }

    pub fn button_rect(&self, button: HoldButton) -> Option<Rect> {
        self.buttons.iter().find(|(b, _)| *b == button).map(|(_, r)| *r)
    }
}

/// Pointer routing for the joystick and hold buttons.
#[derive(Debug, Clone)]
pub struct TouchControls {
    layout: TouchLayout,
    joystick: VirtualJoystick,
    holds: HashMap<PointerId, HoldButton>,
}

impl TouchControls {
    pub fn new(width: f32, height: f32) -> Self {
        let layout = TouchLayout::for_viewport(width, height);
        let joystick = VirtualJoystick::new(layout.joystick_radius);
        Self {
            layout,
            joystick,
            holds: HashMap::new(),
        }
    }

    /// Recompute the layout. Active pointers keep what they hold.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.layout = TouchLayout::for_viewport(width, height);
        self.joystick.radius = self.layout.joystick_radius;
    }

    pub fn layout(&self) -> &TouchLayout {
        &self.layout
    }

    pub fn joystick(&self) -> &VirtualJoystick {
        &self.joystick
    }

    pub fn pointer_down(&mut self, id: PointerId, pos: Vec2) {
        if let Some(button) = self.layout.button_at(pos) {
            log::debug!("Pointer {} holds {}", id, button.label());
            self.holds.insert(id, button);
        } else if self.layout.joystick_zone.contains(pos) {
            self.joystick.press(id, pos);
        }
    }

    /// Dragging off a held button lets go of it.
    pub fn pointer_move(&mut self, id: PointerId, pos: Vec2) {
        self.joystick.drag(id, pos);
        if let Some(button) = self.holds.get(&id).copied() {
            let still_inside = self
                .layout
                .button_rect(button)
                .is_some_and(|rect| rect.contains(pos));
            if !still_inside {
                self.holds.remove(&id);
            }
        }
    }

    pub fn pointer_up(&mut self, id: PointerId) {
        self.holds.remove(&id);
        self.joystick.release(id);
    }

    pub fn pointer_cancel(&mut self, id: PointerId) {
        self.pointer_up(id);
    }

    /// Pointer left the surface (mouse cursor out of the window).
    pub fn pointer_leave(&mut self, id: PointerId) {
        self.pointer_up(id);
    }

    /// Drop every pointer (focus lost).
    pub fn release_all(&mut self) {
        let ids: Vec<PointerId> = self.holds.keys().copied().collect();
        if !ids.is_empty() || self.joystick.is_active() {
            log::debug!("Released {} touch button(s) and the joystick", ids.len());
        }
        for id in ids {
            self.pointer_up(id);
        }
        self.holds.clear();
        self.joystick = VirtualJoystick::new(self.layout.joystick_radius);
    }

    pub fn is_held(&self, button: HoldButton) -> bool {
        self.holds.values().any(|b| *b == button)
    }

    pub fn yaw(&self) -> f32 {
        self.joystick.yaw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joystick_clamps_to_unit_circle() {
        let mut stick = VirtualJoystick::new(50.0);
        assert!(stick.press(1, Vec2::new(100.0, 100.0)));
        stick.drag(1, Vec2::new(400.0, 500.0));
        assert!((stick.vector().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn joystick_ignores_foreign_pointer() {
        let mut stick = VirtualJoystick::new(50.0);
        stick.press(1, Vec2::new(100.0, 100.0));
        assert!(!stick.press(2, Vec2::ZERO));
        stick.drag(2, Vec2::new(0.0, 100.0));
        assert_eq!(stick.vector(), Vec2::ZERO);
        stick.release(2);
        assert!(stick.is_active());
    }

    #[test]
    fn drag_left_turns_left() {
        let mut stick = VirtualJoystick::new(50.0);
        stick.press(7, Vec2::new(100.0, 100.0));
        stick.drag(7, Vec2::new(75.0, 100.0));
        assert!((stick.yaw() - 0.5).abs() < 1e-5);
        stick.release(7);
        assert_eq!(stick.yaw(), 0.0);
    }

    #[test]
    fn tiny_drag_is_dead_zone() {
        let mut stick = VirtualJoystick::new(100.0);
        stick.press(1, Vec2::ZERO);
        stick.drag(1, Vec2::new(3.0, 0.0));
        assert_eq!(stick.yaw(), 0.0);
    }

    #[test]
    fn layout_buttons_sit_on_right_and_do_not_overlap() {
        let layout = TouchLayout::for_viewport(800.0, 600.0);
        assert_eq!(layout.buttons.len(), 4);
        for (i, (_, a)) in layout.buttons.iter().enumerate() {
            assert!(a.min.x > 400.0);
            assert!(a.max.x <= 800.0 && a.max.y <= 600.0);
            for (_, b) in layout.buttons.iter().skip(i + 1) {
                assert!(a.min.y > b.max.y || b.min.y > a.max.y);
            }
        }
    }

    #[test]
    fn hold_button_set_and_cleared() {
        let mut touch = TouchControls::new(800.0, 600.0);
        let rect = touch.layout().button_rect(HoldButton::Throttle).unwrap();
        let center = (rect.min + rect.max) * 0.5;

        touch.pointer_down(3, center);
        assert!(touch.is_held(HoldButton::Throttle));
        touch.pointer_up(3);
        assert!(!touch.is_held(HoldButton::Throttle));

        touch.pointer_down(4, center);
        touch.pointer_cancel(4);
        assert!(!touch.is_held(HoldButton::Throttle));

        touch.pointer_down(5, center);
        touch.pointer_move(5, Vec2::new(10.0, 10.0));
        assert!(!touch.is_held(HoldButton::Throttle));
    }

    #[test]
    fn cursor_leaving_releases_mouse_hold() {
        let mut touch = TouchControls::new(800.0, 600.0);
        let rect = touch.layout().button_rect(HoldButton::Throttle).unwrap();
        let center = (rect.min + rect.max) * 0.5;

        touch.pointer_down(MOUSE_POINTER, center);
        touch.pointer_down(9, Vec2::new(100.0, 300.0));
        assert!(touch.is_held(HoldButton::Throttle));
        assert!(touch.joystick().is_active());

        touch.pointer_leave(MOUSE_POINTER);
        assert!(!touch.is_held(HoldButton::Throttle));
        assert!(touch.joystick().is_active());
    }

    #[test]
    fn mouse_drag_steers_like_a_finger() {
        let mut touch = TouchControls::new(800.0, 600.0);
        touch.pointer_down(MOUSE_POINTER, Vec2::new(200.0, 300.0));
        touch.pointer_move(MOUSE_POINTER, Vec2::new(0.0, 300.0));
        assert!((touch.yaw() - 1.0).abs() < 1e-5);
        touch.pointer_leave(MOUSE_POINTER);
        assert_eq!(touch.yaw(), 0.0);
        assert!(!touch.joystick().is_active());
    }

    #[test]
    fn buttons_have_labels() {
        let labels: Vec<&str> = HoldButton::ALL.iter().map(HoldButton::label).collect();
        assert_eq!(labels, vec!["GAS", "BRAKE", "UP", "BOOST"]);
    }

    #[test]
    fn two_fingers_steer_and_throttle() {
        let mut touch = TouchControls::new(800.0, 600.0);
        let rect = touch.layout().button_rect(HoldButton::Boost).unwrap();

        touch.pointer_down(1, Vec2::new(150.0, 400.0));
        touch.pointer_move(1, Vec2::new(400.0, 400.0));
        touch.pointer_down(2, rect.min + Vec2::splat(1.0));

        assert!(touch.is_held(HoldButton::Boost));
        assert!((touch.yaw() + 1.0).abs() < 1e-5);

        touch.release_all();
        assert!(!touch.is_held(HoldButton::Boost));
        assert_eq!(touch.yaw(), 0.0);
    }
}
