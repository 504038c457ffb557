//! Virtual touch joystick
//!
//! Maps a touch point's displacement from its touch-down origin into a
//! bounded, normalized vector. Two independent instances exist per session
//! (move and aim); each is keyed by the touch identifier captured at start.

use glam::Vec2;

use crate::consts::STICK_MAX_RADIUS;

/// One on-screen analog stick synthesized from a touch point.
#[derive(Debug, Clone, Copy, Default)]
pub struct VirtualJoystick {
    touch_id: Option<i32>,
    origin: Vec2,
    vector: Vec2,
}

impl VirtualJoystick {
    /// Bind to a touch point: record the origin and activate.
    pub fn on_touch_start(&mut self, id: i32, pos: Vec2) {
        self.touch_id = Some(id);
        self.origin = pos;
        self.vector = Vec2::ZERO;
    }

    /// Update the stick vector from a moved touch. Events for other
    /// identifiers are ignored.
    pub fn on_touch_move(&mut self, id: i32, pos: Vec2) {
        if self.touch_id != Some(id) {
            return;
        }
        let displacement = pos - self.origin;
        // Clamp magnitude via polar reconstruction so the angle survives the
        // clamp boundary exactly.
        let angle = displacement.y.atan2(displacement.x);
        let dist = displacement.length().min(STICK_MAX_RADIUS);
        self.vector = Vec2::from_angle(angle) * (dist / STICK_MAX_RADIUS);
    }

    /// Release the stick. A duplicate end for the same identifier is a no-op.
    pub fn on_touch_end(&mut self, id: i32) {
        if self.touch_id != Some(id) {
            return;
        }
        self.touch_id = None;
        self.vector = Vec2::ZERO;
    }

    pub fn is_active(&self) -> bool {
        self.touch_id.is_some()
    }

    /// Current output vector, magnitude in [0, 1]. Zero when inactive.
    pub fn vector(&self) -> Vec2 {
        self.vector
    }
}
