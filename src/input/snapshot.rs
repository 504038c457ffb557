//! Raw device state mailbox
//!
//! Platform event handlers write into per-source latest-value slots; the tick
//! loop reads one consistent snapshot per frame instead of reacting to events
//! directly. A source that never reported (or dropped out mid-session) simply
//! contributes no signal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::input::joystick::VirtualJoystick;

/// Held directional keys (WASD or arrows).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl KeyboardSnapshot {
    /// Apply a key down/up by logical key name. Unknown keys are ignored.
    pub fn set_key(&mut self, key: &str, held: bool) {
        match key {
            "w" | "W" | "ArrowUp" => self.up = held,
            "s" | "S" | "ArrowDown" => self.down = held,
            "a" | "A" | "ArrowLeft" => self.left = held,
            "d" | "D" | "ArrowRight" => self.right = held,
            _ => {}
        }
    }

    pub fn any_held(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Movement intent from held keys, normalized to unit length.
    /// Opposing keys cancel to zero; normalization is skipped for the
    /// zero vector.
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }
}

/// Latest pointer position and button state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerSnapshot {
    pub pos: Vec2,
    pub button_held: bool,
    /// False until the first move event; an unwritten slot supplies no aim.
    pub moved: bool,
}

/// One gamepad poll: four axes plus the two fire-capable buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GamepadSnapshot {
    /// axes[0..1] = left stick (move), axes[2..3] = right stick (aim)
    pub axes: [f32; 4],
    /// Trigger (R2) pressed
    pub trigger: bool,
    /// Primary face button pressed
    pub primary: bool,
}

/// Copy of one virtual joystick for a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StickState {
    pub active: bool,
    pub vector: Vec2,
}

impl From<&VirtualJoystick> for StickState {
    fn from(stick: &VirtualJoystick) -> Self {
        Self {
            active: stick.is_active(),
            vector: stick.vector(),
        }
    }
}

/// Consistent view of every input source, taken once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub keyboard: KeyboardSnapshot,
    pub pointer: PointerSnapshot,
    /// None when no pad is connected
    pub gamepad: Option<GamepadSnapshot>,
    pub move_stick: StickState,
    pub aim_stick: StickState,
}

impl InputSnapshot {
    pub fn touch_active(&self) -> bool {
        self.move_stick.active || self.aim_stick.active
    }
}

/// Latest-value slots for every raw input source.
///
/// Touch points bind to a stick by screen half at touch-start: left half is
/// the move stick, right half the aim stick. The binding is fixed for that
/// touch's lifetime.
#[derive(Debug, Default)]
pub struct InputMailbox {
    keyboard: KeyboardSnapshot,
    pointer: PointerSnapshot,
    gamepad: Option<GamepadSnapshot>,
    move_stick: VirtualJoystick,
    aim_stick: VirtualJoystick,
}

impl InputMailbox {
    pub fn key_event(&mut self, key: &str, held: bool) {
        self.keyboard.set_key(key, held);
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer.pos = pos;
        self.pointer.moved = true;
    }

    pub fn pointer_button(&mut self, held: bool) {
        self.pointer.button_held = held;
    }

    /// Record this frame's gamepad poll; `None` when no pad is connected.
    pub fn gamepad_report(&mut self, pad: Option<GamepadSnapshot>) {
        self.gamepad = pad;
    }

    pub fn touch_start(&mut self, id: i32, pos: Vec2, viewport_width: f32) {
        if pos.x < viewport_width / 2.0 {
            self.move_stick.on_touch_start(id, pos);
        } else {
            self.aim_stick.on_touch_start(id, pos);
        }
    }

    pub fn touch_move(&mut self, id: i32, pos: Vec2) {
        self.move_stick.on_touch_move(id, pos);
        self.aim_stick.on_touch_move(id, pos);
    }

    pub fn touch_end(&mut self, id: i32) {
        self.move_stick.on_touch_end(id);
        self.aim_stick.on_touch_end(id);
    }

    /// Stick vectors for on-screen knob feedback.
    pub fn stick_vectors(&self) -> (Vec2, Vec2) {
        (self.move_stick.vector(), self.aim_stick.vector())
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            keyboard: self.keyboard,
            pointer: self.pointer,
            gamepad: self.gamepad,
            move_stick: StickState::from(&self.move_stick),
            aim_stick: StickState::from(&self.aim_stick),
        }
    }
}
