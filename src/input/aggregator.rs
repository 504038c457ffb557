//! Input arbitration
//!
//! Merges the per-tick snapshot of every device into one `ControlState`.
//! Priority, highest first: touch joysticks, keyboard, gamepad, pointer.
//! Sources are evaluated lowest-priority first so higher layers overwrite.
//!
//! Movement and the firing flag reset to neutral at the start of every tick.
//! The aim vector is never reset: it keeps its last nonzero value so the
//! avatar's facing stays stable when input is momentarily absent.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GAMEPAD_DEADZONE, TOUCH_FIRE_THRESHOLD};
use crate::input::snapshot::InputSnapshot;

/// Canonical control vector for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    /// Movement intent, each component in [-1, 1]
    pub move_vec: Vec2,
    /// Aim direction; magnitude may exceed 1, only the angle is consumed
    pub aim_vec: Vec2,
    pub firing: bool,
    /// UI hint for the host (hide the cursor), not a physics input
    pub using_gamepad: bool,
}

/// Recomputes `ControlState` once per tick from a device snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputAggregator {
    control: ControlState,
}

impl InputAggregator {
    pub fn compute(&mut self, snap: &InputSnapshot, player_pos: Vec2) -> ControlState {
        let c = &mut self.control;
        c.move_vec = Vec2::ZERO;
        c.firing = false;
        // Pad presence alone sets the hint; a disconnected pad is no signal
        c.using_gamepad = snap.gamepad.is_some();

        // Gamepad: per-axis deadzone on movement; aim consumed only when
        // either aim axis clears the deadzone, and firing comes with it.
        let mut gamepad_aiming = false;
        if let Some(pad) = &snap.gamepad {
            if pad.axes[0].abs() > GAMEPAD_DEADZONE {
                c.move_vec.x = pad.axes[0];
            }
            if pad.axes[1].abs() > GAMEPAD_DEADZONE {
                c.move_vec.y = pad.axes[1];
            }
            if pad.axes[2].abs() > GAMEPAD_DEADZONE || pad.axes[3].abs() > GAMEPAD_DEADZONE {
                c.aim_vec = Vec2::new(pad.axes[2], pad.axes[3]);
                gamepad_aiming = true;
                if pad.trigger || pad.primary {
                    c.firing = true;
                }
            }
        }

        // Keyboard overrides gamepad movement and clears the pad hint.
        // Keyboard never sets aim.
        if snap.keyboard.any_held() {
            c.using_gamepad = false;
            let dir = snap.keyboard.direction();
            if dir != Vec2::ZERO {
                c.move_vec = dir;
            }
        }

        // Touch joysticks override everything; aim-stick deflection past the
        // threshold is the fire gesture (touch has no fire button).
        let touch_active = snap.touch_active();
        if touch_active {
            c.using_gamepad = false;
            if snap.move_stick.active {
                c.move_vec = snap.move_stick.vector;
            }
            if snap.aim_stick.active {
                c.aim_vec = snap.aim_stick.vector;
                if snap.aim_stick.vector.length() > TOUCH_FIRE_THRESHOLD {
                    c.firing = true;
                }
            }
        }

        // Pointer aim applies only when neither gamepad aim nor touch is
        // active, and only once the pointer has actually reported.
        if !gamepad_aiming && !touch_active && snap.pointer.moved {
            let aim = snap.pointer.pos - player_pos;
            if aim != Vec2::ZERO {
                c.aim_vec = aim;
            }
        }
        if !c.using_gamepad && !touch_active && snap.pointer.button_held {
            c.firing = true;
        }

        *c
    }

    /// Last computed control state.
    pub fn control(&self) -> ControlState {
        self.control
    }
}
