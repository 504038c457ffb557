//! Neon Swarm - a wave-survival twin-stick shooter
//!
//! Core modules:
//! - `input`: Multi-device input fusion (keyboard, pointer, gamepad, touch joysticks)
//! - `sim`: Simulation (entities, collisions, round pacing, session state machine)
//! - `render`: Draw-surface abstraction (Canvas 2D on web, null surface for tests)
//! - `ui`: HUD and result-modal collaborator traits

pub mod input;
pub mod render;
pub mod sim;
pub mod ui;

pub use input::{ControlState, InputAggregator, InputMailbox, InputSnapshot};
pub use sim::{GameSession, RoundDirector, SessionPhase, World};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Player avatar
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Distance of the aim indicator dot from the player center
    pub const AIM_DOT_DISTANCE: f32 = 20.0;
    pub const AIM_DOT_RADIUS: f32 = 5.0;

    /// Projectiles
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    /// Projectile speed in pixels per tick (velocity fixed at spawn)
    pub const PROJECTILE_SPEED: f32 = 12.0;
    /// Minimum elapsed time between two consecutive shots
    pub const FIRE_INTERVAL_MS: f64 = 150.0;

    /// Enemies
    pub const ENEMY_RADIUS: f32 = 15.0;
    /// Base enemy speed range, scaled per round
    pub const ENEMY_SPEED_MIN: f32 = 1.0;
    pub const ENEMY_SPEED_MAX: f32 = 2.5;
    /// Score awarded per enemy kill
    pub const KILL_SCORE: u64 = 100;

    /// Particles
    pub const PARTICLE_DAMPING: f32 = 0.97;
    pub const PARTICLE_ALPHA_STEP: f32 = 0.02;
    /// Particles spawned per projectile impact
    pub const IMPACT_PARTICLES: usize = 8;

    /// Center-distance-minus-radii threshold for circle contact
    pub const CONTACT_EPSILON: f32 = 1.0;

    /// Input tuning
    pub const GAMEPAD_DEADZONE: f32 = 0.1;
    /// Aim-stick magnitude above which touch input fires (gestural fire)
    pub const TOUCH_FIRE_THRESHOLD: f32 = 0.5;
    /// Maximum virtual joystick displacement in pixels
    pub const STICK_MAX_RADIUS: f32 = 40.0;

    /// Pause between clearing a round and spawning the next
    pub const ROUND_TRANSITION_MS: f64 = 2000.0;

    /// Opacity of the per-frame fade rectangle (motion trails)
    pub const TRAIL_FADE_ALPHA: f32 = 0.2;
}

/// World bounds: a viewport-sized rectangle with origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a circle of the given radius fully inside the bounds.
    pub fn clamp_circle(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            pos.x.clamp(radius, self.width - radius),
            pos.y.clamp(radius, self.height - radius),
        )
    }

    /// Whether a point lies inside the bounds (projectile culling).
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_circle() {
        let bounds = Bounds::new(800.0, 600.0);
        let clamped = bounds.clamp_circle(Vec2::new(-10.0, 700.0), 15.0);
        assert_eq!(clamped, Vec2::new(15.0, 585.0));

        // Already inside: untouched
        let inside = Vec2::new(400.0, 300.0);
        assert_eq!(bounds.clamp_circle(inside, 15.0), inside);
    }

    #[test]
    fn test_contains() {
        let bounds = Bounds::new(800.0, 600.0);
        assert!(bounds.contains(Vec2::new(0.0, 0.0)));
        assert!(bounds.contains(Vec2::new(800.0, 600.0)));
        assert!(!bounds.contains(Vec2::new(-0.1, 300.0)));
        assert!(!bounds.contains(Vec2::new(400.0, 600.1)));
    }
}
