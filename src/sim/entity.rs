//! Game entities
//!
//! Each kind carries its own fields and update function; drawing is stateless
//! and never mutates simulation state. No entity knows about the collections
//! it lives in.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Bounds;
use crate::consts::*;
use crate::input::ControlState;
use crate::render::{Color, Surface};

/// The player avatar. Exactly one per session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// Facing angle in radians, derived from the last nonzero aim vector
    pub aim_angle: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            aim_angle: 0.0,
        }
    }

    /// Apply this tick's control vector, then clamp into bounds.
    pub fn update(&mut self, control: &ControlState, bounds: Bounds) {
        // Skip the move entirely when idle so a static player never
        // accumulates floating-point drift.
        if control.move_vec != Vec2::ZERO {
            self.pos += control.move_vec * self.speed;
            self.pos = bounds.clamp_circle(self.pos, self.radius);
        }
        if control.aim_vec != Vec2::ZERO {
            self.aim_angle = control.aim_vec.y.atan2(control.aim_vec.x);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.pos, self.radius, Color::Cyan, 1.0, 15.0);
        // Aim indicator dot
        let dot = self.pos + Vec2::from_angle(self.aim_angle) * AIM_DOT_DISTANCE;
        surface.fill_circle(dot, AIM_DOT_RADIUS, Color::White, 1.0, 0.0);
    }
}

/// A fired shot. Velocity is fixed at creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub vel: Vec2,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, angle: f32) -> Self {
        Self {
            id,
            pos,
            radius: PROJECTILE_RADIUS,
            vel: Vec2::from_angle(angle) * PROJECTILE_SPEED,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.pos, self.radius, Color::White, 1.0, 0.0);
    }
}

/// A homing enemy: direction re-aims at the player every tick, speed is drawn
/// once at spawn and never changes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub color: Color,
    pub vel: Vec2,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, speed: f32, color: Color) -> Self {
        Self {
            id,
            pos,
            radius: ENEMY_RADIUS,
            speed,
            color,
            vel: Vec2::ZERO,
        }
    }

    pub fn update(&mut self, player_pos: Vec2) {
        let angle = (player_pos.y - self.pos.y).atan2(player_pos.x - self.pos.x);
        self.vel = Vec2::from_angle(angle) * self.speed;
        self.pos += self.vel;
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.pos, self.radius, self.color, 1.0, 0.0);
    }
}

/// Cosmetic debris from a projectile impact. Removal is driven by alpha, not
/// velocity (the damping decay never reaches zero).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    pub vel: Vec2,
    pub alpha: f32,
}

impl Particle {
    pub fn new(pos: Vec2, radius: f32, color: Color, vel: Vec2) -> Self {
        Self {
            pos,
            radius,
            color,
            vel,
            alpha: 1.0,
        }
    }

    pub fn update(&mut self) {
        self.vel *= PARTICLE_DAMPING;
        self.pos += self.vel;
        self.alpha -= PARTICLE_ALPHA_STEP;
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.pos, self.radius, self.color, self.alpha, 0.0);
    }
}
