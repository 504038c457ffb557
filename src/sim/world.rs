//! Per-tick simulation
//!
//! Owns the entity collections and advances them in a fixed order each tick:
//! firing policy, player, particles, projectiles, enemies + collision scan.
//! Collision hits are queued during the scan and applied in one pass after it,
//! so collections never mutate mid-iteration and a doubly-hit enemy scores
//! exactly once.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::Bounds;
use crate::consts::*;
use crate::input::ControlState;
use crate::render::{Color, Surface};
use crate::sim::entity::{Enemy, Particle, Player, Projectile};

/// What one tick produced, for the session to act on.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepReport {
    /// Player-enemy contact: the single fatal condition
    pub fatal: bool,
    /// Enemies destroyed this tick
    pub kills: u32,
}

/// Entity collections plus the per-session counters they share.
#[derive(Debug)]
pub struct World {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub bounds: Bounds,
    pub score: u64,
    rng: Pcg32,
    last_shot_ms: f64,
    next_id: u32,
}

impl World {
    pub fn new(seed: u64, bounds: Bounds) -> Self {
        Self {
            player: Player::new(bounds.center()),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            bounds,
            score: 0,
            rng: Pcg32::seed_from_u64(seed),
            last_shot_ms: -FIRE_INTERVAL_MS,
            next_id: 1,
        }
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn one enemy at a random point just outside the bounds, with speed
    /// drawn once from the round-scaled range.
    pub fn spawn_enemy(&mut self, round: u32) {
        let r = ENEMY_RADIUS;
        let (w, h) = (self.bounds.width, self.bounds.height);
        let pos = if self.rng.random_bool(0.5) {
            let x = if self.rng.random_bool(0.5) { -r } else { w + r };
            Vec2::new(x, self.rng.random_range(0.0..h))
        } else {
            let y = if self.rng.random_bool(0.5) { -r } else { h + r };
            Vec2::new(self.rng.random_range(0.0..w), y)
        };
        let multiplier = 1.0 + round as f32 * 0.1;
        let speed = self.rng.random_range(ENEMY_SPEED_MIN..ENEMY_SPEED_MAX) * multiplier;
        let color = Color::Hue(self.rng.random_range(100.0..160.0));
        let id = self.next_entity_id();
        log::debug!("enemy {id} spawned at ({:.0}, {:.0}), speed {speed:.2}", pos.x, pos.y);
        self.enemies.push(Enemy::new(id, pos, speed, color));
    }

    /// Advance everything by one tick. `now_ms` drives the fire-rate timer.
    pub fn step(
        &mut self,
        control: &ControlState,
        now_ms: f64,
        surface: &mut dyn Surface,
    ) -> StepReport {
        surface.clear_fade(TRAIL_FADE_ALPHA);

        // 1. Firing policy
        if control.firing && now_ms - self.last_shot_ms >= FIRE_INTERVAL_MS {
            let angle = control.aim_vec.y.atan2(control.aim_vec.x);
            let id = self.next_entity_id();
            self.projectiles
                .push(Projectile::new(id, self.player.pos, angle));
            self.last_shot_ms = now_ms;
        }

        // 2. Player
        self.player.update(control, self.bounds);
        self.player.draw(surface);

        // 3. Particles: update, compact, draw
        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(|p| p.alpha > 0.0);
        for particle in &self.particles {
            particle.draw(surface);
        }

        // 4. Projectiles: update, cull off-bounds, draw
        for projectile in &mut self.projectiles {
            projectile.update();
        }
        let bounds = self.bounds;
        self.projectiles.retain(|p| bounds.contains(p.pos));
        for projectile in &self.projectiles {
            projectile.draw(surface);
        }

        // 5. Enemies: home, draw, collision scan. Hits are only recorded
        // here; removal, particles and scoring happen after the scan.
        let mut dead_enemies: Vec<u32> = Vec::new();
        let mut spent_projectiles: Vec<u32> = Vec::new();
        let mut impacts: Vec<(Vec2, Color)> = Vec::new();
        for enemy in &mut self.enemies {
            enemy.update(self.player.pos);
            enemy.draw(surface);

            if circles_touch(self.player.pos, self.player.radius, enemy.pos, enemy.radius) {
                return StepReport {
                    fatal: true,
                    kills: 0,
                };
            }

            for projectile in &self.projectiles {
                // A projectile is consumed by its first contact
                if spent_projectiles.contains(&projectile.id) {
                    continue;
                }
                if circles_touch(projectile.pos, projectile.radius, enemy.pos, enemy.radius) {
                    impacts.push((projectile.pos, enemy.color));
                    dead_enemies.push(enemy.id);
                    spent_projectiles.push(projectile.id);
                    // Enemy is already down; further projectiles pass through
                    break;
                }
            }
        }

        // Deferred removals: applied in one pass, idempotent by ID
        let kills = dead_enemies.len() as u32;
        self.enemies.retain(|e| !dead_enemies.contains(&e.id));
        self.projectiles
            .retain(|p| !spent_projectiles.contains(&p.id));
        for (pos, color) in impacts {
            self.spawn_impact_burst(pos, color);
        }
        self.score += kills as u64 * KILL_SCORE;

        StepReport { fatal: false, kills }
    }

    /// Scatter of small particles at an impact point, inheriting the enemy's
    /// color.
    fn spawn_impact_burst(&mut self, pos: Vec2, color: Color) {
        for _ in 0..IMPACT_PARTICLES {
            let radius = self.rng.random_range(0.0..3.0);
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 5.0,
                (self.rng.random::<f32>() - 0.5) * 5.0,
            );
            self.particles.push(Particle::new(pos, radius, color, vel));
        }
    }
}

/// Center-distance-minus-radii contact test shared by every collision pair.
pub fn circles_touch(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) - a_radius - b_radius < CONTACT_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullSurface;

    fn world() -> World {
        World::new(42, Bounds::new(800.0, 600.0))
    }

    fn firing_control(aim: Vec2) -> ControlState {
        ControlState {
            aim_vec: aim,
            firing: true,
            ..Default::default()
        }
    }

    /// A stationary enemy pinned at a position, out of the player's reach.
    fn pinned_enemy(world: &mut World, id: u32, pos: Vec2) {
        world
            .enemies
            .push(Enemy::new(id, pos, 0.0, Color::Hue(120.0)));
    }

    #[test]
    fn test_firing_spawns_projectile_along_aim() {
        let mut world = world();
        world.player.pos = Vec2::new(100.0, 100.0);
        let report = world.step(&firing_control(Vec2::new(1.0, 0.0)), 0.0, &mut NullSurface);
        assert!(!report.fatal);
        assert_eq!(world.projectiles.len(), 1);
        let p = &world.projectiles[0];
        assert!((p.vel - Vec2::new(12.0, 0.0)).length() < 1e-4);
        // Spawned at the player, then advanced one tick
        assert!((p.pos - Vec2::new(112.0, 100.0)).length() < 1e-4);
    }

    #[test]
    fn test_fire_rate_cooldown() {
        let mut world = world();
        let control = firing_control(Vec2::new(1.0, 0.0));
        world.step(&control, 0.0, &mut NullSurface);
        world.step(&control, 100.0, &mut NullSurface);
        assert_eq!(world.projectiles.len(), 1);
        world.step(&control, 150.0, &mut NullSurface);
        assert_eq!(world.projectiles.len(), 2);
    }

    #[test]
    fn test_projectile_culled_off_bounds() {
        let mut world = world();
        world.player.pos = Vec2::new(780.0, 300.0);
        world.step(&firing_control(Vec2::new(1.0, 0.0)), 0.0, &mut NullSurface);
        assert_eq!(world.projectiles.len(), 1);
        // 20px to the edge at 12px per tick
        world.step(&ControlState::default(), 20.0, &mut NullSurface);
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn test_impact_removes_pair_scores_and_bursts() {
        let mut world = world();
        world.player.pos = Vec2::new(700.0, 500.0);
        pinned_enemy(&mut world, 100, Vec2::new(100.0, 100.0));
        world.projectiles.push(Projectile {
            id: 101,
            pos: Vec2::new(110.0, 100.0),
            radius: PROJECTILE_RADIUS,
            vel: Vec2::ZERO,
        });

        let report = world.step(&ControlState::default(), 0.0, &mut NullSurface);
        assert_eq!(report.kills, 1);
        assert!(world.enemies.is_empty());
        assert!(world.projectiles.is_empty());
        assert_eq!(world.particles.len(), IMPACT_PARTICLES);
        assert_eq!(world.score, 100);
    }

    #[test]
    fn test_double_hit_scores_once() {
        let mut world = world();
        world.player.pos = Vec2::new(700.0, 500.0);
        pinned_enemy(&mut world, 100, Vec2::new(100.0, 100.0));
        for (id, x) in [(101, 105.0), (102, 95.0)] {
            world.projectiles.push(Projectile {
                id,
                pos: Vec2::new(x, 100.0),
                radius: PROJECTILE_RADIUS,
                vel: Vec2::ZERO,
            });
        }

        let report = world.step(&ControlState::default(), 0.0, &mut NullSurface);
        assert_eq!(report.kills, 1);
        assert_eq!(world.score, 100);
        assert!(world.enemies.is_empty());
        // The second projectile passed through and stays live
        assert_eq!(world.projectiles.len(), 1);
        assert_eq!(world.projectiles[0].id, 102);
    }

    #[test]
    fn test_projectile_consumed_by_first_contact() {
        let mut world = world();
        world.player.pos = Vec2::new(700.0, 500.0);
        // Two enemies overlapping the same projectile
        pinned_enemy(&mut world, 100, Vec2::new(100.0, 100.0));
        pinned_enemy(&mut world, 101, Vec2::new(110.0, 100.0));
        world.projectiles.push(Projectile {
            id: 200,
            pos: Vec2::new(105.0, 100.0),
            radius: PROJECTILE_RADIUS,
            vel: Vec2::ZERO,
        });

        let report = world.step(&ControlState::default(), 0.0, &mut NullSurface);
        assert_eq!(report.kills, 1);
        assert_eq!(world.score, 100);
        assert!(world.projectiles.is_empty());
        // Only the first enemy in scan order went down
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies[0].id, 101);
    }

    #[test]
    fn test_player_contact_is_fatal() {
        let mut world = world();
        let pos = world.player.pos + Vec2::new(PLAYER_RADIUS + ENEMY_RADIUS, 0.0);
        // Within radius_sum - 1 after the epsilon
        pinned_enemy(&mut world, 100, pos);
        let report = world.step(&ControlState::default(), 0.0, &mut NullSurface);
        assert!(report.fatal);
        assert_eq!(report.kills, 0);
    }

    #[test]
    fn test_particles_expire_by_alpha() {
        let mut world = world();
        world
            .particles
            .push(Particle::new(Vec2::new(400.0, 300.0), 2.0, Color::White, Vec2::ZERO));
        for i in 0..60 {
            world.step(&ControlState::default(), i as f64, &mut NullSurface);
        }
        assert!(world.particles.is_empty());
    }

    #[test]
    fn test_spawn_enemy_outside_bounds() {
        let mut world = world();
        for round in 1..=20 {
            world.spawn_enemy(round);
        }
        assert_eq!(world.enemies.len(), 20);
        for enemy in &world.enemies {
            let on_horizontal_edge =
                enemy.pos.x == -ENEMY_RADIUS || enemy.pos.x == world.bounds.width + ENEMY_RADIUS;
            let on_vertical_edge =
                enemy.pos.y == -ENEMY_RADIUS || enemy.pos.y == world.bounds.height + ENEMY_RADIUS;
            assert!(on_horizontal_edge || on_vertical_edge);
            assert!(enemy.speed >= ENEMY_SPEED_MIN);
        }
    }

    #[test]
    fn test_circles_touch_epsilon() {
        // Gap just under the epsilon
        assert!(circles_touch(
            Vec2::ZERO,
            15.0,
            Vec2::new(30.5, 0.0),
            15.0
        ));
        assert!(!circles_touch(Vec2::ZERO, 15.0, Vec2::new(31.5, 0.0), 15.0));
    }
}
