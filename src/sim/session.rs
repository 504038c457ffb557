//! Top-level session state machine
//!
//! Idle → Running → Over, restartable. One frame = read input snapshot →
//! aggregate → spawn due enemies → world step → HUD updates. The frame
//! returns whether the host should keep scheduling; it goes false the
//! instant the session ends.

use serde::{Deserialize, Serialize};

use crate::Bounds;
use crate::input::{ControlState, InputAggregator, InputSnapshot};
use crate::render::Surface;
use crate::sim::round::RoundDirector;
use crate::sim::world::World;
use crate::ui::{HudSink, ResultModal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the start command
    Idle,
    /// Tick loop active
    Running,
    /// Terminal; loop halted, result shown
    Over,
}

pub struct GameSession {
    phase: SessionPhase,
    world: World,
    director: RoundDirector,
    aggregator: InputAggregator,
    highlight_shown: bool,
}

impl GameSession {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            phase: SessionPhase::Idle,
            world: World::new(0, bounds),
            director: RoundDirector::new(),
            aggregator: InputAggregator::default(),
            highlight_shown: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.world.score
    }

    pub fn round(&self) -> u32 {
        self.director.round()
    }

    /// Control state from the last frame (`using_gamepad` drives cursor
    /// hiding on the host).
    pub fn last_control(&self) -> ControlState {
        self.aggregator.control()
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.world.set_bounds(bounds);
    }

    /// Start (or restart) the session: full state reset, round 1 armed.
    pub fn start(
        &mut self,
        seed: u64,
        now_ms: f64,
        hud: &mut dyn HudSink,
        modal: &mut dyn ResultModal,
    ) {
        let bounds = self.world.bounds;
        self.world = World::new(seed, bounds);
        self.director = RoundDirector::new();
        self.aggregator = InputAggregator::default();
        self.highlight_shown = false;
        self.phase = SessionPhase::Running;

        hud.set_score(0);
        hud.set_round(1);
        hud.set_round_highlight(false);
        modal.hide();

        self.director.start_round(now_ms);
        log::info!("session started (seed {seed})");
    }

    /// One tick. Returns false once the loop must stop rescheduling.
    pub fn frame(
        &mut self,
        snapshot: &InputSnapshot,
        now_ms: f64,
        surface: &mut dyn Surface,
        hud: &mut dyn HudSink,
        modal: &mut dyn ResultModal,
    ) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }

        let control = self.aggregator.compute(snapshot, self.world.player.pos);

        for _ in 0..self.director.poll(now_ms) {
            self.world.spawn_enemy(self.director.round());
        }

        let report = self.world.step(&control, now_ms, surface);
        if report.fatal {
            self.game_over(hud, modal);
            return false;
        }

        if report.kills > 0 {
            hud.set_score(self.world.score);
            // Round advances only when the field is clear AND the quota is
            // spent, in the same tick the last kill lands.
            if self.world.enemies.is_empty() && self.director.quota_exhausted() {
                self.director.advance(now_ms);
                hud.set_round(self.director.round());
            }
        }

        let highlight = self.director.highlight();
        if highlight != self.highlight_shown {
            self.highlight_shown = highlight;
            hud.set_round_highlight(highlight);
        }

        true
    }

    fn game_over(&mut self, hud: &mut dyn HudSink, modal: &mut dyn ResultModal) {
        self.phase = SessionPhase::Over;
        self.director.cancel();
        hud.set_round_highlight(false);
        self.highlight_shown = false;
        modal.show(
            "GAME OVER",
            &format!(
                "Round: {} | Score: {}",
                self.director.round(),
                self.world.score
            ),
        );
        log::info!(
            "game over at round {} with score {}",
            self.director.round(),
            self.world.score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ENEMY_RADIUS, PLAYER_RADIUS};
    use crate::render::{Color, NullSurface};
    use crate::sim::entity::{Enemy, Projectile};
    use glam::Vec2;

    #[derive(Debug, Default)]
    struct RecordingHud {
        score: u64,
        round: u32,
        highlight: bool,
    }

    impl HudSink for RecordingHud {
        fn set_score(&mut self, score: u64) {
            self.score = score;
        }
        fn set_round(&mut self, round: u32) {
            self.round = round;
        }
        fn set_round_highlight(&mut self, on: bool) {
            self.highlight = on;
        }
    }

    #[derive(Debug, Default)]
    struct RecordingModal {
        shown: Option<(String, String)>,
        hidden: u32,
    }

    impl ResultModal for RecordingModal {
        fn show(&mut self, title: &str, subtitle: &str) {
            self.shown = Some((title.to_string(), subtitle.to_string()));
        }
        fn hide(&mut self) {
            self.hidden += 1;
        }
    }

    fn started_session() -> (GameSession, RecordingHud, RecordingModal) {
        let mut session = GameSession::new(Bounds::new(800.0, 600.0));
        let mut hud = RecordingHud::default();
        let mut modal = RecordingModal::default();
        session.start(7, 0.0, &mut hud, &mut modal);
        (session, hud, modal)
    }

    #[test]
    fn test_idle_session_does_not_tick() {
        let mut session = GameSession::new(Bounds::new(800.0, 600.0));
        let keep = session.frame(
            &InputSnapshot::default(),
            0.0,
            &mut NullSurface,
            &mut RecordingHud::default(),
            &mut RecordingModal::default(),
        );
        assert!(!keep);
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_start_resets_and_hides_modal() {
        let (session, hud, modal) = started_session();
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.score(), 0);
        assert_eq!(session.round(), 1);
        assert_eq!(hud.score, 0);
        assert_eq!(hud.round, 1);
        assert_eq!(modal.hidden, 1);
    }

    #[test]
    fn test_spawns_follow_cadence() {
        let (mut session, mut hud, mut modal) = started_session();
        let snap = InputSnapshot::default();
        session.frame(&snap, 949.0, &mut NullSurface, &mut hud, &mut modal);
        assert!(session.world.enemies.is_empty());
        session.frame(&snap, 950.0, &mut NullSurface, &mut hud, &mut modal);
        assert_eq!(session.world.enemies.len(), 1);
    }

    #[test]
    fn test_player_contact_ends_session() {
        let (mut session, mut hud, mut modal) = started_session();
        let pos = session.world.player.pos + Vec2::new(PLAYER_RADIUS + ENEMY_RADIUS, 0.0);
        session
            .world
            .enemies
            .push(Enemy::new(900, pos, 0.0, Color::Hue(120.0)));

        let keep = session.frame(
            &InputSnapshot::default(),
            16.0,
            &mut NullSurface,
            &mut hud,
            &mut modal,
        );
        assert!(!keep);
        assert_eq!(session.phase(), SessionPhase::Over);
        let (title, subtitle) = modal.shown.clone().expect("modal shown");
        assert_eq!(title, "GAME OVER");
        assert_eq!(subtitle, "Round: 1 | Score: 0");

        // Further frames are rejected outright
        let keep = session.frame(
            &InputSnapshot::default(),
            32.0,
            &mut NullSurface,
            &mut hud,
            &mut modal,
        );
        assert!(!keep);
    }

    #[test]
    fn test_round_holds_while_enemies_alive() {
        let (mut session, mut hud, mut modal) = started_session();
        let snap = InputSnapshot::default();

        // Exhaust round 1's quota of 10; freeze each spawn so nothing
        // reaches the player during the drain
        let mut t = 0.0;
        while !session.director.quota_exhausted() {
            t += 950.0;
            session.frame(&snap, t, &mut NullSurface, &mut hud, &mut modal);
            for enemy in &mut session.world.enemies {
                enemy.speed = 0.0;
            }
        }
        assert_eq!(session.world.enemies.len(), 10);

        // Park the survivors at distinct spots away from the player
        session.world.player.pos = Vec2::new(700.0, 500.0);
        for (i, enemy) in session.world.enemies.iter_mut().enumerate() {
            enemy.pos = Vec2::new(60.0 + 60.0 * i as f32, 50.0);
        }

        // Kill all but one: round must not advance
        while session.world.enemies.len() > 1 {
            let target = session.world.enemies[0];
            session.world.projectiles.push(Projectile {
                id: 9000 + target.id,
                pos: target.pos,
                radius: 5.0,
                vel: Vec2::ZERO,
            });
            t += 16.0;
            session.frame(&snap, t, &mut NullSurface, &mut hud, &mut modal);
        }
        assert_eq!(session.round(), 1);
        assert!(!session.director.highlight());

        // Last kill with quota spent advances the round and lights the cue
        let target = session.world.enemies[0];
        session.world.projectiles.push(Projectile {
            id: 9999,
            pos: target.pos,
            radius: 5.0,
            vel: Vec2::ZERO,
        });
        t += 16.0;
        session.frame(&snap, t, &mut NullSurface, &mut hud, &mut modal);
        assert_eq!(session.round(), 2);
        assert_eq!(hud.round, 2);
        assert!(hud.highlight);
        assert_eq!(hud.score, 1000);

        // Highlight clears once the transition pause elapses
        session.frame(&snap, t + 2000.0, &mut NullSurface, &mut hud, &mut modal);
        assert!(!hud.highlight);
    }

    #[test]
    fn test_restart_resets_state() {
        let (mut session, mut hud, mut modal) = started_session();
        session.world.score = 700;
        session
            .world
            .enemies
            .push(Enemy::new(1, Vec2::new(50.0, 50.0), 0.0, Color::Hue(110.0)));
        session.game_over(&mut hud, &mut modal);
        assert_eq!(session.phase(), SessionPhase::Over);

        session.start(8, 5000.0, &mut hud, &mut modal);
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.score(), 0);
        assert_eq!(session.round(), 1);
        assert!(session.world.enemies.is_empty());
        assert_eq!(modal.hidden, 2);
    }
}
