//! Round pacing
//!
//! Owns spawn scheduling and the round-advance transition. Cadence and the
//! transition delay are millisecond deadlines against the caller's clock, so
//! the director stays deterministic under test.

use serde::{Deserialize, Serialize};

use crate::consts::ROUND_TRANSITION_MS;

/// Where the director is within the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No round running (before start / after game over)
    Idle,
    /// Spawn quota not yet exhausted
    Spawning,
    /// Quota exhausted, enemies still alive
    Draining,
    /// Wave cleared; brief highlight pause before the next round
    Transitioning,
}

/// Enemies a round must spawn.
pub fn spawn_quota(round: u32) -> u32 {
    round * 5 + 5
}

/// Milliseconds between spawns, monotonically faster with a floor.
pub fn spawn_cadence_ms(round: u32) -> f64 {
    (1000.0 - round as f64 * 50.0).max(400.0)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoundDirector {
    round: u32,
    remaining: u32,
    cadence_ms: f64,
    next_spawn_at: f64,
    resume_at: f64,
    phase: RoundPhase,
}

impl Default for RoundDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundDirector {
    pub fn new() -> Self {
        Self {
            round: 1,
            remaining: 0,
            cadence_ms: 0.0,
            next_spawn_at: 0.0,
            resume_at: 0.0,
            phase: RoundPhase::Idle,
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Quota exhausted: one half of the round-advance condition.
    pub fn quota_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Round indicator highlight is on during the transition pause.
    pub fn highlight(&self) -> bool {
        self.phase == RoundPhase::Transitioning
    }

    /// Arm the current round: set the quota and cadence, schedule the first
    /// spawn one cadence out.
    pub fn start_round(&mut self, now_ms: f64) {
        self.remaining = spawn_quota(self.round);
        self.cadence_ms = spawn_cadence_ms(self.round);
        self.next_spawn_at = now_ms + self.cadence_ms;
        self.phase = RoundPhase::Spawning;
        log::info!(
            "round {} started: {} enemies, cadence {:.0}ms",
            self.round,
            self.remaining,
            self.cadence_ms
        );
    }

    /// Advance timers; returns how many enemies are due this tick.
    pub fn poll(&mut self, now_ms: f64) -> u32 {
        if self.phase == RoundPhase::Transitioning && now_ms >= self.resume_at {
            self.start_round(now_ms);
        }
        let mut due = 0;
        while self.phase == RoundPhase::Spawning && now_ms >= self.next_spawn_at {
            self.remaining -= 1;
            self.next_spawn_at += self.cadence_ms;
            due += 1;
            if self.remaining == 0 {
                self.phase = RoundPhase::Draining;
            }
        }
        due
    }

    /// Wave cleared (quota exhausted and no enemies alive): bump the round
    /// and pause for the visual cue before spawning resumes.
    pub fn advance(&mut self, now_ms: f64) {
        self.round += 1;
        self.resume_at = now_ms + ROUND_TRANSITION_MS;
        self.phase = RoundPhase::Transitioning;
        log::info!("round cleared, advancing to {}", self.round);
    }

    /// Stop all scheduling (game over).
    pub fn cancel(&mut self) {
        self.phase = RoundPhase::Idle;
    }
}
