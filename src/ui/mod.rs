//! HUD and modal collaborator traits
//!
//! The session reports score/round changes and the final result through these
//! seams; the web build backs them with DOM elements.

/// Score and round text sinks plus the round-transition highlight.
pub trait HudSink {
    fn set_score(&mut self, score: u64);
    fn set_round(&mut self, round: u32);
    fn set_round_highlight(&mut self, on: bool);
}

/// Start/game-over overlay.
pub trait ResultModal {
    fn show(&mut self, title: &str, subtitle: &str);
    fn hide(&mut self);
}

/// No-op HUD for headless runs.
#[derive(Debug, Default)]
pub struct NullHud;

impl HudSink for NullHud {
    fn set_score(&mut self, _score: u64) {}
    fn set_round(&mut self, _round: u32) {}
    fn set_round_highlight(&mut self, _on: bool) {}
}

/// No-op modal for headless runs.
#[derive(Debug, Default)]
pub struct NullModal;

impl ResultModal for NullModal {
    fn show(&mut self, _title: &str, _subtitle: &str) {}
    fn hide(&mut self) {}
}
