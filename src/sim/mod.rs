//! Simulation module
//!
//! All gameplay logic lives here, behind the `Surface`/`HudSink`/`ResultModal`
//! seams so it never touches the platform:
//! - Fixed per-tick order (fire, player, particles, projectiles, enemies)
//! - Seeded RNG only
//! - Timers are millisecond deadlines against the caller's clock

pub mod entity;
pub mod round;
pub mod session;
pub mod world;

pub use entity::{Enemy, Particle, Player, Projectile};
pub use round::{RoundDirector, RoundPhase, spawn_cadence_ms, spawn_quota};
pub use session::{GameSession, SessionPhase};
pub use world::{StepReport, World, circles_touch};
