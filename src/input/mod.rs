//! Multi-device input fusion
//!
//! Raw device events land in per-source latest-value slots (`InputMailbox`);
//! once per tick the aggregator reads a consistent `InputSnapshot` and merges
//! it into one `ControlState` under a fixed priority policy
//! (touch > keyboard > gamepad > pointer).

pub mod aggregator;
pub mod joystick;
pub mod snapshot;

pub use aggregator::{ControlState, InputAggregator};
pub use joystick::VirtualJoystick;
pub use snapshot::{
    GamepadSnapshot, InputMailbox, InputSnapshot, KeyboardSnapshot, PointerSnapshot, StickState,
};
