//! Process control
//!
//! Operating modes, the periodic control tick and the locked context that
//! keeps operator edits from racing the tick.

pub mod controller;
pub mod mode;
pub mod shared;

pub use controller::{clamp_setpoint, ProcessController, TickOutput, BAKE_TIMER_MAX_S};
pub use mode::Mode;
pub use shared::{Oven, SharedOven};
