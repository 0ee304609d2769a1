//! Safety monitoring
//!
//! Detects implausible sensor readings and over-temperature so the
//! control tick can stop heating.

pub mod monitor;

pub use monitor::{FaultKind, SafetyMonitor, SafetyStatus};
