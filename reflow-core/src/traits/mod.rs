//! Collaborator traits
//!
//! These traits define the seams between the process-control core and
//! the board: where profiles are persisted and how heater duty is derived
//! from the control error.

pub mod heater;
pub mod storage;

pub use heater::HeatPolicy;
pub use storage::{ProfileStorage, StorageError};
