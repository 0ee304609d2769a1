//! Board-agnostic core logic for reflow oven firmware
//!
//! This crate contains the process-control core that sits between the
//! temperature sensor and the heater/fan outputs:
//!
//! - Profile store: built-in and persisted profiles under one index
//! - Time-based setpoint interpolation
//! - Process controller: modes, bake timer, control tick
//! - Safety monitoring of sensor readings
//! - Configuration type definitions
//! - Collaborator traits (storage, heat policy)

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod process;
pub mod profile;
pub mod safety;
pub mod status;
pub mod traits;

pub use error::{ProfileError, ValueRejected};
pub use process::{Mode, Oven, ProcessController, SharedOven, TickOutput};
pub use profile::{ProfileId, ProfileStore};
pub use status::ProcessStatus;
