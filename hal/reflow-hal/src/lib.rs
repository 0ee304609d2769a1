//! Reflow Controller Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits that board support
//! code implements for the oven controller. Keeping them apart from the
//! core logic lets the same profile store and storage drivers run against
//! a real I²C EEPROM on the board or a RAM image on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  reflow-core (profile store, control)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  reflow-drivers (storage, policies)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  reflow-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`eeprom::EepromBus`] - Byte-addressed non-volatile memory

#![no_std]
#![deny(unsafe_code)]

pub mod eeprom;

pub use eeprom::{EepromBus, EepromError, StorageRegion};
