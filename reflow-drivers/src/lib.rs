//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in reflow-core and reflow-hal:
//!
//! - Heater duty policies (proportional, PID, bang-bang)
//! - EEPROM-backed profile storage and the AT24 I²C bus
//! - PWM output for the heater and fan

#![no_std]
#![deny(unsafe_code)]

pub mod heater;
pub mod output;
pub mod storage;
