//! Heater duty policies

pub mod bang_bang;
pub mod fixed;
pub mod pid;
pub mod proportional;

pub use bang_bang::{BangBangConfig, BangBangPolicy};
pub use fixed::Fixed32;
pub use pid::{PidCoefficients, PidConfig, PidPolicy};
pub use proportional::{ProportionalConfig, ProportionalPolicy};

/// Convert a temperature to tenths of a degree, saturating
///
/// NaN maps to 0.
pub(crate) fn celsius_x10(celsius: f32) -> i16 {
    // Float-to-int casts saturate and send NaN to 0
    (celsius * 10.0) as i16
}
