//! Fixed-point arithmetic for heater gains
//!
//! Q16.16 format. Gains are entered as ×100 integers so configuration
//! never needs float parsing.

use core::ops::{Add, Neg, Sub};

/// Q16.16 fixed-point number
///
/// Range: approximately -32768.0 to +32767.99998
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fixed32(pub i32);

impl Fixed32 {
    /// Zero value
    pub const ZERO: Self = Self(0);

    /// Fractional bits (16)
    pub const FRAC_BITS: u32 = 16;

    /// Create from a whole integer
    ///
    /// # Example
    /// ```
    /// use reflow_drivers::heater::Fixed32;
    /// let two = Fixed32::from_int(2);
    /// assert_eq!(two.to_int(), 2);
    /// ```
    #[inline]
    pub const fn from_int(n: i16) -> Self {
        Self((n as i32) << Self::FRAC_BITS)
    }

    /// Create from a scaled integer (value × 100)
    ///
    /// # Example
    /// ```
    /// use reflow_drivers::heater::Fixed32;
    /// let gain = Fixed32::from_scaled_100(250);
    /// assert_eq!(gain.to_int(), 2);
    /// ```
    #[inline]
    pub const fn from_scaled_100(n: i32) -> Self {
        // Gains stay well below 1000, so the shift cannot overflow
        Self((n << Self::FRAC_BITS) / 100)
    }

    /// Convert to whole integer (floors)
    #[inline]
    pub const fn to_int(self) -> i16 {
        (self.0 >> Self::FRAC_BITS) as i16
    }

    /// Convert to scaled integer (value × 100)
    #[inline]
    pub const fn to_scaled_100(self) -> i32 {
        ((self.0 as i64 * 100) >> Self::FRAC_BITS) as i32
    }

    /// Multiply two fixed-point numbers, saturating
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn mul(self, other: Self) -> Self {
        let result = ((self.0 as i64) * (other.0 as i64)) >> Self::FRAC_BITS;
        Self(result.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
    }

    /// Saturating addition
    #[inline]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Clamp value to a range
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self(self.0.clamp(min.0, max.0))
    }

    /// Check if value is zero
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Clamp to a duty cycle (0-255)
    #[inline]
    pub fn to_duty(self) -> u8 {
        self.to_int().clamp(0, u8::MAX as i16) as u8
    }
}

impl Add for Fixed32 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self(self.0.wrapping_add(other.0))
    }
}

impl Sub for Fixed32 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self(self.0.wrapping_sub(other.0))
    }
}

impl Neg for Fixed32 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl From<i16> for Fixed32 {
    fn from(n: i16) -> Self {
        Self::from_int(n)
    }
}
