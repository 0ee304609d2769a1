//! Controller configuration
//!
//! Externally tunable policy values for the process controller. The
//! record is persisted with postcard behind a magic/version header; any
//! record that fails validation is replaced by defaults.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Magic number to identify a valid configuration record
pub const CONFIG_MAGIC: u32 = 0x5246_4C43; // "RFLC"

/// Current configuration record version
pub const CONFIG_VERSION: u8 = 1;

/// Process controller tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    /// Preheating while measured is below this percentage of the target
    pub preheat_threshold_pct: u8,
    /// Lowest plausible sensor reading (°C)
    pub sensor_min_c: i16,
    /// Highest plausible sensor reading (°C)
    pub sensor_max_c: i16,
    /// Readings above this stop the heater (°C)
    pub over_temp_c: i16,
    /// Heater duty clamp (0-255)
    pub max_heat_duty: u8,
    /// Fan duty clamp (0-255)
    pub max_fan_duty: u8,
    /// Fan duty in standby-with-fan mode
    pub standby_fan_duty: u8,
    /// Overshoot tolerated before the fan assists cooling (°C)
    pub cooling_band_c: u8,
    /// Fan duty added per degree of overshoot beyond the band
    pub fan_gain: u8,
    /// After a reflow the fan runs until measured drops below this (°C)
    pub cooldown_fan_until_c: i16,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            preheat_threshold_pct: 95,
            sensor_min_c: -20,
            sensor_max_c: 350,
            over_temp_c: 300,
            max_heat_duty: 255,
            max_fan_duty: 255,
            standby_fan_duty: 255,
            cooling_band_c: 5,
            fan_gain: 16,
            cooldown_fan_until_c: 50,
        }
    }
}

impl ControllerConfig {
    /// Check internal consistency
    ///
    /// The plausible range must be non-empty and contain the
    /// over-temperature limit, and the preheat threshold is a percentage.
    pub fn is_valid(&self) -> bool {
        self.sensor_min_c < self.sensor_max_c
            && self.over_temp_c <= self.sensor_max_c
            && self.over_temp_c > self.sensor_min_c
            && self.preheat_threshold_pct <= 100
    }
}

/// Configuration record as stored in non-volatile memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConfigRecord {
    /// Magic number for validation
    pub magic: u32,
    /// Record format version
    pub version: u8,
    /// The configuration itself
    pub config: ControllerConfig,
}

impl ConfigRecord {
    /// Wrap a configuration in a current-version record
    pub const fn new(config: ControllerConfig) -> Self {
        Self {
            magic: CONFIG_MAGIC,
            version: CONFIG_VERSION,
            config,
        }
    }

    /// Check magic, version and contents
    pub fn is_valid(&self) -> bool {
        self.magic == CONFIG_MAGIC && self.version == CONFIG_VERSION && self.config.is_valid()
    }
}

#[cfg(feature = "serde")]
impl ControllerConfig {
    /// Serialize into `buffer` as a postcard record
    pub fn to_postcard<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8], postcard::Error> {
        postcard::to_slice(&ConfigRecord::new(*self), buffer)
    }

    /// Decode a postcard record, falling back to defaults when invalid
    pub fn from_postcard(bytes: &[u8]) -> Self {
        match postcard::from_bytes::<ConfigRecord>(bytes) {
            Ok(record) if record.is_valid() => record.config,
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ControllerConfig::default().is_valid());
        assert!(ConfigRecord::new(ControllerConfig::default()).is_valid());
    }

    #[test]
    fn test_invalid_ranges() {
        let config = ControllerConfig {
            sensor_min_c: 400,
            ..Default::default()
        };
        assert!(!config.is_valid());

        let config = ControllerConfig {
            over_temp_c: 500,
            ..Default::default()
        };
        assert!(!config.is_valid());

        let config = ControllerConfig {
            preheat_threshold_pct: 150,
            ..Default::default()
        };
        assert!(!config.is_valid());
    }

    #[test]
    fn test_record_magic() {
        let mut record = ConfigRecord::new(ControllerConfig::default());
        record.magic = 0xFFFF_FFFF;
        assert!(!record.is_valid());

        let mut record = ConfigRecord::new(ControllerConfig::default());
        record.version = CONFIG_VERSION + 1;
        assert!(!record.is_valid());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_fallback() {
        // Erased EEPROM reads back as 0xFF
        assert_eq!(
            ControllerConfig::from_postcard(&[0xFF; 32]),
            ControllerConfig::default()
        );

        let tuned = ControllerConfig {
            fan_gain: 8,
            ..Default::default()
        };
        let mut buffer = [0u8; 48];
        let used = tuned.to_postcard(&mut buffer).unwrap().len();
        assert_eq!(ControllerConfig::from_postcard(&buffer[..used]), tuned);
    }
}
