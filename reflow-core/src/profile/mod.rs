//! Temperature profile catalog
//!
//! Built-in profiles are compiled in and never written. Persisted profiles
//! live with the storage collaborator and can be renamed and edited.
//! [`ProfileStore`] puts both behind one logical index: built-ins first,
//! persisted profiles after them.

pub mod builtin;
pub mod store;

pub use builtin::BUILTIN_PROFILES;
pub use store::{ProfileRef, ProfileStore};

/// Samples per profile, including the terminator
pub const MAX_SAMPLES: usize = 48;

/// Process time covered by one sample
pub const SAMPLE_PERIOD_S: u32 = 10;

/// Lowest manual setpoint (°C)
pub const SETPOINT_MIN: u16 = 30;

/// Highest setpoint accepted anywhere (°C)
pub const SETPOINT_MAX: u16 = 260;

/// Maximum length of a persisted profile name
pub const MAX_NAME_LEN: usize = 32;

/// Name reported for indices outside the catalog
pub const UNKNOWN_NAME: &str = "unknown";

/// A compiled-in, read-only profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinProfile {
    /// Display name
    pub name: &'static str,
    /// One setpoint per sample period, zero-terminated
    pub samples: [u16; MAX_SAMPLES],
}

impl BuiltinProfile {
    /// Number of samples before the terminator
    pub fn populated(&self) -> usize {
        populated_len(self.samples.iter().copied())
    }
}

/// Which profile an operation addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProfileId {
    /// The currently selected profile
    Selected,
    /// A logical catalog index
    Index(usize),
}

impl From<usize> for ProfileId {
    fn from(index: usize) -> Self {
        ProfileId::Index(index)
    }
}

/// Count samples up to (not including) the first terminator
pub fn populated_len(samples: impl Iterator<Item = u16>) -> usize {
    samples.take(MAX_SAMPLES).take_while(|&t| t != 0).count()
}
