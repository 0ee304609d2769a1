//! Non-volatile profile storage

pub mod at24;
pub mod eeprom;
pub mod memory;

pub use at24::{At24Config, At24Eeprom};
pub use eeprom::{EepromProfileStorage, StoredProfile, MAX_PERSISTED_PROFILES};
pub use memory::MemoryEeprom;
