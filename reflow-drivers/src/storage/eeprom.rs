//! EEPROM-backed profile storage
//!
//! Image layout follows [`StorageRegion`]: a header with the selection and
//! profile count, a controller configuration record, then one fixed-size
//! slot per persisted profile. Each region is an independent postcard
//! record, so a torn slot write only loses that slot.
//!
//! Every persisted profile is cached in RAM. Name and sample edits touch
//! the cache only; [`ProfileStorage::store_profile`] commits a slot.

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

use reflow_core::config::ControllerConfig;
use reflow_core::profile::{MAX_NAME_LEN, MAX_SAMPLES};
use reflow_core::traits::{ProfileStorage, StorageError};
use reflow_hal::eeprom::{CONFIG_SIZE, HEADER_SIZE, PROFILE_SLOT_SIZE};
use reflow_hal::{EepromBus, EepromError, StorageRegion};

/// Most persisted profiles held in the RAM cache
pub const MAX_PERSISTED_PROFILES: usize = 16;

/// Image magic ("RFLW")
const IMAGE_MAGIC: u32 = 0x5246_4C57;

/// Image layout version
const IMAGE_VERSION: u8 = 1;

/// Header record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Header {
    magic: u32,
    version: u8,
    selected: u8,
    count: u8,
}

impl Header {
    const fn empty() -> Self {
        Self {
            magic: IMAGE_MAGIC,
            version: IMAGE_VERSION,
            selected: 0,
            count: 0,
        }
    }

    fn is_valid(&self) -> bool {
        self.magic == IMAGE_MAGIC && self.version == IMAGE_VERSION
    }
}

/// One persisted profile as stored in its slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredProfile {
    /// Display name
    pub name: String<MAX_NAME_LEN>,
    /// Samples up to the last one written
    pub samples: Vec<u16, MAX_SAMPLES>,
}

impl StoredProfile {
    /// Create an empty profile with a name
    pub fn named(name: &str) -> Result<Self, StorageError> {
        let mut profile = Self::default();
        profile.name.push_str(name).map_err(|_| StorageError::Full)?;
        Ok(profile)
    }
}

fn bus_error(err: EepromError) -> StorageError {
    match err {
        EepromError::OutOfRange => StorageError::NoSuchSlot,
        EepromError::Bus | EepromError::Timeout => StorageError::Bus,
    }
}

/// Profile storage on an EEPROM bus
pub struct EepromProfileStorage<B> {
    bus: B,
    header: Header,
    profiles: Vec<StoredProfile, MAX_PERSISTED_PROFILES>,
    slots: usize,
}

impl<B: EepromBus> EepromProfileStorage<B> {
    /// Load the image from `bus`
    ///
    /// A blank or foreign image is formatted with no persisted profiles.
    /// A slot that fails to decode loads as an empty, unnamed profile.
    pub fn open(bus: B) -> Result<Self, StorageError> {
        let slots = StorageRegion::profile_slots(bus.capacity()).min(MAX_PERSISTED_PROFILES);
        let mut storage = Self {
            bus,
            header: Header::empty(),
            profiles: Vec::new(),
            slots,
        };

        let mut buffer = [0u8; HEADER_SIZE as usize];
        storage
            .bus
            .read_region(StorageRegion::Header, &mut buffer)
            .map_err(bus_error)?;

        match postcard::from_bytes::<Header>(&buffer) {
            Ok(header) if header.is_valid() => storage.header = header,
            _ => {
                #[cfg(feature = "defmt")]
                defmt::warn!("No valid profile image, formatting");
                storage.write_header()?;
                return Ok(storage);
            }
        }

        let count = usize::from(storage.header.count).min(slots);
        storage.header.count = count as u8;
        for slot in 0..count {
            let profile = storage.read_slot(slot)?;
            storage
                .profiles
                .push(profile)
                .map_err(|_| StorageError::Full)?;
        }

        #[cfg(feature = "defmt")]
        defmt::info!("Loaded {} persisted profiles", count);
        Ok(storage)
    }

    /// Number of slots the device can hold
    pub fn capacity(&self) -> usize {
        self.slots
    }

    /// Append a new empty profile and commit it
    ///
    /// Returns the new slot number.
    pub fn create_profile(&mut self, name: &str) -> Result<usize, StorageError> {
        if self.profiles.len() >= self.slots {
            return Err(StorageError::Full);
        }
        let slot = self.profiles.len();
        self.profiles
            .push(StoredProfile::named(name)?)
            .map_err(|_| StorageError::Full)?;

        let committed = self.write_slot(slot).and_then(|()| {
            self.header.count = self.profiles.len() as u8;
            self.write_header()
        });
        if let Err(err) = committed {
            self.profiles.pop();
            self.header.count = self.profiles.len() as u8;
            return Err(err);
        }
        Ok(slot)
    }

    /// Drop every persisted profile and reset the selection
    pub fn format(&mut self) -> Result<(), StorageError> {
        self.profiles.clear();
        self.header = Header::empty();
        self.write_header()
    }

    /// Cached copy of a persisted profile
    pub fn profile(&self, slot: usize) -> Option<&StoredProfile> {
        self.profiles.get(slot)
    }

    /// Controller configuration, defaults if missing or invalid
    pub fn load_config(&mut self) -> ControllerConfig {
        let mut buffer = [0u8; CONFIG_SIZE as usize];
        match self.bus.read_region(StorageRegion::Config, &mut buffer) {
            Ok(len) => ControllerConfig::from_postcard(&buffer[..len]),
            Err(_) => ControllerConfig::default(),
        }
    }

    /// Persist the controller configuration
    pub fn store_config(&mut self, config: &ControllerConfig) -> Result<(), StorageError> {
        let mut buffer = [0u8; CONFIG_SIZE as usize];
        let encoded = config
            .to_postcard(&mut buffer)
            .map_err(|_| StorageError::Full)?;
        self.bus
            .write_region(StorageRegion::Config, encoded)
            .map_err(bus_error)
    }

    /// Access the underlying bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutable access to the underlying bus
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Release the underlying bus
    pub fn into_bus(self) -> B {
        self.bus
    }

    fn write_header(&mut self) -> Result<(), StorageError> {
        let mut buffer = [0u8; HEADER_SIZE as usize];
        let encoded = postcard::to_slice(&self.header, &mut buffer).map_err(|_| StorageError::Full)?;
        self.bus
            .write_region(StorageRegion::Header, encoded)
            .map_err(bus_error)
    }

    fn read_slot(&mut self, slot: usize) -> Result<StoredProfile, StorageError> {
        let mut buffer = [0u8; PROFILE_SLOT_SIZE as usize];
        self.bus
            .read_region(StorageRegion::Profile(slot as u8), &mut buffer)
            .map_err(bus_error)?;
        match postcard::from_bytes::<StoredProfile>(&buffer) {
            Ok(profile) => Ok(profile),
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Profile slot {} is corrupted, loading empty", slot);
                Ok(StoredProfile::default())
            }
        }
    }

    fn write_slot(&mut self, slot: usize) -> Result<(), StorageError> {
        let profile = self.profiles.get(slot).ok_or(StorageError::NoSuchSlot)?;
        let mut buffer = [0u8; PROFILE_SLOT_SIZE as usize];
        let encoded = postcard::to_slice(profile, &mut buffer).map_err(|_| StorageError::Full)?;
        self.bus
            .write_region(StorageRegion::Profile(slot as u8), encoded)
            .map_err(bus_error)
    }
}

impl<B: EepromBus> ProfileStorage for EepromProfileStorage<B> {
    fn selected_index(&self) -> u8 {
        self.header.selected
    }

    fn store_selected_index(&mut self, index: u8) -> Result<(), StorageError> {
        if self.header.selected == index {
            return Ok(());
        }
        self.header.selected = index;
        self.write_header()
    }

    fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    fn profile_name(&self, slot: usize) -> &str {
        self.profiles
            .get(slot)
            .map(|profile| profile.name.as_str())
            .unwrap_or("")
    }

    fn set_profile_name(&mut self, slot: usize, name: &str) -> Result<(), StorageError> {
        let profile = self.profiles.get_mut(slot).ok_or(StorageError::NoSuchSlot)?;
        let mut renamed = String::new();
        renamed.push_str(name).map_err(|_| StorageError::Full)?;
        profile.name = renamed;
        Ok(())
    }

    fn sample(&self, slot: usize, index: usize) -> u16 {
        self.profiles
            .get(slot)
            .and_then(|profile| profile.samples.get(index))
            .copied()
            .unwrap_or(0)
    }

    fn set_sample(&mut self, slot: usize, index: usize, value: u16) -> Result<(), StorageError> {
        let profile = self.profiles.get_mut(slot).ok_or(StorageError::NoSuchSlot)?;
        if index >= MAX_SAMPLES {
            return Err(StorageError::Full);
        }
        if index >= profile.samples.len() {
            profile
                .samples
                .resize(index + 1, 0)
                .map_err(|_| StorageError::Full)?;
        }
        profile.samples[index] = value;
        Ok(())
    }

    fn store_profile(&mut self, slot: usize) -> Result<(), StorageError> {
        self.write_slot(slot)
    }
}
