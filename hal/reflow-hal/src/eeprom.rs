//! Non-volatile memory abstractions
//!
//! Provides a byte-addressed bus trait for EEPROM-like parts plus the
//! region map shared by everything that reads or writes the image.

/// Size of the header region (magic, version, selection, profile count)
pub const HEADER_SIZE: u16 = 16;

/// Size of the controller configuration region
pub const CONFIG_SIZE: u16 = 48;

/// Size of one persisted profile slot
pub const PROFILE_SLOT_SIZE: u16 = 192;

/// Offset of the first profile slot
pub const PROFILE_BASE: u16 = HEADER_SIZE + CONFIG_SIZE;

/// Regions of the non-volatile image
///
/// Every region has a fixed offset and length so a single corrupted
/// profile never shifts the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageRegion {
    /// Image header
    Header,
    /// Controller configuration (postcard)
    Config,
    /// Persisted profile slot (postcard)
    Profile(u8),
}

impl StorageRegion {
    /// Byte offset of the region
    pub const fn offset(self) -> u16 {
        match self {
            StorageRegion::Header => 0,
            StorageRegion::Config => HEADER_SIZE,
            StorageRegion::Profile(slot) => PROFILE_BASE + (slot as u16) * PROFILE_SLOT_SIZE,
        }
    }

    /// Length of the region in bytes
    pub const fn len(self) -> u16 {
        match self {
            StorageRegion::Header => HEADER_SIZE,
            StorageRegion::Config => CONFIG_SIZE,
            StorageRegion::Profile(_) => PROFILE_SLOT_SIZE,
        }
    }

    /// One past the last byte of the region
    pub const fn end(self) -> usize {
        self.offset() as usize + self.len() as usize
    }

    /// Number of profile slots that fit in a device of `capacity` bytes
    pub const fn profile_slots(capacity: usize) -> usize {
        if capacity <= PROFILE_BASE as usize {
            0
        } else {
            (capacity - PROFILE_BASE as usize) / PROFILE_SLOT_SIZE as usize
        }
    }
}

/// Errors from non-volatile memory operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EepromError {
    /// Bus transfer failed
    Bus,
    /// Access beyond the end of the device
    OutOfRange,
    /// Device did not finish its write cycle in time
    Timeout,
}

/// Byte-addressed non-volatile memory
///
/// Implementations must complete synchronously. A write returns only once
/// the data is committed (or the bounded wait for the device gave up).
pub trait EepromBus {
    /// Total capacity in bytes
    fn capacity(&self) -> usize;

    /// Read `buffer.len()` bytes starting at `offset`
    fn read(&mut self, offset: u16, buffer: &mut [u8]) -> Result<(), EepromError>;

    /// Write `data` starting at `offset`
    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), EepromError>;

    /// Read a whole region into the front of `buffer`
    fn read_region(
        &mut self,
        region: StorageRegion,
        buffer: &mut [u8],
    ) -> Result<usize, EepromError> {
        let len = region.len() as usize;
        if region.end() > self.capacity() || buffer.len() < len {
            return Err(EepromError::OutOfRange);
        }
        self.read(region.offset(), &mut buffer[..len])?;
        Ok(len)
    }

    /// Write `data` at the start of a region
    fn write_region(&mut self, region: StorageRegion, data: &[u8]) -> Result<(), EepromError> {
        if data.len() > region.len() as usize || region.end() > self.capacity() {
            return Err(EepromError::OutOfRange);
        }
        self.write(region.offset(), data)
    }
}
