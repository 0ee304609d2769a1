//! Persistent profile storage trait

/// Errors reported by the storage collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Underlying bus or device failure
    Bus,
    /// Stored data failed validation
    Corrupted,
    /// Slot number beyond the persisted profile count
    NoSuchSlot,
    /// Data does not fit its slot
    Full,
}

/// Storage collaborator for persisted profiles and the selection scalar
///
/// Slots are numbered from 0 within the persisted range; translating
/// logical catalog indices is the profile store's job. Reads are served
/// from the implementation's working copy. Name and sample writes only
/// touch that working copy until [`ProfileStorage::store_profile`] commits
/// a slot.
pub trait ProfileStorage {
    /// Persisted selection index (may be stale or out of range)
    fn selected_index(&self) -> u8;

    /// Persist the selection index
    fn store_selected_index(&mut self, index: u8) -> Result<(), StorageError>;

    /// Number of persisted profiles
    fn profile_count(&self) -> usize;

    /// Name of a persisted profile
    fn profile_name(&self, slot: usize) -> &str;

    /// Rename a persisted profile
    fn set_profile_name(&mut self, slot: usize, name: &str) -> Result<(), StorageError>;

    /// Sample value of a persisted profile, 0 if unset
    fn sample(&self, slot: usize, index: usize) -> u16;

    /// Change one sample of a persisted profile
    fn set_sample(&mut self, slot: usize, index: usize, value: u16) -> Result<(), StorageError>;

    /// Commit a slot's working copy to non-volatile memory
    fn store_profile(&mut self, slot: usize) -> Result<(), StorageError>;
}
