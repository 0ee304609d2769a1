//! Unified profile catalog and setpoint lookup

use super::{
    populated_len, BuiltinProfile, ProfileId, BUILTIN_PROFILES, MAX_NAME_LEN, MAX_SAMPLES,
    SAMPLE_PERIOD_S, SETPOINT_MAX, UNKNOWN_NAME,
};
use crate::error::ProfileError;
use crate::traits::ProfileStorage;

/// A catalog index resolved to its backing store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileRef {
    /// Compiled-in profile
    Builtin(&'static BuiltinProfile),
    /// Persisted profile, by storage slot
    Persisted(usize),
}

/// Catalog of built-in and persisted profiles
///
/// Logical indices `0..builtin_count()` address built-ins, the rest address
/// persisted slots. [`ProfileStore::initialize`] must run before anything
/// else so the persisted count and selection are known.
#[derive(Debug)]
pub struct ProfileStore<S> {
    storage: S,
    builtins: &'static [BuiltinProfile],
    selected: usize,
    total: usize,
}

impl<S: ProfileStorage> ProfileStore<S> {
    /// Create a store over the factory catalog
    pub fn new(storage: S) -> Self {
        Self::with_builtins(storage, BUILTIN_PROFILES)
    }

    /// Create a store over a custom built-in catalog
    pub fn with_builtins(storage: S, builtins: &'static [BuiltinProfile]) -> Self {
        Self {
            storage,
            builtins,
            selected: 0,
            total: builtins.len(),
        }
    }

    /// Read the persisted count and selection
    ///
    /// Safe to call again; it recomputes from storage. A stale persisted
    /// selection is wrapped into range in memory but not written back.
    pub fn initialize(&mut self) {
        // Selection is persisted as a byte
        let room = usize::from(u8::MAX).saturating_sub(self.builtins.len());
        let persisted = self.storage.profile_count().min(room);
        self.total = self.builtins.len() + persisted;
        self.selected = if self.total == 0 {
            0
        } else {
            usize::from(self.storage.selected_index()) % self.total
        };
    }

    /// Total number of profiles (built-in + persisted)
    pub fn profile_count(&self) -> usize {
        self.total
    }

    /// Number of built-in profiles
    pub fn builtin_count(&self) -> usize {
        self.builtins.len()
    }

    /// Currently selected logical index
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Select a profile, wrapping the index modulo the catalog size
    ///
    /// Negative and overflowing indices wrap around rather than clamp, so
    /// `-1` selects the last profile. Returns the index actually selected.
    pub fn select_profile(&mut self, index: i32) -> usize {
        if self.total == 0 {
            return 0;
        }
        let total = i64::try_from(self.total).unwrap_or(i64::MAX);
        // rem_euclid of a positive modulus is in 0..total
        let wrapped = i64::from(index).rem_euclid(total) as usize;
        self.selected = wrapped;

        if let Err(_err) = self.storage.store_selected_index(wrapped as u8) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Failed to persist profile selection {}: {}", wrapped, _err);
        }
        wrapped
    }

    /// Resolve a profile id to its backing store
    ///
    /// Returns `None` for indices outside the catalog.
    pub fn resolve(&self, id: ProfileId) -> Option<ProfileRef> {
        let index = self.index_of(id);
        if index >= self.total {
            None
        } else if index < self.builtins.len() {
            Some(ProfileRef::Builtin(&self.builtins[index]))
        } else {
            Some(ProfileRef::Persisted(index - self.builtins.len()))
        }
    }

    /// Check whether a profile can be edited
    pub fn is_editable(&self, id: ProfileId) -> bool {
        matches!(self.resolve(id), Some(ProfileRef::Persisted(_)))
    }

    /// Commit the selected profile to storage
    pub fn save_selected(&mut self) -> Result<(), ProfileError> {
        match self.resolve(ProfileId::Selected) {
            Some(ProfileRef::Persisted(slot)) => {
                self.storage.store_profile(slot)?;
                Ok(())
            }
            _ => Err(ProfileError::NotEditable),
        }
    }

    /// Profile name, or `"unknown"` outside the catalog
    pub fn name(&self, id: ProfileId) -> &str {
        match self.resolve(id) {
            Some(ProfileRef::Builtin(profile)) => profile.name,
            Some(ProfileRef::Persisted(slot)) => self.storage.profile_name(slot),
            None => UNKNOWN_NAME,
        }
    }

    /// Rename a persisted profile
    ///
    /// Renaming a built-in is a no-op reported as
    /// [`ProfileError::NotEditable`].
    pub fn set_name(&mut self, id: ProfileId, name: &str) -> Result<(), ProfileError> {
        let Some(ProfileRef::Persisted(slot)) = self.resolve(id) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("Ignoring rename of read-only profile {}", self.index_of(id));
            return Err(ProfileError::NotEditable);
        };
        if name.len() > MAX_NAME_LEN {
            return Err(ProfileError::ValueRejected);
        }
        self.storage.set_profile_name(slot, name)?;
        Ok(())
    }

    /// Sample of the selected profile, 0 past the end of the table
    pub fn sample_at(&self, index: usize) -> u16 {
        if index >= MAX_SAMPLES {
            return 0;
        }
        match self.resolve(ProfileId::Selected) {
            Some(ProfileRef::Builtin(profile)) => profile.samples[index],
            Some(ProfileRef::Persisted(slot)) => self.storage.sample(slot, index),
            None => 0,
        }
    }

    /// Change one sample of the selected profile
    ///
    /// Only the upper bound of the value is checked; samples below the
    /// manual setpoint floor are allowed.
    pub fn set_sample_at(&mut self, index: usize, degrees: u16) -> Result<(), ProfileError> {
        let Some(ProfileRef::Persisted(slot)) = self.resolve(ProfileId::Selected) else {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "set_sample_at fails: profile={} idx={} value={} (read-only)",
                self.selected,
                index,
                degrees
            );
            return Err(ProfileError::NotEditable);
        };
        if index >= MAX_SAMPLES || degrees > SETPOINT_MAX {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "set_sample_at fails: profile={} idx={} value={}",
                self.selected,
                index,
                degrees
            );
            return Err(ProfileError::ValueRejected);
        }
        self.storage.set_sample(slot, index, degrees)?;
        Ok(())
    }

    /// Target temperature of the selected profile at a point in process time
    ///
    /// Interpolates linearly between the samples either side of
    /// `elapsed_s`. The last populated sample is held, never interpolated
    /// towards the terminator. Returns 0 once past the profile, which is
    /// the end-of-profile signal.
    pub fn setpoint_at_time(&self, elapsed_s: f32) -> f32 {
        let elapsed = if elapsed_s > 0.0 { elapsed_s } else { 0.0 };
        let period = SAMPLE_PERIOD_S as f32;

        // Float-to-int casts saturate, so huge times land past the table
        let index = (elapsed / period) as usize;
        let rest = elapsed % period;

        let value1 = f32::from(self.sample_at(index));
        let value2 = f32::from(self.sample_at(index.saturating_add(1)));

        if value2 == 0.0 {
            return value1;
        }
        value1 + (value2 - value1) * rest / period
    }

    /// Number of populated samples in the selected profile
    pub fn populated_samples(&self) -> usize {
        populated_len((0..MAX_SAMPLES).map(|i| self.sample_at(i)))
    }

    /// Process time until the selected profile signals completion
    pub fn duration_s(&self) -> u32 {
        self.populated_samples() as u32 * SAMPLE_PERIOD_S
    }

    /// Access the storage collaborator
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the storage collaborator
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Release the storage collaborator
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn index_of(&self, id: ProfileId) -> usize {
        match id {
            ProfileId::Selected => self.selected,
            ProfileId::Index(index) => index,
        }
    }
}
