//! Shared test fixtures

#![allow(dead_code)]

use heapless::String;
use reflow_core::profile::{MAX_NAME_LEN, MAX_SAMPLES};
use reflow_core::traits::{HeatPolicy, ProfileStorage, StorageError};

pub const SLOTS: usize = 8;

/// In-memory profile storage
pub struct RamStorage {
    pub count: usize,
    pub selected: u8,
    pub names: [String<MAX_NAME_LEN>; SLOTS],
    pub samples: [[u16; MAX_SAMPLES]; SLOTS],
    pub commits: usize,
}

impl RamStorage {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            selected: 0,
            names: Default::default(),
            samples: [[0; MAX_SAMPLES]; SLOTS],
            commits: 0,
        }
    }

    pub fn with_profile(mut self, slot: usize, samples: &[u16]) -> Self {
        self.samples[slot][..samples.len()].copy_from_slice(samples);
        self
    }
}

impl ProfileStorage for RamStorage {
    fn selected_index(&self) -> u8 {
        self.selected
    }

    fn store_selected_index(&mut self, index: u8) -> Result<(), StorageError> {
        self.selected = index;
        Ok(())
    }

    fn profile_count(&self) -> usize {
        self.count
    }

    fn profile_name(&self, slot: usize) -> &str {
        self.names.get(slot).map(|name| name.as_str()).unwrap_or("")
    }

    fn set_profile_name(&mut self, slot: usize, name: &str) -> Result<(), StorageError> {
        let entry = self.names.get_mut(slot).ok_or(StorageError::NoSuchSlot)?;
        entry.clear();
        entry.push_str(name).map_err(|_| StorageError::Full)
    }

    fn sample(&self, slot: usize, index: usize) -> u16 {
        self.samples
            .get(slot)
            .and_then(|samples| samples.get(index))
            .copied()
            .unwrap_or(0)
    }

    fn set_sample(&mut self, slot: usize, index: usize, value: u16) -> Result<(), StorageError> {
        let entry = self
            .samples
            .get_mut(slot)
            .and_then(|samples| samples.get_mut(index))
            .ok_or(StorageError::NoSuchSlot)?;
        *entry = value;
        Ok(())
    }

    fn store_profile(&mut self, slot: usize) -> Result<(), StorageError> {
        if slot >= self.count {
            return Err(StorageError::NoSuchSlot);
        }
        self.commits += 1;
        Ok(())
    }
}

/// Full power below the setpoint, off at or above it
pub struct OnOff;

impl HeatPolicy for OnOff {
    fn heat_duty(&mut self, setpoint_c: f32, measured_c: f32) -> u8 {
        if measured_c < setpoint_c {
            u8::MAX
        } else {
            0
        }
    }

    fn reset(&mut self) {}
}
