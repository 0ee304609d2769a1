//! RAM-backed EEPROM bus for hosts and tests

use reflow_hal::{EepromBus, EepromError};

/// Value of an erased EEPROM cell
pub const ERASED: u8 = 0xFF;

/// EEPROM image held in RAM
#[derive(Debug, Clone)]
pub struct MemoryEeprom<const N: usize> {
    data: [u8; N],
    writes: usize,
    fail: bool,
}

impl<const N: usize> MemoryEeprom<N> {
    /// Create an erased image
    pub const fn new() -> Self {
        Self {
            data: [ERASED; N],
            writes: 0,
            fail: false,
        }
    }

    /// Raw image contents
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable image contents, for injecting corruption
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Number of write calls so far
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Make every subsequent access fail with [`EepromError::Bus`]
    pub fn set_failing(&mut self, fail: bool) {
        self.fail = fail;
    }

    fn span(&self, offset: u16, len: usize) -> Result<core::ops::Range<usize>, EepromError> {
        if self.fail {
            return Err(EepromError::Bus);
        }
        let start = usize::from(offset);
        let end = start.checked_add(len).ok_or(EepromError::OutOfRange)?;
        if end > N {
            return Err(EepromError::OutOfRange);
        }
        Ok(start..end)
    }
}

impl<const N: usize> Default for MemoryEeprom<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EepromBus for MemoryEeprom<N> {
    fn capacity(&self) -> usize {
        N
    }

    fn read(&mut self, offset: u16, buffer: &mut [u8]) -> Result<(), EepromError> {
        let span = self.span(offset, buffer.len())?;
        buffer.copy_from_slice(&self.data[span]);
        Ok(())
    }

    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), EepromError> {
        let span = self.span(offset, data.len())?;
        self.data[span].copy_from_slice(data);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflow_hal::StorageRegion;

    #[test]
    fn test_read_write() {
        let mut eeprom = MemoryEeprom::<128>::new();
        eeprom.write(10, &[1, 2, 3]).unwrap();

        let mut buffer = [0u8; 5];
        eeprom.read(9, &mut buffer).unwrap();
        assert_eq!(buffer, [ERASED, 1, 2, 3, ERASED]);
        assert_eq!(eeprom.writes(), 1);
    }

    #[test]
    fn test_out_of_range() {
        let mut eeprom = MemoryEeprom::<16>::new();
        assert_eq!(eeprom.write(15, &[0, 0]), Err(EepromError::OutOfRange));

        let mut buffer = [0u8; 64];
        assert_eq!(
            eeprom.read_region(StorageRegion::Config, &mut buffer),
            Err(EepromError::OutOfRange)
        );
    }

    #[test]
    fn test_failing_bus() {
        let mut eeprom = MemoryEeprom::<16>::new();
        eeprom.set_failing(true);
        assert_eq!(eeprom.write(0, &[0]), Err(EepromError::Bus));
    }
}
