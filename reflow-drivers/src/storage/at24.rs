//! AT24-family I²C EEPROM
//!
//! Two-byte memory addressing (24C32 and up). Writes are split on page
//! boundaries, and after each page the device is polled for an
//! acknowledge until its internal write cycle finishes.

use embedded_hal::i2c::I2c;
use reflow_hal::{EepromBus, EepromError};

/// Largest page supported by the write buffer
pub const MAX_PAGE_SIZE: usize = 64;

/// AT24 device parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct At24Config {
    /// 7-bit device address
    pub address: u8,
    /// Capacity in bytes
    pub capacity: usize,
    /// Page size in bytes (at most [`MAX_PAGE_SIZE`])
    pub page_size: usize,
    /// Acknowledge polls before a write is reported as timed out
    pub max_polls: u16,
}

impl At24Config {
    /// 24C32 at the default address
    pub const AT24C32: Self = Self {
        address: 0x50,
        capacity: 4096,
        page_size: 32,
        max_polls: 1000,
    };

    /// 24C64 at the default address
    pub const AT24C64: Self = Self {
        address: 0x50,
        capacity: 8192,
        page_size: 32,
        max_polls: 1000,
    };
}

impl Default for At24Config {
    fn default() -> Self {
        Self::AT24C32
    }
}

/// AT24 EEPROM on an I²C bus
pub struct At24Eeprom<I> {
    i2c: I,
    config: At24Config,
}

impl<I: I2c> At24Eeprom<I> {
    /// Create a driver; page sizes above [`MAX_PAGE_SIZE`] are reduced
    pub fn new(i2c: I, mut config: At24Config) -> Self {
        config.page_size = config.page_size.clamp(1, MAX_PAGE_SIZE);
        Self { i2c, config }
    }

    /// Release the bus
    pub fn release(self) -> I {
        self.i2c
    }

    fn check_range(&self, offset: u16, len: usize) -> Result<(), EepromError> {
        match usize::from(offset).checked_add(len) {
            Some(end) if end <= self.config.capacity => Ok(()),
            _ => Err(EepromError::OutOfRange),
        }
    }

    /// Wait until the device acknowledges its address again
    fn wait_write_cycle(&mut self, offset: u16) -> Result<(), EepromError> {
        for _ in 0..self.config.max_polls {
            // Setting the address pointer doubles as the acknowledge poll
            if self.i2c.write(self.config.address, &offset.to_be_bytes()).is_ok() {
                return Ok(());
            }
        }
        #[cfg(feature = "defmt")]
        defmt::warn!("EEPROM write cycle timed out at {=u16:#x}", offset);
        Err(EepromError::Timeout)
    }
}

impl<I: I2c> EepromBus for At24Eeprom<I> {
    fn capacity(&self) -> usize {
        self.config.capacity
    }

    fn read(&mut self, offset: u16, buffer: &mut [u8]) -> Result<(), EepromError> {
        self.check_range(offset, buffer.len())?;
        self.i2c
            .write_read(self.config.address, &offset.to_be_bytes(), buffer)
            .map_err(|_| EepromError::Bus)
    }

    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), EepromError> {
        self.check_range(offset, data.len())?;

        let page_size = self.config.page_size;
        let mut frame = [0u8; MAX_PAGE_SIZE + 2];
        let mut address = usize::from(offset);
        let mut rest = data;

        while !rest.is_empty() {
            let room = page_size - address % page_size;
            let (chunk, tail) = rest.split_at(room.min(rest.len()));

            // In range by check_range, so the address fits in u16
            let start = address as u16;
            frame[..2].copy_from_slice(&start.to_be_bytes());
            frame[2..2 + chunk.len()].copy_from_slice(chunk);
            self.i2c
                .write(self.config.address, &frame[..2 + chunk.len()])
                .map_err(|_| EepromError::Bus)?;
            self.wait_write_cycle(start)?;

            address += chunk.len();
            rest = tail;
        }
        Ok(())
    }
}
