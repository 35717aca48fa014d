//! Mock I2C EEPROM for testing
//!
//! Models a 24LC256-style serial EEPROM behind a bus master: two-byte
//! big-endian address pointer, auto-incrementing reads, and an internal write
//! cycle during which the device does not acknowledge its address.

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::{I2cConfig, I2cInterface},
    Result,
};
use std::boxed::Box;
use std::collections::VecDeque;
use std::fmt;
use std::vec;
use std::vec::Vec;

/// Default 7-bit device address (A2..A0 tied low)
pub const DEFAULT_EEPROM_ADDR: u8 = 0x50;

/// 24LC256 capacity in bytes
pub const EEPROM_CAPACITY: usize = 32 * 1024;

/// I2C transaction type for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cTransaction {
    /// Write transaction
    Write { addr: u8, data: Vec<u8> },
    /// Write transaction without STOP
    WriteNoStop { addr: u8, data: Vec<u8> },
    /// Read transaction
    Read { addr: u8, len: usize },
    /// Write-Read transaction
    WriteRead {
        addr: u8,
        write_data: Vec<u8>,
        read_len: usize,
    },
}

impl I2cTransaction {
    /// Target address of the transaction
    pub fn addr(&self) -> u8 {
        match self {
            I2cTransaction::Write { addr, .. }
            | I2cTransaction::WriteNoStop { addr, .. }
            | I2cTransaction::Read { addr, .. }
            | I2cTransaction::WriteRead { addr, .. } => *addr,
        }
    }

    /// True for zero-length writes (address probes)
    pub fn is_probe(&self) -> bool {
        matches!(self, I2cTransaction::Write { data, .. } if data.is_empty())
    }
}

/// Fault injection hook
///
/// Called with every transaction before the device model sees it. Returning
/// `Some(error)` fails the transaction with that error.
pub type FaultHook = Box<dyn FnMut(&I2cTransaction) -> Option<I2cError>>;

/// Mock I2C bus with a single EEPROM attached
///
/// Records all transactions for test verification and allows
/// pre-programming read data and injecting faults.
pub struct MockI2c {
    config: I2cConfig,
    device_addr: u8,
    memory: Vec<u8>,
    pointer: usize,
    write_cycle_polls: u32,
    busy_polls: u32,
    write_protect: bool,
    transactions: Vec<I2cTransaction>,
    read_data: VecDeque<u8>,
    fault_hook: Option<FaultHook>,
}

impl MockI2c {
    /// Create a new mock bus with an erased (0xFF) EEPROM at the default address
    pub fn new(config: I2cConfig) -> Self {
        Self {
            config,
            device_addr: DEFAULT_EEPROM_ADDR,
            memory: vec![0xFF; EEPROM_CAPACITY],
            pointer: 0,
            write_cycle_polls: 0,
            busy_polls: 0,
            write_protect: false,
            transactions: Vec::new(),
            read_data: VecDeque::new(),
            fault_hook: None,
        }
    }

    /// Move the EEPROM to another 7-bit address
    pub fn with_device_address(mut self, addr: u8) -> Self {
        self.device_addr = addr;
        self
    }

    /// Number of transactions NACKed after each data write (write cycle length)
    pub fn with_write_cycle_polls(mut self, polls: u32) -> Self {
        self.write_cycle_polls = polls;
        self
    }

    /// Assert the write-protect pin: data writes are acknowledged but not stored
    pub fn set_write_protect(&mut self, enabled: bool) {
        self.write_protect = enabled;
    }

    /// Fill the whole memory array with `value`
    pub fn fill(&mut self, value: u8) {
        self.memory.iter_mut().for_each(|b| *b = value);
    }

    /// Memory content at `address`
    pub fn memory_at(&self, address: u16) -> u8 {
        self.memory[address as usize % EEPROM_CAPACITY]
    }

    /// Install a fault injection hook
    pub fn set_fault_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&I2cTransaction) -> Option<I2cError> + 'static,
    {
        self.fault_hook = Some(Box::new(hook));
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> &[I2cTransaction] {
        &self.transactions
    }

    /// Clear transaction log
    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    /// Set data to return for read operations ahead of memory content
    pub fn set_read_data(&mut self, data: &[u8]) {
        self.read_data = data.iter().copied().collect();
    }

    /// Get current frequency
    pub fn frequency(&self) -> u32 {
        self.config.frequency
    }

    /// Record the transaction and decide whether the device acknowledges it
    fn begin(&mut self, transaction: I2cTransaction) -> Result<()> {
        let addr = transaction.addr();
        let injected = self
            .fault_hook
            .as_mut()
            .and_then(|hook| hook(&transaction));
        self.transactions.push(transaction);

        if let Some(error) = injected {
            return Err(PlatformError::I2c(error));
        }
        if addr != self.device_addr {
            return Err(PlatformError::I2c(I2cError::Nack));
        }
        if self.busy_polls > 0 {
            self.busy_polls -= 1;
            return Err(PlatformError::I2c(I2cError::Nack));
        }
        Ok(())
    }

    fn apply_write(&mut self, data: &[u8]) {
        if data.len() < 2 {
            return;
        }
        self.pointer = u16::from_be_bytes([data[0], data[1]]) as usize % EEPROM_CAPACITY;

        let payload = &data[2..];
        if payload.is_empty() {
            return;
        }
        if !self.write_protect {
            for (i, byte) in payload.iter().enumerate() {
                self.memory[(self.pointer + i) % EEPROM_CAPACITY] = *byte;
            }
        }
        self.busy_polls = self.write_cycle_polls;
    }

    fn apply_read(&mut self, buffer: &mut [u8]) {
        for slot in buffer.iter_mut() {
            *slot = match self.read_data.pop_front() {
                Some(byte) => byte,
                None => self.memory[self.pointer],
            };
            self.pointer = (self.pointer + 1) % EEPROM_CAPACITY;
        }
    }
}

impl fmt::Debug for MockI2c {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockI2c")
            .field("config", &self.config)
            .field("device_addr", &self.device_addr)
            .field("pointer", &self.pointer)
            .field("busy_polls", &self.busy_polls)
            .field("write_protect", &self.write_protect)
            .field("transactions", &self.transactions.len())
            .finish_non_exhaustive()
    }
}

impl I2cInterface for MockI2c {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.begin(I2cTransaction::Write {
            addr,
            data: data.to_vec(),
        })?;
        self.apply_write(data);
        Ok(())
    }

    fn write_no_stop(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.begin(I2cTransaction::WriteNoStop {
            addr,
            data: data.to_vec(),
        })?;
        self.apply_write(data);
        Ok(())
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()> {
        self.begin(I2cTransaction::Read {
            addr,
            len: buffer.len(),
        })?;
        self.apply_read(buffer);
        Ok(())
    }

    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        self.begin(I2cTransaction::WriteRead {
            addr,
            write_data: write_data.to_vec(),
            read_len: read_buffer.len(),
        })?;
        self.apply_write(write_data);
        self.apply_read(read_buffer);
        Ok(())
    }

    fn set_frequency(&mut self, frequency: u32) -> Result<()> {
        if frequency == 0 {
            return Err(PlatformError::InvalidConfig);
        }
        self.config.frequency = frequency;
        Ok(())
    }
}
