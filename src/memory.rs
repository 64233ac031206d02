//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from where
//! memory physically lives. Two implementations ship with the crate:
//!
//! - [`FlatMemory`]: a contiguous 64KB array
//! - [`crate::RemoteMemory`]: pages fetched from a [`crate::PageServer`] over UDP
//!
//! ## Design Principles
//!
//! - Accesses take `&mut self`: a remote backend refreshes its page cache on read
//! - Accesses are fallible: a remote backend can fail on the socket, and range
//!   reads that run past 0xFFFF are rejected instead of wrapping
//! - The address space is 256 pages of 256 bytes; page 0 is the zero page and
//!   page 1 holds the hardware stack

use thiserror::Error;

/// Size of one page in bytes.
pub const PAGE_SIZE: usize = 256;

/// Total addressable bytes.
pub const ADDRESS_SPACE: usize = 0x1_0000;

/// Base address of the hardware stack page.
pub const STACK_PAGE: u16 = 0x0100;

/// Location of the little-endian reset vector read at power-on.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Splits an address into `(page number, offset within page)`.
///
/// ```
/// assert_eq!(six502::memory::split_address(0x12AB), (0x12, 0xAB));
/// ```
pub const fn split_address(addr: u16) -> (u8, u8) {
    ((addr >> 8) as u8, (addr & 0xFF) as u8)
}

/// Errors raised by memory accesses.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// An access touched bytes beyond 0xFFFF.
    #[error("access of {len} byte(s) at 0x{addr:04X} runs past the end of the address space")]
    AddressOutOfRange { addr: u32, len: usize },

    /// The socket backing a remote memory failed.
    #[error("remote memory I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The background listener of a remote memory is gone.
    #[error("remote memory listener has stopped")]
    ListenerDisconnected,

    /// No response for a page arrived within the configured timeout.
    #[error("no response for page 0x{pageno:02X} within the configured timeout")]
    ResponseTimeout { pageno: u8 },
}

/// Rejects accesses of `len` bytes at `addr` that would leave the address space.
pub fn check_range(addr: u32, len: usize) -> Result<(), MemoryError> {
    if addr as usize + len > ADDRESS_SPACE {
        return Err(MemoryError::AddressOutOfRange { addr, len });
    }
    Ok(())
}

/// Memory bus trait for the CPU to read and write bytes.
///
/// # Examples
///
/// ```
/// use six502::{FlatMemory, MemoryBus};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42).unwrap();
/// assert_eq!(mem.read(0x1234).unwrap(), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use six502::{MemoryBus, MemoryError};
///
/// struct RomRamMemory {
///     ram: [u8; 0x8000],
///     rom: [u8; 0x8000],
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn read(&mut self, addr: u16) -> Result<u8, MemoryError> {
///         if addr < 0x8000 {
///             Ok(self.ram[addr as usize])
///         } else {
///             Ok(self.rom[(addr - 0x8000) as usize])
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) -> Result<(), MemoryError> {
///         if addr < 0x8000 {
///             self.ram[addr as usize] = value;
///         }
///         // Writes to ROM are silently ignored
///         Ok(())
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    fn read(&mut self, addr: u16) -> Result<u8, MemoryError>;

    /// Writes a byte to the specified 16-bit address.
    fn write(&mut self, addr: u16, value: u8) -> Result<(), MemoryError>;

    /// Reads `len` contiguous bytes starting at `addr`.
    ///
    /// Fails with [`MemoryError::AddressOutOfRange`] if the range runs past
    /// 0xFFFF; the range never wraps back to 0x0000.
    fn read_range(&mut self, addr: u16, len: usize) -> Result<Vec<u8>, MemoryError> {
        check_range(addr as u32, len)?;
        (0..len).map(|i| self.read(addr + i as u16)).collect()
    }

    /// Reads a little-endian 16-bit word at `addr`, `addr + 1`.
    fn read_word(&mut self, addr: u16) -> Result<u16, MemoryError> {
        let bytes = self.read_range(addr, 2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses map to a single contiguous RAM array initialized to
/// zero.
///
/// # Examples
///
/// ```
/// use six502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.load(0xFFFC, &[0x00, 0x80]).unwrap(); // reset vector -> 0x8000
/// memory.write(0x8000, 0xEA).unwrap(); // NOP
///
/// let mut cpu = CPU::new(memory);
/// cpu.reset().unwrap();
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
pub struct FlatMemory {
    data: Box<[u8; ADDRESS_SPACE]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory with all bytes zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; ADDRESS_SPACE]),
        }
    }

    /// Copies `bytes` into memory starting at `addr`.
    pub fn load(&mut self, addr: u16, bytes: &[u8]) -> Result<(), MemoryError> {
        check_range(addr as u32, bytes.len())?;
        let start = addr as usize;
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Borrows the whole address space.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&mut self, addr: u16) -> Result<u8, MemoryError> {
        Ok(self.data[addr as usize])
    }

    fn write(&mut self, addr: u16, value: u8) -> Result<(), MemoryError> {
        self.data[addr as usize] = value;
        Ok(())
    }

    fn read_range(&mut self, addr: u16, len: usize) -> Result<Vec<u8>, MemoryError> {
        check_range(addr as u32, len)?;
        let start = addr as usize;
        Ok(self.data[start..start + len].to_vec())
    }
}
