//! # Addressing-Mode Resolution
//!
//! Computes the effective address (or immediate value) an instruction operates
//! on from its raw operand bytes and the current register file.
//!
//! ## Wrap rules
//!
//! - Zero page indexed modes wrap within the zero page: `$FF,X` with X = 1 is
//!   `$00`, never `$0100`.
//! - Indexed-indirect `(v,X)` locates its pointer without carrying out of the
//!   operand's page: the low byte is at `(v + X) mod 256` and the high byte at
//!   `(v + X + 1) mod 256` within that page.
//! - Indirect-indexed `(v),Y` fetches its pointer with the same rule, then adds
//!   Y with a full carry.
//! - Absolute indexed modes carry across pages; a sum past 0xFFFF is an
//!   [`MemoryError::AddressOutOfRange`] rather than a wrap to the zero page.

use crate::addressing::AddressingMode;
use crate::cpu::Registers;
use crate::instruction::Instruction;
use crate::memory::{MemoryBus, MemoryError};
use crate::ExecutionError;

/// The resolved operand of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// The operand byte itself is the value.
    Immediate(u8),
    /// The value lives at this effective address.
    Address(u16),
}

impl Operand {
    /// Fetches the operand value, reading memory for [`Operand::Address`].
    pub fn value<M: MemoryBus + ?Sized>(self, memory: &mut M) -> Result<u8, MemoryError> {
        match self {
            Operand::Immediate(value) => Ok(value),
            Operand::Address(addr) => memory.read(addr),
        }
    }
}

/// Resolves the operand of `instruction` against `registers` and `memory`.
///
/// Implicit instructions have no operand and are rejected with
/// [`ExecutionError::UnsupportedAddressingMode`].
///
/// # Examples
///
/// ```
/// use six502::{resolve, AddressingMode, FlatMemory, Instruction, Mnemonic, Operand, Registers};
///
/// let mut mem = FlatMemory::new();
/// let regs = Registers { x: 7, ..Registers::default() };
/// let lda = Instruction::new(Mnemonic::Lda, AddressingMode::AbsoluteX, &[0x00, 0x20]);
///
/// assert_eq!(resolve(&lda, &regs, &mut mem).unwrap(), Operand::Address(0x2007));
/// ```
pub fn resolve<M: MemoryBus + ?Sized>(
    instruction: &Instruction,
    registers: &Registers,
    memory: &mut M,
) -> Result<Operand, ExecutionError> {
    use AddressingMode::*;

    let v = instruction.operand_value();
    let operand = match instruction.addressing_mode {
        Immediate => Operand::Immediate(v as u8),
        ZeroPage => Operand::Address(v & 0x00FF),
        ZeroPageX => Operand::Address((v as u8).wrapping_add(registers.x) as u16),
        ZeroPageY => Operand::Address((v as u8).wrapping_add(registers.y) as u16),
        Absolute => Operand::Address(v),
        AbsoluteX => Operand::Address(indexed(v, registers.x)?),
        AbsoluteY => Operand::Address(indexed(v, registers.y)?),
        Indirect => Operand::Address(memory.read_word(v)?),
        IndirectX => {
            let pointer = (v & 0xFF00) | (v as u8).wrapping_add(registers.x) as u16;
            Operand::Address(read_pointer(memory, pointer)?)
        }
        IndirectY => {
            let base = read_pointer(memory, v)?;
            Operand::Address(indexed(base, registers.y)?)
        }
        Implicit => {
            return Err(ExecutionError::UnsupportedAddressingMode {
                mnemonic: instruction.mnemonic,
                mode: instruction.addressing_mode,
            })
        }
    };
    Ok(operand)
}

/// `base + index` with a full carry, rejecting sums past 0xFFFF.
fn indexed(base: u16, index: u8) -> Result<u16, MemoryError> {
    let addr = base as u32 + index as u32;
    u16::try_from(addr).map_err(|_| MemoryError::AddressOutOfRange { addr, len: 1 })
}

/// Reads a little-endian pointer whose high byte wraps within the page of `addr`.
fn read_pointer<M: MemoryBus + ?Sized>(memory: &mut M, addr: u16) -> Result<u16, MemoryError> {
    let lo = memory.read(addr)?;
    let hi = memory.read((addr & 0xFF00) | (addr as u8).wrapping_add(1) as u16)?;
    Ok(u16::from_le_bytes([lo, hi]))
}
