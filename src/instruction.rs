//! # Instruction Decoding
//!
//! Turns the bytes at a program counter into an [`Instruction`]. Operand bytes
//! are kept raw; what they mean depends on the addressing mode and is worked
//! out later by [`crate::resolver`].

use std::fmt;

use crate::addressing::AddressingMode;
use crate::memory::{MemoryBus, MemoryError};
use crate::opcodes::{lookup, Mnemonic};
use crate::ExecutionError;

/// A single decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Instruction mnemonic
    pub mnemonic: Mnemonic,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,

    /// Raw operand bytes (0-2), little-endian when read as a word
    pub operand: Vec<u8>,

    /// Total size in bytes (opcode + operand)
    pub byte_size: u8,
}

impl Instruction {
    /// Builds an instruction from its parts; the size is derived from the
    /// operand length.
    ///
    /// ```
    /// use six502::{AddressingMode, Instruction, Mnemonic};
    ///
    /// let lda = Instruction::new(Mnemonic::Lda, AddressingMode::Absolute, &[0x34, 0x12]);
    /// assert_eq!(lda.byte_size, 3);
    /// assert_eq!(lda.operand_value(), 0x1234);
    /// ```
    pub fn new(mnemonic: Mnemonic, addressing_mode: AddressingMode, operand: &[u8]) -> Self {
        Self {
            mnemonic,
            addressing_mode,
            operand: operand.to_vec(),
            byte_size: 1 + operand.len() as u8,
        }
    }

    /// Little-endian value of the operand bytes (0 when there are none).
    pub fn operand_value(&self) -> u16 {
        match self.operand.as_slice() {
            [] => 0,
            [lo] => *lo as u16,
            [lo, hi, ..] => u16::from_le_bytes([*lo, *hi]),
        }
    }
}

/// Decodes the instruction at `pc`.
///
/// Returns the instruction and the number of bytes it occupies. Decoding only
/// reads memory, so a failure leaves the CPU state untouched.
///
/// # Errors
///
/// - [`ExecutionError::InvalidOpcode`] if the byte at `pc` has no table entry
/// - [`ExecutionError::Memory`] if the operand runs past 0xFFFF or the read fails
///
/// # Examples
///
/// ```
/// use six502::{decode, AddressingMode, FlatMemory, Mnemonic};
///
/// let mut mem = FlatMemory::new();
/// mem.load(0x8000, &[0xBD, 0x00, 0x20]).unwrap(); // LDA $2000,X
///
/// let (instr, consumed) = decode(&mut mem, 0x8000).unwrap();
/// assert_eq!(instr.mnemonic, Mnemonic::Lda);
/// assert_eq!(instr.addressing_mode, AddressingMode::AbsoluteX);
/// assert_eq!(instr.operand, vec![0x00, 0x20]);
/// assert_eq!(consumed, 3);
/// ```
pub fn decode<M: MemoryBus + ?Sized>(
    memory: &mut M,
    pc: u16,
) -> Result<(Instruction, u16), ExecutionError> {
    let opcode = memory.read(pc)?;
    let metadata = lookup(opcode).ok_or(ExecutionError::InvalidOpcode { opcode, pc })?;

    let operand_len = (metadata.size_bytes - 1) as usize;
    let operand = if operand_len > 0 {
        let start = pc.checked_add(1).ok_or(MemoryError::AddressOutOfRange {
            addr: pc as u32 + 1,
            len: operand_len,
        })?;
        memory.read_range(start, operand_len)?
    } else {
        Vec::new()
    };

    let instruction = Instruction {
        mnemonic: metadata.mnemonic,
        addressing_mode: metadata.addressing_mode,
        operand,
        byte_size: metadata.size_bytes,
    };
    Ok((instruction, metadata.size_bytes as u16))
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AddressingMode::*;

        let v = self.operand_value();
        match self.addressing_mode {
            Implicit => write!(f, "{}", self.mnemonic),
            Immediate => write!(f, "{} #${:02X}", self.mnemonic, v),
            ZeroPage => write!(f, "{} ${:02X}", self.mnemonic, v),
            ZeroPageX => write!(f, "{} ${:02X},X", self.mnemonic, v),
            ZeroPageY => write!(f, "{} ${:02X},Y", self.mnemonic, v),
            Absolute => write!(f, "{} ${:04X}", self.mnemonic, v),
            AbsoluteX => write!(f, "{} ${:04X},X", self.mnemonic, v),
            AbsoluteY => write!(f, "{} ${:04X},Y", self.mnemonic, v),
            Indirect => write!(f, "{} (${:04X})", self.mnemonic, v),
            IndirectX => write!(f, "{} (${:02X},X)", self.mnemonic, v),
            IndirectY => write!(f, "{} (${:02X}),Y", self.mnemonic, v),
        }
    }
}
