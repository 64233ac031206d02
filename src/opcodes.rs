//! # Opcode Metadata Table
//!
//! This module contains the 256-entry opcode table that serves as the single
//! source of truth for instruction decoding. Each populated slot maps an opcode
//! byte to its mnemonic, addressing mode and total instruction size. Slots left
//! as `None` are opcodes the interpreter does not know; decoding them yields
//! [`crate::ExecutionError::InvalidOpcode`].
//!
//! Only the documented subset is populated. Adding an instruction means adding
//! a [`Mnemonic`] variant, a handler, and its rows in `DEFINITIONS`.

use std::fmt;

use crate::addressing::AddressingMode;

/// Instruction mnemonics understood by the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Nop,
    Tax,
    Txa,
    Tay,
    Tya,
    Inx,
    Dex,
    Iny,
    Dey,
    Pha,
    Pla,
    Jmp,
    Jsr,
    Rts,
    Cmp,
    Lda,
    Ldx,
    Ldy,
    Sta,
    Stx,
    Sty,
}

impl Mnemonic {
    /// Three-letter assembler name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Mnemonic::Nop => "NOP",
            Mnemonic::Tax => "TAX",
            Mnemonic::Txa => "TXA",
            Mnemonic::Tay => "TAY",
            Mnemonic::Tya => "TYA",
            Mnemonic::Inx => "INX",
            Mnemonic::Dex => "DEX",
            Mnemonic::Iny => "INY",
            Mnemonic::Dey => "DEY",
            Mnemonic::Pha => "PHA",
            Mnemonic::Pla => "PLA",
            Mnemonic::Jmp => "JMP",
            Mnemonic::Jsr => "JSR",
            Mnemonic::Rts => "RTS",
            Mnemonic::Cmp => "CMP",
            Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX",
            Mnemonic::Ldy => "LDY",
            Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX",
            Mnemonic::Sty => "STY",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for a single opcode.
///
/// # Examples
///
/// ```
/// use six502::{lookup, AddressingMode, Mnemonic};
///
/// let lda_imm = lookup(0xA9).unwrap();
/// assert_eq!(lda_imm.mnemonic, Mnemonic::Lda);
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.size_bytes, 2);
///
/// assert!(lookup(0x02).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic.
    pub mnemonic: Mnemonic,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Total instruction size in bytes (opcode + operands), 1-3.
    pub size_bytes: u8,
}

impl OpcodeMetadata {
    const fn new(mnemonic: Mnemonic, addressing_mode: AddressingMode) -> Self {
        Self {
            mnemonic,
            addressing_mode,
            size_bytes: 1 + addressing_mode.operand_len(),
        }
    }
}

use AddressingMode::*;
use Mnemonic::*;

const DEFINITIONS: &[(u8, Mnemonic, AddressingMode)] = &[
    (0xEA, Nop, Implicit),
    // stack
    (0x48, Pha, Implicit),
    (0x68, Pla, Implicit),
    // flow control
    (0x4C, Jmp, Absolute),
    (0x6C, Jmp, Indirect),
    (0x20, Jsr, Absolute),
    (0x60, Rts, Implicit),
    // compare
    (0xC9, Cmp, Immediate),
    (0xC5, Cmp, ZeroPage),
    (0xD5, Cmp, ZeroPageX),
    (0xCD, Cmp, Absolute),
    (0xDD, Cmp, AbsoluteX),
    (0xD9, Cmp, AbsoluteY),
    (0xC1, Cmp, IndirectX),
    (0xD1, Cmp, IndirectY),
    // loads
    (0xA2, Ldx, Immediate),
    (0xA6, Ldx, ZeroPage),
    (0xB6, Ldx, ZeroPageY),
    (0xAE, Ldx, Absolute),
    (0xBE, Ldx, AbsoluteY),
    (0xA0, Ldy, Immediate),
    (0xA4, Ldy, ZeroPage),
    (0xB4, Ldy, ZeroPageX),
    (0xAC, Ldy, Absolute),
    (0xBC, Ldy, AbsoluteX),
    (0xA9, Lda, Immediate),
    (0xA5, Lda, ZeroPage),
    (0xB5, Lda, ZeroPageX),
    (0xAD, Lda, Absolute),
    (0xBD, Lda, AbsoluteX),
    (0xB9, Lda, AbsoluteY),
    (0xA1, Lda, IndirectX),
    (0xB1, Lda, IndirectY),
    // stores
    (0x86, Stx, ZeroPage),
    (0x96, Stx, ZeroPageY),
    (0x8E, Stx, Absolute),
    (0x84, Sty, ZeroPage),
    (0x94, Sty, ZeroPageX),
    (0x8C, Sty, Absolute),
    (0x85, Sta, ZeroPage),
    (0x95, Sta, ZeroPageX),
    (0x8D, Sta, Absolute),
    (0x9D, Sta, AbsoluteX),
    (0x99, Sta, AbsoluteY),
    (0x81, Sta, IndirectX),
    (0x91, Sta, IndirectY),
    // transfers, increments and decrements
    (0xAA, Tax, Implicit),
    (0x8A, Txa, Implicit),
    (0xA8, Tay, Implicit),
    (0x98, Tya, Implicit),
    (0xCA, Dex, Implicit),
    (0xE8, Inx, Implicit),
    (0x88, Dey, Implicit),
    (0xC8, Iny, Implicit),
];

/// Complete 256-entry opcode table indexed by opcode byte value.
///
/// ```
/// use six502::{Mnemonic, OPCODE_TABLE};
///
/// let jsr = OPCODE_TABLE[0x20].unwrap();
/// assert_eq!(jsr.mnemonic, Mnemonic::Jsr);
/// assert_eq!(jsr.size_bytes, 3);
/// ```
pub const OPCODE_TABLE: [Option<OpcodeMetadata>; 256] = {
    let mut table = [None; 256];
    let mut i = 0;
    while i < DEFINITIONS.len() {
        let (opcode, mnemonic, mode) = DEFINITIONS[i];
        table[opcode as usize] = Some(OpcodeMetadata::new(mnemonic, mode));
        i += 1;
    }
    table
};

/// Looks up the metadata for an opcode byte.
pub fn lookup(opcode: u8) -> Option<&'static OpcodeMetadata> {
    OPCODE_TABLE[opcode as usize].as_ref()
}
