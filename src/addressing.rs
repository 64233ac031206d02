//! # Addressing Modes
//!
//! The addressing modes understood by the interpreter. Each mode determines how
//! the operand bytes that follow an opcode are turned into either an immediate
//! value or an effective memory address; the arithmetic itself lives in
//! [`crate::resolver`].

use std::fmt;

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: NOP, RTS, PHA
    Implicit,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X, wrapping within the zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y, wrapping within the zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address plus X, carrying across pages.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address plus Y, carrying across pages.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Indirect jump through a 16-bit pointer. Only used by JMP.
    ///
    /// Example: JMP ($FFFC)
    Indirect,

    /// Indexed indirect: add X to the operand without leaving its page, then
    /// dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: dereference the operand, then add Y.
    ///
    /// Example: LDA ($40),Y
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes that follow the opcode for this mode.
    pub const fn operand_len(self) -> u8 {
        match self {
            AddressingMode::Implicit => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressingMode::Implicit => "implicit",
            AddressingMode::Immediate => "immediate",
            AddressingMode::ZeroPage => "zpg",
            AddressingMode::ZeroPageX => "zpgx",
            AddressingMode::ZeroPageY => "zpgy",
            AddressingMode::Absolute => "abs",
            AddressingMode::AbsoluteX => "absx",
            AddressingMode::AbsoluteY => "absy",
            AddressingMode::Indirect => "ind",
            AddressingMode::IndirectX => "indx",
            AddressingMode::IndirectY => "indy",
        };
        f.write_str(name)
    }
}
