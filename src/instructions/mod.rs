//! # 6502 Instruction Implementations
//!
//! Each instruction is a standalone function taking the CPU and the decoded
//! instruction. Every handler returns a [`Flow`] telling the run loop whether
//! PC still needs to move past the instruction.
//!
//! ## Categories
//!
//! - **alu**: Comparison (CMP)
//! - **control**: Control flow (JMP, JSR, RTS, NOP)
//! - **inc_dec**: Index increment and decrement (INX, INY, DEX, DEY)
//! - **load_store**: Load and store (LDA, LDX, LDY, STA, STX, STY)
//! - **stack**: Stack operations (PHA, PLA)
//! - **transfer**: Register transfers (TAX, TAY, TXA, TYA)

pub mod alu;
pub mod control;
pub mod inc_dec;
pub mod load_store;
pub mod stack;
pub mod transfer;

use crate::instruction::Instruction;
use crate::opcodes::Mnemonic;
use crate::{ExecutionError, MemoryBus, CPU};

/// What the run loop does with PC after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Advance PC past the instruction.
    Next,
    /// The handler already placed PC.
    Jumped,
}

/// Dispatches a decoded instruction to its handler.
pub(crate) fn execute<M: MemoryBus>(
    cpu: &mut CPU<M>,
    instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    use Mnemonic::*;

    match instruction.mnemonic {
        Nop => control::execute_nop(cpu, instruction),
        Jmp => control::execute_jmp(cpu, instruction),
        Jsr => control::execute_jsr(cpu, instruction),
        Rts => control::execute_rts(cpu, instruction),
        Cmp => alu::execute_cmp(cpu, instruction),
        Lda => load_store::execute_lda(cpu, instruction),
        Ldx => load_store::execute_ldx(cpu, instruction),
        Ldy => load_store::execute_ldy(cpu, instruction),
        Sta => load_store::execute_sta(cpu, instruction),
        Stx => load_store::execute_stx(cpu, instruction),
        Sty => load_store::execute_sty(cpu, instruction),
        Pha => stack::execute_pha(cpu, instruction),
        Pla => stack::execute_pla(cpu, instruction),
        Tax => transfer::execute_tax(cpu, instruction),
        Tay => transfer::execute_tay(cpu, instruction),
        Txa => transfer::execute_txa(cpu, instruction),
        Tya => transfer::execute_tya(cpu, instruction),
        Inx => inc_dec::execute_inx(cpu, instruction),
        Iny => inc_dec::execute_iny(cpu, instruction),
        Dex => inc_dec::execute_dex(cpu, instruction),
        Dey => inc_dec::execute_dey(cpu, instruction),
    }
}
