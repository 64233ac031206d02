//! # Register Transfer Instructions
//!
//! This module implements register transfer operations:
//! - TAX: Transfer Accumulator to X
//! - TAY: Transfer Accumulator to Y
//! - TXA: Transfer X to Accumulator
//! - TYA: Transfer Y to Accumulator
//!
//! Transfers copy the register and leave the flags alone.

use super::Flow;
use crate::instruction::Instruction;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the TAX (Transfer Accumulator to X) instruction.
pub(crate) fn execute_tax<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    cpu.regs.x = cpu.regs.a;
    Ok(Flow::Next)
}

/// Executes the TAY (Transfer Accumulator to Y) instruction.
pub(crate) fn execute_tay<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    cpu.regs.y = cpu.regs.a;
    Ok(Flow::Next)
}

/// Executes the TXA (Transfer X to Accumulator) instruction.
pub(crate) fn execute_txa<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    cpu.regs.a = cpu.regs.x;
    Ok(Flow::Next)
}

/// Executes the TYA (Transfer Y to Accumulator) instruction.
pub(crate) fn execute_tya<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    cpu.regs.a = cpu.regs.y;
    Ok(Flow::Next)
}
