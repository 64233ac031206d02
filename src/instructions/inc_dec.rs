//! # Increment and Decrement Instructions
//!
//! - INX / INY: increment X or Y, wrapping 0xFF to 0x00
//! - DEX / DEY: decrement X or Y, wrapping 0x00 to 0xFF

use super::Flow;
use crate::instruction::Instruction;
use crate::{ExecutionError, MemoryBus, CPU};

pub(crate) fn execute_inx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    cpu.regs.x = cpu.regs.x.wrapping_add(1);
    Ok(Flow::Next)
}

pub(crate) fn execute_iny<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    cpu.regs.y = cpu.regs.y.wrapping_add(1);
    Ok(Flow::Next)
}

pub(crate) fn execute_dex<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    cpu.regs.x = cpu.regs.x.wrapping_sub(1);
    Ok(Flow::Next)
}

pub(crate) fn execute_dey<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    cpu.regs.y = cpu.regs.y.wrapping_sub(1);
    Ok(Flow::Next)
}
