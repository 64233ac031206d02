//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA: Push Accumulator on Stack
//! - PLA: Pull Accumulator from Stack
//!
//! The stack lives at 0x0100-0x01FF and grows downward. SP is an 8-bit offset
//! into that page, so it wraps 0x00 -> 0xFF on push and 0xFF -> 0x00 on pull;
//! the stack never spills into the zero page or page 2.

use super::Flow;
use crate::instruction::Instruction;
use crate::memory::STACK_PAGE;
use crate::{ExecutionError, MemoryBus, CPU};

/// Writes `value` at 0x0100 | SP, then decrements SP.
pub(crate) fn push<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) -> Result<(), ExecutionError> {
    cpu.memory.write(STACK_PAGE | cpu.regs.sp as u16, value)?;
    cpu.regs.sp = cpu.regs.sp.wrapping_sub(1);
    Ok(())
}

/// Increments SP, then reads the byte at 0x0100 | SP.
pub(crate) fn pull<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u8, ExecutionError> {
    cpu.regs.sp = cpu.regs.sp.wrapping_add(1);
    Ok(cpu.memory.read(STACK_PAGE | cpu.regs.sp as u16)?)
}

/// Executes the PHA (Push Accumulator) instruction.
///
/// ```
/// use six502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.load(0xFFFC, &[0x00, 0x80]).unwrap();
/// memory.write(0x8000, 0x48).unwrap(); // PHA
///
/// let mut cpu = CPU::new(memory);
/// cpu.reset().unwrap();
/// cpu.set_a(0x42);
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.memory_mut().read(0x01FF).unwrap(), 0x42);
/// assert_eq!(cpu.sp(), 0xFE);
/// assert_eq!(cpu.pc(), 0x8001);
/// ```
pub(crate) fn execute_pha<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    let value = cpu.regs.a;
    push(cpu, value)?;
    Ok(Flow::Next)
}

/// Executes the PLA (Pull Accumulator) instruction.
pub(crate) fn execute_pla<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    cpu.regs.a = pull(cpu)?;
    Ok(Flow::Next)
}
