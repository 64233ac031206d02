//! # ALU Instructions
//!
//! - CMP: Compare Memory with Accumulator
//!
//! CMP sets:
//! - C when A >= M
//! - Z when A == M
//! - N from bit 7 of A itself, not of A - M
//!
//! The N rule differs from NMOS hardware, where N is bit 7 of the difference.
//! Programs that branch on the sign of a comparison should not rely on it.

use super::Flow;
use crate::instruction::Instruction;
use crate::resolver::resolve;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the CMP (Compare) instruction.
///
/// ```
/// use six502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.load(0xFFFC, &[0x00, 0x80]).unwrap();
/// memory.load(0x8000, &[0xC9, 0x0A]).unwrap(); // CMP #$0A
///
/// let mut cpu = CPU::new(memory);
/// cpu.reset().unwrap();
/// cpu.set_a(10);
/// cpu.step().unwrap();
///
/// assert!(cpu.flag_c());
/// assert!(cpu.flag_z());
/// assert!(!cpu.flag_n());
/// ```
pub(crate) fn execute_cmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    let operand = resolve(instruction, &cpu.regs, &mut cpu.memory)?;
    let value = operand.value(&mut cpu.memory)?;
    let a = cpu.regs.a;

    cpu.flags.c = a >= value;
    cpu.flags.z = a == value;
    cpu.flags.n = a >= 0x80;

    Ok(Flow::Next)
}
