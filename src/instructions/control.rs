//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - NOP: No Operation
//! - JMP: Jump to address (absolute or indirect)
//! - JSR: Jump to Subroutine
//! - RTS: Return from Subroutine
//!
//! JMP, JSR and RTS place PC themselves and return [`Flow::Jumped`].
//!
//! JSR pushes the address of the byte following its own three bytes, high byte
//! first, so the low byte ends up nearer the top of the stack. RTS pulls the
//! low byte then the high byte and resumes exactly there. A JSR/RTS pair
//! therefore lands three bytes past the JSR with SP restored.

use super::stack::{pull, push};
use super::Flow;
use crate::addressing::AddressingMode;
use crate::instruction::Instruction;
use crate::resolver::{resolve, Operand};
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the NOP (No Operation) instruction.
pub(crate) fn execute_nop<M: MemoryBus>(
    _cpu: &mut CPU<M>,
    _instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    Ok(Flow::Next)
}

/// Resolves the target address of a JMP or JSR.
fn jump_target<M: MemoryBus>(
    cpu: &mut CPU<M>,
    instruction: &Instruction,
) -> Result<u16, ExecutionError> {
    let unsupported = || ExecutionError::UnsupportedAddressingMode {
        mnemonic: instruction.mnemonic,
        mode: instruction.addressing_mode,
    };

    match instruction.addressing_mode {
        AddressingMode::Absolute | AddressingMode::Indirect => {
            match resolve(instruction, &cpu.regs, &mut cpu.memory)? {
                Operand::Address(addr) => Ok(addr),
                Operand::Immediate(_) => Err(unsupported()),
            }
        }
        _ => Err(unsupported()),
    }
}

/// Executes the JMP (Jump) instruction.
///
/// Indirect jumps read the target from the pointer and the byte after it,
/// without the page-wrap quirk of NMOS parts.
pub(crate) fn execute_jmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    cpu.regs.pc = jump_target(cpu, instruction)?;
    Ok(Flow::Jumped)
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// ```
/// use six502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.load(0xFFFC, &[0x00, 0x80]).unwrap();
/// memory.load(0x8000, &[0x20, 0x34, 0x12]).unwrap(); // JSR $1234
///
/// let mut cpu = CPU::new(memory);
/// cpu.reset().unwrap();
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.pc(), 0x1234);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert_eq!(cpu.memory_mut().read(0x01FF).unwrap(), 0x80); // high byte
/// assert_eq!(cpu.memory_mut().read(0x01FE).unwrap(), 0x03); // low byte
/// ```
pub(crate) fn execute_jsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    let target = jump_target(cpu, instruction)?;
    let [lo, hi] = cpu
        .regs
        .pc
        .wrapping_add(instruction.byte_size as u16)
        .to_le_bytes();

    push(cpu, hi)?;
    push(cpu, lo)?;
    cpu.regs.pc = target;
    Ok(Flow::Jumped)
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn execute_rts<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    let lo = pull(cpu)?;
    let hi = pull(cpu)?;
    cpu.regs.pc = u16::from_le_bytes([lo, hi]);
    Ok(Flow::Jumped)
}
