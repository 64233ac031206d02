//! # Load and Store Instructions
//!
//! This module implements load and store operations:
//! - LDA: Load Accumulator
//! - LDX: Load X Register
//! - LDY: Load Y Register
//! - STA: Store Accumulator
//! - STX: Store X Register
//! - STY: Store Y Register
//!
//! Loads copy the resolved operand into the register without touching any
//! flag; only CMP updates flags in this interpreter.

use super::Flow;
use crate::instruction::Instruction;
use crate::resolver::{resolve, Operand};
use crate::{ExecutionError, MemoryBus, CPU};

/// Resolves the operand of a load and fetches its value.
fn load_operand<M: MemoryBus>(
    cpu: &mut CPU<M>,
    instruction: &Instruction,
) -> Result<u8, ExecutionError> {
    let operand = resolve(instruction, &cpu.regs, &mut cpu.memory)?;
    Ok(operand.value(&mut cpu.memory)?)
}

/// Resolves the effective address of a store. Stores have no immediate form.
fn store_address<M: MemoryBus>(
    cpu: &mut CPU<M>,
    instruction: &Instruction,
) -> Result<u16, ExecutionError> {
    match resolve(instruction, &cpu.regs, &mut cpu.memory)? {
        Operand::Address(addr) => Ok(addr),
        Operand::Immediate(_) => Err(ExecutionError::UnsupportedAddressingMode {
            mnemonic: instruction.mnemonic,
            mode: instruction.addressing_mode,
        }),
    }
}

/// Executes the LDA (Load Accumulator) instruction.
pub(crate) fn execute_lda<M: MemoryBus>(
    cpu: &mut CPU<M>,
    instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    cpu.regs.a = load_operand(cpu, instruction)?;
    Ok(Flow::Next)
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    cpu.regs.x = load_operand(cpu, instruction)?;
    Ok(Flow::Next)
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    cpu.regs.y = load_operand(cpu, instruction)?;
    Ok(Flow::Next)
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn execute_sta<M: MemoryBus>(
    cpu: &mut CPU<M>,
    instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    let addr = store_address(cpu, instruction)?;
    cpu.memory.write(addr, cpu.regs.a)?;
    Ok(Flow::Next)
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    let addr = store_address(cpu, instruction)?;
    cpu.memory.write(addr, cpu.regs.x)?;
    Ok(Flow::Next)
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(
    cpu: &mut CPU<M>,
    instruction: &Instruction,
) -> Result<Flow, ExecutionError> {
    let addr = store_address(cpu, instruction)?;
    cpu.memory.write(addr, cpu.regs.y)?;
    Ok(Flow::Next)
}
