//! Fuzz target for CPU step execution.
//!
//! Builds an arbitrary register file and memory contents, then executes a few
//! instructions. Errors are expected; panics are bugs.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use six502::{FlatMemory, CPU};

/// Arbitrary register file
#[derive(Debug, Arbitrary)]
struct FuzzRegisters {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
}

/// Memory regions worth filling
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location
    program: [u8; 16],
    /// Zero page contents (pointers for the indirect modes)
    zero_page: [u8; 256],
    /// Stack page contents
    stack_page: [u8; 256],
    /// Top of memory, including the reset vector
    high_page: [u8; 256],
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    registers: FuzzRegisters,
    memory: FuzzMemory,
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    let _ = memory.load(0x0000, &input.memory.zero_page);
    let _ = memory.load(0x0100, &input.memory.stack_page);
    let _ = memory.load(0xFF00, &input.memory.high_page);
    let _ = memory.load(0x8000, &input.memory.program);

    let mut cpu = CPU::new(memory);
    cpu.set_pc(0x8000);
    cpu.set_a(input.registers.a);
    cpu.set_x(input.registers.x);
    cpu.set_y(input.registers.y);
    cpu.set_sp(input.registers.sp);

    let before = cpu.steps();
    match cpu.run_for(input.steps as u64) {
        Ok(executed) => assert_eq!(executed, input.steps as u64),
        Err(_) => assert!(cpu.steps() - before < input.steps as u64),
    }
});
