//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, B, D, I, Z, C
//!
//! ## Execution Model
//!
//! - `reset()`: point SP at the top of the stack page and load PC from the
//!   reset vector
//! - `step()`: execute one instruction
//! - `run_for()`: execute a bounded number of instructions
//! - `run()`: reset, then execute until an instruction fails
//!
//! Each instruction handler reports whether it placed PC itself. `step()`
//! advances PC past the instruction only when it did not, so jumps, calls and
//! returns are never advanced a second time.
//!
//! PC is a plain 16-bit counter: stepping past 0xFFFF continues at 0x0000, and
//! a JSR ending at 0xFFFF pushes 0x0000 as its return address. Only data
//! accesses (operands, effective addresses, pointers) are range-checked.

use std::convert::Infallible;

use log::{debug, trace};

use crate::instruction::decode;
use crate::instructions::{self, Flow};
use crate::memory::{MemoryBus, RESET_VECTOR};
use crate::ExecutionError;

/// The register file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers {
    /// Accumulator
    pub a: u8,
    /// X index register
    pub x: u8,
    /// Y index register
    pub y: u8,
    /// Stack pointer (0x0100 + sp gives the full stack address)
    pub sp: u8,
    /// Program counter (address of next instruction)
    pub pc: u16,
}

/// Processor status flags. All start cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// Negative
    pub n: bool,
    /// Overflow
    pub v: bool,
    /// Break
    pub b: bool,
    /// Decimal mode
    pub d: bool,
    /// Interrupt disable
    pub i: bool,
    /// Zero
    pub z: bool,
    /// Carry
    pub c: bool,
}

impl Flags {
    /// Packs the flags into a status byte (NV-BDIZC, bit 5 always set).
    pub fn to_byte(self) -> u8 {
        let mut status: u8 = 0b0010_0000;
        for (set, bit) in [
            (self.n, 7),
            (self.v, 6),
            (self.b, 4),
            (self.d, 3),
            (self.i, 2),
            (self.z, 1),
            (self.c, 0),
        ] {
            if set {
                status |= 1 << bit;
            }
        }
        status
    }
}

/// 6502 CPU state and execution context.
///
/// Generic over the memory implementation, so the same interpreter runs
/// against a [`crate::FlatMemory`] or a [`crate::RemoteMemory`].
///
/// # Examples
///
/// ```
/// use six502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.load(0xFFFC, &[0x00, 0x80]).unwrap();
/// memory.load(0x8000, &[0xA9, 0x42, 0xAA]).unwrap(); // LDA #$42; TAX
///
/// let mut cpu = CPU::new(memory);
/// cpu.reset().unwrap();
/// cpu.run_for(2).unwrap();
///
/// assert_eq!(cpu.x(), 0x42);
/// assert_eq!(cpu.pc(), 0x8003);
/// assert_eq!(cpu.sp(), 0xFF);
/// ```
pub struct CPU<M: MemoryBus> {
    pub(crate) regs: Registers,
    pub(crate) flags: Flags,
    pub(crate) memory: M,

    /// Instructions executed since creation
    steps: u64,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a CPU with every register and flag cleared.
    ///
    /// Call [`CPU::reset`] (or [`CPU::run`], which resets) before executing so
    /// SP and PC hold their power-on values.
    pub fn new(memory: M) -> Self {
        Self {
            regs: Registers::default(),
            flags: Flags::default(),
            memory,
            steps: 0,
        }
    }

    /// Points SP at the top of the stack page (0x01FF) and loads PC from the
    /// little-endian reset vector at 0xFFFC/0xFFFD.
    pub fn reset(&mut self) -> Result<(), ExecutionError> {
        self.regs.sp = 0xFF;
        self.regs.pc = self.memory.read_word(RESET_VECTOR)?;
        debug!("reset: pc=0x{:04X} sp=0x{:02X}", self.regs.pc, self.regs.sp);
        Ok(())
    }

    /// Executes one instruction.
    ///
    /// On error nothing is advanced: an invalid opcode leaves PC on the
    /// offending byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use six502::{CPU, ExecutionError, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0x0000, 0xEA).unwrap(); // NOP
    /// mem.write(0x0001, 0xFF).unwrap(); // not in the opcode table
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.step().unwrap();
    /// assert_eq!(cpu.pc(), 0x0001);
    ///
    /// assert!(matches!(cpu.step(), Err(ExecutionError::InvalidOpcode { opcode: 0xFF, pc: 0x0001 })));
    /// assert_eq!(cpu.pc(), 0x0001);
    /// ```
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        let pc = self.regs.pc;
        let (instruction, size) = decode(&mut self.memory, pc)?;
        trace!(
            "{:04X}  {:<12} a={:02X} x={:02X} y={:02X} sp={:02X}",
            pc,
            instruction.to_string(),
            self.regs.a,
            self.regs.x,
            self.regs.y,
            self.regs.sp
        );

        match instructions::execute(self, &instruction)? {
            Flow::Next => self.regs.pc = self.regs.pc.wrapping_add(size),
            Flow::Jumped => {}
        }
        self.steps += 1;
        Ok(())
    }

    /// Executes up to `max_steps` instructions, stopping early on error.
    ///
    /// Returns the number of instructions executed.
    pub fn run_for(&mut self, max_steps: u64) -> Result<u64, ExecutionError> {
        let start = self.steps;
        while self.steps - start < max_steps {
            self.step()?;
        }
        Ok(self.steps - start)
    }

    /// Resets the CPU, then executes instructions until one fails.
    ///
    /// There is no halting instruction, so this only ever returns an error.
    pub fn run(&mut self) -> Result<Infallible, ExecutionError> {
        self.reset()?;
        loop {
            self.step()?;
        }
    }

    // ========== Register Access ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.regs.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.regs.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.regs.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.regs.pc
    }

    /// Returns the stack pointer value.
    ///
    /// The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.regs.sp
    }

    /// Returns a copy of the whole register file.
    pub fn registers(&self) -> Registers {
        self.regs
    }

    pub fn set_a(&mut self, value: u8) {
        self.regs.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.regs.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.regs.y = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.regs.sp = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.regs.pc = value;
    }

    /// Returns the number of instructions executed since creation.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    // ========== Status Flags ==========

    /// Returns a copy of the flag set.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Returns the status register as a packed byte.
    pub fn status(&self) -> u8 {
        self.flags.to_byte()
    }

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flags.n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flags.v
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.flags.b
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flags.d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flags.i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flags.z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flags.c
    }

    // ========== Memory Access ==========

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU and hands back its memory.
    pub fn into_memory(self) -> M {
        self.memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    fn setup_cpu() -> CPU<FlatMemory> {
        let mut mem = FlatMemory::new();
        mem.load(RESET_VECTOR, &[0x00, 0x80]).unwrap();
        let mut cpu = CPU::new(mem);
        cpu.reset().unwrap();
        cpu
    }

    #[test]
    fn test_cpu_initialization() {
        let cpu = CPU::new(FlatMemory::new());

        assert_eq!(cpu.registers(), Registers::default());
        assert_eq!(cpu.flags(), Flags::default());
        assert_eq!(cpu.steps(), 0);
    }

    #[test]
    fn test_reset_loads_vector_and_stack_pointer() {
        let cpu = setup_cpu();

        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.a(), 0x00);
        assert!(!cpu.flag_i());
    }

    #[test]
    fn test_status_register_packing() {
        let mut cpu = setup_cpu();
        assert_eq!(cpu.status(), 0b0010_0000);

        cpu.flags.n = true;
        cpu.flags.c = true;
        assert_eq!(cpu.status(), 0b1010_0001);
    }

    #[test]
    fn test_run_for_counts_steps() {
        let mut cpu = setup_cpu();
        for addr in 0x8000..0x8010 {
            cpu.memory_mut().write(addr, 0xEA).unwrap();
        }

        assert_eq!(cpu.run_for(5).unwrap(), 5);
        assert_eq!(cpu.pc(), 0x8005);
        assert_eq!(cpu.steps(), 5);
    }

    #[test]
    fn test_run_stops_on_invalid_opcode() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().load(0x8000, &[0xEA, 0xEA, 0x02]).unwrap();

        match cpu.run() {
            Ok(never) => match never {},
            Err(ExecutionError::InvalidOpcode { opcode: 0x02, pc: 0x8002 }) => {}
            Err(other) => panic!("unexpected error {:?}", other),
        }
        assert_eq!(cpu.pc(), 0x8002);
        assert_eq!(cpu.steps(), 2);
    }
}
