//! # six502
//!
//! A 6502 interpreter that runs the same way against a flat local address space
//! or against memory pages served over UDP by another process.
//!
//! ## Quick Start
//!
//! ```rust
//! use six502::{CPU, FlatMemory, MemoryBus};
//!
//! let mut memory = FlatMemory::new();
//!
//! // Reset vector points at the program
//! memory.load(0xFFFC, &[0x00, 0x80]).unwrap();
//!
//! // LDX #$05; DEX; STX $10
//! memory.load(0x8000, &[0xA2, 0x05, 0xCA, 0x86, 0x10]).unwrap();
//!
//! let mut cpu = CPU::new(memory);
//! cpu.reset().unwrap();
//! cpu.run_for(3).unwrap();
//!
//! assert_eq!(cpu.x(), 0x04);
//! assert_eq!(cpu.memory_mut().read(0x0010).unwrap(), 0x04);
//! ```
//!
//! ## Modules
//!
//! - `cpu` - Register file, flags and the fetch-decode-execute loop
//! - `opcodes` - Opcode table
//! - `instruction` - Instruction decoding
//! - `addressing` / `resolver` - Addressing modes and effective addresses
//! - `memory` - MemoryBus trait and the flat implementation
//! - `protocol` - Page protocol datagrams
//! - `remote` - Memory client that caches pages fetched from a server
//! - `server` - Page server

pub mod addressing;
pub mod cpu;
pub mod instruction;
pub mod memory;
pub mod opcodes;
pub mod protocol;
pub mod remote;
pub mod resolver;
pub mod server;

// Internal instruction implementations (not part of public API)
mod instructions;

use thiserror::Error;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::{Flags, Registers, CPU};
pub use instruction::{decode, Instruction};
pub use memory::{FlatMemory, MemoryBus, MemoryError};
pub use opcodes::{lookup, Mnemonic, OpcodeMetadata, OPCODE_TABLE};
pub use remote::{ClientConfig, RemoteMemory};
pub use resolver::{resolve, Operand};
pub use server::{PageServer, ServerConfig};

/// Errors that stop CPU execution.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The byte at `pc` has no opcode table entry.
    #[error("invalid opcode 0x{opcode:02X} at 0x{pc:04X}")]
    InvalidOpcode { opcode: u8, pc: u16 },

    /// A handler was given an addressing mode it cannot use. Only reachable
    /// through a malformed opcode table or a hand-built [`Instruction`].
    #[error("{mnemonic} does not support {mode} addressing")]
    UnsupportedAddressingMode {
        mnemonic: Mnemonic,
        mode: AddressingMode,
    },

    /// A memory access failed.
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("start page {start} is after stop page {stop}")]
    InvalidPageRange { start: u8, stop: u8 },
}
