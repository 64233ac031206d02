//! Tests for the LDA, LDX and LDY load instructions.
//!
//! Tests cover:
//! - Every addressing mode in the opcode table
//! - Loads leave the status flags untouched
//! - PC advances by the instruction size

use six502::{FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00).unwrap();
    memory.write(0xFFFD, 0x80).unwrap();
    let mut cpu = CPU::new(memory);
    cpu.reset().unwrap();
    cpu
}

// ========== LDA ==========

#[test]
fn test_lda_immediate() {
    let mut cpu = setup_cpu();

    // LDA #$42
    cpu.memory_mut().load(0x8000, &[0xA9, 0x42]).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x42);
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_lda_zero_page() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0010, 0x55).unwrap();

    // LDA $10
    cpu.memory_mut().load(0x8000, &[0xA5, 0x10]).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x55);
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_lda_zero_page_x_wraps() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x01);
    cpu.memory_mut().write(0x0000, 0x77).unwrap();
    cpu.memory_mut().write(0x0100, 0x11).unwrap();

    // LDA $FF,X reads $00, not $0100
    cpu.memory_mut().load(0x8000, &[0xB5, 0xFF]).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x77);
}

#[test]
fn test_lda_absolute() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x1234, 0x99).unwrap();

    // LDA $1234
    cpu.memory_mut().load(0x8000, &[0xAD, 0x34, 0x12]).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x99);
    assert_eq!(cpu.pc(), 0x8003);
}

#[test]
fn test_lda_absolute_x_crosses_page() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x10);
    cpu.memory_mut().write(0x1300, 0xAB).unwrap();

    // LDA $12F0,X
    cpu.memory_mut().load(0x8000, &[0xBD, 0xF0, 0x12]).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xAB);
}

#[test]
fn test_lda_absolute_y() {
    let mut cpu = setup_cpu();
    cpu.set_y(0x05);
    cpu.memory_mut().write(0x2005, 0x3C).unwrap();

    // LDA $2000,Y
    cpu.memory_mut().load(0x8000, &[0xB9, 0x00, 0x20]).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x3C);
}

#[test]
fn test_lda_indexed_indirect() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x04);
    // Pointer at $24/$25 -> $3074
    cpu.memory_mut().load(0x0024, &[0x74, 0x30]).unwrap();
    cpu.memory_mut().write(0x3074, 0xEE).unwrap();

    // LDA ($20,X)
    cpu.memory_mut().load(0x8000, &[0xA1, 0x20]).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xEE);
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_lda_indirect_indexed() {
    let mut cpu = setup_cpu();
    cpu.set_y(0x10);
    // Pointer at $86/$87 -> $4028, plus Y
    cpu.memory_mut().load(0x0086, &[0x28, 0x40]).unwrap();
    cpu.memory_mut().write(0x4038, 0x5A).unwrap();

    // LDA ($86),Y
    cpu.memory_mut().load(0x8000, &[0xB1, 0x86]).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x5A);
}

#[test]
fn test_lda_leaves_flags_alone() {
    let mut cpu = setup_cpu();

    // LDA #$00; LDA #$80
    cpu.memory_mut().load(0x8000, &[0xA9, 0x00, 0xA9, 0x80]).unwrap();

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x00);
    assert!(!cpu.flag_z());

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x80);
    assert!(!cpu.flag_n());
}

// ========== LDX ==========

#[test]
fn test_ldx_immediate() {
    let mut cpu = setup_cpu();

    // LDX #$21
    cpu.memory_mut().load(0x8000, &[0xA2, 0x21]).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0x21);
    assert_eq!(cpu.a(), 0x00);
}

#[test]
fn test_ldx_zero_page_y_wraps() {
    let mut cpu = setup_cpu();
    cpu.set_y(0x20);
    cpu.memory_mut().write(0x0010, 0x66).unwrap();

    // LDX $F0,Y reads $10
    cpu.memory_mut().load(0x8000, &[0xB6, 0xF0]).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0x66);
}

#[test]
fn test_ldx_absolute_y() {
    let mut cpu = setup_cpu();
    cpu.set_y(0x02);
    cpu.memory_mut().write(0x0302, 0x0F).unwrap();

    // LDX $0300,Y
    cpu.memory_mut().load(0x8000, &[0xBE, 0x00, 0x03]).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0x0F);
    assert_eq!(cpu.pc(), 0x8003);
}

// ========== LDY ==========

#[test]
fn test_ldy_immediate() {
    let mut cpu = setup_cpu();

    // LDY #$FE
    cpu.memory_mut().load(0x8000, &[0xA0, 0xFE]).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.y(), 0xFE);
}

#[test]
fn test_ldy_zero_page_x() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x03);
    cpu.memory_mut().write(0x0043, 0x19).unwrap();

    // LDY $40,X
    cpu.memory_mut().load(0x8000, &[0xB4, 0x40]).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.y(), 0x19);
}

#[test]
fn test_ldy_absolute_x() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x01);
    cpu.memory_mut().write(0x5001, 0xC3).unwrap();

    // LDY $5000,X
    cpu.memory_mut().load(0x8000, &[0xBC, 0x00, 0x50]).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.y(), 0xC3);
}
