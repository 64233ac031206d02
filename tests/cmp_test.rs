//! Tests for the CMP (Compare Accumulator) instruction.
//!
//! CMP sets C when A >= M, Z when A == M, and N from bit 7 of A.

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

fn cmp_immediate(a: u8, value: u8) -> CPU<FlatMemory> {
    let mut cpu = setup_cpu();
    cpu.set_a(a);
    cpu.memory_mut().load(0x8000, &[0xC9, value]).unwrap();
    cpu.step().unwrap();
    cpu
}

#[test]
fn test_cmp_equal() {
    let cpu = cmp_immediate(10, 10);

    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.a(), 10);
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_cmp_greater() {
    let cpu = cmp_immediate(0x50, 0x30);

    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
}

#[test]
fn test_cmp_less() {
    let cpu = cmp_immediate(0x30, 0x50);

    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_cmp_negative_follows_accumulator() {
    // 0x80 - 0x01 = 0x7F has bit 7 clear, but A itself is negative
    let cpu = cmp_immediate(0x80, 0x01);
    assert!(cpu.flag_n());

    // 0x10 - 0x20 = 0xF0 has bit 7 set, but A is positive
    let cpu = cmp_immediate(0x10, 0x20);
    assert!(!cpu.flag_n());
}

#[test]
fn test_cmp_zero_page() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x40);
    cpu.memory_mut().write(0x0033, 0x40).unwrap();

    // CMP $33
    cpu.memory_mut().load(0x8000, &[0xC5, 0x33]).unwrap();

    cpu.step().unwrap();

    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
}

#[test]
fn test_cmp_absolute_y() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x01);
    cpu.set_y(0x04);
    cpu.memory_mut().write(0x2004, 0x02).unwrap();

    // CMP $2000,Y
    cpu.memory_mut().load(0x8000, &[0xD9, 0x00, 0x20]).unwrap();

    cpu.step().unwrap();

    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.pc(), 0x8003);
}

#[test]
fn test_cmp_indirect_indexed() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x77);
    cpu.set_y(0x01);
    cpu.memory_mut().load(0x0040, &[0x00, 0x30]).unwrap();
    cpu.memory_mut().write(0x3001, 0x77).unwrap();

    // CMP ($40),Y
    cpu.memory_mut().load(0x8000, &[0xD1, 0x40]).unwrap();

    cpu.step().unwrap();

    assert!(cpu.flag_z());
}

#[test]
fn test_cmp_leaves_other_flags() {
    let mut cpu = cmp_immediate(0x05, 0x05);
    let flags = cpu.flags();

    assert!(!flags.v);
    assert!(!flags.d);
    assert!(!flags.i);
    assert!(!flags.b);

    // A later compare overwrites C, Z and N
    cpu.memory_mut().load(0x8002, &[0xC9, 0x06]).unwrap();
    cpu.step().unwrap();
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
}
