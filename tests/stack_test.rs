//! Tests for the PHA and PLA stack instructions.
//!
//! Tests cover:
//! - Push writes at 0x0100 + SP, then decrements SP
//! - Pull increments SP, then reads
//! - SP wraps within the stack page in both directions

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

#[test]
fn test_pha_pushes_accumulator() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x42);
    cpu.memory_mut().write(0x8000, 0x48).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.memory_mut().read(0x01FF).unwrap(), 0x42);
    assert_eq!(cpu.sp(), 0xFE);
    assert_eq!(cpu.pc(), 0x8001);
}

#[test]
fn test_pha_pla_round_trip() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x37);

    // PHA; LDA #$00; PLA
    cpu.memory_mut()
        .load(0x8000, &[0x48, 0xA9, 0x00, 0x68])
        .unwrap();

    cpu.run_for(2).unwrap();
    assert_eq!(cpu.a(), 0x00);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x37);
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_pla_leaves_flags_alone() {
    let mut cpu = setup_cpu();
    cpu.set_sp(0xFE);
    cpu.memory_mut().write(0x01FF, 0x00).unwrap();
    cpu.memory_mut().write(0x8000, 0x68).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(!cpu.flag_z());
}

#[test]
fn test_stack_is_last_in_first_out() {
    let mut cpu = setup_cpu();

    // LDA #$01; PHA; LDA #$02; PHA; PLA; TAX; PLA
    cpu.memory_mut()
        .load(
            0x8000,
            &[0xA9, 0x01, 0x48, 0xA9, 0x02, 0x48, 0x68, 0xAA, 0x68],
        )
        .unwrap();

    cpu.run_for(7).unwrap();

    assert_eq!(cpu.x(), 0x02);
    assert_eq!(cpu.a(), 0x01);
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_push_wraps_below_bottom_of_stack() {
    let mut cpu = setup_cpu();
    cpu.set_sp(0x00);
    cpu.set_a(0x5A);
    cpu.memory_mut().write(0x8000, 0x48).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.memory_mut().read(0x0100).unwrap(), 0x5A);
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cpu.memory_mut().read(0x00FF).unwrap(), 0x00);
}

#[test]
fn test_pull_wraps_above_top_of_stack() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0xC4).unwrap();
    cpu.memory_mut().write(0x0200, 0x11).unwrap();
    cpu.memory_mut().write(0x8000, 0x68).unwrap();

    // SP is 0xFF after reset, so the pull reads 0x0100
    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xC4);
    assert_eq!(cpu.sp(), 0x00);
}
