//! Property-based tests for effective address calculation.
//!
//! These tests drive the CPU through LDA in each addressing mode and check
//! which byte it loads, covering the zero-page and page wrap rules.

use six502::{ExecutionError, FlatMemory, MemoryBus, MemoryError, CPU};
use proptest::prelude::*;

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00).unwrap();
    memory.write(0xFFFD, 0x80).unwrap();
    let mut cpu = CPU::new(memory);
    cpu.reset().unwrap();
    cpu
}

proptest! {
    /// Property: Zero page addressing reads from address 0x00XX
    #[test]
    fn prop_zero_page_address(zp_addr in 0u8..=255u8, value in 0u8..=255u8) {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(zp_addr as u16, value).unwrap();

        // LDA $zp
        cpu.memory_mut().load(0x8000, &[0xA5, zp_addr]).unwrap();
        cpu.step().unwrap();

        prop_assert_eq!(cpu.a(), value);
    }

    /// Property: Zero page,X addressing wraps within the zero page
    #[test]
    fn prop_zero_page_x_wraps(base in 0u8..=255u8, x in 0u8..=255u8, value in 1u8..=255u8) {
        let mut cpu = setup_cpu();
        cpu.set_x(x);
        let effective = base.wrapping_add(x) as u16;
        cpu.memory_mut().write(effective, value).unwrap();

        // LDA $base,X
        cpu.memory_mut().load(0x8000, &[0xB5, base]).unwrap();
        cpu.step().unwrap();

        prop_assert_eq!(
            cpu.a(),
            value,
            "LDA ${:02X},X with X={:02X} should read ${:04X}",
            base,
            x,
            effective
        );
    }

    /// Property: Absolute,X carries into the high byte
    #[test]
    fn prop_absolute_x_carries(base in 0x0200u16..=0x7EFF, x in 0u8..=255u8, value in 0u8..=255u8) {
        let mut cpu = setup_cpu();
        cpu.set_x(x);
        cpu.memory_mut().write(base + x as u16, value).unwrap();

        let [lo, hi] = base.to_le_bytes();
        cpu.memory_mut().load(0x8000, &[0xBD, lo, hi]).unwrap();
        cpu.step().unwrap();

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.pc(), 0x8003);
    }

    /// Property: Absolute,Y past 0xFFFF is an error, never a wrap
    #[test]
    fn prop_absolute_y_overflow_fails(offset in 0u16..=0xFE, y in 0u8..=255u8) {
        let base = 0xFFFF - offset;
        prop_assume!(base as u32 + y as u32 > 0xFFFF);

        let mut cpu = setup_cpu();
        cpu.set_y(y);
        let [lo, hi] = base.to_le_bytes();
        cpu.memory_mut().load(0x8000, &[0xB9, lo, hi]).unwrap();

        let result = cpu.step();
        let is_out_of_range = matches!(
            result,
            Err(ExecutionError::Memory(MemoryError::AddressOutOfRange { .. }))
        );
        prop_assert!(is_out_of_range);
        prop_assert_eq!(cpu.pc(), 0x8000);
    }

    /// Property: (zp,X) finds its pointer within the zero page
    #[test]
    fn prop_indexed_indirect_pointer_wraps(
        zp in 0u8..=255u8,
        x in 0u8..=255u8,
        target in 0x0300u16..=0x7FFF,
        value in 0u8..=255u8,
    ) {
        let mut cpu = setup_cpu();
        cpu.set_x(x);
        let pointer = zp.wrapping_add(x);
        let [lo, hi] = target.to_le_bytes();
        cpu.memory_mut().write(pointer as u16, lo).unwrap();
        cpu.memory_mut().write(pointer.wrapping_add(1) as u16, hi).unwrap();
        cpu.memory_mut().write(target, value).unwrap();

        // LDA ($zp,X)
        cpu.memory_mut().load(0x8000, &[0xA1, zp]).unwrap();
        cpu.step().unwrap();

        prop_assert_eq!(cpu.a(), value);
    }

    /// Property: (zp),Y adds Y to the pointer with a full carry
    #[test]
    fn prop_indirect_indexed_carries(
        zp in 0u8..=255u8,
        y in 0u8..=255u8,
        base in 0x0300u16..=0x7EFF,
        value in 0u8..=255u8,
    ) {
        let mut cpu = setup_cpu();
        cpu.set_y(y);
        let [lo, hi] = base.to_le_bytes();
        cpu.memory_mut().write(zp as u16, lo).unwrap();
        cpu.memory_mut().write(zp.wrapping_add(1) as u16, hi).unwrap();
        cpu.memory_mut().write(base + y as u16, value).unwrap();

        // LDA ($zp),Y
        cpu.memory_mut().load(0x8000, &[0xB1, zp]).unwrap();
        cpu.step().unwrap();

        prop_assert_eq!(cpu.a(), value);
    }
}
