//! Test harness helpers.

// Not every test binary exercises every helper.
#![allow(dead_code)]

use dotmatrix_core::GameBoy;

/// Builds a minimal valid 32 KiB ROM-only image.
///
/// The entry point at `$0100` jumps over the header to `code`, placed at
/// `$0150`.
#[must_use]
pub fn rom(code: &[u8]) -> Vec<u8> {
    let mut rom = vec![0u8; 0x8000];
    // Entry point: NOP; JP $0150
    rom[0x100] = 0x00;
    rom[0x101] = 0xc3;
    rom[0x102] = 0x50;
    rom[0x103] = 0x01;
    // Title
    rom[0x134..0x134 + 4].copy_from_slice(b"TEST");
    // Program
    rom[0x150..0x150 + code.len()].copy_from_slice(code);
    checksummed(rom)
}

/// Fixes up the header checksum of an image.
#[must_use]
pub fn checksummed(mut rom: Vec<u8>) -> Vec<u8> {
    rom[0x14d] = rom[0x134..=0x14c]
        .iter()
        .fold(0u8, |chk, &byte| chk.wrapping_sub(byte).wrapping_sub(1));
    rom
}

/// Constructs a machine running `code` from `$0150`.
///
/// The entry sequence (NOP; JP $0150) has already executed, so the next
/// tick fetches the first byte of `code`.
#[must_use]
pub fn power_on(code: &[u8]) -> GameBoy {
    let mut emu = GameBoy::new(&rom(code)).unwrap();
    // NOP; JP $0150
    emu.tick().unwrap();
    emu.tick().unwrap();
    assert_eq!(emu.cpu.reg.pc, 0x0150);
    emu
}
