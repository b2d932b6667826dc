use super::{execute, Cpu, Error};
use crate::hw::cart::Cartridge;
use crate::sys::bus::Bus;

/// Builds a processor wired to a blank machine.
fn setup() -> (Cpu, Bus) {
    let mut rom = vec![0u8; 0x8000];
    rom[0x14d] = crate::hw::cart::header::Header::hchk(&rom);
    let cart = Cartridge::new(&rom).unwrap();
    let mut cpu = Cpu::default();
    cpu.reg.sp = 0xfffe;
    (cpu, Bus::new(cart, None, false))
}

/// Runs a single opcode against preset A/F/operand state.
fn run(code: u8, a: u8, f: u8, b: u8) -> (u8, u8) {
    let (mut cpu, mut bus) = setup();
    cpu.reg.a = a;
    cpu.reg.f = f;
    cpu.reg.b = b;
    execute(&mut cpu, &mut bus, code).unwrap();
    (cpu.reg.a, cpu.reg.f)
}

#[test]
fn add_carries() {
    // ADD A, B
    assert_eq!(run(0x80, 0x3a, 0x00, 0xc6), (0x00, 0xb0)); // Z H C
    assert_eq!(run(0x80, 0x3c, 0x00, 0x12), (0x4e, 0x00));
    assert_eq!(run(0x80, 0x0f, 0x00, 0x01), (0x10, 0x20)); // H
}

#[test]
fn adc_chains_carry() {
    // ADC A, B with carry in
    assert_eq!(run(0x88, 0x0f, 0x10, 0x00), (0x10, 0x20)); // H from carry-in
    assert_eq!(run(0x88, 0xff, 0x10, 0x00), (0x00, 0xb0)); // Z H C
}

#[test]
fn sub_borrows() {
    // SUB B
    assert_eq!(run(0x90, 0x3e, 0x00, 0x3e), (0x00, 0xc0)); // Z N
    assert_eq!(run(0x90, 0x3e, 0x00, 0x0f), (0x2f, 0x60)); // N H
    assert_eq!(run(0x90, 0x3e, 0x00, 0x40), (0xfe, 0x50)); // N C
}

#[test]
fn sbc_chains_borrow() {
    // SBC A, B with carry in
    assert_eq!(run(0x98, 0x00, 0x10, 0x00), (0xff, 0x70)); // N H C
    assert_eq!(run(0x98, 0x10, 0x10, 0x0f), (0x00, 0xe0)); // Z N H
}

#[test]
fn logic_flag_profiles() {
    // AND B always sets H; XOR/OR clear everything but Z.
    assert_eq!(run(0xa0, 0x5a, 0x00, 0x0f), (0x0a, 0x20));
    assert_eq!(run(0xa0, 0xf0, 0x00, 0x0f), (0x00, 0xa0));
    assert_eq!(run(0xa8, 0xff, 0x70, 0xff), (0x00, 0x80));
    assert_eq!(run(0xb0, 0x00, 0x70, 0x00), (0x00, 0x80));
}

#[test]
fn cp_leaves_accumulator() {
    // CP B
    assert_eq!(run(0xb8, 0x3c, 0x00, 0x2f), (0x3c, 0x60));
    assert_eq!(run(0xb8, 0x3c, 0x00, 0x3c), (0x3c, 0xc0));
}

#[test]
fn daa_after_subtraction() {
    // "42 - 15 = 27" in BCD: SUB B leaves N and H; DAA folds back.
    let (mut cpu, mut bus) = setup();
    cpu.reg.a = 0x42;
    cpu.reg.b = 0x15;
    execute(&mut cpu, &mut bus, 0x90).unwrap();
    assert_eq!(cpu.reg.a, 0x2d);
    execute(&mut cpu, &mut bus, 0x27).unwrap();
    assert_eq!(cpu.reg.a, 0x27);
}

#[test]
fn rotates_through_carry() {
    // RLA: carry in becomes bit 0, bit 7 becomes carry out.
    assert_eq!(run(0x17, 0x95, 0x10, 0x00), (0x2b, 0x10));
    assert_eq!(run(0x17, 0x00, 0x10, 0x00), (0x01, 0x00));
    // RRA
    assert_eq!(run(0x1f, 0x81, 0x00, 0x00), (0x40, 0x10));
}

#[test]
fn accumulator_rotates_clear_zero() {
    // RLCA on zero still reports Z=0.
    assert_eq!(run(0x07, 0x00, 0x80, 0x00), (0x00, 0x00));
}

#[test]
fn prefixed_shifts() {
    let (mut cpu, mut bus) = setup();
    cpu.reg.b = 0x81;
    // RLC B
    super::bits::prefix(&mut cpu, &mut bus, 0x00);
    assert_eq!(cpu.reg.b, 0x03);
    assert_eq!(cpu.reg.f, 0x10);
    // SWAP B
    super::bits::prefix(&mut cpu, &mut bus, 0x30);
    assert_eq!(cpu.reg.b, 0x30);
    assert_eq!(cpu.reg.f, 0x00);
    // SRL B
    super::bits::prefix(&mut cpu, &mut bus, 0x38);
    assert_eq!(cpu.reg.b, 0x18);
    assert_eq!(cpu.reg.f, 0x00);
    // BIT 7, B: bit is clear, so Z and H report
    super::bits::prefix(&mut cpu, &mut bus, 0x78);
    assert_eq!(cpu.reg.f, 0xa0);
    // SET 7, B then RES 7, B round-trips
    super::bits::prefix(&mut cpu, &mut bus, 0xf8);
    assert_eq!(cpu.reg.b, 0x98);
    super::bits::prefix(&mut cpu, &mut bus, 0xb8);
    assert_eq!(cpu.reg.b, 0x18);
}

#[test]
fn carry_flag_operations() {
    // SCF
    assert_eq!(run(0x37, 0x00, 0xe0, 0x00), (0x00, 0x90));
    // CCF toggles
    assert_eq!(run(0x3f, 0x00, 0x10, 0x00), (0x00, 0x00));
    assert_eq!(run(0x3f, 0x00, 0x00, 0x00), (0x00, 0x10));
    // CPL
    assert_eq!(run(0x2f, 0x35, 0x00, 0x00), (0xca, 0x60));
}

#[test]
fn illegal_opcodes_error() {
    let (mut cpu, mut bus) = setup();
    for code in [0xd3, 0xdb, 0xdd, 0xe3, 0xe4, 0xeb, 0xec, 0xed, 0xf4, 0xfc, 0xfd] {
        assert_eq!(execute(&mut cpu, &mut bus, code), Err(Error::Illegal(code)));
    }
}
