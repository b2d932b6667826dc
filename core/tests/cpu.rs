//! Processor behaviour, driven through the public API.

use dotmatrix_core::hw::cpu::Ime;
use dotmatrix_core::{Error, Feature, GameBoy};

mod common;

#[test]
fn power_on_state() {
    let emu = GameBoy::new(&common::rom(&[])).unwrap();
    assert_eq!(emu.cpu.reg.af(), 0x01b0);
    assert_eq!(emu.cpu.reg.bc(), 0x0013);
    assert_eq!(emu.cpu.reg.de(), 0x00d8);
    assert_eq!(emu.cpu.reg.hl(), 0x014d);
    assert_eq!(emu.cpu.reg.sp, 0xfffe);
    assert_eq!(emu.cpu.reg.pc, 0x0100);
    assert_eq!(emu.bus.pic.load_flg(), 0xe1);
    assert_eq!(emu.bus.pic.load_ena(), 0x00);
    assert_eq!(emu.bus.timer.div, 0xabcc);
}

/// Documented cycle counts, observed at the motherboard.
#[test]
fn instruction_cycles() {
    #[rustfmt::skip]
    let program: &[(&[u8], u8)] = &[
        (&[0x00],             4),  // NOP
        (&[0x06, 0x55],       8),  // LD B, d8
        (&[0x78],             4),  // LD A, B
        (&[0x21, 0x00, 0xc0], 12), // LD HL, d16
        (&[0x7e],             8),  // LD A, (HL)
        (&[0x36, 0x12],       12), // LD (HL), d8
        (&[0x34],             12), // INC (HL)
        (&[0x04],             4),  // INC B
        (&[0x03],             8),  // INC BC
        (&[0x09],             8),  // ADD HL, BC
        (&[0x80],             4),  // ADD A, B
        (&[0xc6, 0x01],       8),  // ADD A, d8
        (&[0x86],             8),  // ADD A, (HL)
        (&[0xe8, 0x01],       16), // ADD SP, e8
        (&[0xf8, 0x01],       12), // LD HL, SP+e8
        (&[0xf9],             8),  // LD SP, HL
        (&[0x31, 0xfe, 0xff], 12), // LD SP, d16
        (&[0x08, 0x00, 0xc0], 20), // LD (a16), SP
        (&[0xe0, 0x80],       12), // LDH (a8), A
        (&[0xf0, 0x80],       12), // LDH A, (a8)
        (&[0xe2],             8),  // LDH (C), A
        (&[0xea, 0x00, 0xc0], 16), // LD (a16), A
        (&[0xfa, 0x00, 0xc0], 16), // LD A, (a16)
        (&[0xc5],             16), // PUSH BC
        (&[0xc1],             12), // POP BC
        (&[0x07],             4),  // RLCA
        (&[0xcb, 0x00],       8),  // RLC B
        (&[0xcb, 0x06],       16), // RLC (HL)
        (&[0xcb, 0x46],       12), // BIT 0, (HL)
        (&[0xcb, 0x86],       16), // RES 0, (HL)
        (&[0xcb, 0x40],       8),  // BIT 0, B
        (&[0x27],             4),  // DAA
        (&[0x2f],             4),  // CPL
        (&[0x37],             4),  // SCF
        (&[0x3f],             4),  // CCF
        (&[0xf3],             4),  // DI
        (&[0xfb],             4),  // EI
        (&[0x18, 0x00],       12), // JR e8
    ];

    let code: Vec<u8> = program
        .iter()
        .flat_map(|(bytes, _)| bytes.iter().copied())
        .collect();
    let mut emu = common::power_on(&code);
    for (bytes, expected) in program {
        let cycles = emu.tick().unwrap();
        assert_eq!(
            cycles, *expected,
            "wrong cycle count for opcode {:#04x}",
            bytes[0]
        );
        // The flags register's low nibble is not backed by hardware.
        assert_eq!(emu.cpu.reg.f & 0x0f, 0, "flags low nibble set");
    }
}

#[test]
fn conditional_branch_cycles() {
    // SCF; JR C, +0; JR NC, +0; RET NC; CALL C, $015C; ...; RET
    #[rustfmt::skip]
    let mut emu = common::power_on(&[
        0x37,             // $0150: SCF          (carry set)
        0x38, 0x00,       // $0151: JR C, +0     (taken:     12)
        0x30, 0x00,       // $0153: JR NC, +0    (not taken:  8)
        0xd0,             // $0155: RET NC       (not taken:  8)
        0xdc, 0x5c, 0x01, // $0156: CALL C, a16  (taken:     24)
        0xda, 0x00, 0x00, // $0159: (skipped)
        0xc9,             // $015C: RET          (           16)
    ]);
    assert_eq!(emu.tick().unwrap(), 4); // SCF
    assert_eq!(emu.tick().unwrap(), 12); // JR C taken
    assert_eq!(emu.tick().unwrap(), 8); // JR NC not taken
    assert_eq!(emu.tick().unwrap(), 8); // RET NC not taken
    assert_eq!(emu.tick().unwrap(), 24); // CALL C taken
    assert_eq!(emu.cpu.reg.pc, 0x015c);
    assert_eq!(emu.tick().unwrap(), 16); // RET
    assert_eq!(emu.cpu.reg.pc, 0x0159);
}

#[test]
fn interrupt_dispatch_takes_twenty_cycles() {
    let mut emu = common::power_on(&[0x00, 0x00]);
    emu.cpu.etc.ime = Ime::Enabled;
    emu.bus.pic.store_ena(0x04);
    emu.bus.pic.store_flg(0x04);
    let pc = emu.cpu.reg.pc;
    assert_eq!(emu.tick().unwrap(), 20);
    // Jumped to the timer handler; flag acknowledged; IME cleared.
    assert_eq!(emu.cpu.reg.pc, 0x0050);
    assert_eq!(emu.bus.pic.load_flg() & 0x1f, 0x00);
    assert_eq!(emu.cpu.etc.ime, Ime::Disabled);
    // Return address on the stack.
    let sp = emu.cpu.reg.sp;
    let lo = emu.bus.read(sp);
    let hi = emu.bus.read(sp.wrapping_add(1));
    assert_eq!(u16::from_le_bytes([lo, hi]), pc);
}

#[test]
fn ei_enables_after_following_instruction() {
    // EI; NOP; NOP
    let mut emu = common::power_on(&[0xfb, 0x00, 0x00]);
    emu.bus.pic.store_ena(0x04);
    emu.bus.pic.store_flg(0x04);
    assert_eq!(emu.tick().unwrap(), 4); // EI
    assert_eq!(emu.cpu.etc.ime, Ime::Pending);
    assert_eq!(emu.tick().unwrap(), 4); // NOP; no dispatch yet
    assert_eq!(emu.cpu.etc.ime, Ime::Enabled);
    assert_eq!(emu.tick().unwrap(), 20); // dispatch
    assert_eq!(emu.cpu.reg.pc, 0x0050);
}

#[test]
fn halt_wakes_on_pending_interrupt() {
    // HALT; INC B
    let mut emu = common::power_on(&[0x76, 0x04]);
    emu.bus.pic.store_ena(0x01);
    emu.bus.pic.store_flg(0x00);
    emu.tick().unwrap(); // HALT
    assert!(emu.cpu.etc.halted);
    assert_eq!(emu.tick().unwrap(), 4); // idle
    assert!(emu.cpu.etc.halted);
    // VBlank pends: the processor leaves halt on its next step.
    emu.bus.pic.store_flg(0x01);
    emu.tick().unwrap();
    assert!(!emu.cpu.etc.halted);
    assert_eq!(emu.cpu.reg.b, 0x01); // INC B executed
}

#[test]
fn halt_bug_rereads_opcode() {
    // HALT with IME clear and an interrupt already pending: the following
    // opcode byte is fetched twice.
    //
    // HALT; INC B -- the INC executes twice.
    let mut emu = common::power_on(&[0x76, 0x04, 0x00]);
    emu.bus.pic.store_ena(0x01);
    emu.bus.pic.store_flg(0x01);
    emu.tick().unwrap(); // HALT (does not halt; arms the bug)
    assert!(!emu.cpu.etc.halted);
    emu.tick().unwrap(); // INC B (PC fails to advance)
    emu.tick().unwrap(); // INC B again
    assert_eq!(emu.cpu.reg.b, 0x02);
}

#[test]
fn daa_adjusts_bcd_addition() {
    // LD A, $45; ADD A, $38; DAA  =>  "45 + 38 = 83"
    let mut emu = common::power_on(&[0x3e, 0x45, 0xc6, 0x38, 0x27]);
    emu.tick().unwrap();
    emu.tick().unwrap();
    assert_eq!(emu.cpu.reg.a, 0x7d);
    assert_eq!(emu.cpu.reg.f, 0x00);
    emu.tick().unwrap();
    assert_eq!(emu.cpu.reg.a, 0x83);
    assert_eq!(emu.cpu.reg.f, 0x00);
}

#[test]
fn pop_af_masks_flag_bits() {
    // LD BC, $12ff; PUSH BC; POP AF
    let mut emu = common::power_on(&[0x01, 0xff, 0x12, 0xc5, 0xf1]);
    emu.tick().unwrap();
    emu.tick().unwrap();
    emu.tick().unwrap();
    assert_eq!(emu.cpu.reg.af(), 0x12f0);
}

#[test]
fn illegal_opcode_is_reported() {
    let mut emu = common::power_on(&[0xd3]);
    match emu.tick() {
        Err(Error::Unsupported(Feature::Opcode(0xd3))) => {}
        other => panic!("expected illegal opcode error, got {other:?}"),
    }
}

#[test]
fn serial_test_rom_convention() {
    // LD A, 'P'; LDH ($01), A; LD A, $81; LDH ($02), A
    let mut emu = common::power_on(&[0x3e, b'P', 0xe0, 0x01, 0x3e, 0x81, 0xe0, 0x02]);
    for _ in 0..4 {
        emu.tick().unwrap();
    }
    assert_eq!(emu.serial_out(), Some(b'P'));
    assert_eq!(emu.serial_out(), None);
    // Completion requested the serial interrupt.
    assert_eq!(emu.bus.pic.load_flg() & 0x08, 0x08);
    assert_eq!(emu.bus.sio.log(), b"P");
}
