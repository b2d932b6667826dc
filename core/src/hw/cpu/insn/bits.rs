//! Rotates, shifts, and bit operations.

use dotmatrix_arch::reg::Register;

use super::{get8, set8, Cpu, Flag};
use crate::sys::bus::Bus;

/// Executes a `$CB`-prefixed instruction.
///
/// The prefix table is fully regular: bits 7–6 select the operation class,
/// bits 5–3 the rotate/shift flavour or bit position, and bits 2–0 the
/// operand register.
pub(super) fn prefix(cpu: &mut Cpu, bus: &mut Bus, code: u8) {
    let idx = code & 0x07;
    let sel = (code >> 3) & 0x07;
    match code >> 6 {
        0b00 => {
            let op = get8(cpu, bus, idx);
            let res = match sel {
                0x0 => rlc(cpu, op),
                0x1 => rrc(cpu, op),
                0x2 => rl(cpu, op),
                0x3 => rr(cpu, op),
                0x4 => sla(cpu, op),
                0x5 => sra(cpu, op),
                0x6 => swap(cpu, op),
                0x7 => srl(cpu, op),
                _ => unreachable!("invalid shift operation"),
            };
            let flags = &mut cpu.reg.f.load();
            Flag::Z.set(flags, res == 0);
            cpu.reg.f.store(*flags);
            set8(cpu, bus, idx, res);
        }
        0b01 => {
            let op = get8(cpu, bus, idx);
            let flags = &mut cpu.reg.f.load();
            Flag::Z.set(flags, op & (1 << sel) == 0);
            Flag::N.set(flags, false);
            Flag::H.set(flags, true);
            cpu.reg.f.store(*flags);
        }
        0b10 => {
            let op = get8(cpu, bus, idx);
            set8(cpu, bus, idx, op & !(1 << sel));
        }
        0b11 => {
            let op = get8(cpu, bus, idx);
            set8(cpu, bus, idx, op | (1 << sel));
        }
        _ => unreachable!("invalid prefix class"),
    }
}

/// Sets the flags common to every rotate and shift.
fn shifted(cpu: &mut Cpu, carry: bool) {
    let flags = &mut cpu.reg.f.load();
    Flag::N.set(flags, false);
    Flag::H.set(flags, false);
    Flag::C.set(flags, carry);
    cpu.reg.f.store(*flags);
}

/// Rotate left, circular.
fn rlc(cpu: &mut Cpu, op: u8) -> u8 {
    shifted(cpu, op & 0x80 != 0);
    op.rotate_left(1)
}

/// Rotate right, circular.
fn rrc(cpu: &mut Cpu, op: u8) -> u8 {
    shifted(cpu, op & 0x01 != 0);
    op.rotate_right(1)
}

/// Rotate left through the carry flag.
fn rl(cpu: &mut Cpu, op: u8) -> u8 {
    let cin = u8::from(Flag::C.get(cpu.reg.f.load()));
    shifted(cpu, op & 0x80 != 0);
    (op << 1) | cin
}

/// Rotate right through the carry flag.
fn rr(cpu: &mut Cpu, op: u8) -> u8 {
    let cin = u8::from(Flag::C.get(cpu.reg.f.load()));
    shifted(cpu, op & 0x01 != 0);
    (op >> 1) | (cin << 7)
}

/// Shift left, arithmetic.
fn sla(cpu: &mut Cpu, op: u8) -> u8 {
    shifted(cpu, op & 0x80 != 0);
    op << 1
}

/// Shift right, arithmetic (sign-preserving).
fn sra(cpu: &mut Cpu, op: u8) -> u8 {
    shifted(cpu, op & 0x01 != 0);
    (op >> 1) | (op & 0x80)
}

/// Exchange the operand's nibbles.
fn swap(cpu: &mut Cpu, op: u8) -> u8 {
    shifted(cpu, false);
    op.rotate_left(4)
}

/// Shift right, logical.
fn srl(cpu: &mut Cpu, op: u8) -> u8 {
    shifted(cpu, op & 0x01 != 0);
    op >> 1
}

/// Rotate the accumulator left, circular.
///
/// Unlike its prefixed counterpart, always clears Z.
pub(super) fn rlca(cpu: &mut Cpu) {
    let acc = cpu.reg.a.load();
    let res = rlc(cpu, acc);
    cpu.reg.a.store(res);
    clear_zero(cpu);
}

/// Rotate the accumulator right, circular.
pub(super) fn rrca(cpu: &mut Cpu) {
    let acc = cpu.reg.a.load();
    let res = rrc(cpu, acc);
    cpu.reg.a.store(res);
    clear_zero(cpu);
}

/// Rotate the accumulator left through carry.
pub(super) fn rla(cpu: &mut Cpu) {
    let acc = cpu.reg.a.load();
    let res = rl(cpu, acc);
    cpu.reg.a.store(res);
    clear_zero(cpu);
}

/// Rotate the accumulator right through carry.
pub(super) fn rra(cpu: &mut Cpu) {
    let acc = cpu.reg.a.load();
    let res = rr(cpu, acc);
    cpu.reg.a.store(res);
    clear_zero(cpu);
}

/// Clears the zero flag (the accumulator rotates never report it).
fn clear_zero(cpu: &mut Cpu) {
    let flags = &mut cpu.reg.f.load();
    Flag::Z.set(flags, false);
    cpu.reg.f.store(*flags);
}
