//! Arithmetic and logic.

use dotmatrix_arch::reg::Register;

use super::{get8, load_rp, set8, store_rp, Cpu, Flag};
use crate::sys::bus::Bus;

/// Dispatches the ALU operation selected by opcode bits 5–3.
pub(super) fn binary(cpu: &mut Cpu, fam: u8, op2: u8) {
    match fam {
        0x0 => add(cpu, op2),
        0x1 => adc(cpu, op2),
        0x2 => sub(cpu, op2),
        0x3 => sbc(cpu, op2),
        0x4 => and(cpu, op2),
        0x5 => xor(cpu, op2),
        0x6 => or(cpu, op2),
        0x7 => cp(cpu, op2),
        _ => unreachable!("invalid ALU operation"),
    }
}

/// Arithmetic add.
fn add(cpu: &mut Cpu, op2: u8) {
    let acc = cpu.reg.a.load();
    let (res, carry) = acc.overflowing_add(op2);
    cpu.reg.a.store(res);

    let flags = &mut cpu.reg.f.load();
    Flag::Z.set(flags, res == 0);
    Flag::N.set(flags, false);
    Flag::H.set(flags, (acc & 0x0f) + (op2 & 0x0f) > 0x0f);
    Flag::C.set(flags, carry);
    cpu.reg.f.store(*flags);
}

/// Arithmetic add with carry.
fn adc(cpu: &mut Cpu, op2: u8) {
    let acc = cpu.reg.a.load();
    let cin = u8::from(Flag::C.get(cpu.reg.f.load()));
    let (res, carry0) = acc.overflowing_add(op2);
    let (res, carry1) = res.overflowing_add(cin);
    cpu.reg.a.store(res);

    let flags = &mut cpu.reg.f.load();
    Flag::Z.set(flags, res == 0);
    Flag::N.set(flags, false);
    Flag::H.set(flags, (acc & 0x0f) + (op2 & 0x0f) + cin > 0x0f);
    Flag::C.set(flags, carry0 | carry1);
    cpu.reg.f.store(*flags);
}

/// Arithmetic subtract.
fn sub(cpu: &mut Cpu, op2: u8) {
    let acc = cpu.reg.a.load();
    let res = acc.wrapping_sub(op2);
    cpu.reg.a.store(res);

    let flags = &mut cpu.reg.f.load();
    Flag::Z.set(flags, res == 0);
    Flag::N.set(flags, true);
    Flag::H.set(flags, (acc & 0x0f) < (op2 & 0x0f));
    Flag::C.set(flags, acc < op2);
    cpu.reg.f.store(*flags);
}

/// Arithmetic subtract with carry.
fn sbc(cpu: &mut Cpu, op2: u8) {
    let acc = cpu.reg.a.load();
    let cin = u8::from(Flag::C.get(cpu.reg.f.load()));
    let res = acc.wrapping_sub(op2).wrapping_sub(cin);
    cpu.reg.a.store(res);

    let flags = &mut cpu.reg.f.load();
    Flag::Z.set(flags, res == 0);
    Flag::N.set(flags, true);
    Flag::H.set(flags, (acc & 0x0f) < (op2 & 0x0f) + cin);
    Flag::C.set(flags, u16::from(acc) < u16::from(op2) + u16::from(cin));
    cpu.reg.f.store(*flags);
}

/// Logical AND.
fn and(cpu: &mut Cpu, op2: u8) {
    let res = cpu.reg.a.load() & op2;
    cpu.reg.a.store(res);

    let flags = &mut cpu.reg.f.load();
    Flag::Z.set(flags, res == 0);
    Flag::N.set(flags, false);
    Flag::H.set(flags, true);
    Flag::C.set(flags, false);
    cpu.reg.f.store(*flags);
}

/// Logical exclusive OR.
fn xor(cpu: &mut Cpu, op2: u8) {
    let res = cpu.reg.a.load() ^ op2;
    cpu.reg.a.store(res);

    let flags = &mut cpu.reg.f.load();
    Flag::Z.set(flags, res == 0);
    Flag::N.set(flags, false);
    Flag::H.set(flags, false);
    Flag::C.set(flags, false);
    cpu.reg.f.store(*flags);
}

/// Logical OR.
fn or(cpu: &mut Cpu, op2: u8) {
    let res = cpu.reg.a.load() | op2;
    cpu.reg.a.store(res);

    let flags = &mut cpu.reg.f.load();
    Flag::Z.set(flags, res == 0);
    Flag::N.set(flags, false);
    Flag::H.set(flags, false);
    Flag::C.set(flags, false);
    cpu.reg.f.store(*flags);
}

/// Comparison; subtract without storing the result.
fn cp(cpu: &mut Cpu, op2: u8) {
    let acc = cpu.reg.a.load();
    let res = acc.wrapping_sub(op2);

    let flags = &mut cpu.reg.f.load();
    Flag::Z.set(flags, res == 0);
    Flag::N.set(flags, true);
    Flag::H.set(flags, (acc & 0x0f) < (op2 & 0x0f));
    Flag::C.set(flags, acc < op2);
    cpu.reg.f.store(*flags);
}

/// Byte increment.
pub(super) fn inc8(cpu: &mut Cpu, bus: &mut Bus, code: u8) {
    let idx = (code >> 3) & 0x07;
    let old = get8(cpu, bus, idx);
    let res = old.wrapping_add(1);
    set8(cpu, bus, idx, res);

    let flags = &mut cpu.reg.f.load();
    Flag::Z.set(flags, res == 0);
    Flag::N.set(flags, false);
    Flag::H.set(flags, old & 0x0f == 0x0f);
    cpu.reg.f.store(*flags);
}

/// Byte decrement.
pub(super) fn dec8(cpu: &mut Cpu, bus: &mut Bus, code: u8) {
    let idx = (code >> 3) & 0x07;
    let old = get8(cpu, bus, idx);
    let res = old.wrapping_sub(1);
    set8(cpu, bus, idx, res);

    let flags = &mut cpu.reg.f.load();
    Flag::Z.set(flags, res == 0);
    Flag::N.set(flags, true);
    Flag::H.set(flags, old & 0x0f == 0x00);
    cpu.reg.f.store(*flags);
}

/// Word increment.
///
/// The arithmetic happens off the main ALU over an extra internal M-cycle;
/// no flags are touched.
pub(super) fn incw(cpu: &mut Cpu, bus: &mut Bus, code: u8) {
    let res = load_rp(cpu, code).wrapping_add(1);
    store_rp(cpu, code, res);
    cpu.tick(bus);
}

/// Word decrement.
pub(super) fn decw(cpu: &mut Cpu, bus: &mut Bus, code: u8) {
    let res = load_rp(cpu, code).wrapping_sub(1);
    store_rp(cpu, code, res);
    cpu.tick(bus);
}

/// Word add into HL.
pub(super) fn addw(cpu: &mut Cpu, bus: &mut Bus, code: u8) {
    let hl = cpu.reg.hl();
    let op2 = load_rp(cpu, code);
    let (res, carry) = hl.overflowing_add(op2);
    cpu.reg.set_hl(res);

    let flags = &mut cpu.reg.f.load();
    Flag::N.set(flags, false);
    Flag::H.set(flags, (hl & 0x0fff) + (op2 & 0x0fff) > 0x0fff);
    Flag::C.set(flags, carry);
    cpu.reg.f.store(*flags);
    cpu.tick(bus);
}

/// Signed offset add into SP.
pub(super) fn add_sp(cpu: &mut Cpu, bus: &mut Bus) {
    let off = cpu.fetch(bus);
    let sp = cpu.reg.sp.load();
    cpu.reg.sp.store(sp.wrapping_add_signed(i16::from(off as i8)));

    let flags = &mut cpu.reg.f.load();
    Flag::Z.set(flags, false);
    Flag::N.set(flags, false);
    Flag::H.set(flags, (sp & 0x000f) + u16::from(off & 0x0f) > 0x000f);
    Flag::C.set(flags, (sp & 0x00ff) + u16::from(off) > 0x00ff);
    cpu.reg.f.store(*flags);
    cpu.tick(bus);
    cpu.tick(bus);
}

/// Decimal adjust the accumulator.
///
/// Folds the binary result of the previous arithmetic back into
/// binary-coded decimal, using N, H, and C as inputs.
pub(super) fn daa(cpu: &mut Cpu) {
    let acc = cpu.reg.a.load();
    let flags = cpu.reg.f.load();
    let didsub = Flag::N.get(flags);
    let hcarry = Flag::H.get(flags);
    let mut carry = Flag::C.get(flags);

    let mut adj = 0x00u8;
    if hcarry || (!didsub && acc & 0x0f > 0x09) {
        adj |= 0x06;
    }
    if carry || (!didsub && acc > 0x99) {
        adj |= 0x60;
        carry = true;
    }
    let res = if didsub {
        acc.wrapping_sub(adj)
    } else {
        acc.wrapping_add(adj)
    };
    cpu.reg.a.store(res);

    let flags = &mut cpu.reg.f.load();
    Flag::Z.set(flags, res == 0);
    Flag::H.set(flags, false);
    Flag::C.set(flags, carry);
    cpu.reg.f.store(*flags);
}

/// Complement the accumulator.
pub(super) fn cpl(cpu: &mut Cpu) {
    let acc = cpu.reg.a.load();
    cpu.reg.a.store(!acc);

    let flags = &mut cpu.reg.f.load();
    Flag::N.set(flags, true);
    Flag::H.set(flags, true);
    cpu.reg.f.store(*flags);
}

/// Set the carry flag.
pub(super) fn scf(cpu: &mut Cpu) {
    let flags = &mut cpu.reg.f.load();
    Flag::N.set(flags, false);
    Flag::H.set(flags, false);
    Flag::C.set(flags, true);
    cpu.reg.f.store(*flags);
}

/// Complement the carry flag.
pub(super) fn ccf(cpu: &mut Cpu) {
    let flags = &mut cpu.reg.f.load();
    let carry = Flag::C.get(*flags);
    Flag::N.set(flags, false);
    Flag::H.set(flags, false);
    Flag::C.set(flags, !carry);
    cpu.reg.f.store(*flags);
}
