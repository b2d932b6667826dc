//! Data movement.

use dotmatrix_arch::reg::Register;

use super::{get8, load_rp, set8, store_rp, Cpu, Flag};
use crate::sys::bus::Bus;

/// Register-to-register byte load.
pub(super) fn ld_r_r(cpu: &mut Cpu, bus: &mut Bus, code: u8) {
    let value = get8(cpu, bus, code & 0x07);
    set8(cpu, bus, (code >> 3) & 0x07, value);
}

/// Immediate byte load.
pub(super) fn ld_r_d8(cpu: &mut Cpu, bus: &mut Bus, code: u8) {
    let value = cpu.fetch(bus);
    set8(cpu, bus, (code >> 3) & 0x07, value);
}

/// Immediate word load.
pub(super) fn ld_rr_d16(cpu: &mut Cpu, bus: &mut Bus, code: u8) {
    let value = cpu.fetch_word(bus);
    store_rp(cpu, code, value);
}

/// Store the accumulator through a register pointer.
pub(super) fn ld_mr_a(cpu: &mut Cpu, bus: &mut Bus, addr: u16) {
    let acc = cpu.reg.a.load();
    cpu.write(bus, addr, acc);
}

/// Load the accumulator through a register pointer.
pub(super) fn ld_a_mr(cpu: &mut Cpu, bus: &mut Bus, addr: u16) {
    let data = cpu.read(bus, addr);
    cpu.reg.a.store(data);
}

/// Store the stack pointer at an immediate address.
pub(super) fn ld_a16_sp(cpu: &mut Cpu, bus: &mut Bus) {
    let addr = cpu.fetch_word(bus);
    let [lo, hi] = cpu.reg.sp.load().to_le_bytes();
    cpu.write(bus, addr, lo);
    cpu.write(bus, addr.wrapping_add(1), hi);
}

/// Store the accumulator at an immediate address.
pub(super) fn ld_a16_a(cpu: &mut Cpu, bus: &mut Bus) {
    let addr = cpu.fetch_word(bus);
    let acc = cpu.reg.a.load();
    cpu.write(bus, addr, acc);
}

/// Load the accumulator from an immediate address.
pub(super) fn ld_a_a16(cpu: &mut Cpu, bus: &mut Bus) {
    let addr = cpu.fetch_word(bus);
    let data = cpu.read(bus, addr);
    cpu.reg.a.store(data);
}

/// Store the accumulator into high memory by immediate offset.
pub(super) fn ldh_a8_a(cpu: &mut Cpu, bus: &mut Bus) {
    let off = cpu.fetch(bus);
    let acc = cpu.reg.a.load();
    cpu.write(bus, 0xff00 | u16::from(off), acc);
}

/// Load the accumulator from high memory by immediate offset.
pub(super) fn ldh_a_a8(cpu: &mut Cpu, bus: &mut Bus) {
    let off = cpu.fetch(bus);
    let data = cpu.read(bus, 0xff00 | u16::from(off));
    cpu.reg.a.store(data);
}

/// Store the accumulator into high memory by register offset.
pub(super) fn ldh_c_a(cpu: &mut Cpu, bus: &mut Bus) {
    let addr = 0xff00 | u16::from(cpu.reg.c.load());
    let acc = cpu.reg.a.load();
    cpu.write(bus, addr, acc);
}

/// Load the accumulator from high memory by register offset.
pub(super) fn ldh_a_c(cpu: &mut Cpu, bus: &mut Bus) {
    let addr = 0xff00 | u16::from(cpu.reg.c.load());
    let data = cpu.read(bus, addr);
    cpu.reg.a.store(data);
}

/// Load HL with SP plus a signed offset.
///
/// Flags come from the low-byte addition, like `ADD SP, e8`.
pub(super) fn ld_hl_sp_e8(cpu: &mut Cpu, bus: &mut Bus) {
    let off = cpu.fetch(bus);
    let sp = cpu.reg.sp.load();
    let res = sp.wrapping_add_signed(i16::from(off as i8));
    cpu.reg.set_hl(res);

    let flags = &mut cpu.reg.f.load();
    Flag::Z.set(flags, false);
    Flag::N.set(flags, false);
    Flag::H.set(flags, (sp & 0x000f) + u16::from(off & 0x0f) > 0x000f);
    Flag::C.set(flags, (sp & 0x00ff) + u16::from(off) > 0x00ff);
    cpu.reg.f.store(*flags);
    cpu.tick(bus);
}

/// Load the stack pointer from HL.
pub(super) fn ld_sp_hl(cpu: &mut Cpu, bus: &mut Bus) {
    let hl = cpu.reg.hl();
    cpu.reg.sp.store(hl);
    cpu.tick(bus);
}

/// Push a register pair onto the stack.
pub(super) fn push_rr(cpu: &mut Cpu, bus: &mut Bus, code: u8) {
    let value = match (code >> 4) & 0x03 {
        0x3 => cpu.reg.af(),
        _ => load_rp(cpu, code),
    };
    cpu.tick(bus);
    cpu.push(bus, value);
}

/// Pop a register pair off the stack.
pub(super) fn pop_rr(cpu: &mut Cpu, bus: &mut Bus, code: u8) {
    let value = cpu.pop(bus);
    match (code >> 4) & 0x03 {
        0x3 => cpu.reg.set_af(value),
        _ => store_rp(cpu, code, value),
    }
}
