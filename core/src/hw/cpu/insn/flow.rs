//! Control flow.

use log::warn;

use dotmatrix_arch::reg::Register;

use super::{cond, Cpu, Ime};
use crate::sys::bus::Bus;

/// Relative jump.
pub(super) fn jr(cpu: &mut Cpu, bus: &mut Bus) {
    let off = cpu.fetch(bus) as i8;
    cpu.tick(bus);
    let pc = cpu.reg.pc.load();
    cpu.reg.pc.store(pc.wrapping_add_signed(i16::from(off)));
}

/// Conditional relative jump.
///
/// The offset is always fetched; the extra internal cycle is only spent
/// when the branch is taken.
pub(super) fn jr_cc(cpu: &mut Cpu, bus: &mut Bus, code: u8) {
    let off = cpu.fetch(bus) as i8;
    if cond(cpu, code) {
        cpu.tick(bus);
        let pc = cpu.reg.pc.load();
        cpu.reg.pc.store(pc.wrapping_add_signed(i16::from(off)));
    }
}

/// Absolute jump.
pub(super) fn jp(cpu: &mut Cpu, bus: &mut Bus) {
    let addr = cpu.fetch_word(bus);
    cpu.tick(bus);
    cpu.reg.pc.store(addr);
}

/// Conditional absolute jump.
pub(super) fn jp_cc(cpu: &mut Cpu, bus: &mut Bus, code: u8) {
    let addr = cpu.fetch_word(bus);
    if cond(cpu, code) {
        cpu.tick(bus);
        cpu.reg.pc.store(addr);
    }
}

/// Jump to HL.
///
/// The only jump without an internal delay; PC is loaded directly off the
/// address register.
pub(super) fn jp_hl(cpu: &mut Cpu) {
    let hl = cpu.reg.hl();
    cpu.reg.pc.store(hl);
}

/// Call a subroutine.
pub(super) fn call(cpu: &mut Cpu, bus: &mut Bus) {
    let addr = cpu.fetch_word(bus);
    cpu.tick(bus);
    let pc = cpu.reg.pc.load();
    cpu.push(bus, pc);
    cpu.reg.pc.store(addr);
}

/// Conditionally call a subroutine.
pub(super) fn call_cc(cpu: &mut Cpu, bus: &mut Bus, code: u8) {
    let addr = cpu.fetch_word(bus);
    if cond(cpu, code) {
        cpu.tick(bus);
        let pc = cpu.reg.pc.load();
        cpu.push(bus, pc);
        cpu.reg.pc.store(addr);
    }
}

/// Return from a subroutine.
pub(super) fn ret(cpu: &mut Cpu, bus: &mut Bus) {
    let addr = cpu.pop(bus);
    cpu.tick(bus);
    cpu.reg.pc.store(addr);
}

/// Conditionally return from a subroutine.
///
/// Spends an internal cycle evaluating the condition before popping.
pub(super) fn ret_cc(cpu: &mut Cpu, bus: &mut Bus, code: u8) {
    cpu.tick(bus);
    if cond(cpu, code) {
        let addr = cpu.pop(bus);
        cpu.tick(bus);
        cpu.reg.pc.store(addr);
    }
}

/// Return from an interrupt handler, re-enabling interrupts.
///
/// Unlike EI, the enable takes effect immediately.
pub(super) fn reti(cpu: &mut Cpu, bus: &mut Bus) {
    ret(cpu, bus);
    cpu.etc.ime = Ime::Enabled;
}

/// Restart at a fixed vector.
pub(super) fn rst(cpu: &mut Cpu, bus: &mut Bus, code: u8) {
    cpu.tick(bus);
    let pc = cpu.reg.pc.load();
    cpu.push(bus, pc);
    cpu.reg.pc.store(u16::from(code & 0x38));
}

/// Halt until an interrupt pends.
///
/// Executing HALT with IME clear while an enabled interrupt is already
/// pending does not halt; instead it triggers the hardware bug where the
/// following opcode byte is fetched twice.
pub(super) fn halt(cpu: &mut Cpu, bus: &mut Bus) {
    if cpu.etc.ime != Ime::Enabled && bus.pic.pending() {
        cpu.etc.halt_bug = true;
    } else {
        cpu.etc.halted = true;
    }
}

/// Stop the system clock.
///
/// Low-power mode is not modelled; the padding byte is skipped and
/// execution continues.
pub(super) fn stop(cpu: &mut Cpu) {
    warn!("ignoring STOP");
    let pc = cpu.reg.pc.load();
    cpu.reg.pc.store(pc.wrapping_add(1));
}
