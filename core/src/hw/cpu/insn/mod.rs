//! Instruction set architecture.
//!
//! Decode is a generated `match` over the opcode byte: the regular
//! quadrants (`LD r, r'`, the ALU block, and the entire `$CB` table) are
//! decoded algebraically from their bit fields, while the irregular
//! remainder gets explicit arms. Cycle counts are not tabulated; they fall
//! out of the bus accesses and internal delays each operation performs.

use thiserror::Error;

use dotmatrix_arch::reg::Register;

use super::{Cpu, Flag, Ime};
use crate::sys::bus::Bus;

mod alu;
mod bits;
mod flow;
mod load;
mod table;

#[cfg(test)]
mod tests;

/// Returns the mnemonic for an opcode.
#[must_use]
pub fn mnemonic(code: u8) -> &'static str {
    table::DECODE[code as usize]
}

/// Returns the mnemonic for a `$CB`-prefixed opcode.
#[must_use]
pub fn prefixed(code: u8) -> &'static str {
    table::PREFIX[code as usize]
}

/// Executes a single instruction whose opcode has been fetched.
///
/// # Errors
///
/// Errors if the opcode is not part of the DMG instruction set.
#[allow(clippy::too_many_lines)]
pub(super) fn execute(cpu: &mut Cpu, bus: &mut Bus, code: u8) -> Result<()> {
    match code {
        0x00 => {} // NOP
        // Loads
        0x01 | 0x11 | 0x21 | 0x31 => load::ld_rr_d16(cpu, bus, code),
        0x02 => {
            let bc = cpu.reg.bc();
            load::ld_mr_a(cpu, bus, bc);
        }
        0x12 => {
            let de = cpu.reg.de();
            load::ld_mr_a(cpu, bus, de);
        }
        0x22 => {
            let hl = cpu.reg.hl_inc();
            load::ld_mr_a(cpu, bus, hl);
        }
        0x32 => {
            let hl = cpu.reg.hl_dec();
            load::ld_mr_a(cpu, bus, hl);
        }
        0x0a => {
            let bc = cpu.reg.bc();
            load::ld_a_mr(cpu, bus, bc);
        }
        0x1a => {
            let de = cpu.reg.de();
            load::ld_a_mr(cpu, bus, de);
        }
        0x2a => {
            let hl = cpu.reg.hl_inc();
            load::ld_a_mr(cpu, bus, hl);
        }
        0x3a => {
            let hl = cpu.reg.hl_dec();
            load::ld_a_mr(cpu, bus, hl);
        }
        0x06 | 0x0e | 0x16 | 0x1e | 0x26 | 0x2e | 0x36 | 0x3e => load::ld_r_d8(cpu, bus, code),
        0x08 => load::ld_a16_sp(cpu, bus),
        0x40..=0x75 | 0x77..=0x7f => load::ld_r_r(cpu, bus, code),
        0xc1 | 0xd1 | 0xe1 | 0xf1 => load::pop_rr(cpu, bus, code),
        0xc5 | 0xd5 | 0xe5 | 0xf5 => load::push_rr(cpu, bus, code),
        0xe0 => load::ldh_a8_a(cpu, bus),
        0xf0 => load::ldh_a_a8(cpu, bus),
        0xe2 => load::ldh_c_a(cpu, bus),
        0xf2 => load::ldh_a_c(cpu, bus),
        0xea => load::ld_a16_a(cpu, bus),
        0xfa => load::ld_a_a16(cpu, bus),
        0xf8 => load::ld_hl_sp_e8(cpu, bus),
        0xf9 => load::ld_sp_hl(cpu, bus),
        // Arithmetic and logic
        0x03 | 0x13 | 0x23 | 0x33 => alu::incw(cpu, bus, code),
        0x0b | 0x1b | 0x2b | 0x3b => alu::decw(cpu, bus, code),
        0x04 | 0x0c | 0x14 | 0x1c | 0x24 | 0x2c | 0x34 | 0x3c => alu::inc8(cpu, bus, code),
        0x05 | 0x0d | 0x15 | 0x1d | 0x25 | 0x2d | 0x35 | 0x3d => alu::dec8(cpu, bus, code),
        0x09 | 0x19 | 0x29 | 0x39 => alu::addw(cpu, bus, code),
        0x27 => alu::daa(cpu),
        0x2f => alu::cpl(cpu),
        0x37 => alu::scf(cpu),
        0x3f => alu::ccf(cpu),
        0x80..=0xbf => {
            let op2 = get8(cpu, bus, code & 0x07);
            alu::binary(cpu, (code >> 3) & 0x07, op2);
        }
        0xc6 | 0xce | 0xd6 | 0xde | 0xe6 | 0xee | 0xf6 | 0xfe => {
            let op2 = cpu.fetch(bus);
            alu::binary(cpu, (code >> 3) & 0x07, op2);
        }
        0xe8 => alu::add_sp(cpu, bus),
        // Rotates on the accumulator
        0x07 => bits::rlca(cpu),
        0x0f => bits::rrca(cpu),
        0x17 => bits::rla(cpu),
        0x1f => bits::rra(cpu),
        // Control flow
        0x18 => flow::jr(cpu, bus),
        0x20 | 0x28 | 0x30 | 0x38 => flow::jr_cc(cpu, bus, code),
        0xc2 | 0xca | 0xd2 | 0xda => flow::jp_cc(cpu, bus, code),
        0xc3 => flow::jp(cpu, bus),
        0xe9 => flow::jp_hl(cpu),
        0xc4 | 0xcc | 0xd4 | 0xdc => flow::call_cc(cpu, bus, code),
        0xcd => flow::call(cpu, bus),
        0xc0 | 0xc8 | 0xd0 | 0xd8 => flow::ret_cc(cpu, bus, code),
        0xc9 => flow::ret(cpu, bus),
        0xd9 => flow::reti(cpu, bus),
        0xc7 | 0xcf | 0xd7 | 0xdf | 0xe7 | 0xef | 0xf7 | 0xff => flow::rst(cpu, bus, code),
        // Miscellaneous control
        0x10 => flow::stop(cpu),
        0x76 => flow::halt(cpu, bus),
        0xf3 => cpu.etc.ime = Ime::Disabled,
        0xfb => {
            if cpu.etc.ime == Ime::Disabled {
                cpu.etc.ime = Ime::Pending;
            }
        }
        // Prefixed instructions
        0xcb => {
            let code = cpu.fetch(bus);
            bits::prefix(cpu, bus, code);
        }
        // Holes in the opcode map
        0xd3 | 0xdb | 0xdd | 0xe3 | 0xe4 | 0xeb | 0xec | 0xed | 0xf4 | 0xfc | 0xfd => {
            return Err(Error::Illegal(code));
        }
    }
    Ok(())
}

/// Loads the 8-bit operand selected by a 3-bit register index.
///
/// Index 6 addresses memory through HL, costing one M-cycle.
fn get8(cpu: &mut Cpu, bus: &mut Bus, idx: u8) -> u8 {
    match idx {
        0x0 => cpu.reg.b.load(),
        0x1 => cpu.reg.c.load(),
        0x2 => cpu.reg.d.load(),
        0x3 => cpu.reg.e.load(),
        0x4 => cpu.reg.h.load(),
        0x5 => cpu.reg.l.load(),
        0x6 => {
            let hl = cpu.reg.hl();
            cpu.read(bus, hl)
        }
        0x7 => cpu.reg.a.load(),
        _ => unreachable!("invalid operand index"),
    }
}

/// Stores the 8-bit operand selected by a 3-bit register index.
fn set8(cpu: &mut Cpu, bus: &mut Bus, idx: u8, value: u8) {
    match idx {
        0x0 => cpu.reg.b.store(value),
        0x1 => cpu.reg.c.store(value),
        0x2 => cpu.reg.d.store(value),
        0x3 => cpu.reg.e.store(value),
        0x4 => cpu.reg.h.store(value),
        0x5 => cpu.reg.l.store(value),
        0x6 => {
            let hl = cpu.reg.hl();
            cpu.write(bus, hl, value);
        }
        0x7 => cpu.reg.a.store(value),
        _ => unreachable!("invalid operand index"),
    }
}

/// Loads the word register pair selected by opcode bits 5–4.
fn load_rp(cpu: &Cpu, code: u8) -> u16 {
    match (code >> 4) & 0x03 {
        0x0 => cpu.reg.bc(),
        0x1 => cpu.reg.de(),
        0x2 => cpu.reg.hl(),
        0x3 => cpu.reg.sp.load(),
        _ => unreachable!("invalid register pair"),
    }
}

/// Stores the word register pair selected by opcode bits 5–4.
fn store_rp(cpu: &mut Cpu, code: u8, value: u16) {
    match (code >> 4) & 0x03 {
        0x0 => cpu.reg.set_bc(value),
        0x1 => cpu.reg.set_de(value),
        0x2 => cpu.reg.set_hl(value),
        0x3 => cpu.reg.sp.store(value),
        _ => unreachable!("invalid register pair"),
    }
}

/// Evaluates the branch condition selected by opcode bits 4–3.
fn cond(cpu: &Cpu, code: u8) -> bool {
    let flags = cpu.reg.f.load();
    match (code >> 3) & 0x03 {
        0x0 => !Flag::Z.get(flags),
        0x1 => Flag::Z.get(flags),
        0x2 => !Flag::C.get(flags),
        0x3 => Flag::C.get(flags),
        _ => unreachable!("invalid condition"),
    }
}

/// A convenient type alias for [`Result`](std::result::Result).
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error caused decoding an instruction.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// Illegal instruction.
    #[error("illegal opcode: {0:#04x}")]
    Illegal(u8),
}
