//! Interrupt controller.

use log::trace;

use dotmatrix_arch::Block;

/// Interrupt source.
///
/// |  Source  | Handler |
/// |----------|---------|
/// | VBlank   | `$0040` |
/// | LCD STAT | `$0048` |
/// | Timer    | `$0050` |
/// | Serial   | `$0058` |
/// | Joypad   | `$0060` |
///
/// Sources are serviced in the order listed; VBlank has the highest
/// priority.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Interrupt {
    /// Vertical blank.
    ///
    /// Requested by the PPU upon entry to VBlank.
    VBlank  = 0b0000_0001,
    /// LCD status.
    ///
    /// Requested by the PPU as configured by the STAT register.
    LcdStat = 0b0000_0010,
    /// Timer overflow.
    ///
    /// Requested by the timer whenever TIMA overflows.
    Timer   = 0b0000_0100,
    /// Serial transfer.
    ///
    /// Requested by the serial port upon completion of a transfer.
    Serial  = 0b0000_1000,
    /// Joypad input.
    ///
    /// Requested whenever a selected button line falls from high to low.
    Joypad  = 0b0001_0000,
}

impl Interrupt {
    /// Returns the address of the interrupt's service routine.
    #[rustfmt::skip]
    #[must_use]
    pub fn handler(self) -> u16 {
        match self {
            Self::VBlank  => 0x40,
            Self::LcdStat => 0x48,
            Self::Timer   => 0x50,
            Self::Serial  => 0x58,
            Self::Joypad  => 0x60,
        }
    }

    /// Returns the interrupt's bit within the IF/IE registers.
    #[must_use]
    pub fn mask(self) -> u8 {
        self as u8
    }

    /// Returns a string representation of the servicing instruction.
    #[rustfmt::skip]
    #[must_use]
    pub fn repr(self) -> &'static str {
        match self {
            Self::VBlank  => "INT 40H",
            Self::LcdStat => "INT 48H",
            Self::Timer   => "INT 50H",
            Self::Serial  => "INT 58H",
            Self::Joypad  => "INT 60H",
        }
    }
}

/// Programmable interrupt controller.
///
/// Owns the interrupt flag (`[$FF0F]`) and interrupt enable (`[$FFFF]`)
/// registers. Each source has a corresponding bit position:
///
/// | Bit |  Source  |
/// |-----|----------|
/// |  0  | VBlank   |
/// |  1  | LCD STAT |
/// |  2  | Timer    |
/// |  3  | Serial   |
/// |  4  | Joypad   |
#[derive(Debug, Default)]
pub struct Pic {
    /// Interrupt flag.
    pub flg: u8,
    /// Interrupt enable.
    pub ena: u8,
}

/// Useful bits within the interrupt registers.
const MASK: u8 = 0b0001_1111;

impl Pic {
    /// Raises an interrupt, marking it pending.
    pub fn raise(&mut self, int: Interrupt) {
        trace!("interrupt requested: {int:?}");
        self.flg |= int.mask();
    }

    /// Clears a pending interrupt.
    ///
    /// Performed by the CPU when dispatching to the source's handler.
    pub fn clear(&mut self, int: Interrupt) {
        trace!("interrupt acknowledged: {int:?}");
        self.flg &= !int.mask();
    }

    /// Checks if any enabled interrupt is pending.
    #[must_use]
    pub fn pending(&self) -> bool {
        self.flg & self.ena & MASK != 0
    }

    /// Fetches the highest-priority pending interrupt.
    #[must_use]
    pub fn next(&self) -> Option<Interrupt> {
        match (self.flg & self.ena & MASK).trailing_zeros() {
            0 => Some(Interrupt::VBlank),
            1 => Some(Interrupt::LcdStat),
            2 => Some(Interrupt::Timer),
            3 => Some(Interrupt::Serial),
            4 => Some(Interrupt::Joypad),
            _ => None,
        }
    }

    /// Reads the interrupt flag register.
    ///
    /// Unmapped high bits read as set.
    #[must_use]
    pub fn load_flg(&self) -> u8 {
        0xe0 | self.flg
    }

    /// Writes the interrupt flag register.
    pub fn store_flg(&mut self, value: u8) {
        self.flg = value & MASK;
    }

    /// Reads the interrupt enable register.
    #[must_use]
    pub fn load_ena(&self) -> u8 {
        self.ena
    }

    /// Writes the interrupt enable register.
    pub fn store_ena(&mut self, value: u8) {
        self.ena = value & MASK;
    }
}

impl Block for Pic {
    fn reset(&mut self) {
        std::mem::take(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_order_works() {
        let mut pic = Pic::default();
        pic.store_ena(0x1f);
        pic.raise(Interrupt::Joypad);
        pic.raise(Interrupt::Timer);
        assert_eq!(pic.next(), Some(Interrupt::Timer));
        pic.clear(Interrupt::Timer);
        assert_eq!(pic.next(), Some(Interrupt::Joypad));
    }

    #[test]
    fn disabled_sources_ignored() {
        let mut pic = Pic::default();
        pic.raise(Interrupt::VBlank);
        assert!(!pic.pending());
        assert_eq!(pic.next(), None);
        pic.store_ena(0x01);
        assert!(pic.pending());
        assert_eq!(pic.next(), Some(Interrupt::VBlank));
    }

    #[test]
    fn flag_reads_are_padded() {
        let mut pic = Pic::default();
        pic.store_flg(0xff);
        assert_eq!(pic.load_flg(), 0xff);
        assert_eq!(pic.flg, 0x1f);
        pic.store_flg(0x00);
        assert_eq!(pic.load_flg(), 0xe0);
    }
}
