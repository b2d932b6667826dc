//! Graphics modes.

use super::{Ppu, DOTS_PER_LINE};
use crate::hw::pic::Pic;

use self::draw::Draw;
use self::hblank::HBlank;
use self::scan::Scan;
use self::vblank::VBlank;

pub mod draw;
pub mod hblank;
pub mod scan;
pub mod vblank;

/// Graphics mode.
#[derive(Clone, Debug)]
pub enum Mode {
    /// Mode 2: Scan OAM.
    Scan(Scan),
    /// Mode 3: Draw pixels.
    Draw(Draw),
    /// Mode 0: Horizontal blank.
    HBlank(HBlank),
    /// Mode 1: Vertical blank.
    VBlank(VBlank),
}

impl Mode {
    /// Returns the mode's value as reported in STAT bits 1–0.
    #[must_use]
    #[rustfmt::skip]
    pub fn value(&self) -> u8 {
        match self {
            Mode::HBlank(_) => 0b00,
            Mode::VBlank(_) => 0b01,
            Mode::Scan(_)   => 0b10,
            Mode::Draw(_)   => 0b11,
        }
    }

    /// Executes a single dot of the current mode.
    #[must_use]
    pub(super) fn exec(self, ppu: &mut Ppu, pic: &mut Pic) -> Self {
        // Re-evaluate the LY comparison; the scanline may have changed at
        // the end of the previous dot.
        ppu.check_lyc(pic);

        // Execute the current mode
        let prev = self.value();
        let next = match self {
            Mode::Scan(scan) => scan.exec(ppu),
            Mode::Draw(draw) => draw.exec(ppu),
            Mode::HBlank(hblank) => hblank.exec(ppu),
            Mode::VBlank(vblank) => vblank.exec(ppu),
        };

        // Publish the mode in STAT and fire mode-entry interrupts
        ppu.reg.stat = (ppu.reg.stat & !0x03) | next.value();
        if next.value() != prev {
            ppu.enter(next.value(), pic);
        }

        // Advance the dot counter
        ppu.etc.dot = (ppu.etc.dot + 1) % DOTS_PER_LINE;

        next
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::Scan(Scan::default())
    }
}
