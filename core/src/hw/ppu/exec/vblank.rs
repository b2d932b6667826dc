use super::scan::Scan;
use super::{Mode, Ppu};

/// Mode 1: Vertical blank.
///
/// Ten full scanlines (LY 144–153) with no pixel transfer.
#[derive(Clone, Debug, Default)]
pub struct VBlank;

impl VBlank {
    /// Total scanlines per frame.
    pub const LAST: u8 = 154;

    pub(super) fn exec(self, ppu: &mut Ppu) -> Mode {
        // Determine next mode
        if ppu.etc.dot + 1 < super::DOTS_PER_LINE {
            Mode::VBlank(self)
        } else {
            // Increment scanline
            let ly = ppu.reg.ly + 1;

            if ly < Self::LAST {
                ppu.reg.ly = ly;
                Mode::VBlank(self)
            } else {
                // Top of frame: restart LY, latch WY, and reset the window
                // line counter.
                ppu.reg.ly = 0;
                ppu.etc.wyl = ppu.reg.wy;
                ppu.etc.winln = 0;
                Mode::Scan(Scan::default())
            }
        }
    }
}
