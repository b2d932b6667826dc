use super::scan::Scan;
use super::vblank::VBlank;
use super::{Mode, Ppu};
use crate::hw::ppu::LCD_HEIGHT;

/// Mode 0: Horizontal blank.
///
/// Pads the scanline out to its full 456 dots.
#[derive(Clone, Debug, Default)]
pub struct HBlank;

impl HBlank {
    pub(super) fn exec(self, ppu: &mut Ppu) -> Mode {
        // Determine next mode
        if ppu.etc.dot + 1 < super::DOTS_PER_LINE {
            Mode::HBlank(self)
        } else {
            // Increment scanline
            let ly = ppu.reg.ly + 1;
            ppu.reg.ly = ly;

            if usize::from(ly) < LCD_HEIGHT {
                // Begin the next scanline
                Mode::Scan(Scan::default())
            } else {
                // The visible frame is complete
                Mode::VBlank(VBlank)
            }
        }
    }
}
