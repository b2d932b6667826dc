//! Tile fetchers.

use log::trace;

use super::fifo::Fifo;
use super::meta::{Row, Sprite};
use super::{Lcdc, Ppu};

/// Background/window layer selector.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Layer {
    /// The scrolling 32×32 tile background.
    #[default]
    Background,
    /// The window overlay.
    Window,
}

/// Background/window tile fetcher.
///
/// A five-step machine advancing every other dot. Each pass reads one tile
/// number and its two row bytes, then pushes eight pixels once the FIFO
/// has room.
#[derive(Clone, Debug, Default)]
pub struct Fetcher {
    /// Fetcher step.
    pub step: Step,
    /// Tile x-coordinate counter.
    pub tx: u8,
    /// Layer being fetched.
    pub layer: Layer,
}

/// Fetcher step.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Step {
    /// Fetch the tile number.
    #[default]
    Tile,
    /// Read tile data (low).
    DataLo { tdat: u16 },
    /// Read tile data (high).
    DataHi { tdat: u16, lo: u8 },
    /// Idle.
    Sleep { data: [u8; 2] },
    /// Push a row of pixels to the FIFO.
    Push { data: [u8; 2] },
}

impl Fetcher {
    /// Restarts the fetcher on the given layer.
    pub fn restart(&mut self, layer: Layer) {
        self.step = Step::Tile;
        self.tx = 0;
        self.layer = layer;
    }

    /// Executes a step of the fetcher.
    pub fn exec(&mut self, ppu: &Ppu, fifo: &mut Fifo) {
        self.step = match self.step {
            Step::Tile => {
                // Determine which tile map to use
                let tmap = match self.layer {
                    Layer::Background => ppu.lcdc(Lcdc::BgMap),
                    Layer::Window => ppu.lcdc(Lcdc::WinMap),
                };
                let tmap: u16 = if tmap { 0x1c00 } else { 0x1800 };
                // Calculate the map coordinates
                let (row, col) = match self.layer {
                    Layer::Background => (
                        ppu.reg.ly.wrapping_add(ppu.reg.scy) / 8,
                        (self.tx + ppu.reg.scx / 8) & 0x1f,
                    ),
                    Layer::Window => (ppu.etc.winln / 8, self.tx & 0x1f),
                };
                // Read the tile number from the map
                let addr = tmap + 32 * u16::from(row) + u16::from(col);
                let tnum = ppu.vram_at(addr);
                trace!("read tile index: VRAM[{addr:#06x}] -> #{tnum}");
                // Calculate the tile data address
                let yoff = match self.layer {
                    Layer::Background => ppu.reg.ly.wrapping_add(ppu.reg.scy) & 0x7,
                    Layer::Window => ppu.etc.winln & 0x7,
                };
                let tdat = ppu.tdat(tnum) + 2 * u16::from(yoff);
                Step::DataLo { tdat }
            }
            Step::DataLo { tdat } => {
                let lo = ppu.vram_at(tdat);
                Step::DataHi { tdat, lo }
            }
            Step::DataHi { tdat, lo } => {
                let hi = ppu.vram_at(tdat + 1);
                Step::Sleep { data: [lo, hi] }
            }
            Step::Sleep { data } => Step::Push { data },
            Step::Push { data } => {
                if fifo.wants_row() {
                    let row = Row::from(data);
                    trace!("pushed row of pixels: {row:?}");
                    fifo.push(row);
                    self.tx += 1;
                    Step::Tile
                } else {
                    // Try again next pass
                    Step::Push { data }
                }
            }
        };
    }
}

/// In-flight sprite fetch.
///
/// While a sprite's tile data is being read the background fetcher is
/// suspended and no pixels are shifted out.
#[derive(Clone, Debug)]
pub struct SpriteFetch {
    /// Fetch step.
    step: ObjStep,
    /// Sprite being fetched.
    pub obj: Sprite,
}

/// Sprite fetch step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ObjStep {
    /// Resolve the tile number.
    Tile,
    /// Read tile data (low).
    DataLo { tdat: u16 },
    /// Read tile data (high).
    DataHi { tdat: u16, lo: u8 },
}

impl SpriteFetch {
    /// Constructs a fetch for the given sprite.
    #[must_use]
    pub fn new(obj: Sprite) -> Self {
        Self {
            step: ObjStep::Tile,
            obj,
        }
    }

    /// Executes a step of the fetch.
    ///
    /// Returns the decoded (and, if requested, mirrored) pixel row once
    /// the data reads complete.
    pub fn exec(&mut self, ppu: &Ppu) -> Option<Row> {
        let obj = self.obj;
        match self.step {
            ObjStep::Tile => {
                let tall = ppu.lcdc(Lcdc::ObjSize);
                let height = if tall { 16 } else { 8 };
                // Scanline within the sprite
                let mut line = ppu.reg.ly.wrapping_add(16).wrapping_sub(obj.ypos);
                if obj.yflip {
                    line = height - 1 - line;
                }
                // Tall sprites ignore the tile number's low bit; rows 8..16
                // spill into the next tile.
                let tnum = if tall { obj.tidx & 0xfe } else { obj.tidx };
                let tdat = (u16::from(tnum) << 4) + 2 * u16::from(line);
                self.step = ObjStep::DataLo { tdat };
                None
            }
            ObjStep::DataLo { tdat } => {
                let lo = ppu.vram_at(tdat);
                self.step = ObjStep::DataHi { tdat, lo };
                None
            }
            ObjStep::DataHi { tdat, lo } => {
                let hi = ppu.vram_at(tdat + 1);
                let mut row = Row::from([lo, hi]);
                if obj.xflip {
                    row.xflip();
                }
                trace!("fetched sprite row: {row:?}");
                Some(row)
            }
        }
    }
}
