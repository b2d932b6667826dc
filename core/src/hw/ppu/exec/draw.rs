use std::collections::VecDeque;

use super::hblank::HBlank;
use super::{Mode, Ppu};
use crate::hw::ppu::fetch::{Fetcher, Layer, SpriteFetch};
use crate::hw::ppu::fifo::{Fifo, Overlay};
use crate::hw::ppu::meta::{Color, Pixel, Sprite};
use crate::hw::ppu::{Lcdc, LCD_WIDTH};

/// Mode 3: Draw pixels.
///
/// Runs the background/window fetcher against the pixel FIFO, weaving in
/// sprite fetches, until all 160 pixels of the scanline have been shifted
/// out to the framebuffer.
#[derive(Clone, Debug)]
pub struct Draw {
    /// Background/window fetcher.
    fetch: Fetcher,
    /// Background/window FIFO.
    fifo: Fifo,
    /// Sprite line buffer.
    overlay: Overlay,
    /// Sprites awaiting their fetch, in x order.
    objs: VecDeque<Sprite>,
    /// In-flight sprite fetch.
    sprite: Option<SpriteFetch>,
    /// LCD x-coordinate; pixels pushed so far.
    lx: u8,
    /// Fine-scroll pixels left to discard.
    discard: u8,
    /// Window pixels were drawn this scanline.
    window: bool,
}

impl Draw {
    /// Prepares the pipeline for a scanline.
    pub(super) fn new(objs: Vec<Sprite>, ppu: &Ppu) -> Self {
        Self {
            fetch: Fetcher::default(),
            fifo: Fifo::default(),
            overlay: Overlay::default(),
            objs: objs.into(),
            sprite: None,
            lx: 0,
            discard: ppu.reg.scx % 8,
            window: false,
        }
    }

    pub(super) fn exec(mut self, ppu: &mut Ppu) -> Mode {
        // Restart the fetcher at the window's left border
        let reached = self.fetch.layer == Layer::Background
            && ppu.lcdc(Lcdc::WinEnable)
            && ppu.win_active()
            && ppu.reg.wx <= self.lx + 7;
        if reached {
            self.fetch.restart(Layer::Window);
            self.fifo.clear();
            self.window = true;
        }

        // Begin fetching any sprite that reaches the current pixel
        if self.sprite.is_none() && ppu.lcdc(Lcdc::ObjEnable) {
            if let Some(obj) = self.objs.front() {
                if obj.xpos <= self.lx + 8 {
                    self.sprite = self.objs.pop_front().map(SpriteFetch::new);
                }
            }
        }

        // Fetchers advance every other dot
        if ppu.etc.dot % 2 == 0 {
            if let Some(fetch) = self.sprite.as_mut() {
                // The background fetcher stalls while a sprite is fetched
                if let Some(row) = fetch.exec(ppu) {
                    let obj = fetch.obj;
                    let skip = (self.lx + 8) - obj.xpos;
                    self.overlay.merge(row, &obj, skip);
                    self.sprite = None;
                }
            } else {
                self.fetch.exec(ppu, &mut self.fifo);
            }
        }

        // Shift one pixel out to the LCD
        if self.sprite.is_none() {
            if let Some(mut bgwin) = self.fifo.pop() {
                if self.discard > 0 {
                    // Fine scroll: the first SCX % 8 pixels never reach
                    // the screen.
                    self.discard -= 1;
                } else {
                    if !ppu.lcdc(Lcdc::BgWinEnable) {
                        bgwin.col = Color::C0;
                    }
                    let pixel = match self.overlay.pop() {
                        Some(obj) if ppu.lcdc(Lcdc::ObjEnable) => Pixel::blend(bgwin, obj),
                        _ => bgwin,
                    };
                    ppu.plot(self.lx, pixel);
                    self.lx += 1;
                }
            }
        }

        // Mode 3 ends once the scanline's 160th pixel is pushed
        if usize::from(self.lx) < LCD_WIDTH {
            Mode::Draw(self)
        } else {
            if self.window {
                ppu.etc.winln += 1;
            }
            Mode::HBlank(HBlank)
        }
    }
}
