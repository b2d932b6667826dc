//! Memory bus.

use dotmatrix_arch::mem::{Memory, Ram};
use dotmatrix_arch::Block;

use super::boot::Boot;
use crate::hw::cart::Cartridge;
use crate::hw::dma::Dma;
use crate::hw::joypad::Joypad;
use crate::hw::pic::Pic;
use crate::hw::ppu::{Ppu, Select};
use crate::hw::serial::Serial;
use crate::hw::timer::Timer;

/// Work RAM.
///
/// 8 KiB of general-purpose memory, echoed at `$E000..=$FDFF`.
pub type Wram = Ram<Box<[u8; 0x2000]>>;

/// High RAM.
///
/// 127 bytes that stay reachable even while the DMA engine owns the bus.
pub type Hram = Ram<[u8; 0x007f]>;

/// Memory bus.
///
/// Owns every memory-mapped device and decodes the 16-bit address space as
/// a fixed partition:
///
/// |     Address     |  Size  | Name | Description      |
/// |:---------------:|-------:|------|------------------|
/// | `$0000..=$00FF` |  256 B | BOOT | Boot ROM overlay |
/// | `$0000..=$7FFF` | 32 KiB | CART | Cartridge ROM    |
/// | `$8000..=$9FFF` |  8 KiB | VRAM | Video RAM        |
/// | `$A000..=$BFFF` |  8 KiB | CART | External RAM     |
/// | `$C000..=$DFFF` |  8 KiB | WRAM | Work RAM         |
/// | `$E000..=$FDFF` | 7680 B | WRAM | Echo RAM         |
/// | `$FE00..=$FE9F` |  160 B | OAM  | Object memory    |
/// | `$FEA0..=$FEFF` |   96 B | ---  | Prohibited       |
/// | `$FF00..=$FF7F` |  128 B | I/O  | Registers        |
/// | `$FF80..=$FFFE` |  127 B | HRAM | High RAM         |
/// | `$FFFF..=$FFFF` |    1 B | IE   | Interrupt enable |
///
/// The bus also carries the machine's clock fan-out: one bus
/// [`cycle`](Bus::cycle) advances the timer and PPU by four T-cycles and
/// the DMA engine by one M-cycle.
#[derive(Debug)]
pub struct Bus {
    /// Boot ROM overlay.
    pub boot: Option<Boot>,
    /// Game cartridge.
    pub cart: Cartridge,
    /// Work RAM.
    pub wram: Wram,
    /// High RAM.
    pub hram: Hram,
    /// Joypad controller.
    pub joy: Joypad,
    /// Serial port.
    pub sio: Serial,
    /// Hardware timer.
    pub timer: Timer,
    /// Interrupt controller.
    pub pic: Pic,
    /// Picture processing unit.
    pub ppu: Ppu,
    /// Object DMA engine.
    pub dma: Dma,
}

impl Bus {
    /// Constructs a new `Bus` around a cartridge.
    #[must_use]
    pub fn new(cart: Cartridge, boot: Option<Boot>, capture: bool) -> Self {
        Self {
            boot,
            cart,
            wram: Ram::from(Box::new([0; 0x2000])),
            hram: Ram::from([0; 0x007f]),
            joy: Joypad::new(),
            sio: Serial::new(capture),
            timer: Timer::default(),
            pic: Pic::default(),
            ppu: Ppu::default(),
            dma: Dma::default(),
        }
    }

    /// Advances the machine by one M-cycle (4 T-cycles).
    ///
    /// Interleaved into every CPU bus access and internal delay, so that
    /// peripherals observe sub-instruction timing.
    pub fn cycle(&mut self) {
        for _ in 0..4 {
            self.timer.cycle(&mut self.pic);
            self.ppu.cycle(&mut self.pic);
        }
        if let Some(copy) = self.dma.advance() {
            let data = self.peek(copy.src);
            self.ppu.oam_dma(copy.idx, data);
        }
    }

    /// Reads the byte at the specified address, as seen by the CPU.
    ///
    /// While the DMA engine holds the bus, everything outside HRAM reads
    /// as `$FF`.
    #[must_use]
    pub fn read(&self, addr: u16) -> u8 {
        if self.dma.conflicts(addr) {
            return 0xff;
        }
        self.peek(addr)
    }

    /// Reads the byte at the specified address, ignoring bus conflicts.
    #[must_use]
    pub fn peek(&self, addr: u16) -> u8 {
        match addr {
            // Boot ROM overlay
            0x0000..=0x00ff if self.boot.as_ref().is_some_and(Boot::active) => {
                self.boot.as_ref().map_or(0xff, |boot| boot.read(addr))
            }
            // Cartridge ROM
            0x0000..=0x7fff => self.cart.read_rom(addr),
            // Video RAM
            0x8000..=0x9fff => self.ppu.read_vram(addr - 0x8000),
            // External RAM
            0xa000..=0xbfff => self.cart.read_ram(addr - 0xa000),
            // Work RAM
            0xc000..=0xdfff => self.wram.read(addr - 0xc000).unwrap_or(0xff),
            // Echo RAM
            0xe000..=0xfdff => self.wram.read(addr - 0xe000).unwrap_or(0xff),
            // Object memory
            0xfe00..=0xfe9f => self.ppu.read_oam(addr - 0xfe00),
            // Prohibited
            0xfea0..=0xfeff => 0x00,
            // Joypad
            0xff00 => self.joy.load(),
            // Serial
            0xff01 => self.sio.load_sb(),
            0xff02 => self.sio.load_sc(),
            // Timer
            0xff04 => self.timer.load_div(),
            0xff05 => self.timer.load_tima(),
            0xff06 => self.timer.load_tma(),
            0xff07 => self.timer.load_tac(),
            // Interrupt flag
            0xff0f => self.pic.load_flg(),
            // Audio (stubbed)
            0xff10..=0xff3f => 0xff,
            // OAM DMA
            0xff46 => self.dma.load(),
            // LCD
            0xff40..=0xff4b => Select::decode(addr).map_or(0xff, |reg| self.ppu.load(reg)),
            // Boot disable
            0xff50 => self.boot.as_ref().map_or(0xff, Boot::load_ctrl),
            // High RAM
            0xff80..=0xfffe => self.hram.read(addr - 0xff80).unwrap_or(0xff),
            // Interrupt enable
            0xffff => self.pic.load_ena(),
            // Unmapped I/O
            _ => 0xff,
        }
    }

    /// Writes the byte at the specified address.
    pub fn write(&mut self, addr: u16, data: u8) {
        match addr {
            // Cartridge ROM (mapper control)
            0x0000..=0x7fff => self.cart.write_rom(addr, data),
            // Video RAM
            0x8000..=0x9fff => self.ppu.write_vram(addr - 0x8000, data),
            // External RAM
            0xa000..=0xbfff => self.cart.write_ram(addr - 0xa000, data),
            // Work RAM
            0xc000..=0xdfff => {
                let _ = self.wram.write(addr - 0xc000, data);
            }
            // Echo RAM
            0xe000..=0xfdff => {
                let _ = self.wram.write(addr - 0xe000, data);
            }
            // Object memory
            0xfe00..=0xfe9f => self.ppu.write_oam(addr - 0xfe00, data),
            // Prohibited
            0xfea0..=0xfeff => {}
            // Joypad
            0xff00 => self.joy.store(data, &mut self.pic),
            // Serial
            0xff01 => self.sio.store_sb(data),
            0xff02 => self.sio.store_sc(data, &mut self.pic),
            // Timer
            0xff04 => self.timer.store_div(data),
            0xff05 => self.timer.store_tima(data),
            0xff06 => self.timer.store_tma(data),
            0xff07 => self.timer.store_tac(data),
            // Interrupt flag
            0xff0f => self.pic.store_flg(data),
            // Audio (stubbed)
            0xff10..=0xff3f => {}
            // OAM DMA
            0xff46 => self.dma.store(data),
            // LCD
            0xff40..=0xff4b => {
                if let Some(reg) = Select::decode(addr) {
                    self.ppu.store(reg, data);
                }
            }
            // Boot disable
            0xff50 => {
                if let Some(boot) = self.boot.as_mut() {
                    boot.store_ctrl(data);
                }
            }
            // High RAM
            0xff80..=0xfffe => {
                let _ = self.hram.write(addr - 0xff80, data);
            }
            // Interrupt enable
            0xffff => self.pic.store_ena(data),
            // Unmapped I/O
            _ => {}
        }
    }
}

impl Block for Bus {
    fn reset(&mut self) {
        self.wram = Ram::from(Box::new([0; 0x2000]));
        self.hram = Ram::from([0; 0x007f]);
        self.joy.reset();
        self.sio.reset();
        self.timer.reset();
        self.pic.reset();
        self.ppu.reset();
        self.dma.reset();
    }
}
