//! System integration.
//!
//! The [`GameBoy`] wires the processor to the [`Bus`] and drives the whole
//! machine: one [`tick`](GameBoy::tick) executes a single CPU step, with
//! every bus access the instruction performs advancing the timer, PPU, and
//! DMA engine in lockstep.

use log::debug;

use dotmatrix_arch::reg::Register;
use dotmatrix_arch::Block;

use crate::hw::cpu::Cpu;
use crate::hw::cart::Cartridge;
use crate::hw::joypad::Buttons;
use crate::hw::ppu::{Frame, Select};
use crate::{Error, Result};

pub mod boot;
pub mod bus;

pub use self::boot::Boot;
pub use self::bus::Bus;

/// Emulator configuration.
#[derive(Debug)]
pub struct Config {
    /// Boot ROM image.
    ///
    /// When absent, the boot sequence is skipped and the machine starts in
    /// the post-boot state.
    pub boot: Option<Box<[u8; 0x100]>>,
    /// Mirror serial transfers into an internal log.
    pub serial_capture: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            boot: None,
            serial_capture: true,
        }
    }
}

/// DMG-01 Game Boy.
#[derive(Debug)]
pub struct GameBoy {
    /// Central processing unit.
    pub cpu: Cpu,
    /// Memory bus and peripherals.
    pub bus: Bus,
    /// T-cycles executed since power-on.
    clk: u128,
}

impl GameBoy {
    /// Constructs a new `GameBoy` with a default configuration.
    ///
    /// The machine starts in the post-boot state, ready to execute the
    /// cartridge from `$0100`.
    ///
    /// # Errors
    ///
    /// Errors if the ROM image fails validation, or if it requires an
    /// unimplemented mapper.
    pub fn new(rom: &[u8]) -> Result<Self> {
        Self::with(Config::default(), rom)
    }

    /// Constructs a new `GameBoy` with the provided configuration.
    ///
    /// # Errors
    ///
    /// Errors if the ROM image fails validation, or if it requires an
    /// unimplemented mapper.
    pub fn with(cfg: Config, rom: &[u8]) -> Result<Self> {
        let cart = Cartridge::new(rom).map_err(Error::from)?;
        let boot = cfg.boot.map(Boot::new);
        let skip = boot.is_none();
        let mut this = Self {
            cpu: Cpu::default(),
            bus: Bus::new(cart, boot, cfg.serial_capture),
            clk: 0,
        };
        if skip {
            this.boot();
        }
        Ok(this)
    }

    /// Establishes the post-boot state.
    ///
    /// Architecturally defined register values as left behind by the DMG
    /// boot ROM.
    fn boot(&mut self) {
        debug!("skipping boot sequence");
        // Processor registers
        let reg = &mut self.cpu.reg;
        reg.set_af(0x01b0);
        reg.set_bc(0x0013);
        reg.set_de(0x00d8);
        reg.set_hl(0x014d);
        reg.sp.store(0xfffe);
        reg.pc.store(0x0100);
        // Interrupts
        self.bus.pic.store_flg(0xe1);
        self.bus.pic.store_ena(0x00);
        // Timer
        self.bus.timer.div = 0xabcc;
        // Video
        self.bus.ppu.store(Select::Lcdc, 0x91);
        self.bus.ppu.store(Select::Bgp, 0xfc);
    }

    /// Runs a single tick: one CPU step, with all other devices advanced
    /// by the step's consumed T-cycles.
    ///
    /// Returns the number of T-cycles consumed.
    ///
    /// # Errors
    ///
    /// Errors if the processor fetches an opcode outside the DMG
    /// instruction set.
    pub fn tick(&mut self) -> Result<u8> {
        let cycles = self.cpu.step(&mut self.bus).map_err(Error::from)?;
        self.clk += u128::from(cycles);
        Ok(cycles)
    }

    /// Runs the machine until the next full video frame.
    ///
    /// Latches `input` as the held button state, then ticks until the PPU
    /// finishes a frame.
    ///
    /// # Errors
    ///
    /// Errors if the processor fetches an opcode outside the DMG
    /// instruction set.
    pub fn step_frame(&mut self, input: Buttons) -> Result<&Frame> {
        self.bus.joy.input(input, &mut self.bus.pic);
        let frame = self.bus.ppu.frame();
        while self.bus.ppu.frame() == frame {
            self.tick()?;
        }
        Ok(self.bus.ppu.screen())
    }

    /// Pops the next byte transferred over the serial port, if any.
    ///
    /// Test ROMs print by writing a byte to SB and `$81` to SC.
    pub fn serial_out(&mut self) -> Option<u8> {
        self.bus.sio.take()
    }

    /// Gets the number of T-cycles executed since power-on.
    #[must_use]
    pub fn clock(&self) -> u128 {
        self.clk
    }
}

impl Block for GameBoy {
    fn reset(&mut self) {
        self.cpu.reset();
        self.bus.reset();
        self.clk = 0;
        if self.bus.boot.is_none() {
            self.boot();
        }
    }
}
