use dotmatrix_arch::mem::{Memory, Ram, Rom};

use super::Mbc;

/// Bare (unbanked) cartridge.
///
/// Up to 32 KiB of ROM mapped directly, with optional unbanked RAM.
#[derive(Debug)]
pub struct Bare {
    /// Cartridge ROM.
    rom: Rom<Box<[u8]>>,
    /// External RAM.
    ram: Option<Ram<Box<[u8]>>>,
}

impl Bare {
    /// Constructs a new `Bare` chip.
    #[must_use]
    pub fn new(rom: Box<[u8]>, ramsz: usize) -> Self {
        Self {
            rom: Rom::from(rom),
            ram: (ramsz > 0).then(|| Ram::from(vec![0; ramsz].into_boxed_slice())),
        }
    }
}

impl Mbc for Bare {
    fn read_rom(&self, addr: u16) -> u8 {
        // Open bus beyond the image reads as all ones.
        self.rom.read(addr).unwrap_or(0xff)
    }

    fn write_rom(&mut self, _: u16, _: u8) {
        // No mapper control; stores are absorbed.
    }

    fn read_ram(&self, addr: u16) -> u8 {
        self.ram
            .as_ref()
            .and_then(|ram| ram.read(addr).ok())
            .unwrap_or(0xff)
    }

    fn write_ram(&mut self, addr: u16, data: u8) {
        if let Some(ram) = self.ram.as_mut() {
            let _ = ram.write(addr, data);
        }
    }
}
