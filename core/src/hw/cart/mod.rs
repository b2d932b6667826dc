//! Game cartridge.

use log::debug;
use thiserror::Error;

use self::header::Header;
use self::mbc::{Bare, Mbc, Mbc1, Mbc5};

pub mod header;
pub mod mbc;

/// Game cartridge.
///
/// Holds the ROM image (and any external RAM) behind the mapper chip
/// declared in the [header](Header). Serves the bus windows at
/// `$0000..=$7FFF` and `$A000..=$BFFF`.
#[derive(Debug)]
pub struct Cartridge {
    /// Parsed cartridge header.
    head: Header,
    /// Mapper chip.
    chip: Box<dyn Mbc>,
}

impl Cartridge {
    /// Constructs a new `Cartridge` from a ROM image.
    ///
    /// # Errors
    ///
    /// Returns an error if the header fails validation, or if the declared
    /// mapper is not implemented.
    pub fn new(rom: &[u8]) -> Result<Self> {
        let head = Header::new(rom)?;
        debug!("loaded cartridge: {head}");
        let chip: Box<dyn Mbc> = match head.kind {
            // ROM only, optionally with unbanked RAM
            0x00 | 0x08 | 0x09 => Box::new(Bare::new(rom.into(), head.ramsz)),
            // MBC1 family
            0x01..=0x03 => Box::new(Mbc1::new(rom.into(), head.ramsz)),
            // MBC5 family
            0x19..=0x1e => Box::new(Mbc5::new(rom.into(), head.ramsz)),
            kind => return Err(Error::Mapper(kind)),
        };
        Ok(Self { head, chip })
    }

    /// Gets the cartridge's header.
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.head
    }

    /// Reads from the ROM window (`$0000..=$7FFF`).
    #[must_use]
    pub fn read_rom(&self, addr: u16) -> u8 {
        self.chip.read_rom(addr)
    }

    /// Writes to the ROM window.
    pub fn write_rom(&mut self, addr: u16, data: u8) {
        self.chip.write_rom(addr, data);
    }

    /// Reads from the external RAM window (`$A000..=$BFFF`).
    #[must_use]
    pub fn read_ram(&self, addr: u16) -> u8 {
        self.chip.read_ram(addr)
    }

    /// Writes to the external RAM window.
    pub fn write_ram(&mut self, addr: u16, data: u8) {
        self.chip.write_ram(addr, data);
    }
}

/// A convenient type alias for [`Result`](std::result::Result).
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error caused constructing a [cartridge](Cartridge).
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid header.
    #[error(transparent)]
    Header(#[from] header::Error),
    /// Unimplemented mapper chip.
    #[error("unimplemented mapper: {0:#04x}")]
    Mapper(u8),
}
