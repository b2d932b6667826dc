//! Boot ROM.

use log::debug;

use dotmatrix_arch::mem::{Memory, Rom};

/// Boot ROM overlay.
///
/// 256 bytes mapped over `$0000..=$00FF` at power-on. The first write with
/// bit 0 set to the `[$FF50]` control register unmaps it; the disable
/// cannot be undone short of a reset.
#[derive(Debug)]
pub struct Boot {
    /// Boot ROM image.
    rom: Rom<Box<[u8; 0x100]>>,
    /// Unmapped by software.
    off: bool,
}

impl Boot {
    /// Constructs a new `Boot` from an image.
    #[must_use]
    pub fn new(image: Box<[u8; 0x100]>) -> Self {
        Self {
            rom: Rom::from(image),
            off: false,
        }
    }

    /// Checks whether the overlay is still mapped.
    #[must_use]
    pub fn active(&self) -> bool {
        !self.off
    }

    /// Reads a byte of the boot ROM.
    #[must_use]
    pub fn read(&self, addr: u16) -> u8 {
        self.rom.read(addr).unwrap_or(0xff)
    }

    /// Reads the boot disable register.
    #[must_use]
    pub fn load_ctrl(&self) -> u8 {
        0xfe | u8::from(self.off)
    }

    /// Writes the boot disable register.
    pub fn store_ctrl(&mut self, value: u8) {
        let disable = value & 0x01 != 0;
        if self.active() && disable {
            debug!("disabled boot");
        }
        self.off |= disable;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disable_is_permanent() {
        let mut boot = Boot::new(Box::new([0xaa; 0x100]));
        assert!(boot.active());
        assert_eq!(boot.load_ctrl(), 0xfe);
        boot.store_ctrl(0x01);
        assert!(!boot.active());
        assert_eq!(boot.load_ctrl(), 0xff);
        // Cannot be re-enabled
        boot.store_ctrl(0x00);
        assert!(!boot.active());
    }
}
