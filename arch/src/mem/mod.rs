//! Memory models.
//!
//! The [`Ram`] and [`Rom`] models work the same way, except that `Rom`
//! reports an [error](Error::Misuse) on writes.

use std::fmt::Debug;

use thiserror::Error;

mod ram;
mod rom;

pub use self::ram::Ram;
pub use self::rom::Rom;

/// Byte-addressable memory-mapped interface.
pub trait Memory: Debug {
    /// Reads the byte at the specified address.
    ///
    /// # Errors
    ///
    /// Errors if the device could not successfully be read from.
    fn read(&self, addr: u16) -> Result<u8>;

    /// Writes a byte to the specified address.
    ///
    /// # Errors
    ///
    /// Errors if the device could not successfully be written to.
    fn write(&mut self, addr: u16, data: u8) -> Result<()>;
}

impl Memory for [u8] {
    fn read(&self, addr: u16) -> Result<u8> {
        self.get(usize::from(addr)).copied().ok_or(Error::Range)
    }

    fn write(&mut self, addr: u16, data: u8) -> Result<()> {
        self.get_mut(usize::from(addr))
            .map(|byte| *byte = data)
            .ok_or(Error::Range)
    }
}

impl<const N: usize> Memory for [u8; N] {
    fn read(&self, addr: u16) -> Result<u8> {
        self.as_ref().read(addr)
    }

    fn write(&mut self, addr: u16, data: u8) -> Result<()> {
        self.as_mut().write(addr, data)
    }
}

impl Memory for Box<[u8]> {
    fn read(&self, addr: u16) -> Result<u8> {
        self.as_ref().read(addr)
    }

    fn write(&mut self, addr: u16, data: u8) -> Result<()> {
        self.as_mut().write(addr, data)
    }
}

impl<const N: usize> Memory for Box<[u8; N]> {
    fn read(&self, addr: u16) -> Result<u8> {
        self.as_ref().read(addr)
    }

    fn write(&mut self, addr: u16, data: u8) -> Result<()> {
        self.as_mut().write(addr, data)
    }
}

impl Memory for Vec<u8> {
    fn read(&self, addr: u16) -> Result<u8> {
        self.as_slice().read(addr)
    }

    fn write(&mut self, addr: u16, data: u8) -> Result<()> {
        self.as_mut_slice().write(addr, data)
    }
}

/// A convenient type alias for [`Result`](std::result::Result).
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error caused by a [memory](Memory) operation.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// Unsupported operation.
    #[error("unsupported operation")]
    Misuse,
    /// Address out of range.
    #[error("address out of range")]
    Range,
}
