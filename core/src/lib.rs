//! # Game Boy Core
//!
//! This library implements the core behaviour of the hardware components of
//! the Nintendo Game Boy (DMG-01): the Sharp SM83 processor, the picture
//! processing unit and its pixel FIFO, the memory bus, and the timer, DMA,
//! and interrupt plumbing between them.
//!
//! Emulation is driven through [`GameBoy::step_frame`], which advances the
//! machine one video frame at a time, or through [`GameBoy::tick`] for
//! hosts that single-step instructions.

#![warn(clippy::pedantic)]

use thiserror::Error;

pub mod hw;
pub mod sys;

pub use self::hw::joypad::{Button, Buttons};
pub use self::hw::ppu::{Frame, DOTS_PER_FRAME, LCD_HEIGHT, LCD_WIDTH};
pub use self::sys::{Config, GameBoy};

/// A convenient type alias for [`Result`](std::result::Result).
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error caused by the emulator core.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad cartridge image.
    ///
    /// The supplied ROM could not be validated; recoverable by the caller.
    #[error("bad cartridge")]
    Cart(#[source] hw::cart::Error),
    /// Unsupported hardware feature.
    #[error("unsupported feature")]
    Unsupported(#[from] Feature),
}

/// An unsupported hardware feature.
#[derive(Debug, Error)]
pub enum Feature {
    /// Cartridge requires an unimplemented memory bank controller.
    #[error("unimplemented mapper: {0:#04x}")]
    Mapper(u8),
    /// Opcode not part of the DMG instruction set.
    #[error("illegal opcode: {0:#04x}")]
    Opcode(u8),
}

impl From<hw::cart::Error> for Error {
    fn from(err: hw::cart::Error) -> Self {
        match err {
            hw::cart::Error::Mapper(kind) => Self::Unsupported(Feature::Mapper(kind)),
            err => Self::Cart(err),
        }
    }
}

impl From<hw::cpu::insn::Error> for Error {
    fn from(err: hw::cpu::insn::Error) -> Self {
        match err {
            hw::cpu::insn::Error::Illegal(code) => Self::Unsupported(Feature::Opcode(code)),
        }
    }
}
