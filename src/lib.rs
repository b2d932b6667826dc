//! # dotmatrix
//!
//! A cycle-accurate emulator for the Nintendo Game Boy (DMG-01).
//!
//! This crate is a thin façade over [`dotmatrix_core`], which models the
//! console's hardware: the Sharp SM83 processor, the picture processing
//! unit with its pixel FIFO, the memory bus, and the timer, DMA, and
//! interrupt plumbing that ties them together.
//!
//! ## Usage
//!
//! ```no_run
//! use dotmatrix::{Buttons, GameBoy};
//!
//! # fn run(rom: &[u8]) -> Result<(), dotmatrix::Error> {
//! let mut emu = GameBoy::new(rom)?;
//! loop {
//!     let frame = emu.step_frame(Buttons::default())?;
//!     // hand `frame` (160×144 ARGB pixels) to the display...
//! #   let _ = frame;
//! }
//! # }
//! ```

#![warn(clippy::pedantic)]

pub use dotmatrix_core::{
    hw, sys, Button, Buttons, Config, Error, Feature, Frame, GameBoy, Result, DOTS_PER_FRAME,
    LCD_HEIGHT, LCD_WIDTH,
};
