//! Player input device.

use std::fmt::Debug;
use std::ops::{BitOr, BitOrAssign};

use log::{debug, trace};

use dotmatrix_arch::Block;

use super::pic::{Interrupt, Pic};

/// Joypad button.
///
/// The eight buttons form a 2×4 matrix: one nibble of directions and one of
/// actions, selected through bits 4 and 5 of the controller register.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Button {
    Right  = 0b0000_0001,
    Left   = 0b0000_0010,
    Up     = 0b0000_0100,
    Down   = 0b0000_1000,
    A      = 0b0001_0000,
    B      = 0b0010_0000,
    Select = 0b0100_0000,
    Start  = 0b1000_0000,
}

/// Pressed button set.
///
/// One bit per [`Button`]; a set bit means the button is held.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Buttons(u8);

impl Buttons {
    /// Constructs an empty (nothing pressed) button set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks whether a button is held.
    #[must_use]
    pub fn contains(self, btn: Button) -> bool {
        self.0 & btn as u8 != 0
    }

    /// Marks a button as held.
    pub fn press(&mut self, btn: Button) {
        self.0 |= btn as u8;
    }

    /// The direction nibble (Down, Up, Left, Right), active-high.
    fn dpad(self) -> u8 {
        self.0 & 0x0f
    }

    /// The action nibble (Start, Select, B, A), active-high.
    fn keys(self) -> u8 {
        self.0 >> 4
    }
}

impl BitOr<Button> for Buttons {
    type Output = Self;

    fn bitor(self, btn: Button) -> Self {
        Self(self.0 | btn as u8)
    }
}

impl BitOrAssign<Button> for Buttons {
    fn bitor_assign(&mut self, btn: Button) {
        self.0 |= btn as u8;
    }
}

impl From<Button> for Buttons {
    fn from(btn: Button) -> Self {
        Self(btn as u8)
    }
}

impl FromIterator<Button> for Buttons {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), BitOr::bitor)
    }
}

/// Joypad controller.
///
/// Models the `[$FF00]` register. Bits 5 and 4 select (active-low) the
/// action and direction groups; bits 3–0 report the selected buttons, with
/// zero meaning pressed.
#[derive(Debug, Default)]
pub struct Joypad {
    /// Group select bits (5–4), as written.
    sel: u8,
    /// Held buttons.
    keys: Buttons,
}

impl Joypad {
    /// Constructs a new `Joypad`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latches the host's button state.
    ///
    /// Requests a joypad interrupt when any visible button line falls from
    /// high to low.
    pub fn input(&mut self, keys: Buttons, pic: &mut Pic) {
        let old = self.load();
        if self.keys != keys {
            debug!("updated keys: {keys:?}");
        }
        self.keys = keys;
        let new = self.load();
        if old & !new & 0x0f != 0 {
            pic.raise(Interrupt::Joypad);
        }
    }

    /// Reads the controller register.
    #[must_use]
    pub fn load(&self) -> u8 {
        let mut line = 0x0f;
        if self.sel & 0b01_0000 == 0 {
            line &= !self.keys.dpad();
        }
        if self.sel & 0b10_0000 == 0 {
            line &= !self.keys.keys();
        }
        0xc0 | self.sel | line
    }

    /// Writes the controller register.
    ///
    /// Only the group select bits are writable.
    pub fn store(&mut self, value: u8, pic: &mut Pic) {
        let old = self.load();
        self.sel = value & 0b0011_0000;
        let new = self.load();
        trace!("joypad select: {:#04x}", self.sel);
        if old & !new & 0x0f != 0 {
            pic.raise(Interrupt::Joypad);
        }
    }
}

impl Block for Joypad {
    fn reset(&mut self) {
        std::mem::take(self);
    }
}
