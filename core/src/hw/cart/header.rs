//! Cartridge header.
//!
//! Encoded in the ROM at `[$0100..$0150]` is the header, describing both
//! the hardware in the cartridge and the software on it.

use std::fmt::Display;

use thiserror::Error;

/// Cartridge header.
///
/// Information about the ROM and the cartridge containing it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Header {
    /// Title of this ROM.
    pub title: Option<String>,
    /// Cartridge hardware code.
    pub kind: u8,
    /// ROM size in bytes.
    pub romsz: usize,
    /// External RAM size in bytes.
    pub ramsz: usize,
    /// 8-bit header checksum.
    pub hchk: u8,
}

impl Header {
    /// Parses and validates a `Header` from a ROM image.
    ///
    /// # Errors
    ///
    /// Returns an error if the header could not be parsed from the ROM, or
    /// if its checksum does not match.
    pub fn new(rom: &[u8]) -> Result<Self> {
        // Extract header bytes
        let head: &[u8; 0x50] = rom
            .get(0x100..0x150)
            .ok_or(Error::Missing)?
            .try_into()
            .map_err(|_| Error::Missing)?;

        // Parse title
        let title = match std::str::from_utf8(&head[0x34..=0x43])
            .unwrap_or_default()
            .trim_matches('\0')
        {
            "" => None,
            ok => Some(ok.to_string()),
        };
        // Parse cartridge kind
        let kind = head[0x47];
        // Parse ROM size
        let romsz = match head[0x48] {
            code @ 0x00..=0x08 => Ok(0x8000 << code),
            code => Err(Error::Rom(code)),
        }?;
        // Parse RAM size
        let ramsz = match head[0x49] {
            0x00 => Ok(0),
            0x01 => Ok(0x800),
            0x02 => Ok(0x2000),
            0x03 => Ok(0x8000),
            0x04 => Ok(0x20000),
            0x05 => Ok(0x10000),
            code => Err(Error::Ram(code)),
        }?;
        // Parse header checksum
        let hchk = head[0x4d];

        // Verify header checksum
        let chk = Self::hchk(rom);
        if chk != hchk {
            return Err(Error::Checksum {
                found: chk,
                expected: hchk,
            });
        }
        // Verify image length
        if rom.len() != romsz {
            return Err(Error::Size {
                found: rom.len(),
                expected: romsz,
            });
        }

        Ok(Self {
            title,
            kind,
            romsz,
            ramsz,
            hchk,
        })
    }

    /// Computes the header checksum of a ROM image.
    ///
    /// The sum over `[$0134..=$014C]` of `-byte - 1`, truncated to 8 bits,
    /// must match the byte stored at `$014D`.
    #[must_use]
    pub fn hchk(rom: &[u8]) -> u8 {
        rom.get(0x134..=0x14c)
            .unwrap_or_default()
            .iter()
            .fold(0u8, |chk, &byte| chk.wrapping_sub(byte).wrapping_sub(1))
    }
}

impl Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{title}: {kind:#04x}, {rom} B ROM, {ram} B RAM",
            title = self.title.as_deref().unwrap_or("Unknown"),
            kind = self.kind,
            rom = self.romsz,
            ram = self.ramsz,
        )
    }
}

/// A convenient type alias for [`Result`](std::result::Result).
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error caused parsing a cartridge [header](Header).
#[derive(Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// Image too short to hold a header.
    #[error("missing header data")]
    Missing,
    /// Header checksum mismatch.
    #[error("bad header checksum: {found:#04x} (expected {expected:#04x})")]
    Checksum { found: u8, expected: u8 },
    /// Image length does not match the declared ROM size.
    #[error("bad image size: {found} B (expected {expected} B)")]
    Size { found: usize, expected: usize },
    /// Unknown ROM size code.
    #[error("unknown ROM size: {0:#04x}")]
    Rom(u8),
    /// Unknown RAM size code.
    #[error("unknown RAM size: {0:#04x}")]
    Ram(u8),
}
