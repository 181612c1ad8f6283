//! Streaming Caesar cipher over UTF-16 code units.
//!
//! The cipher is a pair of decorators: [`CaesarEncoder`] wraps anything that accepts code
//! units ([`UnitWrite`]) and [`CaesarDecoder`] wraps anything that produces them
//! ([`UnitRead`]). Each unit is shifted by the key modulo 65536 as it passes through, so
//! inputs of any size are transformed with a fixed-size transfer buffer.
//!
//! [`Utf16Reader`] and [`Utf16Writer`] bridge byte streams to code units; the file helpers
//! in [`file`] compose them with the decorators.

mod decoder;
mod encoder;
pub mod file;
mod units;
mod wtf8;

pub use decoder::CaesarDecoder;
pub use encoder::CaesarEncoder;
pub use file::{decrypt_file, decrypt_stream, encrypt_file, encrypt_stream, read_text_lossy};
pub use units::{copy_units, UnitRead, UnitWrite};
pub use wtf8::{Utf16Reader, Utf16Writer};

/// Units moved per chunk by [`copy_units`] and the encoder's scratch buffer.
pub const TRANSFER_UNITS: usize = 1024;

/// Additive shift applied to every code unit.
///
/// Any value is accepted, including zero (identity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CipherKey(u16);

impl CipherKey {
    pub const fn new(shift: u16) -> Self {
        Self(shift)
    }

    /// Key from a character: its code point modulo 65536.
    pub const fn from_char(c: char) -> Self {
        Self((c as u32 & 0xFFFF) as u16)
    }

    pub const fn shift(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn encrypt_unit(self, unit: u16) -> u16 {
        unit.wrapping_add(self.0)
    }

    #[inline]
    pub const fn decrypt_unit(self, unit: u16) -> u16 {
        unit.wrapping_sub(self.0)
    }
}

impl From<char> for CipherKey {
    fn from(c: char) -> Self {
        Self::from_char(c)
    }
}

impl From<u16> for CipherKey {
    fn from(shift: u16) -> Self {
        Self::new(shift)
    }
}
