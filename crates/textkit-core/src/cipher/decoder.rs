//! Decrypting decorator over a unit source.

use std::io;

use super::{CipherKey, UnitRead};

/// Shifts every unit read from the wrapped source by `-key`.
pub struct CaesarDecoder<R> {
    inner: R,
    key: CipherKey,
}

impl<R: UnitRead> CaesarDecoder<R> {
    pub fn new(inner: R, key: CipherKey) -> Self {
        Self { inner, key }
    }
}

impl<R> CaesarDecoder<R> {
    pub fn key(&self) -> CipherKey {
        self.key
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: UnitRead> UnitRead for CaesarDecoder<R> {
    fn read_units(&mut self, buf: &mut [u16]) -> io::Result<usize> {
        let n = self.inner.read_units(buf)?;
        for unit in &mut buf[..n] {
            *unit = self.key.decrypt_unit(*unit);
        }
        Ok(n)
    }

    fn read_unit(&mut self) -> io::Result<Option<u16>> {
        let key = self.key;
        Ok(self.inner.read_unit()?.map(|unit| key.decrypt_unit(unit)))
    }
}
