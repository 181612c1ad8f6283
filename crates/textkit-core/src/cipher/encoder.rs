//! Encrypting decorator over a unit sink.

use std::io;

use super::{CipherKey, UnitWrite, TRANSFER_UNITS};

/// Shifts every unit by `+key` before forwarding it to the wrapped sink.
///
/// Bulk writes are shifted through a fixed scratch buffer; the caller's slice is left
/// untouched and order is preserved.
pub struct CaesarEncoder<W> {
    inner: W,
    key: CipherKey,
    scratch: Vec<u16>,
}

impl<W: UnitWrite> CaesarEncoder<W> {
    pub fn new(inner: W, key: CipherKey) -> Self {
        Self {
            inner,
            key,
            scratch: Vec::with_capacity(TRANSFER_UNITS),
        }
    }
}

impl<W> CaesarEncoder<W> {
    pub fn key(&self) -> CipherKey {
        self.key
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Unwrap the sink. Does not flush.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: UnitWrite> UnitWrite for CaesarEncoder<W> {
    fn write_units(&mut self, units: &[u16]) -> io::Result<()> {
        let key = self.key;
        for chunk in units.chunks(TRANSFER_UNITS) {
            self.scratch.clear();
            self.scratch
                .extend(chunk.iter().map(|&unit| key.encrypt_unit(unit)));
            self.inner.write_units(&self.scratch)?;
        }
        Ok(())
    }

    fn write_unit(&mut self, unit: u16) -> io::Result<()> {
        self.inner.write_unit(self.key.encrypt_unit(unit))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn shifts_ab_by_k() {
        let mut enc = CaesarEncoder::new(Vec::new(), CipherKey::from_char('K'));
        enc.write_units(&units("AB")).unwrap();
        assert_eq!(enc.into_inner(), vec![65 + 75, 66 + 75]);
    }

    #[test]
    fn single_and_bulk_writes_agree() {
        let input = units("Привіт, world!\u{0}\u{7F}\u{FFFF}");
        let key = CipherKey::new(0xBEEF);

        let mut bulk = CaesarEncoder::new(Vec::new(), key);
        bulk.write_units(&input).unwrap();

        let mut single = CaesarEncoder::new(Vec::new(), key);
        for &u in &input {
            single.write_unit(u).unwrap();
        }

        assert_eq!(bulk.into_inner(), single.into_inner());
    }

    #[test]
    fn writes_larger_than_scratch_preserve_order() {
        let input: Vec<u16> = (0..(TRANSFER_UNITS as u32 * 3 + 17))
            .map(|i| i as u16)
            .collect();
        let key = CipherKey::new(3);
        let mut enc = CaesarEncoder::new(Vec::new(), key);
        enc.write_units(&input).unwrap();
        let out = enc.into_inner();
        assert_eq!(out.len(), input.len());
        for (a, b) in input.iter().zip(&out) {
            assert_eq!(key.encrypt_unit(*a), *b);
        }
    }

    #[test]
    fn wraps_borrowed_sink() {
        let mut sink: Vec<u16> = Vec::new();
        {
            let mut enc = CaesarEncoder::new(&mut sink, CipherKey::new(1));
            enc.write_unit(0xFFFF).unwrap();
            enc.flush().unwrap();
        }
        assert_eq!(sink, vec![0]);
    }

    #[test]
    fn zero_key_is_identity() {
        let input = units("same");
        let mut enc = CaesarEncoder::new(Vec::new(), CipherKey::default());
        enc.write_units(&input).unwrap();
        assert_eq!(enc.into_inner(), input);
    }
}
