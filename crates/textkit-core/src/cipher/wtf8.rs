//! Byte stream <-> UTF-16 code unit adapters.
//!
//! Bytes are UTF-8 generalized to lone surrogates (WTF-8): a surrogate pair is one
//! 4-byte sequence, an unpaired surrogate is its own 3-byte sequence. Well-formed UTF-8
//! text is a subset, so plain text files pass through byte for byte, while cipher output
//! (which can contain any 16-bit value) is still stored losslessly.

use std::io::{self, Read, Write};

use super::{UnitRead, UnitWrite, TRANSFER_UNITS};

const BYTE_BUF: usize = 8 * 1024;

fn is_lead(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

fn is_trail(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// Append the generalized UTF-8 encoding of `cp` (any value up to 0x10FFFF).
fn push_code_point(out: &mut Vec<u8>, cp: u32) {
    if cp < 0x80 {
        out.push(cp as u8);
    } else if cp < 0x800 {
        out.push(0xC0 | (cp >> 6) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    } else if cp < 0x1_0000 {
        out.push(0xE0 | (cp >> 12) as u8);
        out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    } else {
        out.push(0xF0 | (cp >> 18) as u8);
        out.push(0x80 | ((cp >> 12) & 0x3F) as u8);
        out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    }
}

/// Decodes a byte stream into UTF-16 code units.
pub struct Utf16Reader<R> {
    inner: R,
    buf: Box<[u8]>,
    start: usize,
    end: usize,
    /// Trail half of a supplementary character that did not fit the caller's buffer.
    pending_trail: Option<u16>,
}

impl<R: Read> Utf16Reader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: vec![0u8; BYTE_BUF].into_boxed_slice(),
            start: 0,
            end: 0,
            pending_trail: None,
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Ensure at least `want` bytes are buffered. Returns false at end of stream.
    fn fill(&mut self, want: usize) -> io::Result<bool> {
        while self.end - self.start < want {
            if self.start > 0 {
                self.buf.copy_within(self.start..self.end, 0);
                self.end -= self.start;
                self.start = 0;
            }
            match self.inner.read(&mut self.buf[self.end..]) {
                Ok(0) => return Ok(false),
                Ok(n) => self.end += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(true)
    }

    fn next_code_point(&mut self) -> io::Result<Option<u32>> {
        if !self.fill(1)? {
            return Ok(None);
        }
        let b0 = self.buf[self.start];
        let len = match b0 {
            0x00..=0x7F => {
                self.start += 1;
                return Ok(Some(b0 as u32));
            }
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Err(invalid(format!("invalid UTF-8 lead byte 0x{:02x}", b0))),
        };
        if !self.fill(len)? {
            return Err(invalid("truncated UTF-8 sequence at end of stream".to_string()));
        }
        let (mut cp, min) = match len {
            2 => ((b0 & 0x1F) as u32, 0x80),
            3 => ((b0 & 0x0F) as u32, 0x800),
            _ => ((b0 & 0x07) as u32, 0x1_0000),
        };
        for &b in &self.buf[self.start + 1..self.start + len] {
            if b & 0xC0 != 0x80 {
                return Err(invalid(format!("invalid UTF-8 continuation byte 0x{:02x}", b)));
            }
            cp = (cp << 6) | (b & 0x3F) as u32;
        }
        // Surrogates are accepted; they encode lone units.
        if cp < min || cp > 0x10_FFFF {
            return Err(invalid(format!("overlong or out-of-range sequence U+{:X}", cp)));
        }
        self.start += len;
        Ok(Some(cp))
    }
}

impl<R: Read> UnitRead for Utf16Reader<R> {
    fn read_units(&mut self, out: &mut [u16]) -> io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        let mut n = 0;
        if let Some(trail) = self.pending_trail.take() {
            out[0] = trail;
            n = 1;
        }
        while n < out.len() {
            let Some(cp) = self.next_code_point()? else {
                break;
            };
            if cp < 0x1_0000 {
                out[n] = cp as u16;
                n += 1;
            } else {
                let v = cp - 0x1_0000;
                let lead = 0xD800 | (v >> 10) as u16;
                let trail = 0xDC00 | (v & 0x3FF) as u16;
                out[n] = lead;
                n += 1;
                if n < out.len() {
                    out[n] = trail;
                    n += 1;
                } else {
                    self.pending_trail = Some(trail);
                }
            }
            // Hand back what we have instead of blocking on the next read.
            if self.start == self.end {
                break;
            }
        }
        Ok(n)
    }
}

/// Encodes UTF-16 code units into a byte stream.
///
/// A lead surrogate is held back until the next unit shows whether it starts a pair.
/// [`UnitWrite::flush`] writes out any held unit, so call it (or [`Utf16Writer::finish`])
/// once all units have been written.
pub struct Utf16Writer<W> {
    inner: W,
    pending_lead: Option<u16>,
    bytes: Vec<u8>,
}

impl<W: Write> Utf16Writer<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            pending_lead: None,
            bytes: Vec::with_capacity(TRANSFER_UNITS * 3),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Flush everything, including a held lead surrogate, and return the byte sink.
    pub fn finish(mut self) -> io::Result<W> {
        UnitWrite::flush(&mut self)?;
        Ok(self.inner)
    }

    fn encode_chunk(&mut self, units: &[u16]) {
        self.bytes.clear();
        for &unit in units {
            if let Some(lead) = self.pending_lead.take() {
                if is_trail(unit) {
                    let cp = 0x1_0000 + (((lead as u32) - 0xD800) << 10) + ((unit as u32) - 0xDC00);
                    push_code_point(&mut self.bytes, cp);
                    continue;
                }
                push_code_point(&mut self.bytes, lead as u32);
            }
            if is_lead(unit) {
                self.pending_lead = Some(unit);
            } else {
                push_code_point(&mut self.bytes, unit as u32);
            }
        }
    }
}

impl<W: Write> UnitWrite for Utf16Writer<W> {
    fn write_units(&mut self, units: &[u16]) -> io::Result<()> {
        for chunk in units.chunks(TRANSFER_UNITS) {
            self.encode_chunk(chunk);
            self.inner.write_all(&self.bytes)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(lead) = self.pending_lead.take() {
            self.bytes.clear();
            push_code_point(&mut self.bytes, lead as u32);
            self.inner.write_all(&self.bytes)?;
        }
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::copy_units;
    use std::io::Cursor;

    fn decode(bytes: &[u8]) -> io::Result<Vec<u16>> {
        let mut reader = Utf16Reader::new(Cursor::new(bytes.to_vec()));
        let mut out = Vec::new();
        copy_units(&mut reader, &mut out)?;
        Ok(out)
    }

    fn encode(units: &[u16]) -> Vec<u8> {
        let mut writer = Utf16Writer::new(Vec::new());
        writer.write_units(units).unwrap();
        writer.finish().unwrap()
    }

    /// Delivers one byte per read call.
    struct OneByte(Cursor<Vec<u8>>);

    impl Read for OneByte {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = buf.len().min(1);
            self.0.read(&mut buf[..n])
        }
    }

    #[test]
    fn utf8_text_matches_encode_utf16() {
        let text = "Перший рядок\nemoji \u{1F600}\u{0}";
        let units = decode(text.as_bytes()).unwrap();
        assert_eq!(units, text.encode_utf16().collect::<Vec<_>>());
        assert_eq!(encode(&units), text.as_bytes());
    }

    #[test]
    fn lone_surrogates_survive_round_trip() {
        let units = vec![0xD800, 0x0041, 0xDC00, 0xDBFF, 0xDFFF, 0xD801];
        let bytes = encode(&units);
        assert_eq!(decode(&bytes).unwrap(), units);
        assert!(std::str::from_utf8(&bytes).is_err());
    }

    #[test]
    fn pair_split_across_writes_is_joined() {
        let mut writer = Utf16Writer::new(Vec::new());
        writer.write_unit(0xD83D).unwrap();
        writer.write_unit(0xDE00).unwrap();
        let bytes = writer.finish().unwrap();
        assert_eq!(bytes, "\u{1F600}".as_bytes());
    }

    #[test]
    fn supplementary_char_into_one_unit_buffer() {
        let mut reader = Utf16Reader::new(Cursor::new("\u{1F600}x".as_bytes().to_vec()));
        let mut got = Vec::new();
        while let Some(u) = reader.read_unit().unwrap() {
            got.push(u);
        }
        assert_eq!(got, vec![0xD83D, 0xDE00, u16::from(b'x')]);
    }

    #[test]
    fn byte_at_a_time_source() {
        let text = "ґанок \u{10348} end";
        let mut reader = Utf16Reader::new(OneByte(Cursor::new(text.as_bytes().to_vec())));
        let mut out = Vec::new();
        copy_units(&mut reader, &mut out).unwrap();
        assert_eq!(String::from_utf16(&out).unwrap(), text);
    }

    #[test]
    fn rejects_malformed_bytes() {
        let cases: [&[u8]; 4] = [&[0xFF], &[0xC0, 0x80], &[0xE2, 0x28, 0xA1], &[0xF0, 0x9F, 0x98]];
        for bad in cases {
            let err = decode(bad).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidData, "{bad:?}");
        }
    }

    #[test]
    fn every_bmp_unit_round_trips() {
        let units: Vec<u16> = (0..=u16::MAX).collect();
        assert_eq!(decode(&encode(&units)).unwrap(), units);
    }
}
