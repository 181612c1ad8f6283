//! Code-unit stream capabilities.

use std::io;

use super::TRANSFER_UNITS;

/// A sink of UTF-16 code units.
pub trait UnitWrite {
    /// Write every unit of `units`, in order.
    fn write_units(&mut self, units: &[u16]) -> io::Result<()>;

    fn write_unit(&mut self, unit: u16) -> io::Result<()> {
        self.write_units(&[unit])
    }

    fn flush(&mut self) -> io::Result<()>;
}

/// A source of UTF-16 code units.
pub trait UnitRead {
    /// Read up to `buf.len()` units. Returns 0 only at end of stream (or for an empty `buf`).
    fn read_units(&mut self, buf: &mut [u16]) -> io::Result<usize>;

    fn read_unit(&mut self) -> io::Result<Option<u16>> {
        let mut one = [0u16; 1];
        loop {
            match self.read_units(&mut one) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(one[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }
}

impl UnitWrite for Vec<u16> {
    fn write_units(&mut self, units: &[u16]) -> io::Result<()> {
        self.extend_from_slice(units);
        Ok(())
    }

    fn write_unit(&mut self, unit: u16) -> io::Result<()> {
        self.push(unit);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<W: UnitWrite + ?Sized> UnitWrite for &mut W {
    fn write_units(&mut self, units: &[u16]) -> io::Result<()> {
        (**self).write_units(units)
    }

    fn write_unit(&mut self, unit: u16) -> io::Result<()> {
        (**self).write_unit(unit)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

impl UnitRead for &[u16] {
    fn read_units(&mut self, buf: &mut [u16]) -> io::Result<usize> {
        let n = buf.len().min(self.len());
        let (head, tail) = self.split_at(n);
        buf[..n].copy_from_slice(head);
        *self = tail;
        Ok(n)
    }
}

impl<R: UnitRead + ?Sized> UnitRead for &mut R {
    fn read_units(&mut self, buf: &mut [u16]) -> io::Result<usize> {
        (**self).read_units(buf)
    }

    fn read_unit(&mut self) -> io::Result<Option<u16>> {
        (**self).read_unit()
    }
}

/// Copy all units from `reader` into `writer` through a fixed transfer buffer.
/// Returns the number of units copied. Does not flush `writer`.
pub fn copy_units<R, W>(reader: &mut R, writer: &mut W) -> io::Result<u64>
where
    R: UnitRead + ?Sized,
    W: UnitWrite + ?Sized,
{
    let mut buf = [0u16; TRANSFER_UNITS];
    let mut total = 0u64;
    loop {
        let n = match reader.read_units(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_units(&buf[..n])?;
        total += n as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out at most `step` units per call to exercise short reads.
    struct Trickle<'a> {
        data: &'a [u16],
        step: usize,
    }

    impl UnitRead for Trickle<'_> {
        fn read_units(&mut self, buf: &mut [u16]) -> io::Result<usize> {
            let n = buf.len().min(self.step).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn slice_reader_drains_in_order() {
        let data = [1u16, 2, 3, 4, 5];
        let mut src: &[u16] = &data;
        let mut buf = [0u16; 3];
        assert_eq!(src.read_units(&mut buf).unwrap(), 3);
        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(src.read_unit().unwrap(), Some(4));
        assert_eq!(src.read_unit().unwrap(), Some(5));
        assert_eq!(src.read_unit().unwrap(), None);
    }

    #[test]
    fn copy_units_handles_short_reads_and_large_inputs() {
        let data: Vec<u16> = (0..5000u32).map(|i| (i * 37) as u16).collect();
        let mut src = Trickle {
            data: &data,
            step: 7,
        };
        let mut out = Vec::new();
        let n = copy_units(&mut src, &mut out).unwrap();
        assert_eq!(n, 5000);
        assert_eq!(out, data);
    }

    #[test]
    fn copy_units_empty_source() {
        let mut src: &[u16] = &[];
        let mut out: Vec<u16> = Vec::new();
        assert_eq!(copy_units(&mut src, &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }
}
