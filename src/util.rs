use std::io::{self, Read, Seek, SeekFrom, Write};
use std::time::Duration;

/// Reads length delimited byte and string fields. Integer primitives come from `byteorder`'s
/// extension traits, these helpers cover the encodings found inside metadata atoms.
pub trait TextReadExt: Read {
    /// Reads exactly `len` bytes into a vector.
    fn read_bytes(&mut self, len: u64) -> io::Result<Vec<u8>> {
        let mut buf = vec![0; len as usize];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Reads `len` bytes as a utf-8 string.
    fn read_utf8(&mut self, len: u64) -> crate::Result<String> {
        Ok(String::from_utf8(self.read_bytes(len)?)?)
    }

    /// Reads `len` bytes as a latin-1 string. Each byte maps to the code point of the same
    /// value, so only IO can fail.
    fn read_latin1(&mut self, len: u64) -> crate::Result<String> {
        let bytes = self.read_bytes(len)?;
        Ok(bytes.into_iter().map(char::from).collect())
    }

    /// Reads `len` bytes as a big endian utf-16 string.
    fn read_be_utf16(&mut self, len: u64) -> crate::Result<String> {
        let bytes = self.read_bytes(len)?;
        let units: Vec<u16> =
            bytes.chunks_exact(2).map(|p| u16::from_be_bytes([p[0], p[1]])).collect();
        String::from_utf16(&units)
            .map_err(|_| crate::Error::new(crate::ErrorKind::Parsing, "Data is not valid utf-16"))
    }
}

impl<T: Read> TextReadExt for T {}

/// Writes the string encodings found inside metadata atoms.
pub trait TextWriteExt: Write {
    fn write_utf8(&mut self, string: &str) -> io::Result<()> {
        self.write_all(string.as_bytes())
    }

    /// Writes a latin-1 string, one byte per code point. Code points above 0xFF turn into `?`.
    fn write_latin1(&mut self, string: &str) -> io::Result<()> {
        let bytes: Vec<u8> =
            string.chars().map(|c| if (c as u32) < 0x100 { c as u8 } else { b'?' }).collect();
        self.write_all(&bytes)
    }

    fn write_be_utf16(&mut self, string: &str) -> io::Result<()> {
        for unit in string.encode_utf16() {
            self.write_all(&unit.to_be_bytes())?;
        }
        Ok(())
    }
}

impl<T: Write> TextWriteExt for T {}

/// Relative seeking and stream length queries.
pub trait SeekExt: Seek {
    /// Moves the position by `offset` bytes.
    fn skip(&mut self, offset: i64) -> io::Result<()> {
        self.seek(SeekFrom::Current(offset)).map(|_| ())
    }

    /// The number of bytes between the current position and the end of the stream. The position
    /// is restored afterwards.
    fn remaining_len(&mut self) -> io::Result<u64> {
        let pos = self.stream_position()?;
        let end = self.seek(SeekFrom::End(0))?;
        self.seek(SeekFrom::Start(pos))?;
        Ok(end - pos)
    }
}

impl<T: Seek> SeekExt for T {}

/// Converts a duration in timescale units (ticks per second) into a [`Duration`].
pub fn scale_duration(timescale: u32, units: u64) -> Duration {
    if timescale == 0 {
        return Duration::ZERO;
    }
    let timescale = timescale as u64;
    let nanos = (units % timescale) * 1_000_000_000 / timescale;
    Duration::new(units / timescale, nanos as u32)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn latin1_maps_bytes_to_code_points() {
        let mut reader = Cursor::new(vec![b'T', b'a', b'g', 0xE9]);
        assert_eq!(reader.read_latin1(4).unwrap(), "Tag\u{e9}");
    }

    #[test]
    fn latin1_write_replaces_wide_code_points() {
        let mut buf = Vec::new();
        buf.write_latin1("d\u{e9}j\u{e0} \u{266b}").unwrap();
        assert_eq!(buf, b"d\xE9j\xE0 ?");
    }

    #[test]
    fn utf16_roundtrip() {
        let mut buf = Vec::new();
        buf.write_be_utf16("s\u{f8}ng").unwrap();
        assert_eq!(buf.len(), 8);

        let mut reader = Cursor::new(buf);
        assert_eq!(reader.read_be_utf16(8).unwrap(), "s\u{f8}ng");
    }

    #[test]
    fn remaining_len_keeps_the_position() {
        let mut reader = Cursor::new(vec![0u8; 24]);
        reader.skip(9).unwrap();
        assert_eq!(reader.remaining_len().unwrap(), 15);
        assert_eq!(reader.stream_position().unwrap(), 9);
    }

    #[test]
    fn durations_are_scaled() {
        assert_eq!(scale_duration(1000, 2500), Duration::from_millis(2500));
        assert_eq!(scale_duration(0, 42), Duration::ZERO);
    }
}
