use super::*;

/// A struct storing the size of an atom and the shape of its head.
///
/// 4 bytes standard length
/// 4 bytes identifier
/// 8 bytes optional extended length
/// 16 bytes optional extended (uuid) type
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Size {
    /// Whether the head is of standard size (8 bytes) with a 32 bit length or extended (16 bytes)
    /// with a 64 bit length.
    ext: bool,
    /// Whether the head carries a 16 byte extended (uuid) type.
    uuid: bool,
    /// Whether the stored length was declared as 0 and resolved against the end of the file.
    until_eof: bool,
    /// The length including the head.
    len: u64,
}

impl Size {
    pub const fn from(content_len: u64) -> Self {
        let mut len = content_len + 8;
        let ext = len > u32::MAX as u64;
        if ext {
            len += 8;
        }
        Self { ext, uuid: false, until_eof: false, len }
    }

    pub const fn ext(&self) -> bool {
        self.ext
    }

    pub const fn until_eof(&self) -> bool {
        self.until_eof
    }

    pub const fn len(&self) -> u64 {
        self.len
    }

    pub const fn head_len(&self) -> u64 {
        let base: u64 = match self.ext {
            true => 16,
            false => 8,
        };
        match self.uuid {
            true => base + 16,
            false => base,
        }
    }

    pub const fn content_len(&self) -> u64 {
        self.len - self.head_len()
    }
}

/// A head specifying the size and type of an atom.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Head {
    size: Size,
    /// The identifier.
    fourcc: Fourcc,
    /// The extended type following a `uuid` identifier.
    ext_type: Option<[u8; 16]>,
}

impl Deref for Head {
    type Target = Size;

    fn deref(&self) -> &Self::Target {
        &self.size
    }
}

impl Head {
    pub const fn new(ext: bool, len: u64, fourcc: Fourcc) -> Self {
        Self {
            size: Size { ext, uuid: false, until_eof: false, len },
            fourcc,
            ext_type: None,
        }
    }

    pub const fn from(size: Size, fourcc: Fourcc) -> Self {
        Self { size, fourcc, ext_type: None }
    }

    pub const fn fourcc(&self) -> Fourcc {
        self.fourcc
    }

    pub const fn size(&self) -> Size {
        self.size
    }

    pub const fn ext_type(&self) -> Option<[u8; 16]> {
        self.ext_type
    }
}

/// Attempts to parse an atom head at the current position.
///
/// The head consists of a 32 bit unsigned big endian length and a 4 byte identifier. A stored
/// length of 1 is followed by an extended 64 bit length, a stored length of 0 means the atom
/// extends to the end of the file. The identifier `uuid` is followed by a 16 byte extended type.
pub fn parse_head(reader: &mut (impl Read + Seek)) -> crate::Result<Head> {
    let len = match reader.read_u32::<BigEndian>() {
        Ok(l) => l as u64,
        Err(e) => {
            return Err(crate::Error::new(ErrorKind::Io(e), "Error reading atom length"));
        }
    };
    let mut ident = Fourcc([0u8; 4]);
    if let Err(e) = reader.read_exact(&mut *ident) {
        return Err(crate::Error::new(ErrorKind::Io(e), "Error reading atom identifier"));
    }

    let mut size = if len == 1 {
        match reader.read_u64::<BigEndian>() {
            Ok(l) if l >= 16 => Size { ext: true, uuid: false, until_eof: false, len: l },
            Ok(l) => {
                return Err(crate::Error::new(
                    ErrorKind::Parsing,
                    format!("Read extended length of '{ident}' which is less than 16 bytes: {l}"),
                ));
            }
            Err(e) => {
                return Err(crate::Error::new(
                    ErrorKind::Io(e),
                    "Error reading extended atom length",
                ));
            }
        }
    } else if len == 0 {
        // the atom occupies the rest of the file
        let remaining = reader.remaining_len()?;
        Size { ext: false, uuid: false, until_eof: true, len: 8 + remaining }
    } else if len < 8 {
        return Err(crate::Error::new(
            ErrorKind::Parsing,
            format!("Read length of '{ident}' which is less than 8 bytes: {len}"),
        ));
    } else {
        Size { ext: false, uuid: false, until_eof: false, len }
    };

    let mut ext_type = None;
    if ident == UUID {
        size.uuid = true;
        let mut uuid = [0u8; 16];
        if let Err(e) = reader.read_exact(&mut uuid) {
            return Err(crate::Error::new(ErrorKind::Io(e), "Error reading extended atom type"));
        }
        ext_type = Some(uuid);
    }

    if size.len < size.head_len() {
        return Err(crate::Error::new(
            ErrorKind::Parsing,
            format!("Atom '{ident}' declares a length smaller than its head"),
        ));
    }

    Ok(Head { size, fourcc: ident, ext_type })
}

pub fn write_head(writer: &mut impl Write, head: Head) -> crate::Result<()> {
    if head.ext() {
        writer.write_u32::<BigEndian>(1)?;
        writer.write_all(&*head.fourcc)?;
        writer.write_u64::<BigEndian>(head.len())?;
    } else {
        writer.write_u32::<BigEndian>(head.len() as u32)?;
        writer.write_all(&*head.fourcc)?;
    }
    if let Some(uuid) = head.ext_type {
        writer.write_all(&uuid)?;
    }
    Ok(())
}

/// Attempts to parse a full atom head.
///
/// 1 byte version
/// 3 bytes flags
pub fn parse_full_head(reader: &mut impl Read) -> crate::Result<(u8, [u8; 3])> {
    let version = match reader.read_u8() {
        Ok(v) => v,
        Err(e) => {
            return Err(crate::Error::new(
                ErrorKind::Io(e),
                "Error reading version of full atom head",
            ));
        }
    };

    let mut flags = [0u8; 3];
    if let Err(e) = reader.read_exact(&mut flags) {
        return Err(crate::Error::new(ErrorKind::Io(e), "Error reading flags of full atom head"));
    }

    Ok((version, flags))
}

pub fn write_full_head(writer: &mut impl Write, version: u8, flags: [u8; 3]) -> crate::Result<()> {
    writer.write_all(&[version])?;
    writer.write_all(&flags)?;
    Ok(())
}

/// A struct storing the position and size of an atom.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AtomBounds {
    pos: u64,
    head: Head,
}

impl Deref for AtomBounds {
    type Target = Head;

    fn deref(&self) -> &Self::Target {
        &self.head
    }
}

impl AtomBounds {
    pub const fn new(pos: u64, head: Head) -> Self {
        Self { pos, head }
    }

    pub const fn pos(&self) -> u64 {
        self.pos
    }

    pub fn content_pos(&self) -> u64 {
        self.pos + self.head_len()
    }

    pub fn end(&self) -> u64 {
        self.pos + self.len()
    }
}

/// Reconstructs the bounds of the atom whose head was just read.
pub fn find_bounds(
    reader: &mut (impl Read + Seek),
    size: Size,
    fourcc: Fourcc,
) -> crate::Result<AtomBounds> {
    let pos = reader.stream_position()? - size.head_len();
    Ok(AtomBounds::new(pos, Head::from(size, fourcc)))
}

/// Seeks to the end of the atom.
pub fn seek_to_end(reader: &mut (impl Read + Seek), bounds: &AtomBounds) -> crate::Result<()> {
    let current = reader.stream_position()?;
    reader.skip(bounds.end() as i64 - current as i64)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn standard_head_roundtrip() {
        let head = Head::new(false, 42, Fourcc(*b"moov"));
        let mut buf = Vec::new();
        write_head(&mut buf, head).unwrap();
        assert_eq!(buf.len(), 8);

        let parsed = parse_head(&mut Cursor::new(buf)).unwrap();
        assert_eq!(parsed, head);
    }

    #[test]
    fn extended_head_roundtrip() {
        let len = u32::MAX as u64 + 42;
        let head = Head::new(true, len, Fourcc(*b"mdat"));
        let mut buf = Vec::new();
        write_head(&mut buf, head).unwrap();
        assert_eq!(buf.len(), 16);

        let parsed = parse_head(&mut Cursor::new(buf)).unwrap();
        assert_eq!(parsed, head);
        assert_eq!(parsed.content_len(), len - 16);
    }

    #[test]
    fn zero_length_extends_to_eof() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(b"mdat");
        buf.extend_from_slice(&[0; 24]);

        let parsed = parse_head(&mut Cursor::new(buf)).unwrap();
        assert!(parsed.until_eof());
        assert_eq!(parsed.len(), 32);
    }

    #[test]
    fn uuid_head_carries_extended_type() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&32u32.to_be_bytes());
        buf.extend_from_slice(b"uuid");
        buf.extend_from_slice(&[7; 16]);
        buf.extend_from_slice(&[0; 8]);

        let parsed = parse_head(&mut Cursor::new(buf)).unwrap();
        assert_eq!(parsed.ext_type(), Some([7; 16]));
        assert_eq!(parsed.head_len(), 24);
        assert_eq!(parsed.content_len(), 8);
    }

    #[test]
    fn declared_length_below_head_size_is_an_error() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&4u32.to_be_bytes());
        buf.extend_from_slice(b"moov");

        assert!(parse_head(&mut Cursor::new(buf)).is_err());
    }
}
