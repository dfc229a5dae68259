use super::*;

/// The length of the version, flags and entry count fields preceding the offset table.
pub const TABLE_OFFSET: u64 = 8;

/// A sample table chunk offset atom (`stco`) storing 32 bit absolute file offsets.
///
/// The leading entry count is authoritative, exactly that many offsets are read.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Stco {
    pub offsets: Vec<u32>,
}

impl Atom for Stco {
    const FOURCC: Fourcc = SAMPLE_TABLE_CHUNK_OFFSET;
}

impl ParseAtom for Stco {
    fn parse_atom(
        reader: &mut (impl Read + Seek),
        _cfg: &ParseConfig<'_>,
        size: Size,
    ) -> crate::Result<Self> {
        let (version, _) = parse_full_head(reader)?;

        if version != 0 {
            return Err(crate::Error::new(
                ErrorKind::UnknownVersion(version),
                "Unknown sample table chunk offset (stco) version",
            ));
        }

        let entries = reader.read_u32::<BigEndian>()?;
        if TABLE_OFFSET + 4 * entries as u64 != size.content_len() {
            return Err(crate::Error::new(
                ErrorKind::Parsing,
                "Sample table chunk offset (stco) table size doesn't match atom length",
            ));
        }

        let mut offsets = Vec::with_capacity(entries as usize);
        for _ in 0..entries {
            offsets.push(reader.read_u32::<BigEndian>()?);
        }

        Ok(Self { offsets })
    }
}

impl WriteAtom for Stco {
    fn write_atom(&self, writer: &mut impl Write) -> crate::Result<()> {
        self.write_head(writer)?;
        write_full_head(writer, 0, [0; 3])?;

        writer.write_u32::<BigEndian>(self.offsets.len() as u32)?;
        for o in self.offsets.iter() {
            writer.write_u32::<BigEndian>(*o)?;
        }

        Ok(())
    }

    fn size(&self) -> Size {
        let content_len = TABLE_OFFSET + 4 * self.offsets.len() as u64;
        Size::from(content_len)
    }
}

pub struct StcoBounds {
    pub bounds: AtomBounds,
    pub offsets: Vec<u32>,
}

impl Deref for StcoBounds {
    type Target = AtomBounds;

    fn deref(&self) -> &Self::Target {
        &self.bounds
    }
}

impl StcoBounds {
    /// The position of the first offset table entry.
    pub fn table_pos(&self) -> u64 {
        self.bounds.content_pos() + TABLE_OFFSET
    }
}

impl FindAtom for Stco {
    type Bounds = StcoBounds;

    fn find_atom(reader: &mut (impl Read + Seek), size: Size) -> crate::Result<Self::Bounds> {
        let bounds = find_bounds(reader, size, Self::FOURCC)?;
        let read_cfg = ReadConfig::headers_only();
        let cfg = ParseConfig::new(&read_cfg);
        let stco = Self::parse_atom(reader, &cfg, size)?;
        Ok(Self::Bounds { bounds, offsets: stco.offsets })
    }
}
