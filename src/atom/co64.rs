use super::*;

/// A sample table chunk offset atom (`co64`) storing 64 bit absolute file offsets.
///
/// The leading entry count is authoritative, exactly that many offsets are read.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Co64 {
    pub offsets: Vec<u64>,
}

impl Atom for Co64 {
    const FOURCC: Fourcc = SAMPLE_TABLE_CHUNK_OFFSET_64;
}

impl ParseAtom for Co64 {
    fn parse_atom(
        reader: &mut (impl Read + Seek),
        _cfg: &ParseConfig<'_>,
        size: Size,
    ) -> crate::Result<Self> {
        let (version, _) = parse_full_head(reader)?;

        if version != 0 {
            return Err(crate::Error::new(
                ErrorKind::UnknownVersion(version),
                "Unknown 64 bit sample table chunk offset (co64) version",
            ));
        }

        let entries = reader.read_u32::<BigEndian>()?;
        if stco::TABLE_OFFSET + 8 * entries as u64 != size.content_len() {
            return Err(crate::Error::new(
                ErrorKind::Parsing,
                "64 bit sample table chunk offset (co64) table size doesn't match atom length",
            ));
        }

        let mut offsets = Vec::with_capacity(entries as usize);
        for _ in 0..entries {
            offsets.push(reader.read_u64::<BigEndian>()?);
        }

        Ok(Self { offsets })
    }
}

impl WriteAtom for Co64 {
    fn write_atom(&self, writer: &mut impl Write) -> crate::Result<()> {
        self.write_head(writer)?;
        write_full_head(writer, 0, [0; 3])?;

        writer.write_u32::<BigEndian>(self.offsets.len() as u32)?;
        for o in self.offsets.iter() {
            writer.write_u64::<BigEndian>(*o)?;
        }

        Ok(())
    }

    fn size(&self) -> Size {
        let content_len = stco::TABLE_OFFSET + 8 * self.offsets.len() as u64;
        Size::from(content_len)
    }
}

pub struct Co64Bounds {
    pub bounds: AtomBounds,
    pub offsets: Vec<u64>,
}

impl Deref for Co64Bounds {
    type Target = AtomBounds;

    fn deref(&self) -> &Self::Target {
        &self.bounds
    }
}

impl Co64Bounds {
    /// The position of the first offset table entry.
    pub fn table_pos(&self) -> u64 {
        self.bounds.content_pos() + stco::TABLE_OFFSET
    }
}

impl FindAtom for Co64 {
    type Bounds = Co64Bounds;

    fn find_atom(reader: &mut (impl Read + Seek), size: Size) -> crate::Result<Self::Bounds> {
        let bounds = find_bounds(reader, size, Self::FOURCC)?;
        let read_cfg = ReadConfig::headers_only();
        let cfg = ParseConfig::new(&read_cfg);
        let co64 = Self::parse_atom(reader, &cfg, size)?;
        Ok(Self::Bounds { bounds, offsets: co64.offsets })
    }
}
