use super::*;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Stbl {
    pub stsd: Option<Stsd>,
    pub stco: Option<Stco>,
    pub co64: Option<Co64>,
}

impl Atom for Stbl {
    const FOURCC: Fourcc = SAMPLE_TABLE;
}

impl ParseAtom for Stbl {
    fn parse_atom(
        reader: &mut (impl Read + Seek),
        cfg: &ParseConfig<'_>,
        size: Size,
    ) -> crate::Result<Self> {
        let mut stbl = Self::default();

        parse_children(reader, size, Self::FOURCC, 0, |reader, head| {
            match head.fourcc() {
                SAMPLE_TABLE_SAMPLE_DESCRIPTION if cfg.cfg.read_properties => {
                    stbl.stsd = Some(Stsd::parse(reader, cfg, head.size())?)
                }
                SAMPLE_TABLE_CHUNK_OFFSET if cfg.cfg.read_chunk_offsets => {
                    stbl.stco = Some(Stco::parse(reader, cfg, head.size())?)
                }
                SAMPLE_TABLE_CHUNK_OFFSET_64 if cfg.cfg.read_chunk_offsets => {
                    stbl.co64 = Some(Co64::parse(reader, cfg, head.size())?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(stbl)
    }
}

pub struct StblBounds {
    pub bounds: AtomBounds,
    pub stco: Option<StcoBounds>,
    pub co64: Option<Co64Bounds>,
}

impl Deref for StblBounds {
    type Target = AtomBounds;

    fn deref(&self) -> &Self::Target {
        &self.bounds
    }
}

impl FindAtom for Stbl {
    type Bounds = StblBounds;

    fn find_atom(reader: &mut (impl Read + Seek), size: Size) -> crate::Result<Self::Bounds> {
        let mut stco = None;
        let mut co64 = None;

        let bounds = parse_children(reader, size, Self::FOURCC, 0, |reader, head| {
            match head.fourcc() {
                SAMPLE_TABLE_CHUNK_OFFSET => stco = Some(Stco::find(reader, head.size())?),
                SAMPLE_TABLE_CHUNK_OFFSET_64 => co64 = Some(Co64::find(reader, head.size())?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(Self::Bounds { bounds, stco, co64 })
    }
}
