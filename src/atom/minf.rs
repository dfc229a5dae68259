use super::*;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Minf {
    pub dinf: Option<Dinf>,
    pub stbl: Option<Stbl>,
}

impl Atom for Minf {
    const FOURCC: Fourcc = MEDIA_INFORMATION;
}

impl ParseAtom for Minf {
    fn parse_atom(
        reader: &mut (impl Read + Seek),
        cfg: &ParseConfig<'_>,
        size: Size,
    ) -> crate::Result<Self> {
        let mut minf = Self::default();

        parse_children(reader, size, Self::FOURCC, 0, |reader, head| {
            match head.fourcc() {
                DATA_INFORMATION if cfg.cfg.read_properties => {
                    minf.dinf = Some(Dinf::parse(reader, cfg, head.size())?)
                }
                SAMPLE_TABLE if cfg.cfg.read_properties || cfg.cfg.read_chunk_offsets => {
                    minf.stbl = Some(Stbl::parse(reader, cfg, head.size())?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(minf)
    }
}

pub struct MinfBounds {
    pub bounds: AtomBounds,
    pub stbl: Option<StblBounds>,
}

impl Deref for MinfBounds {
    type Target = AtomBounds;

    fn deref(&self) -> &Self::Target {
        &self.bounds
    }
}

impl FindAtom for Minf {
    type Bounds = MinfBounds;

    fn find_atom(reader: &mut (impl Read + Seek), size: Size) -> crate::Result<Self::Bounds> {
        let mut stbl = None;

        let bounds = parse_children(reader, size, Self::FOURCC, 0, |reader, head| {
            match head.fourcc() {
                SAMPLE_TABLE => stbl = Some(Stbl::find(reader, head.size())?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(Self::Bounds { bounds, stbl })
    }
}
