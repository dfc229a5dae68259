use super::*;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Moov {
    pub mvhd: Option<Mvhd>,
    pub trak: Vec<Trak>,
    pub udta: Option<Udta>,
}

impl Atom for Moov {
    const FOURCC: Fourcc = MOVIE;
}

impl ParseAtom for Moov {
    fn parse_atom(
        reader: &mut (impl Read + Seek),
        cfg: &ParseConfig<'_>,
        size: Size,
    ) -> crate::Result<Self> {
        let mut moov = Self::default();

        parse_children(reader, size, Self::FOURCC, 0, |reader, head| {
            match head.fourcc() {
                MOVIE_HEADER if cfg.cfg.read_properties => {
                    moov.mvhd = Some(Mvhd::parse(reader, cfg, head.size())?)
                }
                TRACK => moov.trak.push(Trak::parse(reader, cfg, head.size())?),
                USER_DATA => moov.udta = Some(Udta::parse(reader, cfg, head.size())?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(moov)
    }
}

pub struct MoovBounds {
    pub bounds: AtomBounds,
    pub trak: Vec<TrakBounds>,
    pub udta: Option<UdtaBounds>,
}

impl Deref for MoovBounds {
    type Target = AtomBounds;

    fn deref(&self) -> &Self::Target {
        &self.bounds
    }
}

impl FindAtom for Moov {
    type Bounds = MoovBounds;

    fn find_atom(reader: &mut (impl Read + Seek), size: Size) -> crate::Result<Self::Bounds> {
        let mut trak = Vec::new();
        let mut udta = None;

        let bounds = parse_children(reader, size, Self::FOURCC, 0, |reader, head| {
            match head.fourcc() {
                TRACK => trak.push(Trak::find(reader, head.size())?),
                USER_DATA => udta = Some(Udta::find(reader, head.size())?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(Self::Bounds { bounds, trak, udta })
    }
}
