use super::*;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Trak {
    pub mdia: Option<Mdia>,
    pub udta: Option<Udta>,
}

impl Atom for Trak {
    const FOURCC: Fourcc = TRACK;
}

impl ParseAtom for Trak {
    fn parse_atom(
        reader: &mut (impl Read + Seek),
        cfg: &ParseConfig<'_>,
        size: Size,
    ) -> crate::Result<Self> {
        let mut trak = Self::default();

        parse_children(reader, size, Self::FOURCC, 0, |reader, head| {
            match head.fourcc() {
                MEDIA if cfg.cfg.read_properties || cfg.cfg.read_chunk_offsets => {
                    trak.mdia = Some(Mdia::parse(reader, cfg, head.size())?)
                }
                USER_DATA => trak.udta = Some(Udta::parse(reader, cfg, head.size())?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(trak)
    }
}

pub struct TrakBounds {
    pub bounds: AtomBounds,
    pub mdia: Option<MdiaBounds>,
    pub udta: Option<UdtaBounds>,
}

impl Deref for TrakBounds {
    type Target = AtomBounds;

    fn deref(&self) -> &Self::Target {
        &self.bounds
    }
}

impl FindAtom for Trak {
    type Bounds = TrakBounds;

    fn find_atom(reader: &mut (impl Read + Seek), size: Size) -> crate::Result<Self::Bounds> {
        let mut mdia = None;
        let mut udta = None;

        let bounds = parse_children(reader, size, Self::FOURCC, 0, |reader, head| {
            match head.fourcc() {
                MEDIA => mdia = Some(Mdia::find(reader, head.size())?),
                USER_DATA => udta = Some(Udta::find(reader, head.size())?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(Self::Bounds { bounds, mdia, udta })
    }
}
