use super::*;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Mdia {
    pub hdlr: Option<Hdlr>,
    pub minf: Option<Minf>,
}

impl Atom for Mdia {
    const FOURCC: Fourcc = MEDIA;
}

impl ParseAtom for Mdia {
    fn parse_atom(
        reader: &mut (impl Read + Seek),
        cfg: &ParseConfig<'_>,
        size: Size,
    ) -> crate::Result<Self> {
        let mut mdia = Self::default();
        let mut cfg = cfg.clone();

        parse_children(reader, size, Self::FOURCC, 0, |reader, head| {
            match head.fourcc() {
                HANDLER_REFERENCE => {
                    let hdlr = Hdlr::parse(reader, &cfg, head.size())?;
                    // every atom below inherits the declared handler
                    if let Some(handler) = hdlr.handler_type() {
                        cfg = cfg.with_handler(handler);
                    }
                    mdia.hdlr = Some(hdlr);
                }
                MEDIA_INFORMATION => mdia.minf = Some(Minf::parse(reader, &cfg, head.size())?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(mdia)
    }
}

pub struct MdiaBounds {
    pub bounds: AtomBounds,
    pub minf: Option<MinfBounds>,
}

impl Deref for MdiaBounds {
    type Target = AtomBounds;

    fn deref(&self) -> &Self::Target {
        &self.bounds
    }
}

impl FindAtom for Mdia {
    type Bounds = MdiaBounds;

    fn find_atom(reader: &mut (impl Read + Seek), size: Size) -> crate::Result<Self::Bounds> {
        let mut minf = None;

        let bounds = parse_children(reader, size, Self::FOURCC, 0, |reader, head| {
            match head.fourcc() {
                MEDIA_INFORMATION => minf = Some(Minf::find(reader, head.size())?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(Self::Bounds { bounds, minf })
    }
}
