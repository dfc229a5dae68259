use super::*;

/// A metadata atom, a full atom whose children carry the item list. The handler reference of a
/// tag bearing metadata atom declares the `mdir` handler, one that lacks it is repaired when the
/// tag is first written.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Meta {
    pub hdlr: Option<Hdlr>,
    pub ilst: Option<Ilst>,
}

impl Atom for Meta {
    const FOURCC: Fourcc = METADATA;
}

fn check_version(version: u8) -> crate::Result<()> {
    if version != 0 {
        return Err(crate::Error::new(
            ErrorKind::UnknownVersion(version),
            "Unknown metadata (meta) version",
        ));
    }
    Ok(())
}

impl ParseAtom for Meta {
    fn parse_atom(
        reader: &mut (impl Read + Seek),
        cfg: &ParseConfig<'_>,
        size: Size,
    ) -> crate::Result<Self> {
        let (version, _) = parse_full_head(reader)?;
        check_version(version)?;

        let mut meta = Self::default();
        let mut cfg = cfg.clone();

        parse_children(reader, size, Self::FOURCC, 4, |reader, head| {
            match head.fourcc() {
                HANDLER_REFERENCE => {
                    let hdlr = Hdlr::parse(reader, &cfg, head.size())?;
                    if let Some(handler) = hdlr.handler_type() {
                        cfg = cfg.with_handler(handler);
                    }
                    meta.hdlr = Some(hdlr);
                }
                ITEM_LIST => meta.ilst = Some(Ilst::parse(reader, &cfg, head.size())?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(meta)
    }
}

impl WriteAtom for Meta {
    fn write_atom(&self, writer: &mut impl Write) -> crate::Result<()> {
        self.write_head(writer)?;
        write_full_head(writer, 0, [0; 3])?;
        if let Some(a) = &self.hdlr {
            a.write(writer)?;
        }
        if let Some(a) = &self.ilst {
            a.write(writer)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        let content_len = self.hdlr.len_or_zero() + self.ilst.len_or_zero();
        Size::from(content_len + 4)
    }
}

pub struct MetaBounds {
    pub bounds: AtomBounds,
    pub hdlr: Option<AtomBounds>,
    pub ilst: Option<AtomBounds>,
}

impl Deref for MetaBounds {
    type Target = AtomBounds;

    fn deref(&self) -> &Self::Target {
        &self.bounds
    }
}

impl FindAtom for Meta {
    type Bounds = MetaBounds;

    fn find_atom(reader: &mut (impl Read + Seek), size: Size) -> crate::Result<Self::Bounds> {
        let (version, _) = parse_full_head(reader)?;
        check_version(version)?;

        let mut hdlr = None;
        let mut ilst = None;

        let bounds = parse_children(reader, size, Self::FOURCC, 4, |reader, head| {
            match head.fourcc() {
                HANDLER_REFERENCE => hdlr = Some(Hdlr::find(reader, head.size())?),
                ITEM_LIST => {
                    let b = find_bounds(reader, head.size(), ITEM_LIST)?;
                    seek_to_end(reader, &b)?;
                    ilst = Some(b);
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(Self::Bounds { bounds, hdlr, ilst })
    }
}
