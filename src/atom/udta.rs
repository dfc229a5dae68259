use super::*;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Udta {
    pub meta: Option<Meta>,
}

impl Atom for Udta {
    const FOURCC: Fourcc = USER_DATA;
}

impl ParseAtom for Udta {
    fn parse_atom(
        reader: &mut (impl Read + Seek),
        cfg: &ParseConfig<'_>,
        size: Size,
    ) -> crate::Result<Self> {
        let mut udta = Self::default();

        parse_children(reader, size, Self::FOURCC, 0, |reader, head| {
            match head.fourcc() {
                METADATA if cfg.cfg.read_item_list => {
                    udta.meta = Some(Meta::parse(reader, cfg, head.size())?)
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(udta)
    }
}

impl WriteAtom for Udta {
    fn write_atom(&self, writer: &mut impl Write) -> crate::Result<()> {
        self.write_head(writer)?;
        if let Some(a) = &self.meta {
            a.write(writer)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from(self.meta.len_or_zero())
    }
}

impl Udta {
    /// Whether the subtree below contains a metadata item list.
    pub fn contains_item_list(&self) -> bool {
        self.meta.as_ref().map_or(false, |m| m.ilst.is_some())
    }
}

pub struct UdtaBounds {
    pub bounds: AtomBounds,
    pub meta: Option<MetaBounds>,
}

impl Deref for UdtaBounds {
    type Target = AtomBounds;

    fn deref(&self) -> &Self::Target {
        &self.bounds
    }
}

impl FindAtom for Udta {
    type Bounds = UdtaBounds;

    fn find_atom(reader: &mut (impl Read + Seek), size: Size) -> crate::Result<Self::Bounds> {
        let mut meta = None;

        let bounds = parse_children(reader, size, Self::FOURCC, 0, |reader, head| {
            match head.fourcc() {
                METADATA => meta = Some(Meta::find(reader, head.size())?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(Self::Bounds { bounds, meta })
    }
}
