use super::*;

/// A handler reference atom. The raw content is kept so the atom can be written back unchanged,
/// the handler type is extracted for propagation into the surrounding hierarchy.
///
/// 1 byte version
/// 3 bytes flags
/// 4 bytes component type
/// 4 bytes component subtype (the handler type)
/// ...
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Hdlr {
    pub data: Vec<u8>,
}

impl Deref for Hdlr {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl Atom for Hdlr {
    const FOURCC: Fourcc = HANDLER_REFERENCE;
}

impl ParseAtom for Hdlr {
    fn parse_atom(
        reader: &mut (impl Read + Seek),
        _cfg: &ParseConfig<'_>,
        size: Size,
    ) -> crate::Result<Self> {
        Ok(Self { data: reader.read_bytes(size.content_len())? })
    }
}

impl WriteAtom for Hdlr {
    fn write_atom(&self, writer: &mut impl Write) -> crate::Result<()> {
        self.write_head(writer)?;
        writer.write_all(&self.data)?;
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from(self.data.len() as u64)
    }
}

impl FindAtom for Hdlr {
    type Bounds = AtomBounds;

    fn find_atom(reader: &mut (impl Read + Seek), size: Size) -> crate::Result<Self::Bounds> {
        let bounds = find_bounds(reader, size, Self::FOURCC)?;
        seek_to_end(reader, &bounds)?;
        Ok(bounds)
    }
}

impl Hdlr {
    /// The declared handler type, the component subtype following version, flags and the
    /// component type.
    pub fn handler_type(&self) -> Option<Fourcc> {
        let bytes = self.data.get(8..12)?;
        Some(Fourcc(bytes.try_into().ok()?))
    }

    /// The handler reference of a metadata directory (`mdir`), inserted when a metadata atom is
    /// missing its handler.
    pub fn meta() -> Self {
        Self {
            data: vec![
                0x00, 0x00, 0x00, 0x00, // version + flags
                0x00, 0x00, 0x00, 0x00, // component type
                0x6d, 0x64, 0x69, 0x72, // component subtype
                0x61, 0x70, 0x70, 0x6c, // component manufacturer
                0x00, 0x00, 0x00, 0x00, // component flags
                0x00, 0x00, 0x00, 0x00, // component flags mask
                0x00, // component name
            ],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn meta_handler_type() {
        assert_eq!(Hdlr::meta().handler_type(), Some(HANDLER_METADATA));
    }
}
