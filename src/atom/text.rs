use super::*;

/// A text sample entry of a text (e.g. chapter) track, kept as raw bytes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Text(pub Vec<u8>);

impl Deref for Text {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Atom for Text {
    const FOURCC: Fourcc = TEXT;
}

impl ParseAtom for Text {
    fn parse_atom(
        reader: &mut (impl Read + Seek),
        _cfg: &ParseConfig<'_>,
        size: Size,
    ) -> crate::Result<Self> {
        Ok(Self(reader.read_bytes(size.content_len())?))
    }
}

impl WriteAtom for Text {
    fn write_atom(&self, writer: &mut impl Write) -> crate::Result<()> {
        self.write_head(writer)?;
        writer.write_all(&self.0)?;
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from(self.0.len() as u64)
    }
}
