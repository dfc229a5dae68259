use super::*;

/// The metadata item list. Every direct child is an annotation atom keyed by its tag identifier,
/// items sharing an identifier are merged and free space between them is dropped.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Ilst {
    pub items: Vec<MetaItem>,
}

impl Atom for Ilst {
    const FOURCC: Fourcc = ITEM_LIST;
}

impl ParseAtom for Ilst {
    fn parse_atom(
        reader: &mut (impl Read + Seek),
        cfg: &ParseConfig<'_>,
        size: Size,
    ) -> crate::Result<Self> {
        let mut items = Vec::<MetaItem>::new();

        parse_children(reader, size, Self::FOURCC, 0, |reader, head| {
            match head.fourcc() {
                FREE | SKIP => Ok(false),
                _ => {
                    let item = MetaItem::parse(reader, cfg, head)?;
                    match items.iter_mut().find(|o| item.ident == o.ident) {
                        Some(other) => other.data.extend(item.data),
                        None => items.push(item),
                    }
                    Ok(true)
                }
            }
        })?;

        Ok(Self { items })
    }
}

impl WriteAtom for Ilst {
    fn write_atom(&self, writer: &mut impl Write) -> crate::Result<()> {
        self.write_head(writer)?;
        for a in self.items.iter() {
            a.write(writer)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        let content_len = self.items.iter().map(|a| a.len()).sum();
        Size::from(content_len)
    }
}
