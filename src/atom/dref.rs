use super::*;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Dref {
    pub url: Option<Url>,
}

impl Atom for Dref {
    const FOURCC: Fourcc = DATA_REFERENCE;
}

impl ParseAtom for Dref {
    fn parse_atom(
        reader: &mut (impl Read + Seek),
        cfg: &ParseConfig<'_>,
        size: Size,
    ) -> crate::Result<Self> {
        let (version, _) = parse_full_head(reader)?;

        if version != 0 {
            return Err(crate::Error::new(
                ErrorKind::UnknownVersion(version),
                "Unknown data reference (dref) version",
            ));
        }

        reader.skip(4)?; // number of entries

        let mut dref = Self::default();

        parse_children(reader, size, Self::FOURCC, 8, |reader, head| {
            match head.fourcc() {
                URL => dref.url = Some(Url::parse(reader, cfg, head.size())?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(dref)
    }
}
