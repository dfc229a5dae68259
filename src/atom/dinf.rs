use super::*;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Dinf {
    pub dref: Option<Dref>,
}

impl Atom for Dinf {
    const FOURCC: Fourcc = DATA_INFORMATION;
}

impl ParseAtom for Dinf {
    fn parse_atom(
        reader: &mut (impl Read + Seek),
        cfg: &ParseConfig<'_>,
        size: Size,
    ) -> crate::Result<Self> {
        let mut dinf = Self::default();

        parse_children(reader, size, Self::FOURCC, 0, |reader, head| {
            match head.fourcc() {
                DATA_REFERENCE => dinf.dref = Some(Dref::parse(reader, cfg, head.size())?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(dinf)
    }
}
