use super::*;

/// The byte range of the media data, the invariant region a metadata write must not move.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MdatBounds {
    pub pos: u64,
    pub end: u64,
}

/// A marker for the media data atom, only its bounds are ever recorded.
pub struct Mdat;

impl Atom for Mdat {
    const FOURCC: Fourcc = MEDIA_DATA;
}

impl FindAtom for Mdat {
    type Bounds = MdatBounds;

    fn find_atom(reader: &mut (impl Read + Seek), size: Size) -> crate::Result<Self::Bounds> {
        let bounds = find_bounds(reader, size, Self::FOURCC)?;
        reader.skip(size.content_len() as i64)?;
        Ok(MdatBounds { pos: bounds.pos(), end: bounds.end() })
    }
}
