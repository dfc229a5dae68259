//! Visual sample entry
//!
//! ```md
//! 6 bytes reserved
//! 2 bytes data reference index
//! 16 bytes pre-defined and reserved
//! 2 bytes width
//! 2 bytes height
//! ... resolution, frame count, compressor name, depth
//! ```
use super::*;

/// The fields of a visual sample entry inside the sample description, chosen for every entry
/// below a `vide` handler.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VisualSampleEntry {
    /// The sample entry identifier (`avc1`, `hev1`, ...).
    pub entry_type: Fourcc,
    pub data_reference_index: u16,
    /// The frame width in pixels.
    pub width: u16,
    /// The frame height in pixels.
    pub height: u16,
}

impl VisualSampleEntry {
    /// Parses a visual sample entry whose head was just read.
    pub fn parse(reader: &mut (impl Read + Seek), head: Head) -> crate::Result<Self> {
        let bounds = find_bounds(reader, head.size(), head.fourcc())?;
        let mut entry = Self { entry_type: head.fourcc(), ..Self::default() };

        reader.skip(6)?; // reserved
        entry.data_reference_index = reader.read_u16::<BigEndian>()?;
        reader.skip(16)?; // pre-defined and reserved
        entry.width = reader.read_u16::<BigEndian>()?;
        entry.height = reader.read_u16::<BigEndian>()?;

        seek_to_end(reader, &bounds)?;

        Ok(entry)
    }
}
