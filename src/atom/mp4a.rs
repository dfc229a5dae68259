//! Audio sample entry
//!
//! ```md
//! 6 bytes reserved
//! 2 bytes data reference index
//! 8 bytes version, revision and vendor
//! 2 bytes channel count
//! 2 bytes sample size
//! 4 bytes compression id and packet size
//! 4 bytes sample rate (16.16 fixed point)
//! │
//! └─ esds atom (mp4a entries)
//!    4 bytes len
//!    4 bytes ident
//!    1 byte version
//!    3 bytes flags
//!    │
//!    └─ elementary stream descriptor
//!       1 byte tag (0x03)
//!       1~4 bytes len
//!       2 bytes id
//!       1 byte flag
//!       │
//!       ├─ decoder config descriptor
//!       │  1 byte tag (0x04)
//!       │  1~4 bytes len
//!       │  1 byte object type indication
//!       │  1 byte stream type
//!       │  3 bytes buffer size
//!       │  4 bytes maximum bitrate
//!       │  4 bytes average bitrate
//!       │
//!       └─ sl config descriptor
//!          1 byte tag (0x06)
//!          1~4 bytes len
//! ```
use super::*;

/// Elementary stream descriptor tag.
const ELEMENTARY_STREAM_DESCRIPTOR: u8 = 0x03;
/// Decoder config descriptor tag.
const DECODER_CONFIG_DESCRIPTOR: u8 = 0x04;

/// The fields of an audio sample entry inside the sample description, chosen for every entry
/// below a `soun` or `alis` handler.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AudioSampleEntry {
    /// The sample entry identifier (`mp4a`, `alac`, ...).
    pub entry_type: Fourcc,
    pub data_reference_index: u16,
    pub channel_count: u16,
    /// The sample size in bits.
    pub sample_size: u16,
    /// The sample rate in Hz, the integer part of the 16.16 fixed point field.
    pub sample_rate: u32,
    pub max_bitrate: Option<u32>,
    pub avg_bitrate: Option<u32>,
}

impl AudioSampleEntry {
    /// Parses an audio sample entry whose head was just read. Bitrates are decoded from the
    /// elementary stream descriptor of `mp4a` entries, errors inside the descriptor hierarchy
    /// propagate.
    pub fn parse(reader: &mut (impl Read + Seek), head: Head) -> crate::Result<Self> {
        let bounds = find_bounds(reader, head.size(), head.fourcc())?;
        let mut entry = Self { entry_type: head.fourcc(), ..Self::default() };

        reader.skip(6)?; // reserved
        entry.data_reference_index = reader.read_u16::<BigEndian>()?;
        reader.skip(8)?; // version, revision, vendor
        entry.channel_count = reader.read_u16::<BigEndian>()?;
        entry.sample_size = reader.read_u16::<BigEndian>()?;
        reader.skip(4)?; // compression id, packet size
        let fixed_rate = reader.read_u32::<BigEndian>()?;
        entry.sample_rate = fixed_rate >> 16;

        if head.fourcc() == MP4_AUDIO {
            let esds = parse_head(reader)?;
            if esds.fourcc() != ELEMENTARY_STREAM_DESCRIPTION {
                return Err(crate::Error::new(
                    ErrorKind::AtomNotFound(ELEMENTARY_STREAM_DESCRIPTION),
                    "Missing esds atom",
                ));
            }
            parse_esds(reader, &mut entry)?;
        }

        seek_to_end(reader, &bounds)?;

        Ok(entry)
    }
}

fn parse_esds(reader: &mut (impl Read + Seek), entry: &mut AudioSampleEntry) -> crate::Result<()> {
    let (version, _) = parse_full_head(reader)?;

    if version != 0 {
        return Err(crate::Error::new(
            ErrorKind::UnknownVersion(version),
            "Unknown elementary stream description (esds) version",
        ));
    }

    let (tag, _, _) = parse_desc_head(reader)?;
    if tag != ELEMENTARY_STREAM_DESCRIPTOR {
        return Err(crate::Error::new(
            ErrorKind::DescriptorNotFound(ELEMENTARY_STREAM_DESCRIPTOR),
            "Missing elementary stream descriptor",
        ));
    }

    reader.skip(3)?; // elementary stream id, stream priority

    let (tag, _, _) = parse_desc_head(reader)?;
    if tag != DECODER_CONFIG_DESCRIPTOR {
        return Err(crate::Error::new(
            ErrorKind::DescriptorNotFound(DECODER_CONFIG_DESCRIPTOR),
            "Missing decoder config descriptor",
        ));
    }

    reader.skip(5)?; // object type indication, stream type, buffer size
    entry.max_bitrate = Some(reader.read_u32::<BigEndian>()?);
    entry.avg_bitrate = Some(reader.read_u32::<BigEndian>()?);

    Ok(())
}

/// Attempts to parse a descriptor head: a 1 byte tag and a length stored in 1 to 4 bytes of
/// which the lower 7 bits carry the value and the high bit marks a continuation.
fn parse_desc_head(reader: &mut impl Read) -> crate::Result<(u8, u64, u64)> {
    let tag = reader.read_u8()?;

    let mut head_len = 1;
    let mut len: u64 = 0;
    while head_len < 5 {
        let b = reader.read_u8()?;
        len = (len << 7) | (b & 0x7F) as u64;
        head_len += 1;
        if b & 0x80 == 0 {
            break;
        }
    }

    Ok((tag, head_len, len))
}
