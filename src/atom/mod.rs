pub(crate) use std::io::{Read, Seek, Write};
pub(crate) use std::ops::Deref;

pub(crate) use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
pub(crate) use tracing::debug;

pub(crate) use crate::util::{scale_duration, SeekExt, TextReadExt, TextWriteExt};
pub(crate) use crate::ErrorKind;

use crate::{MediaInfo, Tag};

pub use data::Data;
pub use ident::*;
pub use metaitem::MetaItem;

pub(crate) use co64::*;
pub(crate) use dinf::*;
pub(crate) use dref::*;
pub(crate) use ftyp::*;
pub(crate) use hdlr::*;
pub(crate) use head::*;
pub(crate) use ilst::*;
pub(crate) use mdat::*;
pub(crate) use mdia::*;
pub(crate) use meta::*;
pub(crate) use minf::*;
pub(crate) use moov::*;
pub(crate) use mp4a::*;
pub(crate) use mvhd::*;
pub(crate) use stbl::*;
pub(crate) use stco::*;
pub(crate) use stsd::*;
pub(crate) use text::*;
pub(crate) use trak::*;
pub(crate) use udta::*;
pub(crate) use url::*;
pub(crate) use visual::*;

/// A module for working with identifiers.
pub mod ident;

mod co64;
mod data;
mod dinf;
mod dref;
mod ftyp;
mod hdlr;
mod head;
mod ilst;
mod mdat;
mod mdia;
mod meta;
mod metaitem;
mod minf;
mod moov;
mod mp4a;
mod mvhd;
mod stbl;
mod stco;
mod stsd;
mod text;
mod trak;
mod udta;
mod url;
mod visual;

/// Configuration of a parser traversal.
///
/// The four constructors correspond to the traversal policies of the parser: a head-only scan,
/// the metadata item list, the item list plus movie and codec properties, and everything
/// including the chunk offset tables.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReadConfig {
    /// Whether to read the metadata item list.
    pub read_item_list: bool,
    /// Whether to read movie and codec level properties (`mvhd`, `hdlr`, `stsd`).
    pub read_properties: bool,
    /// Whether to collect the chunk offset tables (`stco`, `co64`).
    pub read_chunk_offsets: bool,
    /// Whether artwork image data is read or skipped.
    pub read_image_data: bool,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self::tag_and_properties()
    }
}

impl ReadConfig {
    /// A head-only traversal recording atom bounds and the `mdat` byte range.
    pub const fn headers_only() -> Self {
        Self {
            read_item_list: false,
            read_properties: false,
            read_chunk_offsets: false,
            read_image_data: false,
        }
    }

    /// Reads the metadata item list and the `mdat` byte range.
    pub const fn tag() -> Self {
        Self {
            read_item_list: true,
            read_properties: false,
            read_chunk_offsets: false,
            read_image_data: true,
        }
    }

    /// Reads the metadata item list as well as movie and codec level properties.
    pub const fn tag_and_properties() -> Self {
        Self {
            read_item_list: true,
            read_properties: true,
            read_chunk_offsets: false,
            read_image_data: true,
        }
    }

    /// Additionally collects every chunk offset table.
    pub const fn chunk_offsets() -> Self {
        Self {
            read_item_list: true,
            read_properties: true,
            read_chunk_offsets: true,
            read_image_data: true,
        }
    }
}

/// The state threaded through a traversal: the user configuration and the handler type
/// inherited from the nearest ancestor `hdlr` atom.
#[derive(Clone, Debug)]
pub(crate) struct ParseConfig<'a> {
    pub cfg: &'a ReadConfig,
    pub handler: Option<Fourcc>,
}

impl<'a> ParseConfig<'a> {
    pub fn new(cfg: &'a ReadConfig) -> Self {
        Self { cfg, handler: None }
    }

    /// Returns a configuration propagating the handler type to every atom below.
    pub fn with_handler(&self, handler: Fourcc) -> ParseConfig<'a> {
        ParseConfig { cfg: self.cfg, handler: Some(handler) }
    }
}

pub(crate) trait Atom {
    const FOURCC: Fourcc;
}

pub(crate) trait ParseAtom: Atom + Sized {
    fn parse(
        reader: &mut (impl Read + Seek),
        cfg: &ParseConfig<'_>,
        size: Size,
    ) -> crate::Result<Self> {
        match Self::parse_atom(reader, cfg, size) {
            Ok(a) => Ok(a),
            Err(e) => Err(crate::Error::new(
                e.kind,
                format!("Error reading {}: {}", Self::FOURCC, e.description),
            )),
        }
    }

    fn parse_atom(
        reader: &mut (impl Read + Seek),
        cfg: &ParseConfig<'_>,
        size: Size,
    ) -> crate::Result<Self>;
}

pub(crate) trait WriteAtom: Atom {
    fn write(&self, writer: &mut impl Write) -> crate::Result<()> {
        match self.write_atom(writer) {
            Ok(()) => Ok(()),
            Err(e) => Err(crate::Error::new(
                e.kind,
                format!("Error writing {}: {}", Self::FOURCC, e.description),
            )),
        }
    }

    fn write_head(&self, writer: &mut impl Write) -> crate::Result<()> {
        write_head(writer, Head::from(self.size(), Self::FOURCC))
    }

    fn write_atom(&self, writer: &mut impl Write) -> crate::Result<()>;

    fn size(&self) -> Size;

    fn len(&self) -> u64 {
        self.size().len()
    }
}

pub(crate) trait FindAtom: Atom {
    type Bounds;

    fn find(reader: &mut (impl Read + Seek), size: Size) -> crate::Result<Self::Bounds> {
        match Self::find_atom(reader, size) {
            Ok(b) => Ok(b),
            Err(e) => Err(crate::Error::new(
                e.kind,
                format!("Error finding {}: {}", Self::FOURCC, e.description),
            )),
        }
    }

    fn find_atom(reader: &mut (impl Read + Seek), size: Size) -> crate::Result<Self::Bounds>;
}

/// Walks the children of a container atom whose head was already consumed.
///
/// The callback gets the reader and the child's head and reports whether it consumed the child,
/// anything it declines is skipped. `preamble` is the number of content bytes (e.g. a full atom
/// head) the caller read before the first child. A child declaring a length of 0 extends to the
/// end of the file and terminates the walk without being handed to the callback. The reader
/// always ends up at the container's declared end, and the container's bounds are returned for
/// callers that record them.
pub(crate) fn parse_children<R: Read + Seek>(
    reader: &mut R,
    size: Size,
    fourcc: Fourcc,
    preamble: u64,
    mut child: impl FnMut(&mut R, Head) -> crate::Result<bool>,
) -> crate::Result<AtomBounds> {
    let pos = reader.stream_position()? - preamble - size.head_len();
    let bounds = AtomBounds::new(pos, Head::from(size, fourcc));

    let mut parsed_bytes = preamble;
    while parsed_bytes < size.content_len() {
        let head = parse_head(reader)?;
        if head.until_eof() {
            break;
        }

        if !child(reader, head)? {
            reader.skip(head.content_len() as i64)?;
        }

        parsed_bytes += head.len();
    }

    seek_to_end(reader, &bounds)?;

    Ok(bounds)
}

pub(crate) trait LenOrZero {
    fn len_or_zero(&self) -> u64;
}

impl<T: WriteAtom> LenOrZero for Option<T> {
    fn len_or_zero(&self) -> u64 {
        self.as_ref().map_or(0, |a| a.len())
    }
}

/// The parsed top level structure of a file.
pub(crate) struct Mp4Data {
    pub ftyp: String,
    pub moov: Option<Moov>,
    pub mdat: Option<MdatBounds>,
    /// The fault that stopped the scan, if any. Everything decoded up to it is retained.
    pub fault: Option<crate::Error>,
}

/// Attempts to parse the top level atom structure from the reader.
///
/// The reader has to start with a filetype (`ftyp`) atom, otherwise parsing fails with
/// [`ErrorKind::NoFiletype`]. Only the well known container chain is descended into, any other
/// atom is skipped. An atom declaring a length of 0 occupies the rest of the file and terminates
/// the scan. A fault below the filetype atom does not fail the read, the scan stops and the
/// fault is recorded so the caller can mark the file as corrupt.
pub(crate) fn read_mp4(
    reader: &mut (impl Read + Seek),
    cfg: &ReadConfig,
) -> crate::Result<Mp4Data> {
    let ftyp = Ftyp::parse_next(reader)?;

    let pcfg = ParseConfig::new(cfg);
    let len = reader.remaining_len()?;
    let mut moov = None;
    let mut mdat = None;

    let scan = (|| -> crate::Result<()> {
        let mut parsed_bytes = 0;
        while parsed_bytes < len {
            let head = parse_head(reader)?;

            match head.fourcc() {
                MOVIE => moov = Some(Moov::parse(reader, &pcfg, head.size())?),
                MEDIA_DATA => mdat = Some(Mdat::find(reader, head.size())?),
                _ => reader.skip(head.content_len() as i64)?,
            }

            if head.until_eof() {
                break;
            }
            parsed_bytes += head.len();
        }
        Ok(())
    })();

    Ok(Mp4Data { ftyp, moov, mdat, fault: scan.err() })
}

/// Attempts to read a MPEG-4 metadata tag from the reader.
pub(crate) fn read_tag_from(
    reader: &mut (impl Read + Seek),
    cfg: &ReadConfig,
) -> crate::Result<Tag> {
    let data = read_mp4(reader, cfg)?;
    if let Some(fault) = &data.fault {
        debug!(%fault, "scan stopped early, tag may be incomplete");
    }
    Ok(make_tag(data))
}

/// Builds the tag façade over the parsed structure: movie and codec properties are extracted and
/// the shallowest item list bearing user data atom is selected.
pub(crate) fn make_tag(data: Mp4Data) -> Tag {
    let mut info = MediaInfo::default();
    let mut items = Vec::new();

    if let Some(moov) = data.moov {
        if let Some(mvhd) = &moov.mvhd {
            info.duration = Some(scale_duration(mvhd.timescale, mvhd.duration));
        }
        for trak in &moov.trak {
            let stsd = trak
                .mdia
                .as_ref()
                .and_then(|a| a.minf.as_ref())
                .and_then(|a| a.stbl.as_ref())
                .and_then(|a| a.stsd.as_ref());
            let Some(stsd) = stsd else { continue };

            for entry in &stsd.entries {
                match entry {
                    SampleEntry::Audio(a) => {
                        info.audio.channel_count = Some(a.channel_count);
                        info.audio.sample_size = Some(a.sample_size);
                        info.audio.sample_rate = Some(a.sample_rate);
                        info.audio.max_bitrate = a.max_bitrate;
                        info.audio.avg_bitrate = a.avg_bitrate;
                    }
                    SampleEntry::Visual(v) => {
                        info.video.width = Some(v.width);
                        info.video.height = Some(v.height);
                    }
                    SampleEntry::Text(_) | SampleEntry::Unknown { .. } => (),
                }
            }
        }

        // prefer the user data directly below the movie atom over one nested inside a track
        let udta = match moov.udta {
            Some(u) if u.contains_item_list() => Some(u),
            moov_udta => moov
                .trak
                .into_iter()
                .find_map(|t| t.udta.filter(Udta::contains_item_list))
                .or(moov_udta),
        };

        if let Some(ilst) = udta.and_then(|u| u.meta).and_then(|m| m.ilst) {
            items = ilst.items;
        }
    }

    Tag::new(data.ftyp, info, items)
}

/// The bounds structure used to patch a file in place: every atom on the path from the movie
/// atom down to the item list and the chunk offset tables.
pub(crate) struct FoundMp4 {
    pub moov: Option<MoovBounds>,
    pub mdat_pos: Option<u64>,
}

/// Scans the top level structure recording atom bounds without materializing contents.
pub(crate) fn find_mp4(reader: &mut (impl Read + Seek)) -> crate::Result<FoundMp4> {
    Ftyp::parse_next(reader)?;

    let len = reader.remaining_len()?;
    let mut moov = None;
    let mut mdat_pos = None;
    let mut parsed_bytes = 0;

    while parsed_bytes < len {
        let head = parse_head(reader)?;

        match head.fourcc() {
            MOVIE => moov = Some(Moov::find(reader, head.size())?),
            MEDIA_DATA => mdat_pos = Some(Mdat::find(reader, head.size())?.pos),
            _ => reader.skip(head.content_len() as i64)?,
        }

        if head.until_eof() {
            break;
        }
        parsed_bytes += head.len();
    }

    Ok(FoundMp4 { moov, mdat_pos })
}
