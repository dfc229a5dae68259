use std::array::TryFromSliceError;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

/// (`ftyp`) Identifier of an atom carrying information about the filetype.
pub(crate) const FILETYPE: Fourcc = Fourcc(*b"ftyp");
/// (`mdat`)
pub(crate) const MEDIA_DATA: Fourcc = Fourcc(*b"mdat");
/// (`moov`) Identifier of an atom containing a structure of children storing metadata.
pub(crate) const MOVIE: Fourcc = Fourcc(*b"moov");
/// (`mvhd`) Identifier of an atom containing information about the whole movie (or audio file).
pub(crate) const MOVIE_HEADER: Fourcc = Fourcc(*b"mvhd");
/// (`trak`) Identifier of an atom containing information about a single track.
pub(crate) const TRACK: Fourcc = Fourcc(*b"trak");
/// (`mdia`) Identifier of an atom containing information about a tracks media type and data.
pub(crate) const MEDIA: Fourcc = Fourcc(*b"mdia");
/// (`minf`)
pub(crate) const MEDIA_INFORMATION: Fourcc = Fourcc(*b"minf");
/// (`stbl`)
pub(crate) const SAMPLE_TABLE: Fourcc = Fourcc(*b"stbl");
/// (`stco`)
pub(crate) const SAMPLE_TABLE_CHUNK_OFFSET: Fourcc = Fourcc(*b"stco");
/// (`co64`)
pub(crate) const SAMPLE_TABLE_CHUNK_OFFSET_64: Fourcc = Fourcc(*b"co64");
/// (`stsd`)
pub(crate) const SAMPLE_TABLE_SAMPLE_DESCRIPTION: Fourcc = Fourcc(*b"stsd");
/// (`mp4a`)
pub(crate) const MP4_AUDIO: Fourcc = Fourcc(*b"mp4a");
/// (`esds`)
pub(crate) const ELEMENTARY_STREAM_DESCRIPTION: Fourcc = Fourcc(*b"esds");
/// (`dinf`)
pub(crate) const DATA_INFORMATION: Fourcc = Fourcc(*b"dinf");
/// (`dref`)
pub(crate) const DATA_REFERENCE: Fourcc = Fourcc(*b"dref");
/// (`udta`) Identifier of an atom containing user metadata.
pub(crate) const USER_DATA: Fourcc = Fourcc(*b"udta");
/// (`meta`) Identifier of an atom containing a metadata item list.
pub(crate) const METADATA: Fourcc = Fourcc(*b"meta");
/// (`hdlr`) Identifier of an atom specifying the handler component that should interpret the
/// medias data.
pub(crate) const HANDLER_REFERENCE: Fourcc = Fourcc(*b"hdlr");
/// (`ilst`) Identifier of an atom containing a list of metadata atoms.
pub(crate) const ITEM_LIST: Fourcc = Fourcc(*b"ilst");
/// (`data`) Identifier of an atom containing typed data.
pub(crate) const DATA: Fourcc = Fourcc(*b"data");
/// (`mean`)
pub(crate) const MEAN: Fourcc = Fourcc(*b"mean");
/// (`name`)
pub(crate) const NAME: Fourcc = Fourcc(*b"name");
/// (`free`)
pub(crate) const FREE: Fourcc = Fourcc(*b"free");
/// (`skip`)
pub(crate) const SKIP: Fourcc = Fourcc(*b"skip");
/// (`text`)
pub(crate) const TEXT: Fourcc = Fourcc(*b"text");
/// (`url `)
pub(crate) const URL: Fourcc = Fourcc(*b"url ");
/// (`uuid`) Identifier of an atom whose actual type is a 16 byte UUID following the head.
pub(crate) const UUID: Fourcc = Fourcc(*b"uuid");

/// (`soun`) Handler type of an audio track.
pub const HANDLER_SOUND: Fourcc = Fourcc(*b"soun");
/// (`vide`) Handler type of a video track.
pub const HANDLER_VIDEO: Fourcc = Fourcc(*b"vide");
/// (`alis`) Handler type of an alias track, treated as audio.
pub const HANDLER_ALIAS: Fourcc = Fourcc(*b"alis");
/// (`mdir`) Handler type of the iTunes metadata directory.
pub const HANDLER_METADATA: Fourcc = Fourcc(*b"mdir");

/// (`----`)
pub const FREEFORM: Fourcc = Fourcc(*b"----");

/// (`©alb`)
pub const ALBUM: Fourcc = Fourcc(*b"\xa9alb");
/// (`aART`)
pub const ALBUM_ARTIST: Fourcc = Fourcc(*b"aART");
/// (`©ART`)
pub const ARTIST: Fourcc = Fourcc(*b"\xa9ART");
/// (`covr`)
pub const ARTWORK: Fourcc = Fourcc(*b"covr");
/// (`tmpo`)
pub const BPM: Fourcc = Fourcc(*b"tmpo");
/// (`©cmt`)
pub const COMMENT: Fourcc = Fourcc(*b"\xa9cmt");
/// (`cpil`)
pub const COMPILATION: Fourcc = Fourcc(*b"cpil");
/// (`©wrt`)
pub const COMPOSER: Fourcc = Fourcc(*b"\xa9wrt");
/// (`cond`)
pub const CONDUCTOR: Fourcc = Fourcc(*b"cond");
/// (`cprt`)
pub const COPYRIGHT: Fourcc = Fourcc(*b"cprt");
/// (`©gen`)
pub const CUSTOM_GENRE: Fourcc = Fourcc(*b"\xa9gen");
/// (`dtag`)
pub const DATE_TAGGED: Fourcc = Fourcc(*b"dtag");
/// (`disk`)
pub const DISC_NUMBER: Fourcc = Fourcc(*b"disk");
/// (`©too`)
pub const ENCODER: Fourcc = Fourcc(*b"\xa9too");
/// (`©grp`)
pub const GROUPING: Fourcc = Fourcc(*b"\xa9grp");
/// (`©lyr`)
pub const LYRICS: Fourcc = Fourcc(*b"\xa9lyr");
/// (`role`)
pub const PERFORMERS_ROLE: Fourcc = Fourcc(*b"role");
/// (`gnre`)
pub const STANDARD_GENRE: Fourcc = Fourcc(*b"gnre");
/// (`©nam`)
pub const TITLE: Fourcc = Fourcc(*b"\xa9nam");
/// (`trkn`)
pub const TRACK_NUMBER: Fourcc = Fourcc(*b"trkn");
/// (`©day`)
pub const YEAR: Fourcc = Fourcc(*b"\xa9day");

// Sort order atoms
/// (`soal`)
pub const ALBUM_SORT: Fourcc = Fourcc(*b"soal");
/// (`soaa`)
pub const ALBUM_ARTIST_SORT: Fourcc = Fourcc(*b"soaa");
/// (`soar`)
pub const ARTIST_SORT: Fourcc = Fourcc(*b"soar");
/// (`soco`)
pub const COMPOSER_SORT: Fourcc = Fourcc(*b"soco");
/// (`sonm`)
pub const TITLE_SORT: Fourcc = Fourcc(*b"sonm");

/// Mean string of most freeform identifiers (`com.apple.iTunes`).
pub const APPLE_ITUNES_MEAN: &str = "com.apple.iTunes";

/// (`----:com.apple.iTunes:ISRC`)
pub const ISRC: FreeformIdent = FreeformIdent::new(APPLE_ITUNES_MEAN, "ISRC");
/// (`----:com.apple.iTunes:LYRICIST`)
pub const LYRICIST: FreeformIdent = FreeformIdent::new(APPLE_ITUNES_MEAN, "LYRICIST");
/// (`----:com.apple.iTunes:initialkey`)
pub const INITIAL_KEY: FreeformIdent = FreeformIdent::new(APPLE_ITUNES_MEAN, "initialkey");
/// (`----:com.apple.iTunes:publisher`)
pub const PUBLISHER: FreeformIdent = FreeformIdent::new(APPLE_ITUNES_MEAN, "publisher");
/// (`----:com.apple.iTunes:REMIXEDBY`)
pub const REMIXED_BY: FreeformIdent = FreeformIdent::new(APPLE_ITUNES_MEAN, "REMIXEDBY");
/// (`----:com.apple.iTunes:ASIN`)
pub const AMAZON_ID: FreeformIdent = FreeformIdent::new(APPLE_ITUNES_MEAN, "ASIN");
/// (`----:com.apple.iTunes:MusicBrainz Track Id`)
pub const MUSICBRAINZ_TRACK_ID: FreeformIdent =
    FreeformIdent::new(APPLE_ITUNES_MEAN, "MusicBrainz Track Id");
/// (`----:com.apple.iTunes:MusicBrainz Album Id`)
pub const MUSICBRAINZ_RELEASE_ID: FreeformIdent =
    FreeformIdent::new(APPLE_ITUNES_MEAN, "MusicBrainz Album Id");
/// (`----:com.apple.iTunes:MusicBrainz Artist Id`)
pub const MUSICBRAINZ_ARTIST_ID: FreeformIdent =
    FreeformIdent::new(APPLE_ITUNES_MEAN, "MusicBrainz Artist Id");
/// (`----:com.apple.iTunes:MusicBrainz Album Artist Id`)
pub const MUSICBRAINZ_RELEASE_ARTIST_ID: FreeformIdent =
    FreeformIdent::new(APPLE_ITUNES_MEAN, "MusicBrainz Album Artist Id");
/// (`----:com.apple.iTunes:MusicBrainz Release Group Id`)
pub const MUSICBRAINZ_RELEASE_GROUP_ID: FreeformIdent =
    FreeformIdent::new(APPLE_ITUNES_MEAN, "MusicBrainz Release Group Id");
/// (`----:com.apple.iTunes:MusicBrainz Disc Id`)
pub const MUSICBRAINZ_DISC_ID: FreeformIdent =
    FreeformIdent::new(APPLE_ITUNES_MEAN, "MusicBrainz Disc Id");
/// (`----:com.apple.iTunes:MusicIP PUID`)
pub const MUSICIP_PUID: FreeformIdent = FreeformIdent::new(APPLE_ITUNES_MEAN, "MusicIP PUID");
/// (`----:com.apple.iTunes:REPLAYGAIN_TRACK_GAIN`)
pub const REPLAYGAIN_TRACK_GAIN: FreeformIdent =
    FreeformIdent::new(APPLE_ITUNES_MEAN, "REPLAYGAIN_TRACK_GAIN");
/// (`----:com.apple.iTunes:REPLAYGAIN_TRACK_PEAK`)
pub const REPLAYGAIN_TRACK_PEAK: FreeformIdent =
    FreeformIdent::new(APPLE_ITUNES_MEAN, "REPLAYGAIN_TRACK_PEAK");
/// (`----:com.apple.iTunes:REPLAYGAIN_ALBUM_GAIN`)
pub const REPLAYGAIN_ALBUM_GAIN: FreeformIdent =
    FreeformIdent::new(APPLE_ITUNES_MEAN, "REPLAYGAIN_ALBUM_GAIN");
/// (`----:com.apple.iTunes:REPLAYGAIN_ALBUM_PEAK`)
pub const REPLAYGAIN_ALBUM_PEAK: FreeformIdent =
    FreeformIdent::new(APPLE_ITUNES_MEAN, "REPLAYGAIN_ALBUM_PEAK");

/// A trait providing information about an identifier.
pub trait Ident {
    /// Returns a 4 byte atom identifier.
    fn fourcc(&self) -> Option<Fourcc>;
    /// Returns a freeform identifier.
    fn freeform(&self) -> Option<FreeformIdent<'_>>;
}

/// Returns whether the identifiers match.
pub fn idents_match(a: &impl Ident, b: &impl Ident) -> bool {
    a.fourcc() == b.fourcc()
        && match (a.freeform(), b.freeform()) {
            (Some(a), Some(b)) => a.mean == b.mean && a.name.eq_ignore_ascii_case(b.name),
            (None, None) => true,
            _ => false,
        }
}

/// A 4 byte atom identifier (four character code).
///
/// 3 byte legacy iTunes identifiers are canonicalized by prefixing the `©` (0xA9) sigil,
/// comparisons are byte-wise on the canonical form.
#[derive(Clone, Copy, Default, Eq, PartialEq)]
pub struct Fourcc(pub [u8; 4]);

impl Deref for Fourcc {
    type Target = [u8; 4];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Fourcc {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Ident for Fourcc {
    fn fourcc(&self) -> Option<Fourcc> {
        Some(*self)
    }

    fn freeform(&self) -> Option<FreeformIdent<'_>> {
        None
    }
}

impl FromStr for Fourcc {
    type Err = TryFromSliceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if let [a, b, c] = *bytes {
            return Ok(Fourcc([0xa9, a, b, c]));
        }
        Ok(Fourcc(bytes.try_into()?))
    }
}

impl fmt::Debug for Fourcc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fourcc({})", self.0.iter().map(|b| char::from(*b)).collect::<String>())
    }
}

impl fmt::Display for Fourcc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().map(|b| char::from(*b)).collect::<String>())
    }
}

/// An identifier of a freeform (`----`) atom containing borrowed mean and name strings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FreeformIdent<'a> {
    /// The mean string, typically in reverse domain notation.
    pub mean: &'a str,
    /// The name string used to identify the freeform atom.
    pub name: &'a str,
}

impl Ident for FreeformIdent<'_> {
    fn fourcc(&self) -> Option<Fourcc> {
        None
    }

    fn freeform(&self) -> Option<FreeformIdent<'_>> {
        Some(self.clone())
    }
}

impl fmt::Display for FreeformIdent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "----:{}:{}", self.mean, self.name)
    }
}

impl<'a> FreeformIdent<'a> {
    /// Creates a new freeform ident containing the mean and name as borrowed strings.
    pub const fn new(mean: &'a str, name: &'a str) -> Self {
        Self { mean, name }
    }
}

/// An identifier for metadata item data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataIdent {
    /// A standard identifier containing a 4 byte atom identifier.
    Fourcc(Fourcc),
    /// An identifier of a freeform (`----`) atom containing owned mean and name strings.
    Freeform {
        /// The mean string, typically in reverse domain notation.
        mean: String,
        /// The name string used to identify the freeform atom.
        name: String,
    },
}

impl Ident for DataIdent {
    fn fourcc(&self) -> Option<Fourcc> {
        match self {
            Self::Fourcc(i) => Some(*i),
            Self::Freeform { .. } => None,
        }
    }

    fn freeform(&self) -> Option<FreeformIdent<'_>> {
        match self {
            Self::Fourcc(_) => None,
            Self::Freeform { mean, name } => Some(FreeformIdent::new(mean.as_str(), name.as_str())),
        }
    }
}

impl fmt::Display for DataIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fourcc(ident) => write!(f, "{ident}"),
            Self::Freeform { mean, name } => write!(f, "----:{mean}:{name}"),
        }
    }
}

impl From<Fourcc> for DataIdent {
    fn from(value: Fourcc) -> Self {
        Self::Fourcc(value)
    }
}

impl From<FreeformIdent<'_>> for DataIdent {
    fn from(value: FreeformIdent<'_>) -> Self {
        Self::freeform(value.mean, value.name)
    }
}

impl From<&FreeformIdent<'_>> for DataIdent {
    fn from(value: &FreeformIdent<'_>) -> Self {
        Self::freeform(value.mean, value.name)
    }
}

impl DataIdent {
    /// Creates a new identifier of type [`DataIdent::Freeform`] containing the owned mean and
    /// name string.
    pub fn freeform(mean: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Freeform { mean: mean.into(), name: name.into() }
    }

    /// Creates a new identifier of type [`DataIdent::Fourcc`] containing an atom identifier with
    /// the 4 byte identifier.
    pub const fn fourcc(bytes: [u8; 4]) -> Self {
        Self::Fourcc(Fourcc(bytes))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn legacy_ident_is_canonicalized() {
        let legacy: Fourcc = "alb".parse().unwrap();
        assert_eq!(legacy, ALBUM);
        let full: Fourcc = "trkn".parse().unwrap();
        assert_eq!(full, TRACK_NUMBER);
    }

    #[test]
    fn freeform_name_matches_case_insensitively() {
        let a = DataIdent::freeform(APPLE_ITUNES_MEAN, "MusicBrainz Track Id");
        let b = FreeformIdent::new(APPLE_ITUNES_MEAN, "MUSICBRAINZ TRACK ID");
        assert!(idents_match(&a, &b));
    }
}
