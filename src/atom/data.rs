use std::fmt;

use super::*;

/// The length of the version, type indicator and locale fields preceding the raw bytes.
pub const HEADER_SIZE: u64 = 8;

// Well-known data type codes, stored in the low 24 bits of the data atom's full head. The
// semantic flag names used by iTunes map onto the same values: ContainsData = 0,
// ContainsText = 1, ContainsJpegData = 13, ContainsPngData = 14, ForTempo = 21,
// ContainsExplicitData = 23, ContainsBmpData = 27.
/// Reserved for use where no type needs to be indicated.
const RESERVED: u32 = 0;
/// UTF-8 without any count or NULL terminator.
const UTF8: u32 = 1;
/// UTF-16 also known as UTF-16BE.
const UTF16: u32 = 2;
/// JPEG in a JFIF wrapper.
const JPEG: u32 = 13;
/// PNG in a PNG wrapper.
const PNG: u32 = 14;
/// A big-endian signed integer in 1,2,3 or 4 bytes.
const BE_SIGNED: u32 = 21;
/// Windows bitmap format graphics.
const BMP: u32 = 27;

/// The typed payload of a `data` atom.
///
/// The payload starts 8 bytes after the atom head: a full head whose flags carry the type code,
/// followed by a reserved 4 byte locale field.
#[derive(Clone, Eq, PartialEq)]
pub enum Data {
    /// Data of an unspecified type, used for track/disc numbers and standard genre codes.
    Reserved(Vec<u8>),
    /// A utf-8 encoded string.
    Utf8(String),
    /// A utf-16 encoded string.
    Utf16(String),
    /// A JPEG image. The type is more of a hint, many encoders use any of the image formats for
    /// all kinds of image data.
    Jpeg(Vec<u8>),
    /// A PNG image.
    Png(Vec<u8>),
    /// A BMP image.
    Bmp(Vec<u8>),
    /// A big-endian signed integer in 1, 2, 3 or 4 bytes, also used for tempo and the
    /// compilation flag.
    BeSigned(Vec<u8>),
    /// A value containing an unknown data type code and the raw data.
    Unknown {
        /// The data type code.
        code: u32,
        /// The data.
        data: Vec<u8>,
    },
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reserved(d) => write!(f, "Data::Reserved({d:?})"),
            Self::Utf8(d) => write!(f, "Data::Utf8({d:?})"),
            Self::Utf16(d) => write!(f, "Data::Utf16({d:?})"),
            Self::Jpeg(_) => write!(f, "Data::Jpeg"),
            Self::Png(_) => write!(f, "Data::Png"),
            Self::Bmp(_) => write!(f, "Data::Bmp"),
            Self::BeSigned(d) => write!(f, "Data::BeSigned({d:?})"),
            Self::Unknown { code, data } => {
                f.debug_struct("Data::Unknown").field("code", code).field("data", data).finish()
            }
        }
    }
}

impl Atom for Data {
    const FOURCC: Fourcc = DATA;
}

impl Data {
    /// The well-known type code stored in the atom's flags.
    const fn type_code(&self) -> u32 {
        match self {
            Self::Reserved(_) => RESERVED,
            Self::Utf8(_) => UTF8,
            Self::Utf16(_) => UTF16,
            Self::Jpeg(_) => JPEG,
            Self::Png(_) => PNG,
            Self::Bmp(_) => BMP,
            Self::BeSigned(_) => BE_SIGNED,
            Self::Unknown { code, .. } => *code,
        }
    }

    pub(crate) fn parse(
        reader: &mut (impl Read + Seek),
        cfg: &ParseConfig<'_>,
        size: Size,
    ) -> crate::Result<Self> {
        let (version, flags) = parse_full_head(reader)?;
        if version != 0 {
            return Err(crate::Error::new(
                ErrorKind::UnknownVersion(version),
                format!("Data atom (data) version {version} is not supported"),
            ));
        }
        let code = u32::from_be_bytes([0, flags[0], flags[1], flags[2]]);

        reader.skip(4)?; // language and country qualifier

        let len = size.content_len() - HEADER_SIZE;
        Self::parse_payload(reader, code, len, cfg.cfg.read_image_data)
    }

    /// Decodes the raw payload according to the well-known type code.
    fn parse_payload(
        reader: &mut (impl Read + Seek),
        code: u32,
        len: u64,
        keep_images: bool,
    ) -> crate::Result<Self> {
        Ok(match code {
            RESERVED => Self::Reserved(reader.read_bytes(len)?),
            UTF8 => Self::Utf8(reader.read_utf8(len)?),
            UTF16 => Self::Utf16(reader.read_be_utf16(len)?),
            BE_SIGNED => Self::BeSigned(reader.read_bytes(len)?),
            JPEG => Self::Jpeg(skim_image(reader, keep_images, len)?),
            PNG => Self::Png(skim_image(reader, keep_images, len)?),
            BMP => Self::Bmp(skim_image(reader, keep_images, len)?),
            _ => {
                debug!(code, "unknown data atom type");
                Self::Unknown { code, data: reader.read_bytes(len)? }
            }
        })
    }

    pub(crate) fn write(&self, writer: &mut impl Write) -> crate::Result<()> {
        write_head(writer, Head::new(false, self.len(), DATA))?;
        writer.write_u32::<BigEndian>(self.type_code())?;
        writer.write_all(&[0; 4])?; // language and country qualifier

        match self {
            Self::Utf8(s) => writer.write_utf8(s)?,
            Self::Utf16(s) => writer.write_be_utf16(s)?,
            Self::Reserved(v)
            | Self::Jpeg(v)
            | Self::Png(v)
            | Self::Bmp(v)
            | Self::BeSigned(v)
            | Self::Unknown { data: v, .. } => writer.write_all(v)?,
        }

        Ok(())
    }

    /// Returns the external length of the atom in bytes.
    pub fn len(&self) -> u64 {
        8 + HEADER_SIZE + self.data_len()
    }

    /// Returns the length of the raw data (without version, datatype and locale header) in bytes.
    pub fn data_len(&self) -> u64 {
        (match self {
            Self::Utf8(s) => s.len(),
            Self::Utf16(s) => 2 * s.encode_utf16().count(),
            Self::Reserved(v)
            | Self::Jpeg(v)
            | Self::Png(v)
            | Self::Bmp(v)
            | Self::BeSigned(v)
            | Self::Unknown { data: v, .. } => v.len(),
        }) as u64
    }

    /// Returns true if the data is of length 0.
    pub fn is_empty(&self) -> bool {
        self.data_len() == 0
    }

    /// Returns true if the data is of type [`Data::Reserved`] or [`Data::BeSigned`].
    pub const fn is_bytes(&self) -> bool {
        matches!(self, Self::Reserved(_) | Self::BeSigned(_))
    }

    /// Returns true if the data is of type [`Data::Utf8`] or [`Data::Utf16`].
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::Utf8(_) | Self::Utf16(_))
    }

    /// Returns true if the data is of type [`Data::Jpeg`], [`Data::Png`] or [`Data::Bmp`].
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Jpeg(_) | Self::Png(_) | Self::Bmp(_))
    }

    /// Returns a byte reference if the data is of type [`Data::Reserved`] or [`Data::BeSigned`].
    pub fn bytes(&self) -> Option<&Vec<u8>> {
        match self {
            Self::Reserved(v) => Some(v),
            Self::BeSigned(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a mutable byte reference if the data is of type [`Data::Reserved`] or
    /// [`Data::BeSigned`].
    pub fn bytes_mut(&mut self) -> Option<&mut Vec<u8>> {
        match self {
            Self::Reserved(v) => Some(v),
            Self::BeSigned(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the owned bytes if the data is of type [`Data::Reserved`] or [`Data::BeSigned`].
    pub fn take_bytes(self) -> Option<Vec<u8>> {
        match self {
            Self::Reserved(v) => Some(v),
            Self::BeSigned(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a string reference if the data is of type [`Data::Utf8`] or [`Data::Utf16`].
    pub fn string(&self) -> Option<&str> {
        match self {
            Self::Utf8(s) => Some(s.as_str()),
            Self::Utf16(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns a mutable string reference if the data is of type [`Data::Utf8`] or
    /// [`Data::Utf16`].
    pub fn string_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Utf8(s) => Some(s),
            Self::Utf16(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the owned string if the data is of type [`Data::Utf8`] or [`Data::Utf16`].
    pub fn take_string(self) -> Option<String> {
        match self {
            Self::Utf8(s) => Some(s),
            Self::Utf16(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a reference if the data is of type [`Data::Jpeg`], [`Data::Png`] or
    /// [`Data::Bmp`].
    pub fn image(&self) -> Option<&Data> {
        self.is_image().then_some(self)
    }

    /// Returns an image data reference if the data is of type [`Data::Jpeg`], [`Data::Png`] or
    /// [`Data::Bmp`].
    pub fn image_data(&self) -> Option<&[u8]> {
        match self {
            Self::Jpeg(v) => Some(v),
            Self::Png(v) => Some(v),
            Self::Bmp(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the owned data if the data is of type [`Data::Jpeg`], [`Data::Png`] or
    /// [`Data::Bmp`].
    pub fn take_image(self) -> Option<Data> {
        match self.is_image() {
            true => Some(self),
            false => None,
        }
    }
}

/// Reads image bytes, or seeks over them when the configuration asked for images to be skipped.
fn skim_image(
    reader: &mut (impl Read + Seek),
    keep: bool,
    len: u64,
) -> crate::Result<Vec<u8>> {
    if !keep {
        reader.skip(len as i64)?;
        return Ok(Vec::new());
    }

    Ok(reader.read_bytes(len)?)
}
