use super::*;

/// The filetype atom: major brand, version and compatible brands, kept as one string.
pub struct Ftyp;

impl Atom for Ftyp {
    const FOURCC: Fourcc = FILETYPE;
}

impl Ftyp {
    /// Parses the filetype atom that every file has to start with. Anything else fails with
    /// [`ErrorKind::NoFiletype`].
    pub fn parse_next(reader: &mut (impl Read + Seek)) -> crate::Result<String> {
        let head = match parse_head(reader) {
            Ok(h) => h,
            Err(e) => {
                return Err(crate::Error::new(
                    ErrorKind::NoFiletype,
                    format!("File does not start with a filetype atom: {}", e.description),
                ));
            }
        };

        if head.fourcc() != FILETYPE {
            return Err(crate::Error::new(
                ErrorKind::NoFiletype,
                format!("File starts with a '{}' atom instead of a filetype atom", head.fourcc()),
            ));
        }

        // brand bytes aren't guaranteed to be valid utf-8
        reader.read_latin1(head.content_len())
    }
}
