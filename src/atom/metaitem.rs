//! A metadata item can either have a plain fourcc as it's identifier:
//! **** (any fourcc)
//! └─ data
//!
//! Or it can contain a mean and name children atom which make up the identifier.
//! ---- (freeform fourcc)
//! ├─ mean
//! ├─ name
//! └─ data
use super::*;

/// A struct representing a metadata item, containing data that is associated with an identifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MetaItem {
    /// The identifier of the atom.
    pub ident: DataIdent,
    /// The data contained in the atom.
    pub data: Vec<Data>,
}

impl MetaItem {
    /// Creates a metadata item with the identifier and data.
    pub const fn new(ident: DataIdent, data: Vec<Data>) -> Self {
        Self { ident, data }
    }

    /// Returns the external length of the atom in bytes.
    pub fn len(&self) -> u64 {
        let data_len: u64 = self.data.iter().map(Data::len).sum();

        match &self.ident {
            DataIdent::Fourcc(_) => 8 + data_len,
            DataIdent::Freeform { mean, name } => {
                8 + info_atom_len(mean) + info_atom_len(name) + data_len
            }
        }
    }

    pub(crate) fn parse(
        reader: &mut (impl Read + Seek),
        cfg: &ParseConfig<'_>,
        head: Head,
    ) -> crate::Result<Self> {
        let mut data = Vec::new();
        let mut mean: Option<String> = None;
        let mut name: Option<String> = None;

        parse_children(reader, head.size(), head.fourcc(), 0, |reader, child| {
            match child.fourcc() {
                DATA => data.push(Data::parse(reader, cfg, child.size())?),
                MEAN => mean = Some(parse_info_atom(reader, child, "mean")?),
                NAME => name = Some(parse_info_atom(reader, child, "name")?),
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        let ident = match (head.fourcc(), mean, name) {
            (FREEFORM, Some(mean), Some(name)) => DataIdent::Freeform { mean, name },
            (fourcc, _, _) => DataIdent::Fourcc(fourcc),
        };

        Ok(Self { ident, data })
    }

    /// Attempts to write the metadata item to the writer.
    pub(crate) fn write(&self, writer: &mut impl Write) -> crate::Result<()> {
        writer.write_u32::<BigEndian>(self.len() as u32)?;

        match &self.ident {
            DataIdent::Fourcc(ident) => writer.write_all(ident.deref())?,
            DataIdent::Freeform { mean, name } => {
                writer.write_all(FREEFORM.deref())?;
                write_info_atom(writer, MEAN, mean)?;
                write_info_atom(writer, NAME, name)?;
            }
        }

        for d in self.data.iter() {
            d.write(writer)?;
        }

        Ok(())
    }
}

/// The serialized length of a freeform information atom (`mean` or `name`): head, full head and
/// one latin-1 byte per code point.
fn info_atom_len(text: &str) -> u64 {
    12 + text.chars().count() as u64
}

/// Parses the latin-1 text of a freeform information atom (`mean` or `name`).
fn parse_info_atom(
    reader: &mut (impl Read + Seek),
    head: Head,
    kind: &str,
) -> crate::Result<String> {
    let (version, _) = parse_full_head(reader)?;
    if version != 0 {
        return Err(crate::Error::new(
            ErrorKind::UnknownVersion(version),
            format!("Error reading {kind} atom ({kind})"),
        ));
    }

    reader.read_latin1(head.content_len() - 4)
}

/// Writes a freeform information atom (`mean` or `name`).
fn write_info_atom(writer: &mut impl Write, fourcc: Fourcc, text: &str) -> crate::Result<()> {
    writer.write_u32::<BigEndian>(info_atom_len(text) as u32)?;
    writer.write_all(&*fourcc)?;
    writer.write_all(&[0; 4])?;
    writer.write_latin1(text)?;
    Ok(())
}
