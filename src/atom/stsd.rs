use super::*;

/// A sample entry inside the sample description. The concrete variant is chosen by the handler
/// type inherited from the surrounding track, entries below unrecognized handlers are kept as
/// opaque placeholders so the declared entry count stays observable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SampleEntry {
    Audio(AudioSampleEntry),
    Visual(VisualSampleEntry),
    Text(Text),
    Unknown { fourcc: Fourcc },
}

/// A sample description atom (`stsd`). The first `entry_count` children are sample entries
/// interpreted according to the handler.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Stsd {
    pub entries: Vec<SampleEntry>,
}

impl Atom for Stsd {
    const FOURCC: Fourcc = SAMPLE_TABLE_SAMPLE_DESCRIPTION;
}

impl ParseAtom for Stsd {
    fn parse_atom(
        reader: &mut (impl Read + Seek),
        cfg: &ParseConfig<'_>,
        size: Size,
    ) -> crate::Result<Self> {
        let bounds = find_bounds(reader, size, Self::FOURCC)?;
        let (version, _) = parse_full_head(reader)?;

        if version != 0 {
            return Err(crate::Error::new(
                ErrorKind::UnknownVersion(version),
                "Unknown sample table sample description (stsd) version",
            ));
        }

        let entry_count = reader.read_u32::<BigEndian>()?;

        let mut stsd = Self::default();
        for _ in 0..entry_count {
            let head = parse_head(reader)?;
            if head.until_eof() {
                break;
            }

            let entry = match cfg.handler {
                Some(HANDLER_SOUND) | Some(HANDLER_ALIAS) => {
                    SampleEntry::Audio(AudioSampleEntry::parse(reader, head)?)
                }
                Some(HANDLER_VIDEO) => {
                    SampleEntry::Visual(VisualSampleEntry::parse(reader, head)?)
                }
                _ if head.fourcc() == TEXT => {
                    SampleEntry::Text(Text::parse(reader, cfg, head.size())?)
                }
                _ => {
                    reader.skip(head.content_len() as i64)?;
                    SampleEntry::Unknown { fourcc: head.fourcc() }
                }
            };
            stsd.entries.push(entry);
        }

        seek_to_end(reader, &bounds)?;

        Ok(stsd)
    }
}
