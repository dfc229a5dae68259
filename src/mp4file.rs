use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::atom::{
    self, AtomBounds, Hdlr, Ilst, MdatBounds, Meta, ReadConfig, Udta, UdtaBounds, WriteAtom,
};
use crate::buffer::Buffer;
use crate::file::{MediaFile, Mode};
use byteorder::{BigEndian, WriteBytesExt};
use crate::{Error, ErrorKind, Tag};

/// A chunk offset table collected by a traversal that includes chunk offsets.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ChunkOffsetTable {
    /// A 32 bit (`stco`) table.
    Stco(Vec<u32>),
    /// A 64 bit (`co64`) table.
    Co64(Vec<u64>),
}

/// A MPEG-4 file bound to a parser: the handle, the decoded tag and the byte range of the media
/// data the tag write must keep invariant.
///
/// Construction validates that the file starts with a filetype atom and runs the configured
/// traversal. A fault below the filetype atom marks the file as corrupt, the tag then contains
/// whatever was decoded up to the fault and [`save`](Self::save) is refused.
#[derive(Debug)]
pub struct Mp4File {
    file: MediaFile,
    tag: Tag,
    mdat: Option<MdatBounds>,
    chunk_offsets: Vec<ChunkOffsetTable>,
}

impl Mp4File {
    /// Attempts to read the file at the path with the default traversal.
    pub fn read_from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        Self::read_with(MediaFile::open(path)?, &ReadConfig::default())
    }

    /// Attempts to read the file at the path with the given traversal configuration.
    pub fn read_from_path_with(path: impl AsRef<Path>, cfg: &ReadConfig) -> crate::Result<Self> {
        Self::read_with(MediaFile::open(path)?, cfg)
    }

    /// Attempts to read the file with the default traversal.
    pub fn read(file: MediaFile) -> crate::Result<Self> {
        Self::read_with(file, &ReadConfig::default())
    }

    /// Attempts to read the file with the given traversal configuration.
    ///
    /// The handle is closed on every exit path and reopened for the duration of
    /// [`save`](Self::save).
    pub fn read_with(mut file: MediaFile, cfg: &ReadConfig) -> crate::Result<Self> {
        let data = match atom::read_mp4(&mut file, cfg) {
            Ok(d) => d,
            Err(e) => {
                file.close();
                return Err(e);
            }
        };

        if let Some(fault) = &data.fault {
            warn!(%fault, "parse fault, marking file as corrupt");
            file.mark_corrupt(fault.to_string());
        }

        let mut chunk_offsets = Vec::new();
        if cfg.read_chunk_offsets {
            if let Some(moov) = &data.moov {
                for trak in &moov.trak {
                    let stbl = trak
                        .mdia
                        .as_ref()
                        .and_then(|a| a.minf.as_ref())
                        .and_then(|a| a.stbl.as_ref());
                    let Some(stbl) = stbl else { continue };

                    if let Some(stco) = &stbl.stco {
                        chunk_offsets.push(ChunkOffsetTable::Stco(stco.offsets.clone()));
                    }
                    if let Some(co64) = &stbl.co64 {
                        chunk_offsets.push(ChunkOffsetTable::Co64(co64.offsets.clone()));
                    }
                }
            }
        }

        let mdat = data.mdat;
        let tag = atom::make_tag(data);
        file.close();

        Ok(Self { file, tag, mdat, chunk_offsets })
    }

    /// Returns the decoded tag.
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Returns the decoded tag for mutation. Changes are persisted by [`save`](Self::save).
    pub fn tag_mut(&mut self) -> &mut Tag {
        &mut self.tag
    }

    /// Consumes the file and returns the decoded tag.
    pub fn into_tag(self) -> Tag {
        self.tag
    }

    /// Returns the underlying file handle.
    pub fn media_file(&self) -> &MediaFile {
        &self.file
    }

    /// The byte range of the media data atom, if one was encountered.
    pub fn mdat_bounds(&self) -> Option<(u64, u64)> {
        self.mdat.map(|m| (m.pos, m.end))
    }

    /// The chunk offset tables, collected when the traversal includes chunk offsets.
    pub fn chunk_offsets(&self) -> &[ChunkOffsetTable] {
        &self.chunk_offsets
    }

    /// Whether a parse fault marked the file as corrupt.
    pub fn is_corrupt(&self) -> bool {
        self.file.is_corrupt()
    }

    /// The recorded reason the file was marked corrupt.
    pub fn corruption_reason(&self) -> Option<&str> {
        self.file.corruption_reason()
    }

    /// Attempts to write the tag back to the file.
    ///
    /// The metadata region is rewritten with exactly one splice, ancestor atom lengths on the
    /// spine are patched and every chunk offset pointing at media data behind the rewritten
    /// region is shifted by the length difference. The handle is escalated to read-write for the
    /// duration of the call and closed again afterwards.
    pub fn save(&mut self) -> crate::Result<()> {
        if let Some(reason) = self.file.corruption_reason() {
            return Err(Error::new(ErrorKind::Corrupt, reason.to_string()));
        }

        self.file.reopen(Mode::ReadWrite)?;
        let result = self.save_inner();
        self.file.close();
        result
    }

    fn save_inner(&mut self) -> crate::Result<()> {
        self.file.seek(SeekFrom::Start(0))?;
        let found = atom::find_mp4(&mut self.file)?;
        let moov = found.moov.as_ref().ok_or_else(|| {
            Error::new(
                ErrorKind::AtomNotFound(atom::MOVIE),
                "Missing necessary data, no movie (moov) atom found",
            )
        })?;

        // the spine of existing ancestors whose lengths the splice changes
        let mut spine: Vec<&AtomBounds> = vec![&moov.bounds];
        let udta = select_udta(moov, &mut spine);

        let ilst = Ilst { items: self.tag.items().to_vec() };

        // stage the replacement region and where it goes
        let mut region = Buffer::new();
        let region_start;
        let mut replace_len = 0;

        match udta {
            Some(udta) => {
                spine.push(&udta.bounds);
                match &udta.meta {
                    Some(meta) => {
                        spine.push(&meta.bounds);
                        match (&meta.hdlr, &meta.ilst) {
                            (Some(_), Some(old_ilst)) => {
                                region_start = old_ilst.pos();
                                replace_len = old_ilst.len();
                                ilst.write(&mut region)?;
                            }
                            (None, Some(old_ilst)) => {
                                // repair the missing handler while rewriting the item list
                                region_start = old_ilst.pos();
                                replace_len = old_ilst.len();
                                Hdlr::meta().write(&mut region)?;
                                ilst.write(&mut region)?;
                            }
                            (Some(_), None) => {
                                region_start = meta.bounds.end();
                                ilst.write(&mut region)?;
                            }
                            (None, None) => {
                                region_start = meta.bounds.end();
                                Hdlr::meta().write(&mut region)?;
                                ilst.write(&mut region)?;
                            }
                        }
                    }
                    None => {
                        region_start = udta.bounds.end();
                        let meta = Meta { hdlr: Some(Hdlr::meta()), ilst: Some(ilst) };
                        meta.write(&mut region)?;
                    }
                }
            }
            None => {
                region_start = moov.bounds.end();
                let meta = Meta { hdlr: Some(Hdlr::meta()), ilst: Some(ilst) };
                let udta = Udta { meta: Some(meta) };
                udta.write(&mut region)?;
            }
        }

        let len_diff = region.len() as i64 - replace_len as i64;
        let region_old_end = region_start + replace_len;

        debug!(region_start, replace_len, len_diff, "rewriting metadata region");

        // one splice moves everything behind the region
        self.file.insert(region.as_slice(), region_start, replace_len)?;

        if len_diff != 0 {
            // patch the spine lengths, every spine atom starts before the region
            for bounds in spine {
                let new_len = (bounds.len() as i64 + len_diff) as u64;
                self.file.seek(SeekFrom::Start(bounds.pos()))?;
                if bounds.ext() {
                    self.file.write_u32::<BigEndian>(1)?;
                    self.file.seek(SeekFrom::Current(4))?;
                    self.file.write_u64::<BigEndian>(new_len)?;
                } else {
                    self.file.write_u32::<BigEndian>(new_len as u32)?;
                }
            }

            // chunk offsets only move when the rewritten region lies in front of the media data
            match found.mdat_pos {
                Some(mdat_pos) if region_old_end <= mdat_pos => {
                    self.patch_chunk_offsets(&found, mdat_pos, region_start, len_diff)?;
                }
                _ => (),
            }
        }

        self.file.flush()?;
        Ok(())
    }

    /// Shifts every chunk offset pointing at or behind the old media data position by the length
    /// difference. Table positions themselves are adjusted when the tables moved with the
    /// splice.
    fn patch_chunk_offsets(
        &mut self,
        found: &atom::FoundMp4,
        mdat_pos: u64,
        region_start: u64,
        len_diff: i64,
    ) -> crate::Result<()> {
        let moov = match &found.moov {
            Some(m) => m,
            None => return Ok(()),
        };

        let stbl_bounds = moov
            .trak
            .iter()
            .filter_map(|t| t.mdia.as_ref())
            .filter_map(|m| m.minf.as_ref())
            .filter_map(|m| m.stbl.as_ref());

        for stbl in stbl_bounds {
            if let Some(stco) = &stbl.stco {
                let table_pos = shifted(stco.table_pos(), region_start, len_diff);
                self.file.seek(SeekFrom::Start(table_pos))?;
                for o in stco.offsets.iter() {
                    let new_offset = match *o as u64 >= mdat_pos {
                        true => (*o as i64 + len_diff) as u32,
                        false => *o,
                    };
                    self.file.write_u32::<BigEndian>(new_offset)?;
                }
            }
            if let Some(co64) = &stbl.co64 {
                let table_pos = shifted(co64.table_pos(), region_start, len_diff);
                self.file.seek(SeekFrom::Start(table_pos))?;
                for o in co64.offsets.iter() {
                    let new_offset = match *o >= mdat_pos {
                        true => (*o as i64 + len_diff) as u64,
                        false => *o,
                    };
                    self.file.write_u64::<BigEndian>(new_offset)?;
                }
            }
        }

        Ok(())
    }
}

/// A position adjusted for the splice: everything at or behind the region start moved by the
/// length difference.
fn shifted(pos: u64, region_start: u64, len_diff: i64) -> u64 {
    if pos >= region_start {
        (pos as i64 + len_diff) as u64
    } else {
        pos
    }
}

/// Selects the user data atom the tag belongs to, preferring the shallowest one whose subtree
/// contains an item list. A track level selection pushes the track onto the spine.
fn select_udta<'a>(
    moov: &'a atom::MoovBounds,
    spine: &mut Vec<&'a AtomBounds>,
) -> Option<&'a UdtaBounds> {
    let has_ilst =
        |u: &UdtaBounds| u.meta.as_ref().map_or(false, |m| m.ilst.is_some());

    match &moov.udta {
        Some(udta) if has_ilst(udta) => Some(udta),
        moov_udta => {
            for trak in &moov.trak {
                if let Some(udta) = &trak.udta {
                    if has_ilst(udta) {
                        spine.push(&trak.bounds);
                        return Some(udta);
                    }
                }
            }
            moov_udta.as_ref()
        }
    }
}
