use std::fmt;
use std::io::{Read, Seek};
use std::path::Path;
use std::time::Duration;

use crate::atom::{self, idents_match, DataIdent, Ident, MetaItem, ReadConfig};
use crate::{Data, MediaInfo, Mp4File};

pub mod genre;

mod freeform;
mod tuple;

pub use genre::STANDARD_GENRES;

/// A MPEG-4 metadata tag: the decoded item list of the selected user data atom, together with
/// the filetype and the read-only media properties.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Tag {
    ftyp: String,
    info: MediaInfo,
    items: Vec<MetaItem>,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(s) = self.title() {
            writeln!(f, "title: {s}")?;
        }
        let artists: Vec<&str> = self.artists().collect();
        if !artists.is_empty() {
            writeln!(f, "artists: {}", artists.join("; "))?;
        }
        if let Some(s) = self.album() {
            writeln!(f, "album: {s}")?;
        }
        let genres: Vec<&str> = self.genres().collect();
        if !genres.is_empty() {
            writeln!(f, "genres: {}", genres.join("; "))?;
        }
        if let Some(y) = self.year() {
            writeln!(f, "year: {y}")?;
        }
        match self.track() {
            (Some(n), Some(t)) => writeln!(f, "track: {n} of {t}")?,
            (Some(n), None) => writeln!(f, "track: {n}")?,
            (None, Some(t)) => writeln!(f, "track: ? of {t}")?,
            (None, None) => (),
        }
        match self.disc() {
            (Some(n), Some(t)) => writeln!(f, "disc: {n} of {t}")?,
            (Some(n), None) => writeln!(f, "disc: {n}")?,
            (None, Some(t)) => writeln!(f, "disc: ? of {t}")?,
            (None, None) => (),
        }
        if let Some(d) = self.duration() {
            let total_seconds = d.as_secs();
            writeln!(f, "duration: {}:{:02}", total_seconds / 60, total_seconds % 60)?;
        }
        Ok(())
    }
}

impl Tag {
    /// Creates a new MPEG-4 metadata tag containing the items.
    pub(crate) const fn new(ftyp: String, info: MediaInfo, items: Vec<MetaItem>) -> Self {
        Self { ftyp, info, items }
    }

    /// Attempts to read a MPEG-4 metadata tag from the reader.
    pub fn read_from(reader: &mut (impl Read + Seek)) -> crate::Result<Self> {
        atom::read_tag_from(reader, &ReadConfig::default())
    }

    /// Attempts to read a MPEG-4 metadata tag from the file at the indicated path.
    pub fn read_from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        Mp4File::read_from_path(path).map(Mp4File::into_tag)
    }

    /// Attempts to write the MPEG-4 metadata tag to the path, replacing any metadata previously
    /// present on the file.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> crate::Result<()> {
        let mut file = Mp4File::read_from_path_with(path, &ReadConfig::tag())?;
        *file.tag_mut() = self.clone();
        file.save()
    }
}

/// ## Filetype and read-only properties
impl Tag {
    /// Returns the content of the filetype (`ftyp`) atom.
    pub fn filetype(&self) -> &str {
        &self.ftyp
    }

    /// Returns the read-only media properties.
    pub fn info(&self) -> &MediaInfo {
        &self.info
    }

    /// Returns the duration of the presentation.
    pub fn duration(&self) -> Option<Duration> {
        self.info.duration
    }
}

/// ## Item access
impl Tag {
    /// Returns the metadata items.
    pub fn items(&self) -> &[MetaItem] {
        &self.items
    }

    /// Returns whether the tag contains no metadata items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes every metadata item.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// ## Data accessors
impl Tag {
    /// Returns all data references corresponding to the identifier.
    pub fn data_of<'a>(&'a self, ident: &'a impl Ident) -> impl Iterator<Item = &'a Data> {
        self.items
            .iter()
            .filter(move |i| idents_match(&i.ident, ident))
            .flat_map(|i| i.data.iter())
    }

    /// Returns all mutable data references corresponding to the identifier.
    pub fn data_of_mut<'a>(
        &'a mut self,
        ident: &'a impl Ident,
    ) -> impl Iterator<Item = &'a mut Data> {
        self.items
            .iter_mut()
            .filter(move |i| idents_match(&i.ident, ident))
            .flat_map(|i| i.data.iter_mut())
    }

    /// Consumes all data corresponding to the identifier and returns it.
    pub fn take_data_of(&mut self, ident: &impl Ident) -> impl Iterator<Item = Data> {
        let mut taken = Vec::new();

        let mut i = 0;
        while i < self.items.len() {
            if idents_match(&self.items[i].ident, ident) {
                let removed = self.items.swap_remove(i);
                taken.extend(removed.data);
            } else {
                i += 1;
            }
        }

        taken.into_iter()
    }

    /// Returns all string references corresponding to the identifier.
    pub fn strings_of<'a>(&'a self, ident: &'a impl Ident) -> impl Iterator<Item = &'a str> {
        self.data_of(ident).filter_map(Data::string)
    }

    /// Returns all byte data references corresponding to the identifier.
    pub fn bytes_of<'a>(&'a self, ident: &'a impl Ident) -> impl Iterator<Item = &'a Vec<u8>> {
        self.data_of(ident).filter_map(Data::bytes)
    }

    /// Returns all mutable byte data references corresponding to the identifier.
    pub fn bytes_of_mut<'a>(
        &'a mut self,
        ident: &'a impl Ident,
    ) -> impl Iterator<Item = &'a mut Vec<u8>> {
        self.data_of_mut(ident).filter_map(Data::bytes_mut)
    }

    /// Returns all image data references corresponding to the identifier.
    pub fn images_of<'a>(&'a self, ident: &'a impl Ident) -> impl Iterator<Item = &'a Data> {
        self.data_of(ident).filter_map(Data::image)
    }

    /// Removes all other items corresponding to the identifier and adds a new item containing
    /// the data.
    pub fn set_data(&mut self, ident: impl Into<DataIdent>, data: Data) {
        let ident = ident.into();
        self.remove_data(&ident);
        self.items.push(MetaItem::new(ident, vec![data]));
    }

    /// Adds the data to the item corresponding to the identifier, creating the item if absent.
    pub fn add_data(&mut self, ident: impl Into<DataIdent>, data: Data) {
        let ident = ident.into();
        match self.items.iter_mut().find(|i| idents_match(&i.ident, &ident)) {
            Some(item) => item.data.push(data),
            None => self.items.push(MetaItem::new(ident, vec![data])),
        }
    }

    /// Removes the items corresponding to the identifier.
    pub fn remove_data(&mut self, ident: &impl Ident) {
        self.items.retain(|i| !idents_match(&i.ident, ident));
    }
}

// ## Individual string values
mp4tag_proc::individual_string_value_accessor!("title", "©nam");
mp4tag_proc::individual_string_value_accessor!("album", "©alb");
mp4tag_proc::individual_string_value_accessor!("comment", "©cmt");
mp4tag_proc::individual_string_value_accessor!("lyrics", "©lyr");
mp4tag_proc::individual_string_value_accessor!("grouping", "©grp");
mp4tag_proc::individual_string_value_accessor!("conductor", "cond");
mp4tag_proc::individual_string_value_accessor!("copyright", "cprt");
mp4tag_proc::individual_string_value_accessor!("encoder", "©too");
mp4tag_proc::individual_string_value_accessor!("date_tagged", "dtag");
mp4tag_proc::individual_string_value_accessor!("title_sort", "sonm");
mp4tag_proc::individual_string_value_accessor!("album_sort", "soal");
mp4tag_proc::individual_string_value_accessor!("artist_sort", "soar");
mp4tag_proc::individual_string_value_accessor!("album_artist_sort", "soaa");
mp4tag_proc::individual_string_value_accessor!("composer_sort", "soco");

// ## Multiple string values
mp4tag_proc::multiple_string_values_accessor!("artist", "©ART");
mp4tag_proc::multiple_string_values_accessor!("album_artist", "aART");
mp4tag_proc::multiple_string_values_accessor!("composer", "©wrt");

// ## Flags
mp4tag_proc::flag_value_accessor!("compilation", "cpil");

// ## Integer values
mp4tag_proc::integer_value_accessor!("bpm", "tmpo");

// ## Freeform values
mp4tag_proc::freeform_string_value_accessor!("isrc", "ISRC");
mp4tag_proc::freeform_string_value_accessor!("lyricist", "LYRICIST");
mp4tag_proc::freeform_string_value_accessor!("initial_key", "initialkey");
mp4tag_proc::freeform_string_value_accessor!("publisher", "publisher");
mp4tag_proc::freeform_string_value_accessor!("remixed_by", "REMIXEDBY");
mp4tag_proc::freeform_string_value_accessor!("amazon_id", "ASIN");
mp4tag_proc::freeform_string_value_accessor!("musicbrainz_track_id", "MusicBrainz Track Id");
mp4tag_proc::freeform_string_value_accessor!("musicbrainz_release_id", "MusicBrainz Album Id");
mp4tag_proc::freeform_string_value_accessor!(
    "musicbrainz_release_group_id",
    "MusicBrainz Release Group Id"
);
mp4tag_proc::freeform_string_value_accessor!("musicbrainz_disc_id", "MusicBrainz Disc Id");
mp4tag_proc::freeform_string_value_accessor!("musicip_puid", "MusicIP PUID");

// ## Custom values
/// ### Year
///
/// The year is stored as text in the `©day` atom, the reader parses the first 4 characters as a
/// decimal number.
impl Tag {
    /// Returns the year (`©day`).
    pub fn year(&self) -> Option<u32> {
        let text = self.strings_of(&atom::ident::YEAR).next()?;
        let prefix: String = text.chars().take(4).collect();
        prefix.parse().ok()
    }

    /// Sets the year (`©day`). A value of 0 removes the atom.
    pub fn set_year(&mut self, year: u32) {
        if year == 0 {
            self.remove_year();
        } else {
            self.set_data(atom::ident::YEAR, Data::Utf8(year.to_string()));
        }
    }

    /// Removes the year (`©day`).
    pub fn remove_year(&mut self) {
        self.remove_data(&atom::ident::YEAR);
    }
}

/// ### Artwork
impl Tag {
    /// Returns all artwork images (`covr`).
    pub fn artworks(&self) -> impl Iterator<Item = &Data> {
        self.images_of(&atom::ident::ARTWORK)
    }

    /// Returns the first artwork image (`covr`).
    pub fn artwork(&self) -> Option<&Data> {
        self.artworks().next()
    }

    /// Sets the artwork image data (`covr`), removing all other artworks. Data that isn't of an
    /// image type is ignored.
    pub fn set_artwork(&mut self, image: Data) {
        if image.is_image() {
            self.set_data(atom::ident::ARTWORK, image);
        }
    }

    /// Adds artwork image data (`covr`). Data that isn't of an image type is ignored.
    pub fn add_artwork(&mut self, image: Data) {
        if image.is_image() {
            self.add_data(atom::ident::ARTWORK, image);
        }
    }

    /// Removes all artworks (`covr`).
    pub fn remove_artworks(&mut self) {
        self.remove_data(&atom::ident::ARTWORK);
    }
}

/// ### Performers roles
///
/// The roles share the joined single-value storage, `;` inside a value is swapped with `/` on
/// write and restored on read.
impl Tag {
    /// Returns all performers roles (`role`).
    pub fn performers_roles(&self) -> Vec<String> {
        match self.strings_of(&atom::ident::PERFORMERS_ROLE).next() {
            Some(s) => s
                .split(';')
                .map(|p| p.trim().replace('/', ";"))
                .filter(|p| !p.is_empty())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Sets all performers roles (`role`). An empty list removes the atom.
    pub fn set_performers_roles<S: AsRef<str>>(&mut self, roles: &[S]) {
        let value = roles
            .iter()
            .map(|r| r.as_ref().trim().replace(';', "/"))
            .filter(|r| !r.is_empty())
            .collect::<Vec<String>>()
            .join("; ");
        if value.is_empty() {
            self.remove_data(&atom::ident::PERFORMERS_ROLE);
        } else {
            self.set_data(atom::ident::PERFORMERS_ROLE, Data::Utf8(value));
        }
    }

    /// Removes all performers roles (`role`).
    pub fn remove_performers_roles(&mut self) {
        self.remove_data(&atom::ident::PERFORMERS_ROLE);
    }
}
