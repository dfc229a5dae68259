use crate::atom::ident;
use crate::{Data, Tag};

/// A list of standard genre codes and values found in the `gnre` atom. This list is equal to the
/// ID3v1 genre list but all codes are incremented by 1, a code of 0 means the genre is unset.
pub const STANDARD_GENRES: [(u16, &str); 80] = [
    (1, "Blues"),
    (2, "Classic rock"),
    (3, "Country"),
    (4, "Dance"),
    (5, "Disco"),
    (6, "Funk"),
    (7, "Grunge"),
    (8, "Hip-Hop"),
    (9, "Jazz"),
    (10, "Metal"),
    (11, "New Age"),
    (12, "Oldies"),
    (13, "Other"),
    (14, "Pop"),
    (15, "Rhythm and Blues"),
    (16, "Rap"),
    (17, "Reggae"),
    (18, "Rock"),
    (19, "Techno"),
    (20, "Industrial"),
    (21, "Alternative"),
    (22, "Ska"),
    (23, "Death metal"),
    (24, "Pranks"),
    (25, "Soundtrack"),
    (26, "Euro-Techno"),
    (27, "Ambient"),
    (28, "Trip-Hop"),
    (29, "Vocal"),
    (30, "Jazz & Funk"),
    (31, "Fusion"),
    (32, "Trance"),
    (33, "Classical"),
    (34, "Instrumental"),
    (35, "Acid"),
    (36, "House"),
    (37, "Game"),
    (38, "Sound clip"),
    (39, "Gospel"),
    (40, "Noise"),
    (41, "Alternative Rock"),
    (42, "Bass"),
    (43, "Soul"),
    (44, "Punk"),
    (45, "Space"),
    (46, "Meditative"),
    (47, "Instrumental Pop"),
    (48, "Instrumental Rock"),
    (49, "Ethnic"),
    (50, "Gothic"),
    (51, "Darkwave"),
    (52, "Techno-Industrial"),
    (53, "Electronic"),
    (54, "Pop-Folk"),
    (55, "Eurodance"),
    (56, "Dream"),
    (57, "Southern Rock"),
    (58, "Comedy"),
    (59, "Cult"),
    (60, "Gangsta"),
    (61, "Top 40"),
    (62, "Christian Rap"),
    (63, "Pop/Funk"),
    (64, "Jungle"),
    (65, "Native US"),
    (66, "Cabaret"),
    (67, "New Wave"),
    (68, "Psychedelic"),
    (69, "Rave"),
    (70, "Show tunes"),
    (71, "Trailer"),
    (72, "Lo-Fi"),
    (73, "Tribal"),
    (74, "Acid Punk"),
    (75, "Acid Jazz"),
    (76, "Polka"),
    (77, "Retro"),
    (78, "Musical"),
    (79, "Rock ’n’ Roll"),
    (80, "Hard Rock"),
];

/// Returns the genre name for a standard genre code.
fn standard_genre_name(code: u16) -> Option<&'static str> {
    STANDARD_GENRES.iter().find(|(c, _)| *c == code).map(|(_, name)| *name)
}

/// ### Standard genre
impl Tag {
    /// Returns all standard genre codes (`gnre`).
    pub fn standard_genres(&self) -> impl Iterator<Item = u16> + '_ {
        self.bytes_of(&ident::STANDARD_GENRE).filter_map(|v| {
            if v.len() < 2 {
                None
            } else {
                Some(u16::from_be_bytes([v[0], v[1]]))
            }
        })
    }

    /// Returns the first standard genre code (`gnre`).
    pub fn standard_genre(&self) -> Option<u16> {
        self.standard_genres().next().filter(|c| *c != 0)
    }

    /// Removes all standard genres (`gnre`).
    pub fn remove_standard_genres(&mut self) {
        self.remove_data(&ident::STANDARD_GENRE);
    }
}

/// ### Genre
///
/// Readers prefer the custom genre text (`©gen`) and fall back to translating the legacy
/// standard genre code (`gnre`). Writers always clear the legacy atom and store text.
impl Tag {
    /// Returns all genres (`©gen` or `gnre`).
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        let mut genres: Vec<&str> = self
            .strings_of(&ident::CUSTOM_GENRE)
            .flat_map(|s| s.split(';'))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if genres.is_empty() {
            genres = self.standard_genres().filter_map(standard_genre_name).collect();
        }

        genres.into_iter()
    }

    /// Returns the first genre (`©gen` or `gnre`).
    pub fn genre(&self) -> Option<&str> {
        self.genres().next()
    }

    /// Sets all genres as custom genre text (`©gen`), clearing any legacy standard genre
    /// (`gnre`). An empty list removes both atoms.
    pub fn set_genres<S: AsRef<str>>(&mut self, genres: &[S]) {
        self.remove_standard_genres();

        let value = genres
            .iter()
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<&str>>()
            .join("; ");
        if value.is_empty() {
            self.remove_data(&ident::CUSTOM_GENRE);
        } else {
            self.set_data(ident::CUSTOM_GENRE, Data::Utf8(value));
        }
    }

    /// Sets one genre (`©gen`), clearing any legacy standard genre (`gnre`). An empty value
    /// removes both atoms.
    pub fn set_genre(&mut self, genre: impl Into<String>) {
        let value = genre.into();
        self.set_genres(&[value]);
    }

    /// Removes all genres (`©gen` and `gnre`).
    pub fn remove_genres(&mut self) {
        self.remove_standard_genres();
        self.remove_data(&ident::CUSTOM_GENRE);
    }
}
