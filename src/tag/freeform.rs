use crate::atom::ident;
use crate::atom::FreeformIdent;
use crate::{Data, Tag};

/// ### Replay gain
///
/// Gain values are stored as ASCII decimals in dB inside freeform atoms under
/// `com.apple.iTunes`, readers tolerate and strip a trailing `dB`. Peak values are linear.
impl Tag {
    /// Returns the replay gain track gain in dB (`REPLAYGAIN_TRACK_GAIN`).
    pub fn replaygain_track_gain(&self) -> Option<f32> {
        self.gain_of(&ident::REPLAYGAIN_TRACK_GAIN)
    }

    /// Sets the replay gain track gain (`REPLAYGAIN_TRACK_GAIN`), formatted as `"{:.2} dB"`.
    pub fn set_replaygain_track_gain(&mut self, gain: f32) {
        self.set_data(&ident::REPLAYGAIN_TRACK_GAIN, Data::Utf8(format!("{gain:.2} dB")));
    }

    /// Removes the replay gain track gain (`REPLAYGAIN_TRACK_GAIN`).
    pub fn remove_replaygain_track_gain(&mut self) {
        self.remove_data(&ident::REPLAYGAIN_TRACK_GAIN);
    }

    /// Returns the replay gain album gain in dB (`REPLAYGAIN_ALBUM_GAIN`).
    pub fn replaygain_album_gain(&self) -> Option<f32> {
        self.gain_of(&ident::REPLAYGAIN_ALBUM_GAIN)
    }

    /// Sets the replay gain album gain (`REPLAYGAIN_ALBUM_GAIN`), formatted as `"{:.2} dB"`.
    pub fn set_replaygain_album_gain(&mut self, gain: f32) {
        self.set_data(&ident::REPLAYGAIN_ALBUM_GAIN, Data::Utf8(format!("{gain:.2} dB")));
    }

    /// Removes the replay gain album gain (`REPLAYGAIN_ALBUM_GAIN`).
    pub fn remove_replaygain_album_gain(&mut self) {
        self.remove_data(&ident::REPLAYGAIN_ALBUM_GAIN);
    }

    /// Returns the linear replay gain track peak (`REPLAYGAIN_TRACK_PEAK`).
    pub fn replaygain_track_peak(&self) -> Option<f32> {
        self.strings_of(&ident::REPLAYGAIN_TRACK_PEAK).next()?.trim().parse().ok()
    }

    /// Sets the replay gain track peak (`REPLAYGAIN_TRACK_PEAK`), formatted as `"{:.6}"`.
    pub fn set_replaygain_track_peak(&mut self, peak: f32) {
        self.set_data(&ident::REPLAYGAIN_TRACK_PEAK, Data::Utf8(format!("{peak:.6}")));
    }

    /// Removes the replay gain track peak (`REPLAYGAIN_TRACK_PEAK`).
    pub fn remove_replaygain_track_peak(&mut self) {
        self.remove_data(&ident::REPLAYGAIN_TRACK_PEAK);
    }

    /// Returns the linear replay gain album peak (`REPLAYGAIN_ALBUM_PEAK`).
    pub fn replaygain_album_peak(&self) -> Option<f32> {
        self.strings_of(&ident::REPLAYGAIN_ALBUM_PEAK).next()?.trim().parse().ok()
    }

    /// Sets the replay gain album peak (`REPLAYGAIN_ALBUM_PEAK`), formatted as `"{:.6}"`.
    pub fn set_replaygain_album_peak(&mut self, peak: f32) {
        self.set_data(&ident::REPLAYGAIN_ALBUM_PEAK, Data::Utf8(format!("{peak:.6}")));
    }

    /// Removes the replay gain album peak (`REPLAYGAIN_ALBUM_PEAK`).
    pub fn remove_replaygain_album_peak(&mut self) {
        self.remove_data(&ident::REPLAYGAIN_ALBUM_PEAK);
    }

    /// Reads a gain value, stripping a trailing `dB`.
    fn gain_of(&self, ident: &FreeformIdent<'_>) -> Option<f32> {
        let text = self.strings_of(ident).next()?;
        text.trim().trim_end_matches("dB").trim().parse().ok()
    }
}

/// ### MusicBrainz identifiers
///
/// The artist and release artist identifiers are multi valued and join their parts with `/`.
impl Tag {
    /// Returns all MusicBrainz artist ids (`MusicBrainz Artist Id`).
    pub fn musicbrainz_artist_ids(&self) -> impl Iterator<Item = &str> {
        self.strings_of(&ident::MUSICBRAINZ_ARTIST_ID)
            .flat_map(|s| s.split('/'))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Sets all MusicBrainz artist ids (`MusicBrainz Artist Id`), joined by `/`. An empty list
    /// removes the atom.
    pub fn set_musicbrainz_artist_ids<S: AsRef<str>>(&mut self, ids: &[S]) {
        self.set_joined_ids(&ident::MUSICBRAINZ_ARTIST_ID, ids);
    }

    /// Removes all MusicBrainz artist ids (`MusicBrainz Artist Id`).
    pub fn remove_musicbrainz_artist_ids(&mut self) {
        self.remove_data(&ident::MUSICBRAINZ_ARTIST_ID);
    }

    /// Returns all MusicBrainz release artist ids (`MusicBrainz Album Artist Id`).
    pub fn musicbrainz_release_artist_ids(&self) -> impl Iterator<Item = &str> {
        self.strings_of(&ident::MUSICBRAINZ_RELEASE_ARTIST_ID)
            .flat_map(|s| s.split('/'))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Sets all MusicBrainz release artist ids (`MusicBrainz Album Artist Id`), joined by `/`.
    /// An empty list removes the atom.
    pub fn set_musicbrainz_release_artist_ids<S: AsRef<str>>(&mut self, ids: &[S]) {
        self.set_joined_ids(&ident::MUSICBRAINZ_RELEASE_ARTIST_ID, ids);
    }

    /// Removes all MusicBrainz release artist ids (`MusicBrainz Album Artist Id`).
    pub fn remove_musicbrainz_release_artist_ids(&mut self) {
        self.remove_data(&ident::MUSICBRAINZ_RELEASE_ARTIST_ID);
    }

    fn set_joined_ids<S: AsRef<str>>(&mut self, ident: &FreeformIdent<'_>, ids: &[S]) {
        let value = ids
            .iter()
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<&str>>()
            .join("/");
        if value.is_empty() {
            self.remove_data(ident);
        } else {
            self.set_data(ident, Data::Utf8(value));
        }
    }
}
