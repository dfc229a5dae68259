use crate::atom::ident;
use crate::{Data, Tag};

/// ### Track
///
/// The track number and total number of tracks are stored in a tuple of 16 bit fields. If only
/// one is present the other is represented as 0 and treated as if nonexistent, when both become
/// 0 the atom is removed entirely.
impl Tag {
    /// Returns the track number and the total number of tracks (`trkn`).
    pub fn track(&self) -> (Option<u16>, Option<u16>) {
        let vec = match self.bytes_of(&ident::TRACK_NUMBER).next() {
            Some(v) => v,
            None => return (None, None),
        };

        (number(vec), total(vec))
    }

    /// Returns the track number (`trkn`).
    pub fn track_number(&self) -> Option<u16> {
        let vec = self.bytes_of(&ident::TRACK_NUMBER).next()?;

        number(vec)
    }

    /// Returns the total number of tracks (`trkn`).
    pub fn total_tracks(&self) -> Option<u16> {
        let vec = self.bytes_of(&ident::TRACK_NUMBER).next()?;

        total(vec)
    }

    /// Sets the track number and the total number of tracks (`trkn`). Setting both to 0 removes
    /// the atom.
    pub fn set_track(&mut self, track_number: u16, total_tracks: u16) {
        if track_number == 0 && total_tracks == 0 {
            self.remove_track();
            return;
        }
        if let Some(v) = self.bytes_of_mut(&ident::TRACK_NUMBER).next() {
            set_total(v, total_tracks);
            set_number(v, track_number);
            return;
        }

        self.set_data(ident::TRACK_NUMBER, Data::Reserved(tuple_bytes(track_number, total_tracks)));
    }

    /// Sets the track number (`trkn`), preserving the total.
    pub fn set_track_number(&mut self, track_number: u16) {
        let (_, total_tracks) = self.track();
        self.set_track(track_number, total_tracks.unwrap_or(0));
    }

    /// Sets the total number of tracks (`trkn`), preserving the track number.
    pub fn set_total_tracks(&mut self, total_tracks: u16) {
        let (track_number, _) = self.track();
        self.set_track(track_number.unwrap_or(0), total_tracks);
    }

    /// Removes the track number and the total number of tracks (`trkn`).
    pub fn remove_track(&mut self) {
        self.remove_data(&ident::TRACK_NUMBER);
    }
}

/// ### Disc
///
/// The disc number and total number of discs share the track tuple encoding.
impl Tag {
    /// Returns the disc number and the total number of discs (`disk`).
    pub fn disc(&self) -> (Option<u16>, Option<u16>) {
        let vec = match self.bytes_of(&ident::DISC_NUMBER).next() {
            Some(v) => v,
            None => return (None, None),
        };

        (number(vec), total(vec))
    }

    /// Returns the disc number (`disk`).
    pub fn disc_number(&self) -> Option<u16> {
        let vec = self.bytes_of(&ident::DISC_NUMBER).next()?;

        number(vec)
    }

    /// Returns the total number of discs (`disk`).
    pub fn total_discs(&self) -> Option<u16> {
        let vec = self.bytes_of(&ident::DISC_NUMBER).next()?;

        total(vec)
    }

    /// Sets the disc number and the total number of discs (`disk`). Setting both to 0 removes
    /// the atom.
    pub fn set_disc(&mut self, disc_number: u16, total_discs: u16) {
        if disc_number == 0 && total_discs == 0 {
            self.remove_disc();
            return;
        }
        if let Some(v) = self.bytes_of_mut(&ident::DISC_NUMBER).next() {
            set_total(v, total_discs);
            set_number(v, disc_number);
            return;
        }

        self.set_data(ident::DISC_NUMBER, Data::Reserved(tuple_bytes(disc_number, total_discs)));
    }

    /// Sets the disc number (`disk`), preserving the total.
    pub fn set_disc_number(&mut self, disc_number: u16) {
        let (_, total_discs) = self.disc();
        self.set_disc(disc_number, total_discs.unwrap_or(0));
    }

    /// Sets the total number of discs (`disk`), preserving the disc number.
    pub fn set_total_discs(&mut self, total_discs: u16) {
        let (disc_number, _) = self.disc();
        self.set_disc(disc_number.unwrap_or(0), total_discs);
    }

    /// Removes the disc number and the total number of discs (`disk`).
    pub fn remove_disc(&mut self) {
        self.remove_data(&ident::DISC_NUMBER);
    }
}

/// The byte index of the number field inside the tuple payload.
const NUMBER_IDX: usize = 2;
/// The byte index of the total field inside the tuple payload.
const TOTAL_IDX: usize = 4;

/// The tuple payload: a reserved 16 bit field, the number, the total and another reserved field.
fn tuple_bytes(number: u16, total: u16) -> Vec<u8> {
    [0u16, number, total, 0u16].iter().flat_map(|u| u.to_be_bytes()).collect()
}

/// Reads a 16 bit field out of the tuple payload, a value of 0 counts as unset. Payloads too
/// short for the field (the legacy 6 byte disc form lacks the trailing reserved field) simply
/// yield `None`.
fn tuple_field(vec: &[u8], idx: usize) -> Option<u16> {
    let pair = vec.get(idx..idx + 2)?;
    let value = u16::from_be_bytes([pair[0], pair[1]]);
    (value != 0).then_some(value)
}

/// Overwrites a 16 bit field of the tuple payload, growing it when the field is missing.
fn set_tuple_field(vec: &mut Vec<u8>, idx: usize, value: u16) {
    if vec.len() < idx + 2 {
        vec.resize(idx + 2, 0);
    }
    vec[idx..idx + 2].copy_from_slice(&value.to_be_bytes());
}

fn number(vec: &[u8]) -> Option<u16> {
    tuple_field(vec, NUMBER_IDX)
}

fn total(vec: &[u8]) -> Option<u16> {
    tuple_field(vec, TOTAL_IDX)
}

fn set_number(vec: &mut Vec<u8>, number: u16) {
    set_tuple_field(vec, NUMBER_IDX, number);
}

fn set_total(vec: &mut Vec<u8>, total: u16) {
    set_tuple_field(vec, TOTAL_IDX, total);
}
