use mp4tag::{ident, Data, DataIdent, Fourcc, Tag};

#[test]
fn multiple_values_share_one_joined_atom() {
    let mut tag = Tag::default();

    tag.set_artists(&["first", "second", "third"]);

    // one atom, the values joined
    assert_eq!(tag.strings_of(&ident::ARTIST).next(), Some("first; second; third"));
    assert_eq!(tag.strings_of(&ident::ARTIST).count(), 1);

    let artists: Vec<&str> = tag.artists().collect();
    assert_eq!(artists, ["first", "second", "third"]);
    assert_eq!(tag.artist(), Some("first"));
}

#[test]
fn reading_splits_at_semicolons_and_trims() {
    let mut tag = Tag::default();

    tag.set_data(ident::ALBUM_ARTIST, Data::Utf8("  spaced ;  out;values ".to_owned()));

    let artists: Vec<&str> = tag.album_artists().collect();
    assert_eq!(artists, ["spaced", "out", "values"]);
}

#[test]
fn empty_values_remove_the_atom() {
    let mut tag = Tag::default();

    tag.set_title("Main Title");
    assert!(!tag.is_empty());

    tag.set_title("");
    assert_eq!(tag.title(), None);
    assert!(tag.is_empty());

    tag.set_artists(&["one"]);
    tag.set_artists::<&str>(&[]);
    assert!(tag.is_empty());
}

#[test]
fn clearing_the_tag_removes_every_item() {
    let mut tag = Tag::default();

    tag.set_title("Main Title");
    tag.set_bpm(120);
    assert!(!tag.is_empty());

    tag.clear();
    assert!(tag.is_empty());
    assert_eq!(tag.title(), None);
    assert_eq!(tag.bpm(), None);
}

#[test]
fn track_tuple_is_packed_into_four_fields() {
    let mut tag = Tag::default();

    tag.set_track(3, 12);

    let bytes = tag.bytes_of(&ident::TRACK_NUMBER).next().unwrap();
    assert_eq!(bytes, &[0x00, 0x00, 0x00, 0x03, 0x00, 0x0C, 0x00, 0x00]);
    assert_eq!(tag.track(), (Some(3), Some(12)));
    assert_eq!(tag.track_number(), Some(3));
    assert_eq!(tag.total_tracks(), Some(12));
}

#[test]
fn zeroed_tuple_removes_the_atom() {
    let mut tag = Tag::default();

    tag.set_track(3, 12);
    tag.set_track(0, 0);
    assert!(tag.is_empty());

    tag.set_disc(2, 2);
    tag.set_disc_number(0);
    assert_eq!(tag.disc(), (None, Some(2)));
    tag.set_total_discs(0);
    assert!(tag.is_empty());
}

#[test]
fn legacy_disc_payload_is_readable() {
    let mut tag = Tag::default();

    // the 6 byte form without the trailing reserved field
    tag.set_data(ident::DISC_NUMBER, Data::Reserved(vec![0, 0, 0, 1, 0, 2]));
    assert_eq!(tag.disc(), (Some(1), Some(2)));
}

#[test]
fn standard_genre_is_translated() {
    let mut tag = Tag::default();

    tag.set_data(ident::STANDARD_GENRE, Data::Reserved(vec![0x00, 0x12]));
    let genres: Vec<&str> = tag.genres().collect();
    assert_eq!(genres, ["Rock"]);

    // the custom genre text is preferred over the legacy code
    tag.set_data(ident::CUSTOM_GENRE, Data::Utf8("Synthwave".to_owned()));
    let genres: Vec<&str> = tag.genres().collect();
    assert_eq!(genres, ["Synthwave"]);
}

#[test]
fn writing_genres_clears_the_legacy_atom() {
    let mut tag = Tag::default();

    tag.set_data(ident::STANDARD_GENRE, Data::Reserved(vec![0x00, 0x0E]));
    tag.set_genre("Rock");

    assert_eq!(tag.standard_genre(), None);
    assert_eq!(tag.strings_of(&ident::CUSTOM_GENRE).next(), Some("Rock"));
    let genres: Vec<&str> = tag.genres().collect();
    assert_eq!(genres, ["Rock"]);
}

#[test]
fn year_parses_the_leading_digits() {
    let mut tag = Tag::default();

    tag.set_data(ident::YEAR, Data::Utf8("2013-05-01T12:00:00Z".to_owned()));
    assert_eq!(tag.year(), Some(2013));

    tag.set_data(ident::YEAR, Data::Utf8("unknown".to_owned()));
    assert_eq!(tag.year(), None);

    tag.set_year(1998);
    assert_eq!(tag.strings_of(&ident::YEAR).next(), Some("1998"));

    tag.set_year(0);
    assert!(tag.is_empty());
}

#[test]
fn tempo_and_compilation_use_the_integer_type() {
    let mut tag = Tag::default();

    tag.set_bpm(132);
    let bytes = tag.bytes_of(&ident::BPM).next().unwrap();
    assert_eq!(bytes, &[0x00, 0x84]);
    assert_eq!(tag.bpm(), Some(132));

    assert!(!tag.compilation());
    tag.set_compilation();
    let bytes = tag.bytes_of(&ident::COMPILATION).next().unwrap();
    assert_eq!(bytes, &[0x01]);
    assert!(tag.compilation());

    tag.remove_compilation();
    assert!(!tag.compilation());
}

#[test]
fn freeform_atom_layout() {
    let mut tag = Tag::default();

    tag.set_musicbrainz_track_id("abc");

    assert_eq!(tag.items().len(), 1);
    let item = &tag.items()[0];
    match &item.ident {
        DataIdent::Freeform { mean, name } => {
            assert_eq!(mean, "com.apple.iTunes");
            assert_eq!(name, "MusicBrainz Track Id");
        }
        other => panic!("expected freeform ident, got {other:?}"),
    }
    assert_eq!(item.data, [Data::Utf8("abc".to_owned())]);
    assert_eq!(tag.musicbrainz_track_id(), Some("abc"));

    tag.set_musicbrainz_track_id("");
    assert!(tag.is_empty());
}

#[test]
fn freeform_names_match_case_insensitively() {
    let mut tag = Tag::default();

    tag.set_data(
        DataIdent::freeform("com.apple.iTunes", "MUSICBRAINZ TRACK ID"),
        Data::Utf8("abc".to_owned()),
    );

    assert_eq!(tag.musicbrainz_track_id(), Some("abc"));
}

#[test]
fn musicbrainz_artist_ids_join_with_slashes() {
    let mut tag = Tag::default();

    tag.set_musicbrainz_artist_ids(&["first-id", "second-id"]);

    assert_eq!(
        tag.strings_of(&ident::MUSICBRAINZ_ARTIST_ID).next(),
        Some("first-id/second-id"),
    );
    let ids: Vec<&str> = tag.musicbrainz_artist_ids().collect();
    assert_eq!(ids, ["first-id", "second-id"]);
}

#[test]
fn replaygain_values_are_formatted() {
    let mut tag = Tag::default();

    tag.set_replaygain_track_gain(-2.5);
    assert_eq!(
        tag.strings_of(&ident::REPLAYGAIN_TRACK_GAIN).next(),
        Some("-2.50 dB"),
    );
    assert_eq!(tag.replaygain_track_gain(), Some(-2.5));

    // a gain without the dB suffix is readable too
    tag.set_data(&ident::REPLAYGAIN_ALBUM_GAIN, Data::Utf8("1.25".to_owned()));
    assert_eq!(tag.replaygain_album_gain(), Some(1.25));

    tag.set_replaygain_track_peak(0.987654);
    assert_eq!(
        tag.strings_of(&ident::REPLAYGAIN_TRACK_PEAK).next(),
        Some("0.987654"),
    );
    assert_eq!(tag.replaygain_track_peak(), Some(0.987654));
}

#[test]
fn performers_roles_swap_inner_separators() {
    let mut tag = Tag::default();

    tag.set_performers_roles(&["Guitar; Vocals", "Drums"]);

    assert_eq!(
        tag.strings_of(&ident::PERFORMERS_ROLE).next(),
        Some("Guitar/ Vocals; Drums"),
    );
    assert_eq!(tag.performers_roles(), ["Guitar; Vocals", "Drums"]);
}

#[test]
fn legacy_identifiers_are_canonicalized() {
    let mut tag = Tag::default();

    let legacy: Fourcc = "alb".parse().unwrap();
    tag.set_data(legacy, Data::Utf8("Album".to_owned()));

    assert_eq!(tag.album(), Some("Album"));
    assert_eq!(legacy, ident::ALBUM);
}

#[test]
fn artwork_only_accepts_image_data() {
    let mut tag = Tag::default();

    tag.set_artwork(Data::Utf8("not an image".to_owned()));
    assert_eq!(tag.artwork(), None);

    tag.set_artwork(Data::Png(b"<png data>".to_vec()));
    tag.add_artwork(Data::Jpeg(b"<jpeg data>".to_vec()));
    assert_eq!(tag.artworks().count(), 2);
    assert_eq!(tag.artwork(), Some(&Data::Png(b"<png data>".to_vec())));

    tag.remove_artworks();
    assert!(tag.is_empty());
}
