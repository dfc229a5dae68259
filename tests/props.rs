use proptest::prelude::*;

use mp4tag::{MediaFile, Mp4File};

mod common;

use common::build_m4a;

proptest! {
    /// Tag fields survive a write and re-read through a file image.
    #[test]
    fn fields_roundtrip_through_a_file(
        title in "[a-zA-Z0-9]{1,32}",
        artists in proptest::collection::vec("[a-zA-Z0-9]{1,16}", 1..4),
        bpm in 1u16..=400,
        (track_number, total_tracks) in (1u16..=99, 0u16..=99),
    ) {
        let image = build_m4a(&[]);

        let mut mp4 = Mp4File::read(MediaFile::from_vec(image)).unwrap();
        mp4.tag_mut().set_title(title.clone());
        mp4.tag_mut().set_artists(&artists);
        mp4.tag_mut().set_bpm(bpm);
        mp4.tag_mut().set_track(track_number, total_tracks);
        mp4.save().unwrap();

        let new_image = mp4.media_file().as_memory().unwrap().to_vec();
        let reread = Mp4File::read(MediaFile::from_vec(new_image)).unwrap();
        let tag = reread.tag();

        prop_assert_eq!(tag.title(), Some(title.as_str()));
        let read_artists: Vec<&str> = tag.artists().collect();
        prop_assert_eq!(read_artists, artists);
        prop_assert_eq!(tag.bpm(), Some(bpm));
        prop_assert_eq!(tag.track_number(), Some(track_number));
        let expected_total = match total_tracks {
            0 => None,
            t => Some(t),
        };
        prop_assert_eq!(tag.total_tracks(), expected_total);
    }

    /// Arbitrary leading bytes that aren't a filetype atom fail construction.
    #[test]
    fn garbage_input_does_not_panic(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        let mut owned = data;
        // never a valid filetype head by accident
        if owned.len() >= 8 {
            owned[4] = b'X';
        }
        let _ = Mp4File::read(MediaFile::from_vec(owned));
    }
}
