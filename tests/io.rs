use std::io::Cursor;
use std::time::Duration;

use mp4tag::{ChunkOffsetTable, ErrorKind, MediaFile, Mp4File, ReadConfig, Tag};

mod common;

use common::{build, build_m4a, item, Layout};

fn read_offsets(image: &[u8]) -> Vec<u32> {
    let mp4 = Mp4File::read_with(MediaFile::from_vec(image.to_vec()), &ReadConfig::chunk_offsets())
        .unwrap();
    let mut offsets = Vec::new();
    for table in mp4.chunk_offsets() {
        match table {
            ChunkOffsetTable::Stco(o) => offsets.extend(o.iter().copied()),
            ChunkOffsetTable::Co64(o) => offsets.extend(o.iter().map(|o| *o as u32)),
        }
    }
    offsets
}

#[test]
fn read_title() {
    let image = build_m4a(&[item(b"\xa9nam", 1, b"Main Title")]);

    let tag = Tag::read_from(&mut Cursor::new(image)).unwrap();
    assert_eq!(tag.title(), Some("Main Title"));
}

#[test]
fn write_album_adjusts_chunk_offsets() {
    let image = build_m4a(&[item(b"\xa9alb", 1, b"Old")]);
    let old_len = image.len() as i64;
    let old_offsets = read_offsets(&image);
    let payload_start = old_offsets[0] as usize;
    let old_payload = image[payload_start..].to_vec();

    let mut mp4 = Mp4File::read(MediaFile::from_vec(image)).unwrap();
    assert_eq!(mp4.tag().album(), Some("Old"));
    mp4.tag_mut().set_album("A Considerably Longer Album Title");
    mp4.save().unwrap();

    let new_image = mp4.media_file().as_memory().unwrap().to_vec();
    let len_diff = new_image.len() as i64 - old_len;
    assert!(len_diff > 0);

    let reread = Mp4File::read(MediaFile::from_vec(new_image.clone())).unwrap();
    assert_eq!(reread.tag().album(), Some("A Considerably Longer Album Title"));

    // every offset points into the moved media data
    let new_offsets = read_offsets(&new_image);
    assert_eq!(new_offsets.len(), old_offsets.len());
    for (old, new) in old_offsets.iter().zip(new_offsets.iter()) {
        assert_eq!(*new as i64, *old as i64 + len_diff);
    }

    // the media data bytes are unchanged
    let new_payload_start = (payload_start as i64 + len_diff) as usize;
    assert_eq!(&new_image[new_payload_start..], &old_payload[..]);
}

#[test]
fn shrinking_metadata_shifts_offsets_back() {
    let image = build_m4a(&[item(b"\xa9alb", 1, b"An Album Title With Some Length")]);
    let old_len = image.len() as i64;
    let old_offsets = read_offsets(&image);

    let mut mp4 = Mp4File::read(MediaFile::from_vec(image)).unwrap();
    mp4.tag_mut().set_album("A");
    mp4.save().unwrap();

    let new_image = mp4.media_file().as_memory().unwrap().to_vec();
    let len_diff = new_image.len() as i64 - old_len;
    assert!(len_diff < 0);

    let reread = Mp4File::read(MediaFile::from_vec(new_image.clone())).unwrap();
    assert_eq!(reread.tag().album(), Some("A"));

    let new_offsets = read_offsets(&new_image);
    for (old, new) in old_offsets.iter().zip(new_offsets.iter()) {
        assert_eq!(*new as i64, *old as i64 + len_diff);
    }
}

#[test]
fn resave_without_mutation_is_identical() {
    let image = build_m4a(&[
        item(b"\xa9nam", 1, b"Main Title"),
        item(b"\xa9alb", 1, b"Album"),
        item(b"trkn", 0, &[0, 0, 0, 3, 0, 12, 0, 0]),
    ]);

    let mut mp4 = Mp4File::read(MediaFile::from_vec(image.clone())).unwrap();
    mp4.save().unwrap();
    let new_image = mp4.media_file().as_memory().unwrap();
    assert_eq!(new_image, &image[..]);

    let a = Tag::read_from(&mut Cursor::new(image)).unwrap();
    let b = Tag::read_from(&mut Cursor::new(new_image.to_vec())).unwrap();
    assert_eq!(a, b);
}

#[test]
fn legacy_genre_is_translated_and_rewritten() {
    let image = build_m4a(&[item(b"gnre", 0, &[0x00, 0x12])]);

    let mut mp4 = Mp4File::read(MediaFile::from_vec(image)).unwrap();
    {
        let genres: Vec<&str> = mp4.tag().genres().collect();
        assert_eq!(genres, ["Rock"]);
    }

    mp4.tag_mut().set_genre("Rock");
    mp4.save().unwrap();

    let new_image = mp4.media_file().as_memory().unwrap().to_vec();
    let tag = Tag::read_from(&mut Cursor::new(new_image)).unwrap();
    assert_eq!(tag.standard_genre(), None);
    assert_eq!(tag.strings_of(&mp4tag::CUSTOM_GENRE).next(), Some("Rock"));
}

#[test]
fn missing_meta_handler_is_repaired_on_write() {
    let image = build(&Layout {
        ilst_children: &[item(b"\xa9nam", 1, b"Main Title")],
        with_meta_hdlr: false,
        ..Layout::default()
    });
    assert!(!image.windows(4).any(|w| w == b"mdir"));

    let mut mp4 = Mp4File::read(MediaFile::from_vec(image)).unwrap();
    assert_eq!(mp4.tag().title(), Some("Main Title"));
    mp4.save().unwrap();

    let new_image = mp4.media_file().as_memory().unwrap().to_vec();
    assert!(new_image.windows(4).any(|w| w == b"mdir"));

    let tag = Tag::read_from(&mut Cursor::new(new_image)).unwrap();
    assert_eq!(tag.title(), Some("Main Title"));
}

#[test]
fn missing_user_data_chain_is_created_on_write() {
    let image = build(&Layout { with_udta: false, ..Layout::default() });

    let mut mp4 = Mp4File::read(MediaFile::from_vec(image)).unwrap();
    assert!(mp4.tag().is_empty());

    let old_offsets = read_offsets(mp4.media_file().as_memory().unwrap());
    let old_len = mp4.media_file().as_memory().unwrap().len() as i64;

    mp4.tag_mut().set_title("Fresh Title");
    mp4.save().unwrap();

    let new_image = mp4.media_file().as_memory().unwrap().to_vec();
    let len_diff = new_image.len() as i64 - old_len;

    let reread = Mp4File::read(MediaFile::from_vec(new_image.clone())).unwrap();
    assert_eq!(reread.tag().title(), Some("Fresh Title"));

    let new_offsets = read_offsets(&new_image);
    for (old, new) in old_offsets.iter().zip(new_offsets.iter()) {
        assert_eq!(*new as i64, *old as i64 + len_diff);
    }
}

#[test]
fn movie_and_codec_properties_are_read() {
    let image = build(&Layout { with_video_track: true, ..Layout::default() });

    let mp4 = Mp4File::read(MediaFile::from_vec(image)).unwrap();
    let info = mp4.tag().info();
    assert_eq!(info.duration, Some(Duration::from_secs(5)));
    assert_eq!(info.audio.channel_count, Some(2));
    assert_eq!(info.audio.sample_size, Some(16));
    assert_eq!(info.audio.sample_rate, Some(44_100));
    assert_eq!(info.audio.max_bitrate, Some(256_000));
    assert_eq!(info.audio.avg_bitrate, Some(128_000));
    assert_eq!(info.video.width, Some(640));
    assert_eq!(info.video.height, Some(360));
}

#[test]
fn headers_only_traversal_skips_the_item_list() {
    let image = build_m4a(&[item(b"\xa9nam", 1, b"Main Title")]);

    let mp4 = Mp4File::read_with(MediaFile::from_vec(image), &ReadConfig::headers_only())
        .unwrap();
    assert!(mp4.tag().is_empty());
    assert!(mp4.mdat_bounds().is_some());
}

#[test]
fn media_data_extending_to_end_of_file_terminates_the_scan() {
    let mut image = build_m4a(&[item(b"\xa9nam", 1, b"Main Title")]);
    let payload_len = Layout::default().mdat_payload.len();
    let mdat_pos = image.len() - payload_len - 8;
    image[mdat_pos..mdat_pos + 4].copy_from_slice(&[0; 4]);

    let mp4 = Mp4File::read(MediaFile::from_vec(image.clone())).unwrap();
    assert!(!mp4.is_corrupt());
    assert_eq!(mp4.tag().title(), Some("Main Title"));
    assert_eq!(mp4.mdat_bounds(), Some((mdat_pos as u64, image.len() as u64)));
}

#[test]
fn parse_fault_marks_the_file_as_corrupt() {
    let mut image = common::atom(b"ftyp", b"M4A \x00\x00\x00\x00isom");
    // a movie atom holding a user data atom whose declared length exceeds the actual content
    let mut moov_content = Vec::new();
    moov_content.extend_from_slice(&50u32.to_be_bytes());
    moov_content.extend_from_slice(b"udta");
    image.extend_from_slice(&common::atom(b"moov", &moov_content));

    let mut mp4 = Mp4File::read(MediaFile::from_vec(image)).unwrap();
    assert!(mp4.is_corrupt());
    assert!(mp4.corruption_reason().is_some());
    assert!(mp4.tag().is_empty());

    let err = mp4.save().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Corrupt));
}

#[test]
fn file_not_starting_with_ftyp_fails_construction() {
    let image = b"AAAAAAAAAAAAAAAA".to_vec();

    let err = Mp4File::read(MediaFile::from_vec(image)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NoFiletype));
}
