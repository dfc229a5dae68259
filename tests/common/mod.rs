//! Synthetic `.m4a` images for the integration tests. Chunk offsets are resolved with a second
//! assembly pass once the media data position is known.
#![allow(dead_code)]

pub fn atom(fourcc: &[u8; 4], content: &[u8]) -> Vec<u8> {
    let mut v = Vec::with_capacity(8 + content.len());
    v.extend_from_slice(&((8 + content.len()) as u32).to_be_bytes());
    v.extend_from_slice(fourcc);
    v.extend_from_slice(content);
    v
}

pub fn data_atom(type_code: u32, payload: &[u8]) -> Vec<u8> {
    let mut content = Vec::new();
    content.extend_from_slice(&type_code.to_be_bytes());
    content.extend_from_slice(&[0; 4]); // locale
    content.extend_from_slice(payload);
    atom(b"data", &content)
}

/// A metadata item: an annotation atom holding one typed data atom.
pub fn item(fourcc: &[u8; 4], type_code: u32, payload: &[u8]) -> Vec<u8> {
    atom(fourcc, &data_atom(type_code, payload))
}

fn handler(subtype: &[u8; 4]) -> Vec<u8> {
    let mut content = vec![0u8; 8]; // version, flags, component type
    content.extend_from_slice(subtype);
    content.extend_from_slice(&[0; 13]); // manufacturer, flags, flags mask, name
    atom(b"hdlr", &content)
}

fn esds() -> Vec<u8> {
    let mut content = vec![0u8; 4]; // version and flags
    content.extend_from_slice(&[0x03, 18]); // elementary stream descriptor
    content.extend_from_slice(&[0, 0, 0]); // stream id and priority
    content.extend_from_slice(&[0x04, 13]); // decoder config descriptor
    content.extend_from_slice(&[0x40, 0x15, 0, 0, 0]); // object type, stream type, buffer size
    content.extend_from_slice(&256_000u32.to_be_bytes()); // maximum bitrate
    content.extend_from_slice(&128_000u32.to_be_bytes()); // average bitrate
    atom(b"esds", &content)
}

fn audio_sample_entry() -> Vec<u8> {
    let mut content = vec![0u8; 6]; // reserved
    content.extend_from_slice(&1u16.to_be_bytes()); // data reference index
    content.extend_from_slice(&[0; 8]); // version, revision, vendor
    content.extend_from_slice(&2u16.to_be_bytes()); // channel count
    content.extend_from_slice(&16u16.to_be_bytes()); // sample size
    content.extend_from_slice(&[0; 4]); // compression id, packet size
    content.extend_from_slice(&(44_100u32 << 16).to_be_bytes()); // 16.16 sample rate
    content.extend_from_slice(&esds());
    atom(b"mp4a", &content)
}

fn visual_sample_entry() -> Vec<u8> {
    let mut content = vec![0u8; 6]; // reserved
    content.extend_from_slice(&1u16.to_be_bytes()); // data reference index
    content.extend_from_slice(&[0; 16]); // pre-defined and reserved
    content.extend_from_slice(&640u16.to_be_bytes()); // width
    content.extend_from_slice(&360u16.to_be_bytes()); // height
    content.extend_from_slice(&[0; 50]); // resolution, frame count, compressor name, depth
    atom(b"avc1", &content)
}

fn stsd(entry: Vec<u8>) -> Vec<u8> {
    let mut content = vec![0u8; 4]; // version and flags
    content.extend_from_slice(&1u32.to_be_bytes()); // entry count
    content.extend_from_slice(&entry);
    atom(b"stsd", &content)
}

fn stco(offsets: &[u32]) -> Vec<u8> {
    let mut content = vec![0u8; 4]; // version and flags
    content.extend_from_slice(&(offsets.len() as u32).to_be_bytes());
    for o in offsets {
        content.extend_from_slice(&o.to_be_bytes());
    }
    atom(b"stco", &content)
}

fn audio_track(offsets: &[u32]) -> Vec<u8> {
    let stbl = atom(b"stbl", &[stsd(audio_sample_entry()), stco(offsets)].concat());
    let minf = atom(b"minf", &stbl);
    let mdia = atom(b"mdia", &[handler(b"soun"), minf].concat());
    atom(b"trak", &mdia)
}

fn video_track(offsets: &[u32]) -> Vec<u8> {
    let stbl = atom(b"stbl", &[stsd(visual_sample_entry()), stco(offsets)].concat());
    let minf = atom(b"minf", &stbl);
    let mdia = atom(b"mdia", &[handler(b"vide"), minf].concat());
    atom(b"trak", &mdia)
}

fn mvhd(timescale: u32, duration: u32) -> Vec<u8> {
    let mut content = vec![0u8; 12]; // version, flags, creation and modification time
    content.extend_from_slice(&timescale.to_be_bytes());
    content.extend_from_slice(&duration.to_be_bytes());
    atom(b"mvhd", &content)
}

/// The shape of a synthetic file.
pub struct Layout<'a> {
    pub ilst_children: &'a [Vec<u8>],
    pub with_udta: bool,
    pub with_meta_hdlr: bool,
    pub with_video_track: bool,
    pub mdat_payload: &'a [u8],
}

impl Default for Layout<'_> {
    fn default() -> Self {
        Self {
            ilst_children: &[],
            with_udta: true,
            with_meta_hdlr: true,
            with_video_track: false,
            mdat_payload: b"CHNKAAAABBBB",
        }
    }
}

fn assemble(layout: &Layout<'_>, offsets: &[u32]) -> Vec<u8> {
    let ftyp = atom(b"ftyp", b"M4A \x00\x00\x00\x00isom");

    let mut moov_content = mvhd(1000, 5000);
    moov_content.extend_from_slice(&audio_track(offsets));
    if layout.with_video_track {
        moov_content.extend_from_slice(&video_track(offsets));
    }
    if layout.with_udta {
        let ilst = atom(b"ilst", &layout.ilst_children.concat());
        let mut meta_content = vec![0u8; 4]; // version and flags
        if layout.with_meta_hdlr {
            meta_content.extend_from_slice(&handler(b"mdir"));
        }
        meta_content.extend_from_slice(&ilst);
        let meta = atom(b"meta", &meta_content);
        moov_content.extend_from_slice(&atom(b"udta", &meta));
    }
    let moov = atom(b"moov", &moov_content);

    let mdat = atom(b"mdat", layout.mdat_payload);

    [ftyp, moov, mdat].concat()
}

/// Builds the file image, resolving the chunk offsets against the final media data position.
pub fn build(layout: &Layout<'_>) -> Vec<u8> {
    let first = assemble(layout, &[0, 0]);
    let content_pos = (first.len() - layout.mdat_payload.len()) as u32;
    assemble(layout, &[content_pos, content_pos + 4])
}

/// Builds a default file image carrying the metadata items.
pub fn build_m4a(ilst_children: &[Vec<u8>]) -> Vec<u8> {
    build(&Layout { ilst_children, ..Layout::default() })
}
