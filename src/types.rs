use std::time::Duration;

/// Information about the audio track of a file, read from the audio sample entry and its
/// elementary stream descriptor.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AudioInfo {
    /// The number of audio channels.
    pub channel_count: Option<u16>,
    /// The sample size in bits.
    pub sample_size: Option<u16>,
    /// The sample rate in Hz, the integer part of the sample entry's 16.16 fixed point field.
    pub sample_rate: Option<u32>,
    /// The maximum bitrate of the track.
    pub max_bitrate: Option<u32>,
    /// The average bitrate of the track.
    pub avg_bitrate: Option<u32>,
}

/// Information about the video track of a file, read from the visual sample entry.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VideoInfo {
    /// The frame width in pixels.
    pub width: Option<u16>,
    /// The frame height in pixels.
    pub height: Option<u16>,
}

/// Read-only properties of a file, available when it was parsed with a configuration that
/// includes properties.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MediaInfo {
    /// The duration of the presentation, `mvhd` duration scaled by its timescale.
    pub duration: Option<Duration>,
    /// Audio track properties.
    pub audio: AudioInfo,
    /// Video track properties.
    pub video: VideoInfo,
}
