//! Configuration defaults and encoder settings for the clipkit-core library.
//!
//! Every value the individual operations fall back to lives here as a
//! constant, so the CLI and library consumers share one set of defaults.

// Default constants

/// Default codec for outputs that re-encode decoded frames (overlay, resize,
/// image sequences). FourCC-style, resolved through [`resolve_codec`].
pub const DEFAULT_FRAME_CODEC: &str = "mp4v";

/// Default codec for generated and concatenated videos.
pub const DEFAULT_H264_CODEC: &str = "libx264";

/// Pixel format written by the encoder.
pub const DEFAULT_PIXEL_FORMAT: &str = "yuv420p";

/// Audio codec used when audio is carried into an output.
pub const DEFAULT_AUDIO_CODEC: &str = "aac";

/// Default frame rate for image sequences and generated videos.
pub const DEFAULT_FPS: u32 = 30;

/// Progress is reported every this many frames in frame loops.
pub const PROGRESS_FRAME_INTERVAL: u64 = 30;

/// Pixel margin between overlay text and the frame edge.
pub const TEXT_MARGIN: i32 = 10;

/// Font pixel size corresponding to a font scale of 1.0.
pub const BASE_FONT_PX: f32 = 30.0;

/// Quality used when writing JPEG frames.
pub const JPEG_QUALITY: u8 = 95;

// Progress video defaults

pub const DEFAULT_PROGRESS_WIDTH: u32 = 1080;
pub const DEFAULT_PROGRESS_HEIGHT: u32 = 1920;
pub const DEFAULT_PROGRESS_DURATION_SECS: u32 = 4;
pub const DEFAULT_PROGRESS_FONT_PX: f32 = 750.0;
/// Bar width as a fraction of the frame width.
pub const DEFAULT_PROGRESS_BAR_RATIO: f64 = 0.15;
/// Horizontal position of the countdown number as a fraction of the width.
pub const DEFAULT_PROGRESS_TEXT_X_RATIO: f64 = 0.55;
pub const DEFAULT_PROGRESS_OUTPUT: &str = "progress_video.mp4";

/// Font files tried, in order, when no font path is given.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Maps OpenCV-style FourCC codes to ffmpeg encoder names.
///
/// Matching is case-insensitive; names that are not a known alias are passed
/// through unchanged so any ffmpeg encoder can be requested directly.
#[must_use]
pub fn resolve_codec(name: &str) -> String {
    match name.trim().to_ascii_lowercase().as_str() {
        "mp4v" | "xvid" | "divx" => "mpeg4".to_string(),
        "avc1" | "h264" | "x264" => "libx264".to_string(),
        "hevc" | "h265" | "hev1" | "hvc1" => "libx265".to_string(),
        "mjpg" => "mjpeg".to_string(),
        "vp09" | "vp9" => "libvpx-vp9".to_string(),
        "vp80" | "vp8" => "libvpx".to_string(),
        _ => name.trim().to_string(),
    }
}

/// Extra quality arguments for an ffmpeg encoder.
#[must_use]
pub fn codec_quality_args(encoder: &str) -> Vec<String> {
    let args: &[&str] = match encoder {
        "mpeg4" => &["-q:v", "3"],
        "libx264" | "libx265" => &["-crf", "23", "-preset", "medium"],
        _ => &[],
    };
    args.iter().map(|s| (*s).to_string()).collect()
}

/// Encoder settings for operations that write a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Codec as given by the user (FourCC alias or ffmpeg encoder name)
    pub codec: String,

    /// Output pixel format
    pub pixel_format: String,

    /// Whether to carry the source file's audio into the output
    pub keep_audio: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            codec: DEFAULT_FRAME_CODEC.to_string(),
            pixel_format: DEFAULT_PIXEL_FORMAT.to_string(),
            keep_audio: false,
        }
    }
}

impl EncoderConfig {
    /// Returns a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> EncoderConfigBuilder {
        EncoderConfigBuilder::new()
    }

    /// The ffmpeg encoder name for this configuration.
    #[must_use]
    pub fn encoder(&self) -> String {
        resolve_codec(&self.codec)
    }

    /// Whether the pixel format subsamples chroma 2x2, requiring even dimensions.
    #[must_use]
    pub fn needs_even_dimensions(&self) -> bool {
        self.pixel_format.contains("420")
    }
}

/// Builder for [`EncoderConfig`].
///
/// ```rust
/// use clipkit_core::config::EncoderConfig;
///
/// let config = EncoderConfig::builder()
///     .codec("avc1")
///     .keep_audio(true)
///     .build();
/// assert_eq!(config.encoder(), "libx264");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EncoderConfigBuilder {
    config: EncoderConfig,
}

impl EncoderConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn codec(mut self, codec: impl Into<String>) -> Self {
        self.config.codec = codec.into();
        self
    }

    #[must_use]
    pub fn pixel_format(mut self, pixel_format: impl Into<String>) -> Self {
        self.config.pixel_format = pixel_format.into();
        self
    }

    #[must_use]
    pub fn keep_audio(mut self, keep_audio: bool) -> Self {
        self.config.keep_audio = keep_audio;
        self
    }

    #[must_use]
    pub fn build(self) -> EncoderConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_codec_aliases() {
        assert_eq!(resolve_codec("mp4v"), "mpeg4");
        assert_eq!(resolve_codec("MP4V"), "mpeg4");
        assert_eq!(resolve_codec("XVID"), "mpeg4");
        assert_eq!(resolve_codec("avc1"), "libx264");
        assert_eq!(resolve_codec("h265"), "libx265");
        assert_eq!(resolve_codec("MJPG"), "mjpeg");
        assert_eq!(resolve_codec("vp09"), "libvpx-vp9");
    }

    #[test]
    fn test_resolve_codec_passthrough() {
        assert_eq!(resolve_codec("libx264"), "libx264");
        assert_eq!(resolve_codec("prores_ks"), "prores_ks");
        assert_eq!(resolve_codec(" ffv1 "), "ffv1");
    }

    #[test]
    fn test_codec_quality_args() {
        assert_eq!(codec_quality_args("mpeg4"), vec!["-q:v", "3"]);
        assert_eq!(
            codec_quality_args("libx264"),
            vec!["-crf", "23", "-preset", "medium"]
        );
        assert!(codec_quality_args("ffv1").is_empty());
    }

    #[test]
    fn test_encoder_config_defaults_and_builder() {
        let default = EncoderConfig::default();
        assert_eq!(default.encoder(), "mpeg4");
        assert!(default.needs_even_dimensions());
        assert!(!default.keep_audio);

        let built = EncoderConfig::builder()
            .codec("ffv1")
            .pixel_format("rgb24")
            .keep_audio(true)
            .build();
        assert_eq!(built.encoder(), "ffv1");
        assert!(!built.needs_even_dimensions());
        assert!(built.keep_audio);
    }
}
