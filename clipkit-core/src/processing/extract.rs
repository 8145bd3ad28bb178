// ============================================================================
// clipkit-core/src/processing/extract.rs
// ============================================================================
//
// FRAME EXTRACTION: Save every Nth frame of a video as an image file
//
// Files are named after the index of the frame in the video, not after the
// number of files written, so gaps show the interval used.
//
// KEY COMPONENTS:
// - ExtractFormat: jpg / png / bmp output
// - save_frame: writes one frame (JPEG at fixed quality)
// - extract_from_source: extraction loop over any FrameSource
// - extract_frames: file-based entry point

use crate::config::JPEG_QUALITY;
use crate::error::{CoreError, CoreResult};
use crate::external::frames::{FrameSource, SidecarFrameSource};
use crate::external::{VideoInfo, get_video_info};
use crate::progress_reporting;
use crate::utils::frames_to_seconds;

use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use serde::Serialize;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Extracted frames are reported every this many files.
const EXTRACT_PROGRESS_INTERVAL: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractFormat {
    #[default]
    Jpg,
    Png,
    Bmp,
}

impl ExtractFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExtractFormat::Jpg => "jpg",
            ExtractFormat::Png => "png",
            ExtractFormat::Bmp => "bmp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Keep frames whose index is a multiple of this (>= 1)
    pub interval: u64,
    pub format: ExtractFormat,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            interval: 1,
            format: ExtractFormat::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractResult {
    pub extracted: u64,
    pub total_frames: u64,
    pub fps: f64,
    pub duration_secs: f64,
}

/// File name for frame `index`, e.g. `frame_000042.jpg`.
#[must_use]
pub fn frame_file_name(index: u64, format: ExtractFormat) -> String {
    format!("frame_{index:06}.{}", format.extension())
}

/// Writes `frame` to `path` in `format`.
pub fn save_frame(frame: &RgbImage, path: &Path, format: ExtractFormat) -> CoreResult<()> {
    match format {
        ExtractFormat::Jpg => {
            let mut writer = BufWriter::new(File::create(path)?);
            let encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
            frame.write_with_encoder(encoder)?;
            writer.flush()?;
        }
        ExtractFormat::Png => frame.save_with_format(path, image::ImageFormat::Png)?,
        ExtractFormat::Bmp => frame.save_with_format(path, image::ImageFormat::Bmp)?,
    }
    Ok(())
}

/// Number of files an extraction of `total_frames` at `interval` writes.
#[must_use]
pub fn expected_extractions(total_frames: u64, interval: u64) -> u64 {
    if interval == 0 {
        0
    } else {
        total_frames.div_ceil(interval)
    }
}

fn validate_interval(interval: u64) -> CoreResult<()> {
    if interval == 0 {
        return Err(CoreError::InvalidInput(
            "interval must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn ensure_fps(info: &VideoInfo) -> CoreResult<f64> {
    if info.fps > 0.0 {
        Ok(info.fps)
    } else {
        Err(CoreError::InvalidFps(info.path.clone()))
    }
}

/// Saves every `options.interval`-th frame of `source` into `output_dir`.
///
/// `info` describes the video behind `source`. When its frame count is 0 the
/// decoded count is reported instead.
pub fn extract_from_source<S: FrameSource>(
    mut source: S,
    output_dir: &Path,
    options: &ExtractOptions,
    info: &VideoInfo,
) -> CoreResult<ExtractResult> {
    validate_interval(options.interval)?;
    let fps = ensure_fps(info)?;
    let total_frames = info.frame_count;

    let expected = expected_extractions(total_frames, options.interval);
    let mut index = 0u64;
    let mut extracted = 0u64;

    while let Some(frame) = source.next_frame()? {
        if index % options.interval == 0 {
            let path = output_dir.join(frame_file_name(index, options.format));
            save_frame(&frame, &path, options.format)?;
            extracted += 1;
            log::debug!("Saved {}", path.display());
            progress_reporting::frame_progress(
                "Extracting",
                extracted,
                expected,
                EXTRACT_PROGRESS_INTERVAL,
            );
        }
        index += 1;
    }
    progress_reporting::clear_progress();
    source.finish()?;

    let total_frames = if total_frames > 0 { total_frames } else { index };
    Ok(ExtractResult {
        extracted,
        total_frames,
        fps,
        duration_secs: frames_to_seconds(total_frames, fps),
    })
}

/// Extracts frames of `input` into `output_dir`, creating it if needed.
pub fn extract_frames(
    input: &Path,
    output_dir: &Path,
    options: &ExtractOptions,
) -> CoreResult<ExtractResult> {
    validate_interval(options.interval)?;
    fs::create_dir_all(output_dir)?;

    let info = get_video_info(input)?;
    ensure_fps(&info)?;

    progress_reporting::status("FPS", &format!("{:.2}", info.fps), false);
    progress_reporting::status("Total frames", &info.frame_count.to_string(), false);
    let unit = if options.interval == 1 { "frame" } else { "frames" };
    progress_reporting::processing(&format!(
        "Extracting every {} {unit} as {}...",
        options.interval,
        options.format.extension()
    ));

    let source = SidecarFrameSource::open(input)?;
    extract_from_source(source, output_dir, options, &info)
}
