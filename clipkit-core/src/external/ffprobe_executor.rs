//! FFprobe integration for video metadata
//!
//! Runs ffprobe (through the `ffprobe` crate) and condenses its output into
//! the [`VideoInfo`] every operation reads its frame rate, size and frame
//! count from.
use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use ffprobe::{FfProbe, FfProbeError, ffprobe};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Video metadata read from the input container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoInfo {
    /// File the information was read from
    pub path: PathBuf,
    /// Width of the first video stream
    pub width: u32,
    /// Height of the first video stream
    pub height: u32,
    /// Frames per second (0.0 when the container reports none)
    pub fps: f64,
    /// Number of frames, counted by the container or estimated from duration
    pub frame_count: u64,
    /// Duration in seconds
    pub duration_secs: f64,
    /// Codec name of the video stream
    pub codec: Option<String>,
    /// Whether the file carries an audio stream
    pub has_audio: bool,
    /// Sample rate of the first audio stream in Hz
    pub audio_sample_rate: Option<u32>,
    /// File size in bytes
    pub file_size: u64,
}

impl VideoInfo {
    /// Duration in minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> f64 {
        self.duration_secs / 60.0
    }
}

/// Gets video information for a given input file.
pub fn get_video_info(input_path: &Path) -> CoreResult<VideoInfo> {
    log::debug!(
        "Running ffprobe (via crate) for video info on: {}",
        input_path.display()
    );
    match ffprobe(input_path) {
        Ok(metadata) => {
            let mut info = video_info_from_probe(input_path, &metadata)?;
            info.file_size = std::fs::metadata(input_path).map(|m| m.len()).unwrap_or(0);
            log::debug!("Video info for {}: {:?}", input_path.display(), info);
            Ok(info)
        }
        Err(err) => {
            log::error!(
                "ffprobe failed for video info on {}: {:?}",
                input_path.display(),
                err
            );
            Err(map_ffprobe_error(err, "video info"))
        }
    }
}

/// Builds [`VideoInfo`] from parsed ffprobe output.
///
/// Frame rate prefers `avg_frame_rate` over `r_frame_rate`. Frame count uses
/// `nb_frames` and falls back to `duration * fps`. Duration falls back from
/// the stream to the container to `frame_count / fps`. `file_size` is left
/// at 0 for the caller to fill in.
pub fn video_info_from_probe(input_path: &Path, metadata: &FfProbe) -> CoreResult<VideoInfo> {
    let video_stream = metadata
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| {
            CoreError::VideoInfoError(format!("No video stream found in {}", input_path.display()))
        })?;

    let width = video_stream.width.ok_or_else(|| {
        CoreError::VideoInfoError(format!(
            "Video stream missing width in {}",
            input_path.display()
        ))
    })?;
    let height = video_stream.height.ok_or_else(|| {
        CoreError::VideoInfoError(format!(
            "Video stream missing height in {}",
            input_path.display()
        ))
    })?;
    if width <= 0 || height <= 0 {
        return Err(CoreError::VideoInfoError(format!(
            "Invalid dimensions found in {}: width={}, height={}",
            input_path.display(),
            width,
            height
        )));
    }

    let fps = parse_frame_rate(&video_stream.avg_frame_rate)
        .filter(|f| *f > 0.0)
        .or_else(|| parse_frame_rate(&video_stream.r_frame_rate))
        .unwrap_or(0.0);

    let parse_secs = |value: Option<&String>| {
        value
            .and_then(|d| d.parse::<f64>().ok())
            .filter(|d| *d > 0.0)
    };
    let container_duration =
        parse_secs(video_stream.duration.as_ref()).or_else(|| parse_secs(metadata.format.duration.as_ref()));

    let counted_frames = video_stream
        .nb_frames
        .as_deref()
        .and_then(|f| f.parse::<u64>().ok())
        .filter(|f| *f > 0);

    let frame_count = match (counted_frames, container_duration) {
        (Some(frames), _) => frames,
        (None, Some(duration)) if fps > 0.0 => (duration * fps).round() as u64,
        _ => 0,
    };

    let duration_secs = container_duration
        .unwrap_or_else(|| crate::utils::frames_to_seconds(frame_count, fps));

    let audio_stream = metadata
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"));

    Ok(VideoInfo {
        path: input_path.to_path_buf(),
        width: width as u32,
        height: height as u32,
        fps,
        frame_count,
        duration_secs,
        codec: video_stream.codec_name.clone(),
        has_audio: audio_stream.is_some(),
        audio_sample_rate: audio_stream
            .and_then(|s| s.sample_rate.as_deref())
            .and_then(|rate| rate.parse::<u32>().ok()),
        file_size: 0,
    })
}

/// Parses a frame rate string (e.g., "30000/1001" or "29.97").
///
/// Returns `None` for unparsable strings and for a zero denominator
/// (ffprobe reports "0/0" when a stream has no rate).
#[must_use]
pub fn parse_frame_rate(frame_rate: &str) -> Option<f64> {
    let frame_rate = frame_rate.trim();
    if let Some((num, den)) = frame_rate.split_once('/') {
        let numerator: f64 = num.trim().parse().ok()?;
        let denominator: f64 = den.trim().parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        return Some(numerator / denominator);
    }
    frame_rate.parse().ok()
}

fn map_ffprobe_error(err: FfProbeError, context: &str) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error(format!("ffprobe ({context})"), io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error(format!("ffprobe ({context})"), output.status, stderr)
        }
        FfProbeError::Deserialize(err) => {
            CoreError::JsonParseError(format!("ffprobe {context} output deserialization: {err}"))
        }
        _ => CoreError::FfprobeParse(format!("Unknown ffprobe error during {context}: {err:?}")),
    }
}
