// ============================================================================
// clipkit-core/src/processing/resize.rs
// ============================================================================
//
// RESIZE: Scale every frame of a video to new dimensions
//
// KEY COMPONENTS:
// - ResizeOptions: width / height / scale as given on the command line
// - calculate_target_dimensions: option precedence and aspect handling
// - resize_frames: frame loop over any source/sink
// - resize_video: file-based entry point

use crate::config::EncoderConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::ffmpeg::RawVideoFormat;
use crate::external::frames::{FrameSink, FrameSource, SidecarFrameSink, SidecarFrameSource};
use crate::external::get_video_info;
use crate::processing::assemble::fit_to_size;
use crate::processing::frame_loop::map_frames;
use crate::progress_reporting;

use serde::Serialize;

use std::path::Path;

/// Requested output size. At least one field must be set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResizeOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub scale: Option<f64>,
}

impl ResizeOptions {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.scale.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResizeResult {
    pub source_width: u32,
    pub source_height: u32,
    pub width: u32,
    pub height: u32,
    pub frames_written: u64,
    pub total_frames: u64,
}

/// Output size for a `source_width` x `source_height` video.
///
/// Precedence: scale, then width and height, then width alone (height keeps
/// the aspect ratio), then height alone. Computed sizes are truncated.
pub fn calculate_target_dimensions(
    source_width: u32,
    source_height: u32,
    options: &ResizeOptions,
) -> CoreResult<(u32, u32)> {
    if source_width == 0 || source_height == 0 {
        return Err(CoreError::InvalidInput(format!(
            "source has invalid dimensions {source_width}x{source_height}"
        )));
    }
    let (w, h) = (f64::from(source_width), f64::from(source_height));

    let (width, height) = match (options.scale, options.width, options.height) {
        (Some(scale), _, _) => {
            if !(scale > 0.0) {
                return Err(CoreError::InvalidInput(format!(
                    "scale must be positive, got {scale}"
                )));
            }
            ((w * scale) as u32, (h * scale) as u32)
        }
        (None, Some(width), Some(height)) => (width, height),
        (None, Some(width), None) => (width, (h * (f64::from(width) / w)) as u32),
        (None, None, Some(height)) => ((w * (f64::from(height) / h)) as u32, height),
        (None, None, None) => {
            return Err(CoreError::InvalidInput(
                "Must specify width, height, or scale".to_string(),
            ));
        }
    };

    if width == 0 || height == 0 {
        return Err(CoreError::InvalidInput(format!(
            "target dimensions {width}x{height} are empty"
        )));
    }
    Ok((width, height))
}

/// Resizes every frame from `source` to `width` x `height`.
pub fn resize_frames<S, K>(
    source: S,
    sink: K,
    width: u32,
    height: u32,
    total_frames: u64,
) -> CoreResult<u64>
where
    S: FrameSource,
    K: FrameSink,
{
    map_frames(source, sink, total_frames, "Processing", |frame| {
        Ok(fit_to_size(frame, width, height))
    })
}

/// Resizes `input` into `output`.
pub fn resize_video(
    input: &Path,
    output: &Path,
    options: &ResizeOptions,
    config: &EncoderConfig,
) -> CoreResult<ResizeResult> {
    if options.is_empty() {
        return Err(CoreError::InvalidInput(
            "Must specify width, height, or scale".to_string(),
        ));
    }
    let info = get_video_info(input)?;
    if info.fps <= 0.0 {
        return Err(CoreError::InvalidFps(input.to_path_buf()));
    }
    let (width, height) = calculate_target_dimensions(info.width, info.height, options)?;

    progress_reporting::processing(&format!(
        "Resizing from {}x{} to {}x{}",
        info.width, info.height, width, height
    ));

    let format = RawVideoFormat {
        width,
        height,
        fps: info.fps,
    };
    let source = SidecarFrameSource::open(input)?;
    let sink = SidecarFrameSink::create(output, format, config, Some(input))?;
    let frames_written = resize_frames(source, sink, width, height, info.frame_count)?;

    Ok(ResizeResult {
        source_width: info.width,
        source_height: info.height,
        width,
        height,
        frames_written,
        total_frames: info.frame_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(width: Option<u32>, height: Option<u32>, scale: Option<f64>) -> ResizeOptions {
        ResizeOptions {
            width,
            height,
            scale,
        }
    }

    #[test]
    fn test_scale_takes_precedence() {
        let dims = calculate_target_dimensions(1920, 1080, &opts(Some(100), Some(100), Some(0.5)));
        assert_eq!(dims.unwrap(), (960, 540));
    }

    #[test]
    fn test_width_and_height_exact() {
        let dims = calculate_target_dimensions(1920, 1080, &opts(Some(640), Some(640), None));
        assert_eq!(dims.unwrap(), (640, 640));
    }

    #[test]
    fn test_single_dimension_keeps_aspect() {
        assert_eq!(
            calculate_target_dimensions(1920, 1080, &opts(Some(1280), None, None)).unwrap(),
            (1280, 720)
        );
        assert_eq!(
            calculate_target_dimensions(1920, 1080, &opts(None, Some(480), None)).unwrap(),
            (853, 480)
        );
    }

    #[test]
    fn test_aspect_ratio_is_taken_before_scaling() {
        // 360 * (7 / 5) is just below 504 in floating point.
        assert_eq!(
            calculate_target_dimensions(5, 360, &opts(Some(7), None, None)).unwrap(),
            (7, 503)
        );
    }

    #[test]
    fn test_truncates_fractional_results() {
        assert_eq!(
            calculate_target_dimensions(641, 479, &opts(None, None, Some(0.5))).unwrap(),
            (320, 239)
        );
    }

    #[test]
    fn test_rejects_missing_or_degenerate_targets() {
        let err = calculate_target_dimensions(1920, 1080, &ResizeOptions::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: Must specify width, height, or scale"
        );
        assert!(calculate_target_dimensions(1920, 1080, &opts(None, None, Some(0.0))).is_err());
        assert!(calculate_target_dimensions(1920, 1080, &opts(None, None, Some(-1.0))).is_err());
        assert!(calculate_target_dimensions(1920, 1080, &opts(None, None, Some(0.0001))).is_err());
        assert!(calculate_target_dimensions(1920, 1080, &opts(Some(0), None, None)).is_err());
    }
}
