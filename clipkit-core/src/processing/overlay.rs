// ============================================================================
// clipkit-core/src/processing/overlay.rs
// ============================================================================
//
// TEXT OVERLAY: Stamp a fixed string onto every frame of a video
//
// KEY COMPONENTS:
// - TextPosition: the seven anchor positions
// - compute_text_origin: baseline-left origin for a position
// - overlay_frames: frame loop over any source/sink/painter
// - add_text_overlay: file-based entry point

use crate::config::{BASE_FONT_PX, EncoderConfig, TEXT_MARGIN};
use crate::error::{CoreError, CoreResult};
use crate::external::ffmpeg::RawVideoFormat;
use crate::external::frames::{FrameSink, FrameSource, SidecarFrameSink, SidecarFrameSource};
use crate::external::get_video_info;
use crate::processing::frame_loop::map_frames;
use crate::progress_reporting;
use crate::render::{FontTextPainter, TextExtent, TextPainter, WHITE};

use image::Rgb;
use serde::Serialize;

use std::path::Path;

/// Where the overlay text is anchored on the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextPosition {
    TopLeft,
    TopCenter,
    TopRight,
    Center,
    BottomLeft,
    #[default]
    BottomCenter,
    BottomRight,
}

impl TextPosition {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TextPosition::TopLeft => "top-left",
            TextPosition::TopCenter => "top-center",
            TextPosition::TopRight => "top-right",
            TextPosition::Center => "center",
            TextPosition::BottomLeft => "bottom-left",
            TextPosition::BottomCenter => "bottom-center",
            TextPosition::BottomRight => "bottom-right",
        }
    }
}

/// Baseline-left origin of text with `extent` on a `frame_width` x
/// `frame_height` frame.
///
/// Only the ascent counts as text height, so bottom anchors put the
/// baseline (not the descenders) at the margin.
#[must_use]
pub fn compute_text_origin(
    position: TextPosition,
    frame_width: u32,
    frame_height: u32,
    extent: TextExtent,
) -> (i32, i32) {
    let (w, h) = (frame_width as i32, frame_height as i32);
    let (tw, th) = (extent.width as i32, extent.ascent as i32);
    let m = TEXT_MARGIN;

    let left = m;
    let center_x = (w - tw).div_euclid(2);
    let right = w - tw - m;
    let top = th + m;
    let bottom = h - m;

    match position {
        TextPosition::TopLeft => (left, top),
        TextPosition::TopCenter => (center_x, top),
        TextPosition::TopRight => (right, top),
        TextPosition::Center => (center_x, (h + th).div_euclid(2)),
        TextPosition::BottomLeft => (left, bottom),
        TextPosition::BottomCenter => (center_x, bottom),
        TextPosition::BottomRight => (right, bottom),
    }
}

/// What to draw and how.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayOptions {
    pub text: String,
    pub position: TextPosition,
    /// Multiplier on the 30 px base font size
    pub font_scale: f32,
    pub color: Rgb<u8>,
    pub thickness: u32,
}

impl OverlayOptions {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            position: TextPosition::default(),
            font_scale: 1.0,
            color: WHITE,
            thickness: 2,
        }
    }

    #[must_use]
    pub fn font_px(&self) -> f32 {
        self.font_scale * BASE_FONT_PX
    }

    fn validate(&self) -> CoreResult<()> {
        if !(self.font_scale > 0.0) {
            return Err(CoreError::InvalidInput(format!(
                "font scale must be positive, got {}",
                self.font_scale
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayResult {
    pub frames_written: u64,
    pub total_frames: u64,
}

/// Draws the overlay on every frame from `source` and writes it to `sink`.
///
/// The text is rendered once; the origin is computed from the first frame's
/// size and reused.
pub fn overlay_frames<S, K, P>(
    source: S,
    sink: K,
    painter: &P,
    options: &OverlayOptions,
    total_frames: u64,
) -> CoreResult<OverlayResult>
where
    S: FrameSource,
    K: FrameSink,
    P: TextPainter + ?Sized,
{
    options.validate()?;
    let extent = painter.measure(&options.text);
    let mask = painter.rasterize(&options.text, options.thickness);
    let mut origin = None;

    let written = map_frames(source, sink, total_frames, "Processing", |mut frame| {
        let at = *origin.get_or_insert_with(|| {
            compute_text_origin(options.position, frame.width(), frame.height(), extent)
        });
        mask.blend(&mut frame, at, options.color);
        Ok(frame)
    })?;

    Ok(OverlayResult {
        frames_written: written,
        total_frames,
    })
}

/// Adds the text overlay to `input`, writing the result to `output`.
pub fn add_text_overlay(
    input: &Path,
    output: &Path,
    options: &OverlayOptions,
    font: Option<&Path>,
    config: &EncoderConfig,
) -> CoreResult<OverlayResult> {
    options.validate()?;
    let info = get_video_info(input)?;
    if info.fps <= 0.0 {
        return Err(CoreError::InvalidFps(input.to_path_buf()));
    }
    let painter = FontTextPainter::load(font, options.font_px())?;

    progress_reporting::status("Resolution", &format!("{}x{}", info.width, info.height), false);
    progress_reporting::status("FPS", &format!("{:.2}", info.fps), false);
    progress_reporting::status("Total frames", &info.frame_count.to_string(), false);
    progress_reporting::status("Position", options.position.as_str(), false);
    log::debug!(
        "Overlay '{}' at {} px, color {:?}, thickness {}",
        options.text,
        options.font_px(),
        options.color,
        options.thickness
    );

    let format = RawVideoFormat {
        width: info.width,
        height: info.height,
        fps: info.fps,
    };
    let source = SidecarFrameSource::open(input)?;
    let sink = SidecarFrameSink::create(output, format, config, Some(input))?;
    overlay_frames(source, sink, &painter, options, info.frame_count)
}
