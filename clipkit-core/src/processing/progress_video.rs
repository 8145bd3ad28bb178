// ============================================================================
// clipkit-core/src/processing/progress_video.rs
// ============================================================================
//
// PROGRESS VIDEO: Synthetic countdown video with a growing colour bar
//
// Every frame is black with a bar on the left edge that grows from the
// bottom as time passes, shifting from green to red, and a large white
// second counter (1, 2, ... duration) to the right of it.
//
// KEY COMPONENTS:
// - ProgressVideoOptions: frame size, timing and layout parameters
// - render_progress_frame: draws a single frame
// - render_progress_video: writes all frames to any FrameSink
// - generate_progress_video: file-based entry point using ffmpeg

use crate::config::{
    DEFAULT_FPS, DEFAULT_PROGRESS_BAR_RATIO, DEFAULT_PROGRESS_DURATION_SECS,
    DEFAULT_PROGRESS_FONT_PX, DEFAULT_PROGRESS_HEIGHT, DEFAULT_PROGRESS_TEXT_X_RATIO,
    DEFAULT_PROGRESS_WIDTH, EncoderConfig, PROGRESS_FRAME_INTERVAL,
};
use crate::error::{CoreError, CoreResult};
use crate::external::ffmpeg::RawVideoFormat;
use crate::external::frames::{FrameSink, SidecarFrameSink};
use crate::progress_reporting;
use crate::render::{BLACK, FontTextPainter, TextPainter, WHITE, fill_rect, lerp_progress_color};

use image::RgbImage;
use serde::Serialize;

use std::path::Path;

/// Parameters of a progress video.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressVideoOptions {
    pub width: u32,
    pub height: u32,
    pub duration_secs: u32,
    pub fps: u32,
    /// Pixel size of the counter digits
    pub font_px: f32,
    /// Bar width as a fraction of the frame width
    pub bar_ratio: f64,
    /// Counter x position as a fraction of the frame width
    pub text_x_ratio: f64,
}

impl Default for ProgressVideoOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_PROGRESS_WIDTH,
            height: DEFAULT_PROGRESS_HEIGHT,
            duration_secs: DEFAULT_PROGRESS_DURATION_SECS,
            fps: DEFAULT_FPS,
            font_px: DEFAULT_PROGRESS_FONT_PX,
            bar_ratio: DEFAULT_PROGRESS_BAR_RATIO,
            text_x_ratio: DEFAULT_PROGRESS_TEXT_X_RATIO,
        }
    }
}

impl ProgressVideoOptions {
    #[must_use]
    pub fn total_frames(&self) -> u64 {
        u64::from(self.duration_secs) * u64::from(self.fps)
    }

    fn validate(&self) -> CoreResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::InvalidInput(format!(
                "frame size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.duration_secs == 0 {
            return Err(CoreError::InvalidInput(
                "duration must be at least 1 second".to_string(),
            ));
        }
        if self.fps == 0 {
            return Err(CoreError::InvalidInput("fps must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Summary of a generated progress video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressVideoResult {
    pub frames: u64,
    pub fps: u32,
    pub duration_secs: u32,
}

/// Counter shown at `t` seconds: 1 during the first second, capped at `duration`.
#[must_use]
pub fn progress_number(t: f64, duration_secs: u32) -> u32 {
    let second = t.max(0.0).floor() as u32;
    second.saturating_add(1).min(duration_secs)
}

/// Draws frame `index` of the progress video.
pub fn render_progress_frame<P: TextPainter + ?Sized>(
    options: &ProgressVideoOptions,
    index: u64,
    painter: &P,
) -> RgbImage {
    let (width, height) = (options.width, options.height);
    let t = index as f64 / f64::from(options.fps);
    let progress = (t / f64::from(options.duration_secs)).clamp(0.0, 1.0);

    let mut frame = RgbImage::from_pixel(width, height, BLACK);

    let bar_width = (f64::from(width) * options.bar_ratio) as i64;
    let bar_height = (f64::from(height) * progress) as i64;
    let h = i64::from(height);
    fill_rect(
        &mut frame,
        0,
        h - bar_height,
        bar_width,
        h,
        lerp_progress_color(progress),
    );

    let label = progress_number(t, options.duration_secs).to_string();
    let extent = painter.measure(&label);
    let x = (f64::from(width) * options.text_x_ratio) as i32;
    let y = (height / 2) as i32 + (extent.ascent as i32 - extent.descent as i32) / 2;
    painter.draw(&mut frame, &label, (x, y), WHITE, 1);

    frame
}

/// Renders the whole progress video into `sink`.
pub fn render_progress_video<P, K>(
    options: &ProgressVideoOptions,
    painter: &P,
    mut sink: K,
) -> CoreResult<ProgressVideoResult>
where
    P: TextPainter + ?Sized,
    K: FrameSink,
{
    options.validate()?;
    let total = options.total_frames();

    for index in 0..total {
        let frame = render_progress_frame(options, index, painter);
        sink.write_frame(&frame)?;
        progress_reporting::frame_progress("Rendering", index + 1, total, PROGRESS_FRAME_INTERVAL);
    }
    progress_reporting::clear_progress();
    sink.finish()?;

    Ok(ProgressVideoResult {
        frames: total,
        fps: options.fps,
        duration_secs: options.duration_secs,
    })
}

/// Generates the progress video at `output`.
///
/// `font` selects the counter font; system fonts are tried when it is `None`.
pub fn generate_progress_video(
    options: &ProgressVideoOptions,
    font: Option<&Path>,
    output: &Path,
    config: &EncoderConfig,
) -> CoreResult<ProgressVideoResult> {
    options.validate()?;
    let painter = FontTextPainter::load(font, options.font_px)?;

    progress_reporting::status(
        "Resolution",
        &format!("{}x{}", options.width, options.height),
        false,
    );
    progress_reporting::status(
        "Duration",
        &format!("{} s at {} fps", options.duration_secs, options.fps),
        false,
    );
    progress_reporting::status("Frames", &options.total_frames().to_string(), false);

    let format = RawVideoFormat {
        width: options.width,
        height: options.height,
        fps: f64::from(options.fps),
    };
    let sink = SidecarFrameSink::create(output, format, config, None)?;
    render_progress_video(options, &painter, sink)
}
