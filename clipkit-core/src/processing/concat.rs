// ============================================================================
// clipkit-core/src/processing/concat.rs
// ============================================================================
//
// CONCATENATION: Join several videos into one file
//
// The whole join runs inside ffmpeg as one filter graph; this module decides
// the output layout from the probed inputs and drives the command.
//
// KEY COMPONENTS:
// - ConcatMethod: compose (pad to a common canvas) or chain (same size only)
// - plan_concat: canvas, frame rate and audio decisions
// - concatenate_videos: probe, plan, run

use crate::config::EncoderConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::ffmpeg::{ConcatInput, ConcatLayout, build_concat_command, run_ffmpeg};
use crate::external::frames::remove_partial_output;
use crate::external::{VideoInfo, get_video_info};
use crate::progress_reporting;
use crate::progress_reporting::ffmpeg_handler::FfmpegEventHandler;

use serde::Serialize;

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcatMethod {
    /// Centre every clip on a canvas as large as the largest input
    #[default]
    Compose,
    /// Join clips as they are; all inputs must share one size
    Chain,
}

impl ConcatMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ConcatMethod::Compose => "compose",
            ConcatMethod::Chain => "chain",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcatResult {
    pub inputs: usize,
    pub duration_secs: f64,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub has_audio: bool,
}

fn round_up_even(value: u32) -> u32 {
    value + value % 2
}

/// Decides the output layout for `infos`.
///
/// `even_dimensions` rounds the canvas up to even sizes for 4:2:0 output.
pub fn plan_concat(
    infos: &[VideoInfo],
    method: ConcatMethod,
    even_dimensions: bool,
) -> CoreResult<ConcatLayout> {
    let first = infos
        .first()
        .ok_or_else(|| CoreError::InvalidInput("at least one input video is required".to_string()))?;

    if method == ConcatMethod::Chain {
        if let Some(mismatch) = infos
            .iter()
            .find(|i| (i.width, i.height) != (first.width, first.height))
        {
            return Err(CoreError::InvalidInput(format!(
                "chain requires equal dimensions: {} is {}x{} but {} is {}x{} (use compose)",
                first.path.display(),
                first.width,
                first.height,
                mismatch.path.display(),
                mismatch.width,
                mismatch.height
            )));
        }
    }

    let max_width = infos.iter().map(|i| i.width).max().unwrap_or(first.width);
    let max_height = infos.iter().map(|i| i.height).max().unwrap_or(first.height);
    let (width, height) = if even_dimensions {
        (round_up_even(max_width), round_up_even(max_height))
    } else {
        (max_width, max_height)
    };

    let fps = infos.iter().map(|i| i.fps).fold(0.0_f64, f64::max);
    if fps <= 0.0 {
        return Err(CoreError::InvalidFps(first.path.clone()));
    }

    let with_audio = infos.iter().any(|i| i.has_audio);
    let silent: Vec<String> = infos
        .iter()
        .filter(|i| !i.has_audio)
        .map(|i| i.path.display().to_string())
        .collect();
    if with_audio && !silent.is_empty() {
        log::info!("Filling audio with silence for: {}", silent.join(", "));
    }

    // Chain inputs are already equal in size; they only need padding when
    // the canvas was rounded up.
    let pad_to_canvas =
        method == ConcatMethod::Compose || (width, height) != (first.width, first.height);

    Ok(ConcatLayout {
        width,
        height,
        fps,
        pad_to_canvas,
        with_audio,
    })
}

/// Concatenates `inputs` in order into `output`.
pub fn concatenate_videos(
    inputs: &[PathBuf],
    output: &Path,
    method: ConcatMethod,
    config: &EncoderConfig,
) -> CoreResult<ConcatResult> {
    if inputs.is_empty() {
        return Err(CoreError::InvalidInput(
            "at least one input video is required".to_string(),
        ));
    }

    let total = inputs.len();
    let mut infos = Vec::with_capacity(total);
    for (i, path) in inputs.iter().enumerate() {
        progress_reporting::processing(&format!("Loading video {}/{}: {}", i + 1, total, path.display()));
        infos.push(get_video_info(path)?);
    }

    let layout = plan_concat(&infos, method, config.needs_even_dimensions())?;
    let duration_secs: f64 = infos.iter().map(|i| i.duration_secs).sum();

    progress_reporting::status("Method", method.as_str(), false);
    progress_reporting::status("Output size", &format!("{}x{}", layout.width, layout.height), false);
    progress_reporting::status("FPS", &format!("{:.2}", layout.fps), false);
    progress_reporting::status("Audio", if layout.with_audio { "yes" } else { "no" }, false);

    let concat_inputs: Vec<ConcatInput<'_>> = infos
        .iter()
        .map(|info| ConcatInput {
            path: &info.path,
            has_audio: info.has_audio,
            duration_secs: info.duration_secs,
        })
        .collect();
    let cmd = build_concat_command(&concat_inputs, &layout, output, config);
    let outcome = run_ffmpeg(cmd, "concat", FfmpegEventHandler::with_duration(duration_secs));
    progress_reporting::clear_progress();
    if let Err(e) = outcome {
        remove_partial_output(output);
        return Err(e);
    }

    Ok(ConcatResult {
        inputs: total,
        duration_secs,
        width: layout.width,
        height: layout.height,
        fps: layout.fps,
        has_audio: layout.with_audio,
    })
}
