//! Shared per-frame loop for operations that rewrite every frame.

use crate::config::PROGRESS_FRAME_INTERVAL;
use crate::error::CoreResult;
use crate::external::frames::{FrameSink, FrameSource};
use crate::progress_reporting;

use image::RgbImage;

/// Reads every frame from `source`, passes it through `transform` and writes
/// the result to `sink`.
///
/// `expected_frames` is only used for progress reporting (0 when unknown).
/// Both ends are finished on success; the first error stops the loop.
/// Returns the number of frames written.
pub fn map_frames<S, K, F>(
    mut source: S,
    mut sink: K,
    expected_frames: u64,
    label: &str,
    mut transform: F,
) -> CoreResult<u64>
where
    S: FrameSource,
    K: FrameSink,
    F: FnMut(RgbImage) -> CoreResult<RgbImage>,
{
    let mut written = 0u64;
    while let Some(frame) = source.next_frame()? {
        let frame = transform(frame)?;
        sink.write_frame(&frame)?;
        written += 1;
        progress_reporting::frame_progress(label, written, expected_frames, PROGRESS_FRAME_INTERVAL);
    }
    progress_reporting::clear_progress();

    source.finish()?;
    sink.finish()?;

    if expected_frames > 0 && written != expected_frames {
        log::debug!("{label}: container reported {expected_frames} frames, decoded {written}");
    }
    Ok(written)
}
