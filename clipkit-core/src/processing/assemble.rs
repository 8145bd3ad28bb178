// ============================================================================
// clipkit-core/src/processing/assemble.rs
// ============================================================================
//
// IMAGE SEQUENCE ASSEMBLY: Build a video from a folder of images
//
// The first image fixes the output size. Later images of another size are
// resized to it so the encoder always receives uniform frames.
//
// KEY COMPONENTS:
// - load_frame / fit_to_size: image decoding and normalisation
// - assemble_frames: writes a list of images to a sink opened lazily
// - write_images_to_video / images_to_video: file-based entry points

use crate::config::{EncoderConfig, PROGRESS_FRAME_INTERVAL};
use crate::discovery::find_image_files;
use crate::error::{CoreError, CoreResult};
use crate::external::ffmpeg::RawVideoFormat;
use crate::external::frames::{FrameSink, SidecarFrameSink};
use crate::progress_reporting;
use crate::utils::{frames_to_seconds, get_filename_safe};

use image::RgbImage;
use image::imageops::{self, FilterType};
use serde::Serialize;

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssembleResult {
    pub frames: u64,
    pub fps: f64,
    pub duration_secs: f64,
    pub width: u32,
    pub height: u32,
}

/// Reads an image file as an RGB frame.
pub fn load_frame(path: &Path) -> CoreResult<RgbImage> {
    Ok(image::open(path)?.to_rgb8())
}

/// Returns `frame` resized (bilinear) to `width` x `height`, or unchanged if
/// it already has that size.
#[must_use]
pub fn fit_to_size(frame: RgbImage, width: u32, height: u32) -> RgbImage {
    if frame.dimensions() == (width, height) {
        frame
    } else {
        imageops::resize(&frame, width, height, FilterType::Triangle)
    }
}

/// Writes `images` in order as frames of a video at `fps`.
///
/// `open_sink` is called once with the size of the first image.
pub fn assemble_frames<K, F>(images: &[PathBuf], fps: f64, open_sink: F) -> CoreResult<AssembleResult>
where
    K: FrameSink,
    F: FnOnce(RawVideoFormat) -> CoreResult<K>,
{
    if !(fps > 0.0) {
        return Err(CoreError::InvalidInput(format!(
            "fps must be greater than 0, got {fps}"
        )));
    }
    let (first_path, rest) = images
        .split_first()
        .ok_or_else(|| CoreError::InvalidInput("no images to assemble".to_string()))?;

    let first = load_frame(first_path)?;
    let (width, height) = first.dimensions();
    progress_reporting::status("Frame size", &format!("{width}x{height}"), false);

    let mut sink = open_sink(RawVideoFormat { width, height, fps })?;
    let total = images.len() as u64;

    sink.write_frame(&first)?;
    log::debug!("Added frame: {}", get_filename_safe(first_path)?);
    progress_reporting::frame_progress("Assembling", 1, total, PROGRESS_FRAME_INTERVAL);

    for (i, path) in rest.iter().enumerate() {
        let frame = load_frame(path)?;
        let frame = if frame.dimensions() == (width, height) {
            frame
        } else {
            log::warn!(
                "{} is {}x{}; resizing to {}x{}",
                path.display(),
                frame.width(),
                frame.height(),
                width,
                height
            );
            fit_to_size(frame, width, height)
        };
        sink.write_frame(&frame)?;
        log::debug!("Added frame: {}", get_filename_safe(path)?);
        progress_reporting::frame_progress("Assembling", i as u64 + 2, total, PROGRESS_FRAME_INTERVAL);
    }
    progress_reporting::clear_progress();
    sink.finish()?;

    Ok(AssembleResult {
        frames: total,
        fps,
        duration_secs: frames_to_seconds(total, fps),
        width,
        height,
    })
}

/// Encodes `images` in order into a video at `output`.
pub fn write_images_to_video(
    images: &[PathBuf],
    output: &Path,
    fps: f64,
    config: &EncoderConfig,
) -> CoreResult<AssembleResult> {
    progress_reporting::status("Images", &images.len().to_string(), false);
    progress_reporting::status("FPS", &format!("{fps:.2}"), false);

    assemble_frames(images, fps, |format| {
        SidecarFrameSink::create(output, format, config, None)
    })
}

/// Builds a video at `output` from the images in `image_dir`.
///
/// Fails with [`CoreError::NoImagesFound`] when the folder holds no images.
pub fn images_to_video(
    image_dir: &Path,
    output: &Path,
    fps: f64,
    config: &EncoderConfig,
) -> CoreResult<AssembleResult> {
    let images = find_image_files(image_dir)?;
    write_images_to_video(&images, output, fps, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_fit_to_size() {
        let frame = RgbImage::from_pixel(4, 4, Rgb([9, 9, 9]));
        let same = fit_to_size(frame.clone(), 4, 4);
        assert_eq!(same, frame);

        let resized = fit_to_size(frame, 8, 2);
        assert_eq!(resized.dimensions(), (8, 2));
        assert_eq!(*resized.get_pixel(3, 1), Rgb([9, 9, 9]));
    }

    #[test]
    fn test_load_frame_missing_file() {
        let err = load_frame(Path::new("/nonexistent/clipkit/frame.png")).unwrap_err();
        assert!(matches!(err, CoreError::ImageError(_)));
    }
}
