//! Core library for basic video manipulation using ffmpeg and ffprobe.
//!
//! This crate generates countdown progress videos, overlays text, joins,
//! resizes and inspects videos, and converts between videos and image
//! sequences. Decoding and encoding run in ffmpeg; per-frame work happens in
//! Rust on RGB frames.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use clipkit_core::{EncoderConfig, ResizeOptions, resize_video};
//! use std::path::Path;
//!
//! let config = EncoderConfig::builder().codec("libx264").build();
//! let options = ResizeOptions {
//!     width: Some(1280),
//!     ..ResizeOptions::default()
//! };
//!
//! let result = resize_video(
//!     Path::new("/path/to/input.mp4"),
//!     Path::new("/path/to/output.mp4"),
//!     &options,
//!     &config,
//! ).unwrap();
//! println!("wrote {} frames at {}x{}", result.frames_written, result.width, result.height);
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod processing;
pub mod progress_reporting;
pub mod render;
pub mod utils;

// Re-exports for public API
pub use config::{EncoderConfig, resolve_codec};
pub use discovery::find_image_files;
pub use error::{CoreError, CoreResult};
pub use external::{VideoInfo, check_dependency, check_ffmpeg_tools, get_video_info};
pub use processing::{
    AssembleResult, ConcatMethod, ConcatResult, ExtractFormat, ExtractOptions, ExtractResult,
    OverlayOptions, OverlayResult, ProgressVideoOptions, ProgressVideoResult, ResizeOptions,
    ResizeResult, TextPosition, add_text_overlay, concatenate_videos, extract_frames,
    generate_progress_video, images_to_video, info_fields, resize_video, video_info_json,
    write_images_to_video,
};
pub use render::{ColorOrder, TextExtent, TextPainter, parse_color};
pub use utils::{format_bytes, format_duration, parse_ffmpeg_time};
