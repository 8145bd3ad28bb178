//! Video operations.
//!
//! Each submodule implements one operation end to end. Frame-rewriting
//! operations are generic over [`FrameSource`](crate::external::FrameSource)
//! and [`FrameSink`](crate::external::FrameSink) and also expose a
//! file-based entry point backed by ffmpeg.

/// Shared frame loop
pub mod frame_loop;

/// Countdown progress-bar video generation
pub mod progress_video;

/// Text overlay on every frame
pub mod overlay;

/// Concatenation of several videos
pub mod concat;

/// Frame extraction to image files
pub mod extract;

/// Video assembly from an image folder
pub mod assemble;

/// Metadata presentation
pub mod info;

/// Frame resizing
pub mod resize;

pub use assemble::{AssembleResult, images_to_video, write_images_to_video};
pub use concat::{ConcatMethod, ConcatResult, concatenate_videos};
pub use extract::{ExtractFormat, ExtractOptions, ExtractResult, extract_frames};
pub use info::{info_fields, video_info_json};
pub use overlay::{OverlayOptions, OverlayResult, TextPosition, add_text_overlay};
pub use progress_video::{ProgressVideoOptions, ProgressVideoResult, generate_progress_video};
pub use resize::{ResizeOptions, ResizeResult, resize_video};
