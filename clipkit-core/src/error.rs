// ============================================================================
// clipkit-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error types for the clipkit core library
//
// This module defines the error enum shared by every operation in the
// library together with helper constructors for the external command
// failures (ffmpeg, ffprobe) that make up most of the failure surface.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors produced by clipkit-core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed waiting for {0}: {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("{cmd} failed with status {status}: {stderr}")]
    CommandFailed {
        cmd: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Required dependency not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to parse ffprobe output: {0}")]
    FfprobeParse(String),

    #[error("Video information error: {0}")]
    VideoInfoError(String),

    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("Invalid FPS value. Video file may be corrupted: {}", .0.display())]
    InvalidFps(PathBuf),

    #[error("No images found in {}", .0.display())]
    NoImagesFound(PathBuf),

    #[error("No usable font found (pass --font or set CLIPKIT_FONT)")]
    FontNotFound,

    #[error("Failed to load font {}: {reason}", path.display())]
    FontLoad { path: PathBuf, reason: String },

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for clipkit-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a [`CoreError::CommandStart`] for a process that could not be spawned.
pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Builds a [`CoreError::CommandWait`] for a process that could not be waited on.
pub fn command_wait_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

/// Builds a [`CoreError::CommandFailed`] for a process that exited unsuccessfully.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        cmd: cmd.into(),
        status,
        stderr: stderr.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_fps_message_mentions_corruption() {
        let err = CoreError::InvalidFps(PathBuf::from("broken.mp4"));
        let msg = err.to_string();
        assert!(msg.contains("Invalid FPS value"));
        assert!(msg.contains("broken.mp4"));
    }

    #[test]
    fn test_command_failed_includes_stderr() {
        let err = command_failed_error("ffmpeg (encode)", ExitStatus::default(), "boom");
        let msg = err.to_string();
        assert!(msg.starts_with("ffmpeg (encode) failed"));
        assert!(msg.ends_with("boom"));
    }

    #[test]
    fn test_io_error_converts() {
        let err: CoreError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
