// ============================================================================
// clipkit-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and ffprobe
//
// This module encapsulates everything that talks to the external video
// tools: metadata probing, command construction, and the frame source/sink
// pair the frame loops read from and write to.
//
// KEY COMPONENTS:
// - ffprobe_executor: VideoInfo from ffprobe output
// - ffmpeg: command builders and a run-to-completion helper
// - frames: FrameSource / FrameSink traits with ffmpeg and in-memory backends
// - Dependency checking

use crate::error::{CoreError, CoreResult};

use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Contains ffmpeg argument building logic and command execution
pub mod ffmpeg;

/// Contains ffprobe integration and the VideoInfo model
pub mod ffprobe_executor;

/// Contains frame sources and sinks
pub mod frames;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffprobe_executor::{VideoInfo, get_video_info, parse_frame_rate};
pub use frames::{
    FrameSink, FrameSource, MemoryFrameSink, MemoryFrameSource, SidecarFrameSink,
    SidecarFrameSource,
};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks if a required external command is available and executable.
///
/// Runs the command with `-version` and only checks that it could be started.
///
/// # Returns
///
/// * `Ok(())` - If the command is found
/// * `Err(CoreError::DependencyNotFound)` - If the command is not found
/// * `Err(CoreError::CommandStart)` - If the command exists but fails to start
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{cmd_name}' not found.");
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{cmd_name}': {e}");
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}

/// Checks for both ffmpeg and ffprobe.
pub fn check_ffmpeg_tools() -> CoreResult<()> {
    check_dependency("ffmpeg")?;
    check_dependency("ffprobe")
}
