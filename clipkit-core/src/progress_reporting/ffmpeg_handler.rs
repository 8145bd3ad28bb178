//! `FFmpeg` event handler
//!
//! Routes `FFmpeg` events to the log and, when a total duration is known,
//! to the progress reporter. Error lines are kept so a failed command can be
//! reported with the output that explains it.

use crate::utils::parse_ffmpeg_time;
use ffmpeg_sidecar::event::{FfmpegEvent, FfmpegProgress, LogLevel as FfmpegLogLevel};

/// Label used for duration-driven progress bars.
const PROGRESS_LABEL: &str = "Encoding";

/// Handler for `FFmpeg` events
pub struct FfmpegEventHandler {
    /// Total duration of the output, when progress should be reported
    duration: Option<f64>,
    last_reported_ms: Option<u64>,
    stderr_buffer: String,
}

impl FfmpegEventHandler {
    /// Creates a handler that only logs and collects errors.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            duration: None,
            last_reported_ms: None,
            stderr_buffer: String::new(),
        }
    }

    /// Creates a handler that also reports progress against `duration_secs`.
    #[must_use]
    pub fn with_duration(duration_secs: f64) -> Self {
        Self {
            duration: (duration_secs > 0.0).then_some(duration_secs),
            ..Self::quiet()
        }
    }

    /// Handles an `FFmpeg` event
    pub fn handle_event(&mut self, event: FfmpegEvent) {
        match event {
            FfmpegEvent::Progress(progress) => self.handle_progress(&progress),
            FfmpegEvent::Log(level, message) => self.handle_log(&level, &message),
            FfmpegEvent::Error(error) => self.handle_error(&error),
            _ => {}
        }
    }

    /// Gets the accumulated error output
    #[must_use]
    pub fn stderr_buffer(&self) -> &str {
        &self.stderr_buffer
    }

    /// Consumes the handler, returning the accumulated error output
    #[must_use]
    pub fn into_stderr(self) -> String {
        self.stderr_buffer
    }

    fn handle_progress(&mut self, progress: &FfmpegProgress) {
        let Some(total) = self.duration else {
            return;
        };
        let current_secs = parse_ffmpeg_time(&progress.time).unwrap_or(0.0).min(total);
        let current_ms = (current_secs * 1000.0) as u64;

        if self.last_reported_ms != Some(current_ms) {
            crate::progress_reporting::progress(
                PROGRESS_LABEL,
                current_ms,
                (total * 1000.0) as u64,
            );
            self.last_reported_ms = Some(current_ms);
        }
    }

    fn handle_log(&mut self, level: &FfmpegLogLevel, message: &str) {
        let log_level = map_ffmpeg_log_level(level);
        if log_level == log::Level::Info {
            log::debug!(target: "ffmpeg_log", "{message}");
        } else {
            log::log!(target: "ffmpeg_log", log_level, "{message}");
        }
        if log_level == log::Level::Error {
            self.push_stderr(message);
        }
    }

    fn handle_error(&mut self, error: &str) {
        if is_non_critical_ffmpeg_error(error) {
            log::debug!("ffmpeg non-critical message: {error}");
            return;
        }
        log::warn!(target: "ffmpeg_log", "ffmpeg error: {error}");
        self.push_stderr(error);
    }

    fn push_stderr(&mut self, line: &str) {
        self.stderr_buffer.push_str(line);
        self.stderr_buffer.push('\n');
    }
}

/// Maps `FFmpeg` log level to Rust log level
fn map_ffmpeg_log_level(level: &FfmpegLogLevel) -> log::Level {
    match level {
        FfmpegLogLevel::Fatal | FfmpegLogLevel::Error => log::Level::Error,
        FfmpegLogLevel::Warning => log::Level::Warn,
        FfmpegLogLevel::Info => log::Level::Info,
        _ => log::Level::Trace,
    }
}

/// Determines if an `FFmpeg` error message is non-critical.
///
/// These are `FFmpeg` messages that appear in stderr but don't indicate actual problems.
fn is_non_critical_ffmpeg_error(error: &str) -> bool {
    error.contains("deprecated pixel format")
        || error.contains("No accelerated colorspace conversion")
        || error.contains("automatically inserted filter")
        || error.contains("Timestamps are unset")
        || error.contains("No streams found")
        || error.contains("first frame is no keyframe")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_lines_are_collected() {
        let mut handler = FfmpegEventHandler::quiet();
        handler.handle_event(FfmpegEvent::Error("Unknown encoder 'nope'".to_string()));
        handler.handle_event(FfmpegEvent::Log(
            FfmpegLogLevel::Error,
            "Conversion failed!".to_string(),
        ));
        handler.handle_event(FfmpegEvent::Log(
            FfmpegLogLevel::Info,
            "Stream mapping:".to_string(),
        ));

        assert_eq!(
            handler.into_stderr(),
            "Unknown encoder 'nope'\nConversion failed!\n"
        );
    }

    #[test]
    fn test_non_critical_errors() {
        assert!(is_non_critical_ffmpeg_error(
            "deprecated pixel format used, make sure you did set range correctly"
        ));
        assert!(!is_non_critical_ffmpeg_error("Invalid data found when processing input"));
    }

    #[test]
    fn test_stdout_stream_notice_is_not_collected() {
        // Sent by ffmpeg-sidecar whenever the output goes to a file.
        let mut handler = FfmpegEventHandler::quiet();
        handler.handle_event(FfmpegEvent::Error("No streams found".to_string()));
        assert!(is_non_critical_ffmpeg_error("No streams found"));
        assert_eq!(handler.stderr_buffer(), "");
    }

    #[test]
    fn test_zero_duration_disables_progress() {
        let handler = FfmpegEventHandler::with_duration(0.0);
        assert!(handler.duration.is_none());
        let handler = FfmpegEventHandler::with_duration(12.5);
        assert_eq!(handler.duration, Some(12.5));
    }
}
