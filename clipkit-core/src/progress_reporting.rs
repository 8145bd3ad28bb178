//! Progress Reporting API
//!
//! A minimal facade the core library uses to report progress and output
//! messages without depending on CLI-specific formatting. The CLI installs a
//! reporter; without one, every call is a no-op apart from the log line the
//! caller writes itself.

pub mod ffmpeg_handler;

use std::sync::Mutex;

/// Represents different levels of output for structured reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLevel {
    /// Major workflow phases (===== SECTION =====)
    Section,
    /// Processing steps (» Processing)
    Processing,
    /// Success messages (✓ Success)
    Success,
    /// Warning messages
    Warning,
    /// General information
    Info,
}

/// A trait for receiving progress from core operations
pub trait ProgressReporter: Send + Sync {
    /// Output a message at a specific level
    fn output(&self, level: OutputLevel, text: &str);

    /// Output a key-value status pair
    fn output_status(&self, label: &str, value: &str, highlight: bool);

    /// Report progress of a bounded unit of work (frames, milliseconds, images)
    fn progress_bar(&self, label: &str, position: u64, total: u64);

    /// Clear any active progress bar
    fn clear_progress_bar(&self);
}

/// Global progress reporter instance
static PROGRESS_REPORTER: Mutex<Option<Box<dyn ProgressReporter>>> = Mutex::new(None);

/// Set the global progress reporter
pub fn set_progress_reporter(reporter: Box<dyn ProgressReporter>) {
    if let Ok(mut r) = PROGRESS_REPORTER.lock() {
        *r = Some(reporter);
    }
}

/// Remove the global progress reporter
pub fn clear_progress_reporter() {
    if let Ok(mut r) = PROGRESS_REPORTER.lock() {
        *r = None;
    }
}

/// Execute a function with the progress reporter if available
#[inline]
pub fn with_reporter<F>(f: F)
where
    F: FnOnce(&dyn ProgressReporter),
{
    if let Ok(guard) = PROGRESS_REPORTER.lock() {
        if let Some(reporter) = guard.as_ref() {
            f(reporter.as_ref());
        }
    }
}

/// Output a section header
pub fn section(title: &str) {
    with_reporter(|r| r.output(OutputLevel::Section, title));
}

/// Output a processing step
pub fn processing(message: &str) {
    with_reporter(|r| r.output(OutputLevel::Processing, message));
}

/// Output a status line
pub fn status(label: &str, value: &str, highlight: bool) {
    with_reporter(|r| r.output_status(label, value, highlight));
}

/// Output a success message
pub fn success(message: &str) {
    with_reporter(|r| r.output(OutputLevel::Success, message));
}

/// Output a warning message
pub fn warning(message: &str) {
    with_reporter(|r| r.output(OutputLevel::Warning, message));
}

/// Output an informational message
pub fn info(message: &str) {
    with_reporter(|r| r.output(OutputLevel::Info, message));
}

/// Report progress
pub fn progress(label: &str, position: u64, total: u64) {
    with_reporter(|r| r.progress_bar(label, position, total));
}

/// Clear the progress bar
pub fn clear_progress() {
    with_reporter(|r| r.clear_progress_bar());
}

/// Reports frame-loop progress every `interval` frames and on the last frame.
///
/// Mirrors the progress to the log at debug level so file logs keep a trace
/// even when no terminal reporter is installed.
pub fn frame_progress(label: &str, done: u64, total: u64, interval: u64) {
    let on_interval = interval > 0 && done % interval == 0;
    if on_interval || (total > 0 && done == total) {
        if total > 0 {
            log::debug!("{label}: {done}/{total} frames");
        } else {
            log::debug!("{label}: {done} frames");
        }
        progress(label, done, total);
    }
}
