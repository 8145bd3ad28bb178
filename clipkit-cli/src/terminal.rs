// ============================================================================
// clipkit-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: UI Components and Styling
//
// Consistent styling for everything the CLI shows: section headers,
// processing steps, aligned status lines, success and warning markers, and
// an indicatif progress bar. Lines are emitted through `log::info!` so the
// log file records the same output the user saw.
//
// KEY COMPONENTS:
// - styling: symbols and layout constants
// - print_* functions: the visual hierarchy used by the commands
// - CliProgressReporter: the ProgressReporter installed into clipkit-core
//
// Visual hierarchy:
//
//   ===== SECTION =====
//   » Processing step
//     Label:          value
//     ✓ Success message

use clipkit_core::progress_reporting::{self, OutputLevel, ProgressReporter};

use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::info;
use owo_colors::OwoColorize;
use supports_color::Stream;
use unicode_width::UnicodeWidthStr;

use std::sync::{LazyLock, Mutex};

/// Styling constants for terminal output
pub mod styling {
    pub const SUCCESS_SYMBOL: &str = "✓";
    pub const PROCESSING_SYMBOL: &str = "»";
    pub const WARNING_SYMBOL: &str = "⚠";

    pub const SECTION_PREFIX: &str = "===== ";
    pub const SECTION_SUFFIX: &str = " =====";

    pub const STATUS_INDENT: &str = "  ";

    /// Column at which status values start, counted from the indent.
    pub const STATUS_LABEL_WIDTH: usize = 16;

    /// Terminals narrower than this get the compact progress bar.
    pub const WIDE_TERMINAL_COLUMNS: u16 = 80;
}

static USE_COLOR: LazyLock<bool> = LazyLock::new(|| {
    std::env::var("NO_COLOR").is_err() && supports_color::on(Stream::Stderr).is_some()
});

/// Whether styled output should be produced.
///
/// False when `NO_COLOR` is set or stderr does not support colour.
pub fn should_use_color() -> bool {
    *USE_COLOR
}

/// Builds a `  Label:   value` line with the value aligned by display width.
pub fn format_status_line(label: &str, value: &str) -> String {
    let used = UnicodeWidthStr::width(label) + 1;
    let padding = styling::STATUS_LABEL_WIDTH.saturating_sub(used).max(1);
    format!(
        "{}{}:{}{}",
        styling::STATUS_INDENT,
        label,
        " ".repeat(padding),
        value
    )
}

/// Print a section header for a command
pub fn print_section(title: &str) {
    info!("");
    if should_use_color() {
        info!(
            "{}{}{}",
            styling::SECTION_PREFIX,
            title.to_uppercase().cyan().bold(),
            styling::SECTION_SUFFIX
        );
    } else {
        info!(
            "{}{}{}",
            styling::SECTION_PREFIX,
            title.to_uppercase(),
            styling::SECTION_SUFFIX
        );
    }
}

/// Print a processing step
pub fn print_processing(message: &str) {
    if should_use_color() {
        info!("{} {}", styling::PROCESSING_SYMBOL.bold(), message.bold());
    } else {
        info!("{} {}", styling::PROCESSING_SYMBOL, message);
    }
}

/// Print a key-value status line
pub fn print_status(label: &str, value: &str, highlight: bool) {
    if highlight && should_use_color() {
        info!("{}", format_status_line(label, &value.green().bold().to_string()));
    } else {
        info!("{}", format_status_line(label, value));
    }
}

pub fn print_success(message: &str) {
    if should_use_color() {
        info!(
            "{}{} {}",
            styling::STATUS_INDENT,
            styling::SUCCESS_SYMBOL.green().bold(),
            message
        );
    } else {
        info!("{}{} {}", styling::STATUS_INDENT, styling::SUCCESS_SYMBOL, message);
    }
}

pub fn print_warning(message: &str) {
    if should_use_color() {
        info!(
            "{}{}",
            styling::STATUS_INDENT,
            format!("{} {}", styling::WARNING_SYMBOL, message).yellow()
        );
    } else {
        info!("{}{} {}", styling::STATUS_INDENT, styling::WARNING_SYMBOL, message);
    }
}

pub fn print_info(message: &str) {
    info!("{}{}", styling::STATUS_INDENT, message);
}

/// Print a fatal error to stderr.
///
/// Written directly rather than through the logger, which may not be
/// installed yet. The log file gets a copy when it exists.
pub fn print_error(message: &str) {
    log::error!(target: crate::logging::FILE_ONLY_TARGET, "Error: {}", message);
    if should_use_color() {
        eprintln!("{}", format!("Error: {}", message).red().bold());
    } else {
        eprintln!("Error: {}", message);
    }
}

// ============================================================================
// PROGRESS REPORTER
// ============================================================================

/// Progress reporter backed by the terminal functions above.
///
/// Keeps at most one progress bar; a new label replaces the current bar.
#[derive(Default)]
pub struct CliProgressReporter {
    bar: Mutex<Option<(String, ProgressBar)>>,
}

impl CliProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn create_bar(label: &str, total: u64) -> ProgressBar {
        let term = Term::stderr();
        let target = if term.is_term() {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };

        let wide = term.size().1 >= styling::WIDE_TERMINAL_COLUMNS;
        let template = match (total, wide) {
            (0, _) => "  {spinner} {msg} {pos} frames",
            (_, true) => "  {msg:<12} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA {eta}",
            (_, false) => "  {msg} [{bar:20.cyan/blue}] {percent}%",
        };
        let style = ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>.");

        let bar = if total == 0 {
            ProgressBar::with_draw_target(None, target)
        } else {
            ProgressBar::with_draw_target(Some(total), target)
        };
        bar.set_style(style);
        bar.set_message(label.to_string());
        bar
    }

    /// Runs `f` with the active progress bar hidden.
    fn suspended<F: FnOnce()>(&self, f: F) {
        match self.bar.lock() {
            Ok(guard) => match guard.as_ref() {
                Some((_, bar)) => bar.suspend(f),
                None => f(),
            },
            Err(_) => f(),
        }
    }
}

impl ProgressReporter for CliProgressReporter {
    fn output(&self, level: OutputLevel, text: &str) {
        self.suspended(|| match level {
            OutputLevel::Section => print_section(text),
            OutputLevel::Processing => print_processing(text),
            OutputLevel::Success => print_success(text),
            OutputLevel::Warning => print_warning(text),
            OutputLevel::Info => print_info(text),
        });
    }

    fn output_status(&self, label: &str, value: &str, highlight: bool) {
        self.suspended(|| print_status(label, value, highlight));
    }

    fn progress_bar(&self, label: &str, position: u64, total: u64) {
        let Ok(mut guard) = self.bar.lock() else {
            return;
        };
        let needs_new = match guard.as_ref() {
            Some((current, bar)) => current != label || bar.length().unwrap_or(0) != total,
            None => true,
        };
        if needs_new {
            if let Some((_, old)) = guard.take() {
                old.finish_and_clear();
            }
            *guard = Some((label.to_string(), Self::create_bar(label, total)));
        }
        if let Some((_, bar)) = guard.as_ref() {
            bar.set_position(position);
        }
    }

    fn clear_progress_bar(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some((_, bar)) = guard.take() {
                bar.finish_and_clear();
            }
        }
    }
}

/// Installs [`CliProgressReporter`] as clipkit-core's progress reporter.
pub fn register_cli_reporter() {
    progress_reporting::set_progress_reporter(Box::new(CliProgressReporter::new()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_alignment() {
        assert_eq!(format_status_line("FPS", "30.00"), "  FPS:            30.00");
        assert_eq!(
            format_status_line("Resolution", "1920x1080"),
            "  Resolution:     1920x1080"
        );
    }

    #[test]
    fn test_status_line_long_label_keeps_a_space() {
        let line = format_status_line("A very long status label", "x");
        assert_eq!(line, "  A very long status label: x");
    }

    #[test]
    fn test_status_line_wide_characters() {
        // Two double-width characters occupy four columns.
        assert_eq!(format_status_line("名前", "v"), "  名前:           v");
    }

    #[test]
    fn test_reporter_replaces_bar_on_new_label() {
        let reporter = CliProgressReporter::new();
        reporter.progress_bar("Overlay", 10, 100);
        reporter.progress_bar("Overlay", 20, 100);
        {
            let guard = reporter.bar.lock().unwrap();
            let (label, bar) = guard.as_ref().unwrap();
            assert_eq!(label, "Overlay");
            assert_eq!(bar.position(), 20);
        }

        reporter.progress_bar("Encoding", 5, 0);
        {
            let guard = reporter.bar.lock().unwrap();
            let (label, bar) = guard.as_ref().unwrap();
            assert_eq!(label, "Encoding");
            assert_eq!(bar.length(), None);
        }

        reporter.clear_progress_bar();
        assert!(reporter.bar.lock().unwrap().is_none());
    }
}
