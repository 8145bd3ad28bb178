// ============================================================================
// clipkit-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: fern dispatch for console and log file output
//
// All user-facing output, including the styled lines from the terminal
// module, flows through the `log` macros. The console chain writes message
// text only; the optional file chain adds a timestamp, level and target and
// strips ANSI escapes.
//
// KEY COMPONENTS:
// - get_timestamp / log_file_name: log file naming
// - resolve_level: --verbose and RUST_LOG handling
// - setup_logging: installs the global logger
//
// USAGE:
// - default: info
// - --verbose: debug, including ffmpeg's own log lines
// - RUST_LOG=<level>: overrides both

use crate::config::LOG_FILE_PREFIX;
use crate::error::{CliErrorContext, CliResult};
use crate::terminal::should_use_color;

use clipkit_core::CoreError;
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;

use std::fs;
use std::path::{Path, PathBuf};

/// Target for records that belong in the log file but not on the console.
pub const FILE_ONLY_TARGET: &str = "clipkit_file";

/// Target used by clipkit-core for ffmpeg's own log output.
pub const FFMPEG_LOG_TARGET: &str = "ffmpeg_log";

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// # Example
/// ```
/// let name = format!("clipkit_{}.log", clipkit_cli::logging::get_timestamp());
/// assert_eq!(name.len(), "clipkit_20240601_123045.log".len());
/// ```
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Log file name for one run of `command`.
pub fn log_file_name(command: &str) -> String {
    format!("{}_{}_{}.log", LOG_FILE_PREFIX, command, get_timestamp())
}

/// Determines the log level from the verbose flag and `RUST_LOG`.
///
/// An unparsable `RUST_LOG` is ignored.
pub fn resolve_level(verbose: bool, rust_log: Option<&str>) -> LevelFilter {
    if let Some(level) = rust_log.and_then(|value| value.trim().parse::<LevelFilter>().ok()) {
        return level;
    }
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// ffmpeg chatter is only interesting when debugging.
fn ffmpeg_level(level: LevelFilter) -> LevelFilter {
    if level >= LevelFilter::Debug {
        level
    } else {
        LevelFilter::Warn
    }
}

fn style_console_line(level: Level, message: &str, color: bool) -> String {
    if !color {
        return match level {
            Level::Error | Level::Warn => format!("{}: {}", level, message),
            _ => message.to_string(),
        };
    }
    match level {
        Level::Error => format!("{}", message.red().bold()),
        Level::Warn => format!("{}", message.yellow()),
        Level::Info => message.to_string(),
        Level::Debug | Level::Trace => format!("{}", message.dimmed()),
    }
}

/// Installs the global logger.
///
/// Returns the path of the log file when `log_dir` is given. The directory
/// is created if needed.
pub fn setup_logging(
    verbose: bool,
    log_dir: Option<&Path>,
    command: &str,
) -> CliResult<Option<PathBuf>> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = resolve_level(verbose, rust_log.as_deref());
    let color = should_use_color();

    let console = fern::Dispatch::new()
        .filter(|metadata| metadata.target() != FILE_ONLY_TARGET)
        .format(move |out, message, record| {
            let text = message.to_string();
            out.finish(format_args!("{}", style_console_line(record.level(), &text, color)))
        })
        .chain(std::io::stderr());

    let mut dispatch = fern::Dispatch::new()
        .level(level)
        .level_for(FFMPEG_LOG_TARGET, ffmpeg_level(level))
        .chain(console);

    let mut log_path = None;
    if let Some(dir) = log_dir {
        fs::create_dir_all(dir)
            .cli_with_context(|| format!("Failed to create log directory {}", dir.display()))?;
        let path = dir.join(log_file_name(command));
        let file = fern::log_file(&path)
            .cli_with_context(|| format!("Failed to open log file {}", path.display()))?;

        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "{} [{}] [{}] {}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                        record.level(),
                        record.target(),
                        strip_ansi_escapes::strip_str(message.to_string())
                    ))
                })
                .chain(file),
        );
        log_path = Some(path);
    }

    dispatch
        .apply()
        .map_err(|e| CoreError::OperationFailed(format!("Failed to initialize logging: {}", e)))?;

    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_level() {
        assert_eq!(resolve_level(false, None), LevelFilter::Info);
        assert_eq!(resolve_level(true, None), LevelFilter::Debug);
        assert_eq!(resolve_level(false, Some("trace")), LevelFilter::Trace);
        assert_eq!(resolve_level(true, Some("warn")), LevelFilter::Warn);
        assert_eq!(resolve_level(true, Some("nonsense")), LevelFilter::Debug);
    }

    #[test]
    fn test_ffmpeg_level_is_quiet_unless_debugging() {
        assert_eq!(ffmpeg_level(LevelFilter::Info), LevelFilter::Warn);
        assert_eq!(ffmpeg_level(LevelFilter::Error), LevelFilter::Warn);
        assert_eq!(ffmpeg_level(LevelFilter::Debug), LevelFilter::Debug);
    }

    #[test]
    fn test_log_file_name() {
        let name = log_file_name("resize");
        assert!(name.starts_with("clipkit_resize_"));
        assert!(name.ends_with(".log"));
        assert_eq!(name.len(), "clipkit_resize_20240601_123045.log".len());
    }

    #[test]
    fn test_plain_console_lines() {
        assert_eq!(style_console_line(Level::Info, "hello", false), "hello");
        assert_eq!(style_console_line(Level::Warn, "careful", false), "WARN: careful");
    }
}
