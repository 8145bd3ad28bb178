// clipkit-cli/src/config.rs
//
// Default values for CLI arguments that have no counterpart in
// clipkit-core's own configuration.

/// Frame rate used by `assemble` when `--fps` is not given.
pub const DEFAULT_ASSEMBLE_FPS: f64 = 30.0;

/// Overlay font size multiplier (1.0 = 30 px).
pub const DEFAULT_FONT_SCALE: f32 = 1.0;

pub const DEFAULT_OVERLAY_COLOR: &str = "255,255,255";
pub const DEFAULT_THICKNESS: u32 = 2;

/// Prefix of log files written to `--log-dir`.
pub const LOG_FILE_PREFIX: &str = "clipkit";
