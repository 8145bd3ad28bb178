//! Command implementations for the CLI.
//!
//! Each submodule implements one subcommand. Commands validate their
//! arguments and inputs first and only then check for ffmpeg, so usage
//! mistakes are reported even where ffmpeg is not installed.

pub mod assemble;
pub mod concat;
pub mod extract;
pub mod info;
pub mod overlay;
pub mod progress;
pub mod resize;

use crate::cli::Commands;
use crate::error::{CliErrorContext, CliResult};

use clipkit_core::CoreError;
use serde::Serialize;

use std::fs;
use std::path::Path;

/// Runs the selected subcommand.
pub fn dispatch(command: Commands) -> CliResult<()> {
    match command {
        Commands::Progress(args) => progress::run_progress(args),
        Commands::Overlay(args) => overlay::run_overlay(args),
        Commands::Concat(args) => concat::run_concat(args),
        Commands::Extract(args) => extract::run_extract(args),
        Commands::Assemble(args) => assemble::run_assemble(args),
        Commands::Info(args) => info::run_info(args),
        Commands::Resize(args) => resize::run_resize(args),
    }
}

/// Fails unless `path` is an existing regular file.
pub(crate) fn ensure_input_file(path: &Path) -> CliResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CoreError::PathError(format!(
            "Input file not found: {}",
            path.display()
        )))
    }
}

/// Creates the directory that will hold `output`, if it has one.
pub(crate) fn ensure_parent_dir(output: &Path) -> CliResult<()> {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .cli_with_context(|| format!("Failed to create output directory {}", parent.display())),
        _ => Ok(()),
    }
}

/// Writes a command result to the log as JSON at debug level.
pub(crate) fn log_result<T: Serialize>(command: &str, result: &T) {
    match serde_json::to_string(result) {
        Ok(json) => log::debug!("{} result: {}", command, json),
        Err(e) => log::debug!("Could not serialize {} result: {}", command, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_input_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("clip.mp4");
        fs::write(&file, b"not really a video").unwrap();

        assert!(ensure_input_file(&file).is_ok());

        let err = ensure_input_file(&dir.path().join("missing.mp4")).unwrap_err();
        assert!(err.to_string().contains("Input file not found"));

        // Directories are not input files.
        assert!(ensure_input_file(dir.path()).is_err());
    }

    #[test]
    fn test_ensure_parent_dir_creates_missing_folders() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("a").join("b").join("out.mp4");
        ensure_parent_dir(&output).unwrap();
        assert!(dir.path().join("a").join("b").is_dir());

        // A bare file name has no parent to create.
        ensure_parent_dir(Path::new("out.mp4")).unwrap();
    }
}
