// clipkit-cli/src/lib.rs
//
// Library portion of the clipkit CLI application.
// Contains argument definitions, command logic and terminal output.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands};
pub use commands::dispatch;
pub use error::{CliErrorContext, CliResult};
