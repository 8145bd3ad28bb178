// clipkit-cli/src/commands/progress.rs
//
// `clipkit progress`: renders the countdown progress-bar video.

use crate::cli::ProgressArgs;
use crate::commands::{ensure_parent_dir, log_result};
use crate::error::CliResult;
use crate::terminal::{print_section, print_status, print_success};

use clipkit_core::{
    EncoderConfig, ProgressVideoOptions, check_ffmpeg_tools, format_duration,
    generate_progress_video,
};

pub fn run_progress(args: ProgressArgs) -> CliResult<()> {
    ensure_parent_dir(&args.output)?;
    check_ffmpeg_tools()?;

    print_section("Progress video");

    let options = ProgressVideoOptions {
        width: args.width,
        height: args.height,
        duration_secs: args.duration,
        fps: args.fps,
        font_px: args.font_size,
        ..ProgressVideoOptions::default()
    };
    let config = EncoderConfig::builder().codec(args.codec.as_str()).build();

    let result = generate_progress_video(&options, args.font.as_deref(), &args.output, &config)?;
    log_result("progress", &result);

    print_status(
        "Length",
        &format_duration(f64::from(result.duration_secs)),
        false,
    );
    print_success(&format!(
        "Progress video saved to {} ({} frames)",
        args.output.display(),
        result.frames
    ));
    Ok(())
}
