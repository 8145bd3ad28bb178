// clipkit-cli/src/commands/extract.rs
//
// `clipkit extract`: saves every Nth frame of a video as an image.

use crate::cli::ExtractArgs;
use crate::commands::{ensure_input_file, log_result};
use crate::error::CliResult;
use crate::terminal::{print_section, print_success};

use clipkit_core::{ExtractOptions, check_ffmpeg_tools, extract_frames};

pub fn run_extract(args: ExtractArgs) -> CliResult<()> {
    ensure_input_file(&args.input)?;
    check_ffmpeg_tools()?;

    print_section("Extract frames");

    let options = ExtractOptions {
        interval: args.interval,
        format: args.format.into(),
    };
    let result = extract_frames(&args.input, &args.output_dir, &options)?;
    log_result("extract", &result);

    print_success(&format!(
        "Extracted {} frames to {}",
        result.extracted,
        args.output_dir.display()
    ));
    Ok(())
}
