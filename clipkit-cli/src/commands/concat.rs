// clipkit-cli/src/commands/concat.rs
//
// `clipkit concat`: joins several videos into one.

use crate::cli::ConcatArgs;
use crate::commands::{ensure_input_file, ensure_parent_dir, log_result};
use crate::error::CliResult;
use crate::terminal::{print_section, print_status, print_success};

use clipkit_core::{EncoderConfig, check_ffmpeg_tools, concatenate_videos, format_duration};

pub fn run_concat(args: ConcatArgs) -> CliResult<()> {
    for input in &args.inputs {
        ensure_input_file(input)?;
    }
    ensure_parent_dir(&args.output)?;
    check_ffmpeg_tools()?;

    print_section("Concatenate");

    let config = EncoderConfig::builder().codec(args.codec.as_str()).build();
    let result = concatenate_videos(&args.inputs, &args.output, args.method.into(), &config)?;
    log_result("concat", &result);

    print_status("Total duration", &format_duration(result.duration_secs), true);
    print_success(&format!(
        "Concatenated {} videos. Saved to {}",
        result.inputs,
        args.output.display()
    ));
    Ok(())
}
