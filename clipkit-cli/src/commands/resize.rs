// clipkit-cli/src/commands/resize.rs
//
// `clipkit resize`: scales every frame of a video.

use crate::cli::ResizeArgs;
use crate::commands::{ensure_input_file, ensure_parent_dir, log_result};
use crate::error::CliResult;
use crate::terminal::{print_section, print_success};

use clipkit_core::{CoreError, EncoderConfig, ResizeOptions, check_ffmpeg_tools, resize_video};

pub fn run_resize(args: ResizeArgs) -> CliResult<()> {
    let options = ResizeOptions {
        width: args.width,
        height: args.height,
        scale: args.scale,
    };
    if options.is_empty() {
        return Err(CoreError::InvalidInput(
            "Must specify width, height, or scale".to_string(),
        ));
    }
    ensure_input_file(&args.input)?;
    ensure_parent_dir(&args.output)?;
    check_ffmpeg_tools()?;

    print_section("Resize");

    let config = EncoderConfig::builder()
        .codec(args.codec.as_str())
        .keep_audio(args.keep_audio)
        .build();
    let result = resize_video(&args.input, &args.output, &options, &config)?;
    log_result("resize", &result);

    print_success(&format!(
        "Resized to {}x{}. Saved to {}",
        result.width,
        result.height,
        args.output.display()
    ));
    Ok(())
}
