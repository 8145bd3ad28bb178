// clipkit-cli/src/commands/overlay.rs
//
// `clipkit overlay`: draws a text string onto every frame of a video.

use crate::cli::OverlayArgs;
use crate::commands::{ensure_input_file, ensure_parent_dir, log_result};
use crate::error::CliResult;
use crate::terminal::{print_section, print_status, print_success};

use clipkit_core::{
    EncoderConfig, OverlayOptions, add_text_overlay, check_ffmpeg_tools, parse_color,
};

pub fn run_overlay(args: OverlayArgs) -> CliResult<()> {
    ensure_input_file(&args.input)?;
    let color = parse_color(&args.color, args.color_order.into())?;
    ensure_parent_dir(&args.output)?;
    check_ffmpeg_tools()?;

    print_section("Text overlay");

    let options = OverlayOptions {
        position: args.position.into(),
        font_scale: args.font_scale,
        color,
        thickness: args.thickness,
        ..OverlayOptions::new(args.text)
    };
    let config = EncoderConfig::builder()
        .codec(args.codec.as_str())
        .keep_audio(args.keep_audio)
        .build();

    let result = add_text_overlay(
        &args.input,
        &args.output,
        &options,
        args.font.as_deref(),
        &config,
    )?;
    log_result("overlay", &result);

    print_status("Frames written", &result.frames_written.to_string(), false);
    print_success(&format!(
        "Text overlay added. Saved to {}",
        args.output.display()
    ));
    Ok(())
}
