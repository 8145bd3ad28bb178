// clipkit-cli/src/commands/info.rs
//
// `clipkit info`: prints video metadata as status lines or JSON.

use crate::cli::InfoArgs;
use crate::commands::ensure_input_file;
use crate::error::CliResult;
use crate::terminal::{print_section, print_status};

use clipkit_core::{check_ffmpeg_tools, get_video_info, info_fields, video_info_json};

pub fn run_info(args: InfoArgs) -> CliResult<()> {
    ensure_input_file(&args.video)?;
    check_ffmpeg_tools()?;

    let info = get_video_info(&args.video)?;

    if args.json {
        // stdout carries only the JSON document so it can be piped.
        println!("{}", video_info_json(&info)?);
        return Ok(());
    }

    print_section("Video information");
    for (label, value) in info_fields(&info) {
        print_status(label, &value, false);
    }
    Ok(())
}
