// clipkit-cli/src/commands/assemble.rs
//
// `clipkit assemble` (alias `images-to-video`): builds a video from a
// folder of images. An empty folder is reported but is not an error.

use crate::cli::AssembleArgs;
use crate::commands::{ensure_parent_dir, log_result};
use crate::error::CliResult;
use crate::terminal::{print_section, print_success, print_warning};

use clipkit_core::{
    CoreError, EncoderConfig, check_ffmpeg_tools, find_image_files, write_images_to_video,
};

pub fn run_assemble(args: AssembleArgs) -> CliResult<()> {
    if !args.image_dir.is_dir() {
        return Err(CoreError::PathError(format!(
            "Image folder not found: {}",
            args.image_dir.display()
        )));
    }

    print_section("Images to video");

    let images = match find_image_files(&args.image_dir) {
        Ok(images) => images,
        Err(CoreError::NoImagesFound(_)) => {
            print_warning("No images found in the specified folder.");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    ensure_parent_dir(&args.output)?;
    check_ffmpeg_tools()?;

    let config = EncoderConfig::builder().codec(args.codec.as_str()).build();
    let result = write_images_to_video(&images, &args.output, args.fps, &config)?;
    log_result("assemble", &result);

    print_success(&format!(
        "Video created with {} frames. Saved to {}",
        result.frames,
        args.output.display()
    ));
    Ok(())
}
