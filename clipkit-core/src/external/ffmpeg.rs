//! FFmpeg command building and execution
//!
//! Builds the ffmpeg command lines clipkit runs: decoding a file to raw RGB
//! frames, encoding raw RGB frames from stdin, and concatenating files with
//! a single filter graph. Builders return the `FfmpegCommand` unspawned so
//! their arguments can be inspected.

use crate::config::{DEFAULT_AUDIO_CODEC, EncoderConfig, codec_quality_args};
use crate::error::{CoreResult, command_failed_error, command_start_error, command_wait_error};
use crate::progress_reporting::ffmpeg_handler::FfmpegEventHandler;

use ffmpeg_sidecar::command::FfmpegCommand;
use log::debug;

use std::path::Path;

/// Pad filter that rounds odd frame sizes up to the next even size.
pub const EVEN_PAD_FILTER: &str = "pad=ceil(iw/2)*2:ceil(ih/2)*2";

/// Sample rate audio is resampled to before concatenation.
const CONCAT_AUDIO_RATE: u32 = 48_000;

/// Raw frame stream description for an encoder reading stdin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawVideoFormat {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

/// One input of a concatenation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConcatInput<'a> {
    pub path: &'a Path,
    /// Inputs without audio get silence of `duration_secs` in its place
    pub has_audio: bool,
    pub duration_secs: f64,
}

/// Layout decided for a concatenation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConcatLayout {
    /// Output width
    pub width: u32,
    /// Output height
    pub height: u32,
    /// Output frame rate every input is normalised to
    pub fps: f64,
    /// Whether inputs are centred on a padded canvas
    pub pad_to_canvas: bool,
    /// Whether audio is concatenated alongside video (any input has audio)
    pub with_audio: bool,
}

/// Formats a frame rate for the command line without trailing zeros.
#[must_use]
pub fn format_fps(fps: f64) -> String {
    if fps.fract() == 0.0 {
        format!("{}", fps as u64)
    } else {
        format!("{fps}")
    }
}

/// Builds a command that decodes the first video stream of `input` to rgb24
/// rawvideo on stdout.
///
/// Frames keep their coded size, so they match the width and height ffprobe
/// reports even when the stream carries a rotation matrix.
#[must_use]
pub fn build_decode_command(input: &Path) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.hide_banner();
    cmd.arg("-nostdin");
    cmd.arg("-noautorotate");
    cmd.input(input.to_string_lossy().as_ref());
    cmd.args(["-map", "0:v:0", "-an", "-sn"]);
    cmd.rawvideo();
    cmd
}

/// Builds a command that encodes rgb24 rawvideo read from stdin.
///
/// When `audio_source` is given its audio (if any) is muxed in and the
/// output is cut to the shorter of the two streams.
#[must_use]
pub fn build_encode_command(
    format: RawVideoFormat,
    output: &Path,
    config: &EncoderConfig,
    audio_source: Option<&Path>,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.hide_banner();
    cmd.args(["-f", "rawvideo", "-pix_fmt", "rgb24"]);
    cmd.args(["-s", &format!("{}x{}", format.width, format.height)]);
    cmd.args(["-r", &format_fps(format.fps)]);
    cmd.input("-");

    if let Some(source) = audio_source {
        cmd.input(source.to_string_lossy().as_ref());
        cmd.args(["-map", "0:v:0", "-map", "1:a?"]);
        cmd.args(["-c:a", DEFAULT_AUDIO_CODEC]);
        cmd.arg("-shortest");
    } else {
        cmd.arg("-an");
    }

    let encoder = config.encoder();
    cmd.args(["-c:v", &encoder]);
    cmd.args(codec_quality_args(&encoder));

    if config.needs_even_dimensions() && (format.width % 2 == 1 || format.height % 2 == 1) {
        debug!(
            "Padding {}x{} frames to even dimensions for {}",
            format.width, format.height, config.pixel_format
        );
        cmd.args(["-vf", EVEN_PAD_FILTER]);
    }

    cmd.args(["-pix_fmt", &config.pixel_format]);
    cmd.overwrite();
    cmd.output(output.to_string_lossy().as_ref());
    cmd
}

/// Builds the `filter_complex` graph joining `inputs` in order.
#[must_use]
pub fn build_concat_filter(
    inputs: &[ConcatInput<'_>],
    layout: &ConcatLayout,
    pixel_format: &str,
) -> String {
    let count = inputs.len();
    let fps = format_fps(layout.fps);
    let mut graph = String::new();

    for (i, input) in inputs.iter().enumerate() {
        graph.push_str(&format!("[{i}:v:0]fps={fps},"));
        if layout.pad_to_canvas {
            graph.push_str(&format!(
                "pad={}:{}:(ow-iw)/2:(oh-ih)/2:color=black,",
                layout.width, layout.height
            ));
        }
        graph.push_str(&format!("setsar=1,format={pixel_format}[v{i}];"));
        if layout.with_audio && input.has_audio {
            graph.push_str(&format!(
                "[{i}:a:0]aresample={CONCAT_AUDIO_RATE},aformat=channel_layouts=stereo[a{i}];"
            ));
        } else if layout.with_audio {
            graph.push_str(&format!(
                "anullsrc=channel_layout=stereo:sample_rate={CONCAT_AUDIO_RATE},atrim=duration={}[a{i}];",
                input.duration_secs.max(0.0)
            ));
        }
    }

    for i in 0..count {
        graph.push_str(&format!("[v{i}]"));
        if layout.with_audio {
            graph.push_str(&format!("[a{i}]"));
        }
    }
    graph.push_str(&format!(
        "concat=n={count}:v=1:a={}[outv]",
        u8::from(layout.with_audio)
    ));
    if layout.with_audio {
        graph.push_str("[outa]");
    }
    graph
}

/// Builds a command concatenating `inputs` into `output`.
#[must_use]
pub fn build_concat_command(
    inputs: &[ConcatInput<'_>],
    layout: &ConcatLayout,
    output: &Path,
    config: &EncoderConfig,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.hide_banner();
    for input in inputs {
        cmd.input(input.path.to_string_lossy().as_ref());
    }

    let filter = build_concat_filter(inputs, layout, &config.pixel_format);
    cmd.args(["-filter_complex", &filter]);
    cmd.args(["-map", "[outv]"]);
    if layout.with_audio {
        cmd.args(["-map", "[outa]"]);
        cmd.args(["-c:a", DEFAULT_AUDIO_CODEC]);
    } else {
        cmd.arg("-an");
    }

    let encoder = config.encoder();
    cmd.args(["-c:v", &encoder]);
    cmd.args(codec_quality_args(&encoder));
    cmd.args(["-movflags", "+faststart"]);
    cmd.overwrite();
    cmd.output(output.to_string_lossy().as_ref());
    cmd
}

/// Runs an ffmpeg command to completion, routing its events through `handler`.
///
/// Fails with the collected error output when ffmpeg exits unsuccessfully.
pub fn run_ffmpeg(
    mut cmd: FfmpegCommand,
    context: &str,
    mut handler: FfmpegEventHandler,
) -> CoreResult<()> {
    debug!("Running ffmpeg ({context}): {cmd:?}");
    let cmd_name = format!("ffmpeg ({context})");

    let mut child = cmd.spawn().map_err(|e| command_start_error(&cmd_name, e))?;
    let events = child.iter().map_err(|e| {
        command_failed_error(
            &cmd_name,
            std::process::ExitStatus::default(),
            format!("Failed to get event iterator: {e}"),
        )
    })?;
    for event in events {
        handler.handle_event(event);
    }

    let status = child.wait().map_err(|e| command_wait_error(&cmd_name, e))?;
    if !status.success() {
        log::error!("{cmd_name} failed: {status}");
        return Err(command_failed_error(cmd_name, status, handler.into_stderr()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args_of(cmd: &mut FfmpegCommand) -> Vec<String> {
        cmd.as_inner()
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    fn value_after(args: &[String], flag: &str) -> Option<String> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1).cloned())
    }

    #[test]
    fn test_format_fps() {
        assert_eq!(format_fps(30.0), "30");
        assert_eq!(format_fps(29.97), "29.97");
    }

    #[test]
    fn test_decode_command_outputs_rgb_rawvideo() {
        let mut cmd = build_decode_command(Path::new("clip.mp4"));
        let args = args_of(&mut cmd);
        assert_eq!(value_after(&args, "-i").as_deref(), Some("clip.mp4"));
        assert_eq!(value_after(&args, "-f").as_deref(), Some("rawvideo"));
        assert_eq!(value_after(&args, "-pix_fmt").as_deref(), Some("rgb24"));
        assert_eq!(args.last().map(String::as_str), Some("-"));

        let noautorotate = args.iter().position(|a| a == "-noautorotate").unwrap();
        let input = args.iter().position(|a| a == "-i").unwrap();
        assert!(noautorotate < input);
    }

    #[test]
    fn test_encode_command_reads_stdin_without_audio() {
        let format = RawVideoFormat { width: 640, height: 360, fps: 25.0 };
        let output = PathBuf::from("out.mp4");
        let mut cmd = build_encode_command(format, &output, &EncoderConfig::default(), None);
        let args = args_of(&mut cmd);

        assert_eq!(value_after(&args, "-s").as_deref(), Some("640x360"));
        assert_eq!(value_after(&args, "-r").as_deref(), Some("25"));
        assert_eq!(value_after(&args, "-i").as_deref(), Some("-"));
        assert_eq!(value_after(&args, "-c:v").as_deref(), Some("mpeg4"));
        assert_eq!(value_after(&args, "-q:v").as_deref(), Some("3"));
        assert!(args.iter().any(|a| a == "-an"));
        assert!(args.iter().any(|a| a == "-y"));
        assert!(!args.iter().any(|a| a == EVEN_PAD_FILTER));
        assert_eq!(args.last().map(String::as_str), Some("out.mp4"));
    }

    #[test]
    fn test_encode_command_pads_odd_sizes_and_maps_audio() {
        let format = RawVideoFormat { width: 641, height: 360, fps: 30.0 };
        let config = EncoderConfig::builder().codec("avc1").keep_audio(true).build();
        let mut cmd = build_encode_command(
            format,
            Path::new("out.mp4"),
            &config,
            Some(Path::new("source.mov")),
        );
        let args = args_of(&mut cmd);

        assert_eq!(value_after(&args, "-vf").as_deref(), Some(EVEN_PAD_FILTER));
        assert_eq!(value_after(&args, "-c:v").as_deref(), Some("libx264"));
        assert_eq!(value_after(&args, "-crf").as_deref(), Some("23"));
        assert!(args.iter().any(|a| a == "source.mov"));
        assert!(args.iter().any(|a| a == "1:a?"));
        assert_eq!(value_after(&args, "-c:a").as_deref(), Some("aac"));
        assert!(args.iter().any(|a| a == "-shortest"));
        assert!(!args.iter().any(|a| a == "-an"));
    }

    fn concat_inputs<'a>(paths: &'a [PathBuf], audio: &[bool]) -> Vec<ConcatInput<'a>> {
        paths
            .iter()
            .zip(audio)
            .map(|(path, &has_audio)| ConcatInput {
                path,
                has_audio,
                duration_secs: 2.5,
            })
            .collect()
    }

    #[test]
    fn test_concat_filter_compose_with_audio() {
        let layout = ConcatLayout {
            width: 1920,
            height: 1080,
            fps: 30.0,
            pad_to_canvas: true,
            with_audio: true,
        };
        let paths = [PathBuf::from("a.mp4"), PathBuf::from("b.mp4")];
        let filter = build_concat_filter(&concat_inputs(&paths, &[true, true]), &layout, "yuv420p");
        assert_eq!(
            filter,
            "[0:v:0]fps=30,pad=1920:1080:(ow-iw)/2:(oh-ih)/2:color=black,setsar=1,format=yuv420p[v0];\
             [0:a:0]aresample=48000,aformat=channel_layouts=stereo[a0];\
             [1:v:0]fps=30,pad=1920:1080:(ow-iw)/2:(oh-ih)/2:color=black,setsar=1,format=yuv420p[v1];\
             [1:a:0]aresample=48000,aformat=channel_layouts=stereo[a1];\
             [v0][a0][v1][a1]concat=n=2:v=1:a=1[outv][outa]"
        );
    }

    #[test]
    fn test_concat_filter_fills_missing_audio_with_silence() {
        let layout = ConcatLayout {
            width: 640,
            height: 480,
            fps: 25.0,
            pad_to_canvas: false,
            with_audio: true,
        };
        let paths = [PathBuf::from("a.mp4"), PathBuf::from("silent.mp4")];
        let filter = build_concat_filter(&concat_inputs(&paths, &[true, false]), &layout, "yuv420p");

        assert!(filter.contains("[0:a:0]aresample=48000"));
        assert!(!filter.contains("[1:a:0]"));
        assert!(filter.contains(
            "anullsrc=channel_layout=stereo:sample_rate=48000,atrim=duration=2.5[a1];"
        ));
        assert!(filter.ends_with("[v0][a0][v1][a1]concat=n=2:v=1:a=1[outv][outa]"));
    }

    #[test]
    fn test_concat_filter_chain_without_audio() {
        let layout = ConcatLayout {
            width: 640,
            height: 480,
            fps: 24.0,
            pad_to_canvas: false,
            with_audio: false,
        };
        let paths = [PathBuf::from("a.mp4"), PathBuf::from("b.mp4"), PathBuf::from("c.mp4")];
        let filter =
            build_concat_filter(&concat_inputs(&paths, &[false, false, false]), &layout, "yuv420p");
        assert!(!filter.contains("pad="));
        assert!(!filter.contains("[a0]"));
        assert!(!filter.contains("anullsrc"));
        assert!(filter.ends_with("[v0][v1][v2]concat=n=3:v=1:a=0[outv]"));
    }

    #[test]
    fn test_concat_command_maps_filter_outputs() {
        let layout = ConcatLayout {
            width: 640,
            height: 480,
            fps: 24.0,
            pad_to_canvas: true,
            with_audio: false,
        };
        let paths = [PathBuf::from("a.mp4"), PathBuf::from("b.mp4")];
        let inputs = concat_inputs(&paths, &[false, false]);
        let config = EncoderConfig::builder().codec("libx264").build();
        let mut cmd = build_concat_command(&inputs, &layout, Path::new("joined.mp4"), &config);
        let args = args_of(&mut cmd);

        assert_eq!(args.iter().filter(|a| *a == "-i").count(), 2);
        assert_eq!(value_after(&args, "-map").as_deref(), Some("[outv]"));
        assert!(args.iter().any(|a| a == "-an"));
        assert_eq!(value_after(&args, "-movflags").as_deref(), Some("+faststart"));
        assert_eq!(args.last().map(String::as_str), Some("joined.mp4"));
    }
}
