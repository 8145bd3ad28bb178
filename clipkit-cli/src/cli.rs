// clipkit-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use crate::config::{
    DEFAULT_ASSEMBLE_FPS, DEFAULT_FONT_SCALE, DEFAULT_OVERLAY_COLOR, DEFAULT_THICKNESS,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use clipkit_core::config::{
    DEFAULT_FRAME_CODEC, DEFAULT_H264_CODEC, DEFAULT_PROGRESS_DURATION_SECS,
    DEFAULT_PROGRESS_FONT_PX, DEFAULT_PROGRESS_HEIGHT, DEFAULT_PROGRESS_OUTPUT,
    DEFAULT_PROGRESS_WIDTH,
};
use clipkit_core::{ColorOrder, ConcatMethod, ExtractFormat, TextPosition};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "clipkit: basic video manipulation tools",
    long_about = "Generates, annotates, joins, splits, resizes and inspects videos using ffmpeg via clipkit-core."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug output
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Also write a log file of this run into DIR
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generates a countdown video with a growing green-to-red progress bar
    Progress(ProgressArgs),
    /// Draws a text string onto every frame of a video
    Overlay(OverlayArgs),
    /// Concatenates videos into one file
    Concat(ConcatArgs),
    /// Saves every Nth frame of a video as an image
    Extract(ExtractArgs),
    /// Builds a video from a folder of images
    #[command(alias = "images-to-video")]
    Assemble(AssembleArgs),
    /// Shows video metadata
    Info(InfoArgs),
    /// Resizes a video
    Resize(ResizeArgs),
}

impl Commands {
    /// Subcommand name, used in log file names.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Progress(_) => "progress",
            Commands::Overlay(_) => "overlay",
            Commands::Concat(_) => "concat",
            Commands::Extract(_) => "extract",
            Commands::Assemble(_) => "assemble",
            Commands::Info(_) => "info",
            Commands::Resize(_) => "resize",
        }
    }
}

/// Parses a strictly positive floating point value.
fn positive_f64(value: &str) -> Result<f64, String> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if parsed.is_finite() && parsed > 0.0 {
        Ok(parsed)
    } else {
        Err(format!("'{value}' must be greater than 0"))
    }
}

fn positive_f32(value: &str) -> Result<f32, String> {
    positive_f64(value).map(|v| v as f32)
}

#[derive(Args, Debug)]
pub struct ProgressArgs {
    /// Output video file
    #[arg(short, long, value_name = "OUTPUT", default_value = DEFAULT_PROGRESS_OUTPUT)]
    pub output: PathBuf,

    /// Frame width in pixels
    #[arg(long, default_value_t = DEFAULT_PROGRESS_WIDTH, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Frame height in pixels
    #[arg(long, default_value_t = DEFAULT_PROGRESS_HEIGHT, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Length of the countdown in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_PROGRESS_DURATION_SECS, value_parser = clap::value_parser!(u32).range(1..))]
    pub duration: u32,

    /// Frames per second
    #[arg(long, default_value_t = clipkit_core::config::DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// TrueType/OpenType font for the counter (system fonts are tried otherwise)
    #[arg(long, value_name = "FONT_FILE", env = "CLIPKIT_FONT")]
    pub font: Option<PathBuf>,

    /// Counter size in pixels
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_PROGRESS_FONT_PX, value_parser = positive_f32)]
    pub font_size: f32,

    /// Video codec (ffmpeg encoder name or FourCC such as mp4v, avc1)
    #[arg(long, default_value = DEFAULT_H264_CODEC)]
    pub codec: String,
}

/// Anchor position of overlay text.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionArg {
    TopLeft,
    TopCenter,
    TopRight,
    Center,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorOrderArg {
    Bgr,
    Rgb,
}

impl From<ColorOrderArg> for ColorOrder {
    fn from(value: ColorOrderArg) -> Self {
        match value {
            ColorOrderArg::Bgr => ColorOrder::Bgr,
            ColorOrderArg::Rgb => ColorOrder::Rgb,
        }
    }
}

impl From<PositionArg> for TextPosition {
    fn from(value: PositionArg) -> Self {
        match value {
            PositionArg::TopLeft => TextPosition::TopLeft,
            PositionArg::TopCenter => TextPosition::TopCenter,
            PositionArg::TopRight => TextPosition::TopRight,
            PositionArg::Center => TextPosition::Center,
            PositionArg::BottomLeft => TextPosition::BottomLeft,
            PositionArg::BottomCenter => TextPosition::BottomCenter,
            PositionArg::BottomRight => TextPosition::BottomRight,
        }
    }
}

#[derive(Args, Debug)]
pub struct OverlayArgs {
    /// Input video file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output video file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Text to draw
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Where to place the text
    #[arg(long, value_enum, default_value_t = PositionArg::BottomCenter)]
    pub position: PositionArg,

    /// Font size multiplier (1.0 = 30 px)
    #[arg(long, default_value_t = DEFAULT_FONT_SCALE, value_parser = positive_f32)]
    pub font_scale: f32,

    /// Text colour as three 0-255 values, in the order set by --color-order
    #[arg(long, value_name = "B,G,R", default_value = DEFAULT_OVERLAY_COLOR)]
    pub color: String,

    /// Channel order of --color
    #[arg(long, value_enum, default_value_t = ColorOrderArg::Bgr)]
    pub color_order: ColorOrderArg,

    /// Stroke thickness in pixels
    #[arg(long, default_value_t = DEFAULT_THICKNESS, value_parser = clap::value_parser!(u32).range(1..))]
    pub thickness: u32,

    /// TrueType/OpenType font file (system fonts are tried otherwise)
    #[arg(long, value_name = "FONT_FILE", env = "CLIPKIT_FONT")]
    pub font: Option<PathBuf>,

    /// Video codec (ffmpeg encoder name or FourCC such as mp4v, avc1)
    #[arg(long, default_value = DEFAULT_FRAME_CODEC)]
    pub codec: String,

    /// Copy the input's audio into the output
    #[arg(long, default_value_t = false)]
    pub keep_audio: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodArg {
    /// Pad every clip onto the largest frame size
    Compose,
    /// Join clips as-is (all must share one size)
    Chain,
}

impl From<MethodArg> for ConcatMethod {
    fn from(value: MethodArg) -> Self {
        match value {
            MethodArg::Compose => ConcatMethod::Compose,
            MethodArg::Chain => ConcatMethod::Chain,
        }
    }
}

#[derive(Args, Debug)]
pub struct ConcatArgs {
    /// Input video files, in order
    #[arg(required = true, num_args = 1.., value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Output video file
    #[arg(short, long, required = true, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// How clips of different sizes are combined
    #[arg(long, value_enum, default_value_t = MethodArg::Compose)]
    pub method: MethodArg,

    /// Video codec (ffmpeg encoder name or FourCC such as mp4v, avc1)
    #[arg(long, default_value = DEFAULT_H264_CODEC)]
    pub codec: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Jpg,
    Png,
    Bmp,
}

impl From<FormatArg> for ExtractFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Jpg => ExtractFormat::Jpg,
            FormatArg::Png => ExtractFormat::Png,
            FormatArg::Bmp => ExtractFormat::Bmp,
        }
    }
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Input video file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Folder the images are written to (created if missing)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Keep every Nth frame
    #[arg(long, value_name = "N", default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Image format
    #[arg(long, value_enum, default_value_t = FormatArg::Jpg)]
    pub format: FormatArg,
}

#[derive(Args, Debug)]
pub struct AssembleArgs {
    /// Folder containing png/jpg/jpeg/bmp images
    #[arg(value_name = "IMAGE_DIR")]
    pub image_dir: PathBuf,

    /// Output video file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Frames per second
    #[arg(long, default_value_t = DEFAULT_ASSEMBLE_FPS, value_parser = positive_f64)]
    pub fps: f64,

    /// Video codec (ffmpeg encoder name or FourCC such as mp4v, avc1)
    #[arg(long, default_value = DEFAULT_FRAME_CODEC)]
    pub codec: String,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Video file to inspect
    #[arg(value_name = "VIDEO")]
    pub video: PathBuf,

    /// Print the metadata as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ResizeArgs {
    /// Input video file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output video file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Target width (height follows the aspect ratio unless also given)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Target height (width follows the aspect ratio unless also given)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// Scale factor; overrides width and height
    #[arg(long, value_parser = positive_f64)]
    pub scale: Option<f64>,

    /// Video codec (ffmpeg encoder name or FourCC such as mp4v, avc1)
    #[arg(long, default_value = DEFAULT_FRAME_CODEC)]
    pub codec: String,

    /// Copy the input's audio into the output
    #[arg(long, default_value_t = false)]
    pub keep_audio: bool,
}
