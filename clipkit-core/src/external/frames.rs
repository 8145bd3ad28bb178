// ============================================================================
// clipkit-core/src/external/frames.rs
// ============================================================================
//
// FRAME I/O: Decoded frame sources and encoded frame sinks
//
// Operations that transform frames in Rust read them from a FrameSource and
// write them to a FrameSink. The ffmpeg-backed implementations pipe rgb24
// rawvideo through ffmpeg-sidecar; the in-memory implementations serve tests
// and library consumers that already hold frames.
//
// A sidecar that is dropped without a successful `finish` kills and reaps its
// child; the encoder also removes its partial output file.
//
// KEY COMPONENTS:
// - FrameSource / FrameSink: traits the frame loops are generic over
// - SidecarFrameSource: ffmpeg decoder child producing frames on stdout
// - SidecarFrameSink: ffmpeg encoder child consuming frames on stdin
// - MemoryFrameSource / MemoryFrameSink: in-memory counterparts

use crate::config::EncoderConfig;
use crate::error::{
    CoreError, CoreResult, command_failed_error, command_start_error, command_wait_error,
};
use crate::external::ffmpeg::{RawVideoFormat, build_decode_command, build_encode_command};
use crate::progress_reporting::ffmpeg_handler::FfmpegEventHandler;

use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::event::FfmpegEvent;
use ffmpeg_sidecar::iter::FfmpegIterator;
use image::RgbImage;

use std::collections::VecDeque;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{ChildStdin, ExitStatus};
use std::thread::JoinHandle;

/// A stream of decoded frames, in presentation order.
pub trait FrameSource {
    /// Returns the next frame, or `None` once the stream is exhausted.
    fn next_frame(&mut self) -> CoreResult<Option<RgbImage>>;

    /// Releases the source, reporting any failure of the underlying decoder.
    fn finish(self) -> CoreResult<()>
    where
        Self: Sized;
}

/// A destination for frames of a fixed size.
pub trait FrameSink {
    /// Appends one frame to the output.
    fn write_frame(&mut self, frame: &RgbImage) -> CoreResult<()>;

    /// Completes the output. Must be called for the output to be valid.
    fn finish(self) -> CoreResult<()>
    where
        Self: Sized;
}

// --- ffmpeg-sidecar decoder ---

/// Decodes a video file into RGB frames with an ffmpeg child process.
pub struct SidecarFrameSource {
    child: FfmpegChild,
    events: FfmpegIterator,
    handler: FfmpegEventHandler,
    label: String,
    finished: bool,
}

impl SidecarFrameSource {
    /// Spawns the decoder for `input`.
    pub fn open(input: &Path) -> CoreResult<Self> {
        let label = format!("ffmpeg (decode {})", input.display());
        let mut cmd = build_decode_command(input);
        log::debug!("Spawning decoder: {cmd:?}");

        let mut child = cmd.spawn().map_err(|e| command_start_error(&label, e))?;
        let events = child.iter().map_err(|e| {
            command_failed_error(
                &label,
                ExitStatus::default(),
                format!("Failed to get event iterator: {e}"),
            )
        })?;

        Ok(Self {
            child,
            events,
            handler: FfmpegEventHandler::quiet(),
            label,
            finished: false,
        })
    }
}

impl FrameSource for SidecarFrameSource {
    fn next_frame(&mut self) -> CoreResult<Option<RgbImage>> {
        for event in self.events.by_ref() {
            match event {
                FfmpegEvent::OutputFrame(frame) => {
                    let (width, height) = (frame.width, frame.height);
                    let image = RgbImage::from_raw(width, height, frame.data).ok_or_else(|| {
                        CoreError::OperationFailed(format!(
                            "{}: frame {} has the wrong size for {}x{} rgb24",
                            self.label, frame.frame_num, width, height
                        ))
                    })?;
                    return Ok(Some(image));
                }
                other => self.handler.handle_event(other),
            }
        }
        Ok(None)
    }

    fn finish(mut self) -> CoreResult<()> {
        // Drain whatever is left so the child is not blocked on a full pipe.
        for event in self.events.by_ref() {
            if !matches!(event, FfmpegEvent::OutputFrame(_)) {
                self.handler.handle_event(event);
            }
        }
        let status = self
            .child
            .wait()
            .map_err(|e| command_wait_error(&self.label, e))?;
        self.finished = true;
        if !status.success() {
            return Err(command_failed_error(
                self.label.clone(),
                status,
                self.handler.stderr_buffer(),
            ));
        }
        Ok(())
    }
}

impl Drop for SidecarFrameSource {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        log::debug!("{} dropped before the end of the stream, stopping it", self.label);
        if let Err(e) = self.child.kill() {
            log::debug!("{}: kill failed: {}", self.label, e);
        }
        if let Err(e) = self.child.wait() {
            log::debug!("{}: wait failed: {}", self.label, e);
        }
    }
}

// --- ffmpeg-sidecar encoder ---

/// Encodes RGB frames into a video file with an ffmpeg child process.
///
/// A helper thread drains the child's events while frames are written to
/// its stdin, so ffmpeg never blocks on a full stderr pipe.
pub struct SidecarFrameSink {
    child: FfmpegChild,
    stdin: Option<ChildStdin>,
    drain: Option<JoinHandle<String>>,
    format: RawVideoFormat,
    output: PathBuf,
    label: String,
    completed: bool,
}

impl SidecarFrameSink {
    /// Spawns the encoder writing to `output`.
    ///
    /// `audio_source` is muxed in when the configuration keeps audio.
    pub fn create(
        output: &Path,
        format: RawVideoFormat,
        config: &EncoderConfig,
        audio_source: Option<&Path>,
    ) -> CoreResult<Self> {
        let label = format!("ffmpeg (encode {})", output.display());
        let audio_source = audio_source.filter(|_| config.keep_audio);
        let mut cmd = build_encode_command(format, output, config, audio_source);
        log::debug!("Spawning encoder: {cmd:?}");

        let mut child = cmd.spawn().map_err(|e| command_start_error(&label, e))?;
        let stdin = child.take_stdin().ok_or_else(|| {
            CoreError::OperationFailed(format!("{label}: stdin was not captured"))
        })?;
        let events = child.iter().map_err(|e| {
            command_failed_error(
                &label,
                ExitStatus::default(),
                format!("Failed to get event iterator: {e}"),
            )
        })?;

        let drain = std::thread::spawn(move || {
            let mut handler = FfmpegEventHandler::quiet();
            for event in events {
                handler.handle_event(event);
            }
            handler.into_stderr()
        });

        Ok(Self {
            child,
            stdin: Some(stdin),
            drain: Some(drain),
            format,
            output: output.to_path_buf(),
            label,
            completed: false,
        })
    }

    fn collect_stderr(&mut self) -> String {
        self.drain
            .take()
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default()
    }
}

impl FrameSink for SidecarFrameSink {
    fn write_frame(&mut self, frame: &RgbImage) -> CoreResult<()> {
        if frame.dimensions() != (self.format.width, self.format.height) {
            return Err(CoreError::InvalidInput(format!(
                "frame is {}x{} but the output is {}x{}",
                frame.width(),
                frame.height(),
                self.format.width,
                self.format.height
            )));
        }
        let stdin = self.stdin.as_mut().ok_or_else(|| {
            CoreError::OperationFailed(format!("{}: encoder input already closed", self.label))
        })?;

        if let Err(e) = stdin.write_all(frame.as_raw()) {
            // A closed pipe means ffmpeg exited; its stderr says why.
            self.stdin = None;
            let status = self
                .child
                .wait()
                .map_err(|wait_err| command_wait_error(&self.label, wait_err))?;
            let stderr = self.collect_stderr();
            log::error!("{} stopped accepting frames: {}", self.label, e);
            return Err(command_failed_error(
                self.label.clone(),
                status,
                format!("{e}\n{stderr}"),
            ));
        }
        Ok(())
    }

    fn finish(mut self) -> CoreResult<()> {
        if let Some(mut stdin) = self.stdin.take() {
            stdin.flush()?;
        }
        let status = self
            .child
            .wait()
            .map_err(|e| command_wait_error(&self.label, e))?;
        let stderr = self.collect_stderr();
        if !status.success() {
            log::error!("{} failed: {}", self.label, status);
            return Err(command_failed_error(self.label.clone(), status, stderr));
        }
        self.completed = true;
        Ok(())
    }
}

impl Drop for SidecarFrameSink {
    fn drop(&mut self) {
        if self.completed {
            return;
        }
        // Killed before stdin closes, so ffmpeg cannot finalise a truncated file.
        if let Err(e) = self.child.kill() {
            log::debug!("{}: kill failed: {}", self.label, e);
        }
        self.stdin = None;
        if let Err(e) = self.child.wait() {
            log::debug!("{}: wait failed: {}", self.label, e);
        }
        self.collect_stderr();
        remove_partial_output(&self.output);
    }
}

/// Deletes an incomplete output file, if one was created.
pub(crate) fn remove_partial_output(path: &Path) {
    if !path.exists() {
        return;
    }
    match fs::remove_file(path) {
        Ok(()) => log::debug!("Removed incomplete output {}", path.display()),
        Err(e) => log::warn!("Could not remove incomplete output {}: {}", path.display(), e),
    }
}

// --- In-memory implementations ---

/// Frame source backed by a list of frames.
#[derive(Debug, Clone, Default)]
pub struct MemoryFrameSource {
    frames: VecDeque<RgbImage>,
}

impl MemoryFrameSource {
    #[must_use]
    pub fn new(frames: impl IntoIterator<Item = RgbImage>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl FrameSource for MemoryFrameSource {
    fn next_frame(&mut self) -> CoreResult<Option<RgbImage>> {
        Ok(self.frames.pop_front())
    }

    fn finish(self) -> CoreResult<()> {
        Ok(())
    }
}

/// Frame sink that keeps every frame written to it.
#[derive(Debug, Clone, Default)]
pub struct MemoryFrameSink {
    /// Frames written so far
    pub frames: Vec<RgbImage>,
    /// Whether `finish` has been called
    pub finished: bool,
}

impl FrameSink for &mut MemoryFrameSink {
    fn write_frame(&mut self, frame: &RgbImage) -> CoreResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn finish(self) -> CoreResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_memory_source_yields_in_order() {
        let frames = (0..3u8).map(|i| RgbImage::from_pixel(2, 2, Rgb([i, i, i])));
        let mut source = MemoryFrameSource::new(frames);
        let mut seen = Vec::new();
        while let Some(frame) = source.next_frame().unwrap() {
            seen.push(frame.get_pixel(0, 0)[0]);
        }
        assert_eq!(seen, vec![0, 1, 2]);
        assert!(source.finish().is_ok());
    }

    #[test]
    fn test_remove_partial_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.mp4");
        std::fs::write(&path, b"truncated").unwrap();

        remove_partial_output(&path);
        assert!(!path.exists());
        // Missing files are ignored.
        remove_partial_output(&path);
    }

    #[test]
    fn test_unfinished_encoder_leaves_no_output() {
        // Needs a working ffmpeg on the host.
        if !ffmpeg_sidecar::command::ffmpeg_is_installed() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("aborted.mp4");
        let format = RawVideoFormat {
            width: 16,
            height: 16,
            fps: 10.0,
        };
        let config = EncoderConfig::builder().codec("mp4v").build();
        {
            let mut sink = SidecarFrameSink::create(&output, format, &config, None).unwrap();
            for _ in 0..3 {
                sink.write_frame(&RgbImage::new(16, 16)).unwrap();
            }
            let err = sink.write_frame(&RgbImage::new(8, 8)).unwrap_err();
            assert!(matches!(err, CoreError::InvalidInput(_)));
        }
        assert!(!output.exists());
    }

    #[test]
    fn test_memory_sink_records_frames() {
        let mut sink = MemoryFrameSink::default();
        {
            let mut writer = &mut sink;
            writer.write_frame(&RgbImage::new(4, 4)).unwrap();
            writer.finish().unwrap();
        }
        assert_eq!(sink.frames.len(), 1);
        assert!(sink.finished);
    }
}
