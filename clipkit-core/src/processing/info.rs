//! Video metadata presentation.
//!
//! Turns a [`VideoInfo`] into labelled display fields or JSON.

use crate::error::{CoreError, CoreResult};
use crate::external::VideoInfo;
use crate::utils::{format_bytes, format_duration};

/// Labelled, display-ready fields for `info`, in presentation order.
#[must_use]
pub fn info_fields(info: &VideoInfo) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("File", info.path.display().to_string()),
        ("Resolution", format!("{}x{}", info.width, info.height)),
        ("FPS", format!("{:.2}", info.fps)),
        ("Frame count", info.frame_count.to_string()),
        (
            "Duration",
            format!(
                "{:.2} seconds ({:.2} minutes, {})",
                info.duration_secs,
                info.duration_minutes(),
                format_duration(info.duration_secs)
            ),
        ),
        ("Has audio", if info.has_audio { "yes" } else { "no" }.to_string()),
    ];
    if let Some(rate) = info.audio_sample_rate {
        fields.push(("Audio sample rate", format!("{rate} Hz")));
    }
    fields.push((
        "Codec",
        info.codec.clone().unwrap_or_else(|| "unknown".to_string()),
    ));
    fields.push(("File size", format_bytes(info.file_size)));
    fields
}

/// Pretty-printed JSON for `info`.
pub fn video_info_json(info: &VideoInfo) -> CoreResult<String> {
    serde_json::to_string_pretty(info).map_err(|e| CoreError::JsonParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample(has_audio: bool) -> VideoInfo {
        VideoInfo {
            path: PathBuf::from("clip.mp4"),
            width: 1920,
            height: 1080,
            fps: 29.97,
            frame_count: 1798,
            duration_secs: 60.0,
            codec: Some("h264".to_string()),
            has_audio,
            audio_sample_rate: has_audio.then_some(44_100),
            file_size: 2048,
        }
    }

    #[test]
    fn test_info_fields() {
        let fields = info_fields(&sample(true));
        let get = |label: &str| {
            fields
                .iter()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.clone())
        };
        assert_eq!(get("Resolution").as_deref(), Some("1920x1080"));
        assert_eq!(get("FPS").as_deref(), Some("29.97"));
        assert!(get("Duration").unwrap().contains("1.00 minutes"));
        assert_eq!(get("Audio sample rate").as_deref(), Some("44100 Hz"));
        assert_eq!(get("Codec").as_deref(), Some("h264"));
    }

    #[test]
    fn test_info_fields_without_audio() {
        let fields = info_fields(&sample(false));
        assert!(fields.iter().all(|(l, _)| *l != "Audio sample rate"));
    }

    #[test]
    fn test_json_output() {
        let json = video_info_json(&sample(true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["width"], 1920);
        assert_eq!(value["has_audio"], true);
        assert_eq!(value["path"], "clip.mp4");
    }
}
