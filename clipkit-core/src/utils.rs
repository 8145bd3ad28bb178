//! Utility functions for formatting and file operations.
//!
//! General-purpose helpers used throughout clipkit-core: duration and byte
//! formatting, ffmpeg time parsing, and file name checks.

use std::path::Path;

/// Image extensions accepted when assembling a video from a folder.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Checks if the given path names an image file clipkit can read into a frame.
/// Matches png, jpg, jpeg and bmp (case-insensitive); the path must be a file.
#[must_use]
pub fn is_image_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext_str| {
                IMAGE_EXTENSIONS
                    .iter()
                    .any(|known| ext_str.eq_ignore_ascii_case(known))
            })
}

/// Formats seconds as HH:MM:SS (e.g., 3725.0 -> "01:02:05"). Returns "??:??:??" for invalid inputs.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 || !seconds.is_finite() {
        return "??:??:??".to_string();
    }

    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Formats bytes with appropriate binary units (B, KiB, MiB, GiB).
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    const GIB: f64 = MIB * 1024.0;

    let bytes_f64 = bytes as f64;
    if bytes_f64 >= GIB {
        format!("{:.2} GiB", bytes_f64 / GIB)
    } else if bytes_f64 >= MIB {
        format!("{:.2} MiB", bytes_f64 / MIB)
    } else if bytes_f64 >= KIB {
        format!("{:.2} KiB", bytes_f64 / KIB)
    } else {
        format!("{bytes} B")
    }
}

/// Parses FFmpeg time string (HH:MM:SS.MS) to seconds. Returns None if invalid.
#[must_use]
pub fn parse_ffmpeg_time(time: &str) -> Option<f64> {
    let parts: Vec<&str> = time.split(':').collect();
    if parts.len() == 3 {
        let hours = parts[0].parse::<f64>().ok()?;
        let minutes = parts[1].parse::<f64>().ok()?;
        let seconds = parts[2].parse::<f64>().ok()?;
        Some(hours * 3600.0 + minutes * 60.0 + seconds)
    } else {
        None
    }
}

/// Extracts the file name of a path, or an error if the path has no file name component.
pub fn get_filename_safe(path: &Path) -> crate::CoreResult<String> {
    Ok(path
        .file_name()
        .ok_or_else(|| {
            crate::CoreError::PathError(format!("Failed to get filename for {}", path.display()))
        })?
        .to_string_lossy()
        .to_string())
}

/// Seconds covered by `frames` frames at `fps`, or 0.0 when fps is not positive.
#[must_use]
pub fn frames_to_seconds(frames: u64, fps: f64) -> f64 {
    if fps > 0.0 { frames as f64 / fps } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let png = temp_dir.path().join("a.png");
        let jpeg_upper = temp_dir.path().join("b.JPEG");
        let txt = temp_dir.path().join("c.txt");
        std::fs::write(&png, b"").unwrap();
        std::fs::write(&jpeg_upper, b"").unwrap();
        std::fs::write(&txt, b"").unwrap();

        assert!(is_image_file(&png));
        assert!(is_image_file(&jpeg_upper));
        assert!(!is_image_file(&txt));
        assert!(!is_image_file(Path::new("missing.png")));
        assert!(!is_image_file(temp_dir.path()));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "00:00:00");
        assert_eq!(format_duration(59.9), "00:00:59");
        assert_eq!(format_duration(3661.0), "01:01:01");
        assert_eq!(format_duration(-1.0), "??:??:??");
        assert_eq!(format_duration(f64::NAN), "??:??:??");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.50 KiB");
        assert_eq!(format_bytes(1024 * 1024), "1.00 MiB");
        assert_eq!(format_bytes(1024 * 1024 * 1024), "1.00 GiB");
    }

    #[test]
    fn test_parse_ffmpeg_time() {
        assert_eq!(parse_ffmpeg_time("00:01:30.50"), Some(90.5));
        assert_eq!(parse_ffmpeg_time("01:00:00"), Some(3600.0));
        assert_eq!(parse_ffmpeg_time("90.5"), None);
        assert_eq!(parse_ffmpeg_time("aa:bb:cc"), None);
    }

    #[test]
    fn test_frames_to_seconds() {
        assert_eq!(frames_to_seconds(120, 30.0), 4.0);
        assert_eq!(frames_to_seconds(120, 0.0), 0.0);
    }
}
