//! Colour parsing and interpolation.

use crate::error::{CoreError, CoreResult};
use image::Rgb;

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Channel order of a colour triple given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorOrder {
    /// `"B,G,R"`, the order OpenCV-based tools use
    #[default]
    Bgr,
    /// `"R,G,B"`
    Rgb,
}

/// Parses a triple of integers in 0..=255 given in `order`.
pub fn parse_color(value: &str, order: ColorOrder) -> CoreResult<Rgb<u8>> {
    let invalid = || {
        CoreError::InvalidInput(format!(
            "invalid color '{value}': expected three comma-separated values 0-255 (e.g. 255,255,255)"
        ))
    };

    let channels = value
        .split(',')
        .map(|part| part.trim().parse::<u8>().map_err(|_| invalid()))
        .collect::<CoreResult<Vec<u8>>>()?;

    match (channels.as_slice(), order) {
        ([b, g, r], ColorOrder::Bgr) | ([r, g, b], ColorOrder::Rgb) => Ok(Rgb([*r, *g, *b])),
        _ => Err(invalid()),
    }
}

/// Colour of the progress bar at `progress` (0.0 green, 1.0 red).
///
/// Channels are truncated, not rounded, and `progress` is clamped to [0, 1].
#[must_use]
pub fn lerp_progress_color(progress: f64) -> Rgb<u8> {
    let p = progress.clamp(0.0, 1.0);
    let r = (255.0 * p) as u8;
    let g = (255.0 * (1.0 - p)) as u8;
    Rgb([r, g, 0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("255,255,255", ColorOrder::Bgr).unwrap(), WHITE);
        assert_eq!(
            parse_color(" 10, 20 ,30 ", ColorOrder::Rgb).unwrap(),
            Rgb([10, 20, 30])
        );
    }

    #[test]
    fn test_parse_color_defaults_to_bgr() {
        // 0,0,255 is red in B,G,R order.
        assert_eq!(
            parse_color("0,0,255", ColorOrder::default()).unwrap(),
            Rgb([255, 0, 0])
        );
        assert_eq!(
            parse_color("0,0,255", ColorOrder::Rgb).unwrap(),
            Rgb([0, 0, 255])
        );
    }

    #[test]
    fn test_parse_color_rejects_bad_values() {
        for order in [ColorOrder::Bgr, ColorOrder::Rgb] {
            assert!(parse_color("255,255", order).is_err());
            assert!(parse_color("1,2,3,4", order).is_err());
            assert!(parse_color("256,0,0", order).is_err());
            assert!(parse_color("red", order).is_err());
            assert!(parse_color("", order).is_err());
        }
    }

    #[test]
    fn test_lerp_progress_color() {
        assert_eq!(lerp_progress_color(0.0), Rgb([0, 255, 0]));
        assert_eq!(lerp_progress_color(1.0), Rgb([255, 0, 0]));
        assert_eq!(lerp_progress_color(0.5), Rgb([127, 127, 0]));
        assert_eq!(lerp_progress_color(-3.0), Rgb([0, 255, 0]));
        assert_eq!(lerp_progress_color(7.0), Rgb([255, 0, 0]));
    }
}
