// ============================================================================
// clipkit-core/src/render/text.rs
// ============================================================================
//
// TEXT RENDERING: Measuring and painting text onto RGB frames
//
// Text is placed by its baseline-left origin. Painting rasterizes each glyph
// into a coverage mask, grows the mask for heavier strokes, and blends the
// colour into the frame through it.
//
// KEY COMPONENTS:
// - TextExtent: advance width plus ascent/descent around the baseline
// - TextMask: rendered coverage, reusable across frames
// - TextPainter: the seam the frame renderers draw text through
// - FontTextPainter: fontdue-backed painter
// - load_font: font file resolution with system fallbacks

use crate::config::SYSTEM_FONT_CANDIDATES;
use crate::error::{CoreError, CoreResult};
use crate::render::draw::{blend_mask, dilate};

use fontdue::{Font, FontSettings, Metrics};
use image::{GrayImage, Luma, Rgb, RgbImage};

use std::path::{Path, PathBuf};

/// Size of a rendered string relative to its baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextExtent {
    /// Advance width in pixels
    pub width: u32,
    /// Pixels of ink above the baseline
    pub ascent: u32,
    /// Pixels of ink below the baseline
    pub descent: u32,
}

/// Coverage of rendered text, placed relative to its baseline-left origin.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextMask {
    pub coverage: GrayImage,
    /// Top-left corner of `coverage` relative to the origin
    pub offset: (i32, i32),
}

impl TextMask {
    /// Blends `color` into `frame` with the text origin at `origin`.
    pub fn blend(&self, frame: &mut RgbImage, origin: (i32, i32), color: Rgb<u8>) {
        let left = i64::from(origin.0) + i64::from(self.offset.0);
        let top = i64::from(origin.1) + i64::from(self.offset.1);
        blend_mask(frame, &self.coverage, left, top, color);
    }
}

/// Measures and draws single-line text.
pub trait TextPainter {
    fn measure(&self, text: &str) -> TextExtent;

    /// Renders `text` into a mask that can be blended onto many frames.
    ///
    /// `thickness` of 1 is the natural stroke; larger values embolden the
    /// glyphs by `thickness / 2` pixels on every side.
    fn rasterize(&self, text: &str, thickness: u32) -> TextMask;

    /// Draws `text` with its baseline-left corner at `origin`.
    fn draw(
        &self,
        frame: &mut RgbImage,
        text: &str,
        origin: (i32, i32),
        color: Rgb<u8>,
        thickness: u32,
    ) {
        self.rasterize(text, thickness).blend(frame, origin, color);
    }
}

struct PlacedGlyph {
    left: i32,
    metrics: Metrics,
    coverage: Vec<u8>,
}

/// Text painter using a TrueType/OpenType font at a fixed pixel size.
pub struct FontTextPainter {
    font: Font,
    px: f32,
}

impl FontTextPainter {
    #[must_use]
    pub fn new(font: Font, px: f32) -> Self {
        Self { font, px }
    }

    /// Loads the font at `path` (or a system fallback) and sizes it.
    pub fn load(path: Option<&Path>, px: f32) -> CoreResult<Self> {
        let (font, _) = load_font(path)?;
        Ok(Self::new(font, px))
    }

    fn layout(&self, text: &str) -> (Vec<PlacedGlyph>, f32) {
        let mut pen = 0.0f32;
        let mut glyphs = Vec::with_capacity(text.len());
        for ch in text.chars() {
            let (metrics, coverage) = self.font.rasterize(ch, self.px);
            glyphs.push(PlacedGlyph {
                left: (pen + metrics.xmin as f32).round() as i32,
                metrics,
                coverage,
            });
            pen += metrics.advance_width;
        }
        (glyphs, pen)
    }
}

impl TextPainter for FontTextPainter {
    fn measure(&self, text: &str) -> TextExtent {
        let (glyphs, advance) = self.layout(text);
        let mut ascent = 0i32;
        let mut descent = 0i32;
        for glyph in glyphs.iter().filter(|g| g.metrics.height > 0) {
            ascent = ascent.max(glyph.metrics.ymin + glyph.metrics.height as i32);
            descent = descent.max(-glyph.metrics.ymin);
        }
        TextExtent {
            width: advance.ceil().max(0.0) as u32,
            ascent: ascent.max(0) as u32,
            descent: descent.max(0) as u32,
        }
    }

    fn rasterize(&self, text: &str, thickness: u32) -> TextMask {
        let (glyphs, _) = self.layout(text);
        let inked: Vec<&PlacedGlyph> = glyphs
            .iter()
            .filter(|g| g.metrics.width > 0 && g.metrics.height > 0)
            .collect();
        if inked.is_empty() {
            return TextMask::default();
        }

        let min_x = inked.iter().map(|g| g.left).min().unwrap_or(0);
        let max_x = inked
            .iter()
            .map(|g| g.left + g.metrics.width as i32)
            .max()
            .unwrap_or(0);
        let top = inked
            .iter()
            .map(|g| g.metrics.ymin + g.metrics.height as i32)
            .max()
            .unwrap_or(0);
        let bottom = inked.iter().map(|g| g.metrics.ymin).min().unwrap_or(0);

        let radius = thickness / 2;
        let pad = radius as i32;
        let mask_w = (max_x - min_x + 2 * pad).max(1) as u32;
        let mask_h = (top - bottom + 2 * pad).max(1) as u32;
        let mut mask = GrayImage::new(mask_w, mask_h);

        for glyph in inked {
            let gx = glyph.left - min_x + pad;
            let gy = top - (glyph.metrics.ymin + glyph.metrics.height as i32) + pad;
            for row in 0..glyph.metrics.height {
                for col in 0..glyph.metrics.width {
                    let value = glyph.coverage[row * glyph.metrics.width + col];
                    if value == 0 {
                        continue;
                    }
                    let x = (gx + col as i32) as u32;
                    let y = (gy + row as i32) as u32;
                    let current = mask.get_pixel(x, y)[0];
                    mask.put_pixel(x, y, Luma([current.max(value)]));
                }
            }
        }

        TextMask {
            coverage: dilate(&mask, radius),
            offset: (min_x - pad, -top - pad),
        }
    }
}

/// Loads a font from `path`, or from the first system font that exists.
///
/// Returns the font along with the file it was read from.
pub fn load_font(path: Option<&Path>) -> CoreResult<(Font, PathBuf)> {
    let path = match path {
        Some(explicit) => {
            if !explicit.is_file() {
                return Err(CoreError::PathError(format!(
                    "Font file not found: {}",
                    explicit.display()
                )));
            }
            explicit.to_path_buf()
        }
        None => SYSTEM_FONT_CANDIDATES
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.is_file())
            .ok_or(CoreError::FontNotFound)?,
    };

    log::debug!("Loading font from {}", path.display());
    let bytes = std::fs::read(&path)?;
    let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|reason| {
        CoreError::FontLoad {
            path: path.clone(),
            reason: reason.to_string(),
        }
    })?;
    Ok((font, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_blends_at_offset() {
        let mask = TextMask {
            coverage: GrayImage::from_pixel(2, 3, Luma([255])),
            offset: (1, -3),
        };
        let mut frame = RgbImage::new(6, 6);
        mask.blend(&mut frame, (2, 4), Rgb([255, 0, 0]));

        let red: Vec<(u32, u32)> = frame
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] == 255)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(red, vec![(3, 1), (4, 1), (3, 2), (4, 2), (3, 3), (4, 3)]);
    }

    #[test]
    fn test_empty_mask_draws_nothing() {
        let mut frame = RgbImage::new(4, 4);
        TextMask::default().blend(&mut frame, (1, 1), Rgb([255, 255, 255]));
        assert!(frame.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_load_font_missing_explicit_path() {
        let err = load_font(Some(Path::new("/nonexistent/clipkit/font.ttf"))).unwrap_err();
        assert!(matches!(err, CoreError::PathError(msg) if msg.contains("font.ttf")));
    }

    #[test]
    fn test_load_font_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();

        let err = load_font(Some(&path)).unwrap_err();
        assert!(matches!(err, CoreError::FontLoad { .. }));
    }

    #[test]
    fn test_font_painter_draws_when_system_font_available() {
        // Only meaningful on hosts with one of the fallback fonts installed.
        let Ok(painter) = FontTextPainter::load(None, 24.0) else {
            return;
        };
        let extent = painter.measure("Hi");
        assert!(extent.width > 0);
        assert!(extent.ascent > 0);

        let thin = painter.rasterize("Hi", 1);
        let bold = painter.rasterize("Hi", 3);
        assert_eq!(bold.coverage.width(), thin.coverage.width() + 2);
        assert_eq!(bold.offset, (thin.offset.0 - 1, thin.offset.1 - 1));

        let mut frame = RgbImage::new(100, 50);
        painter.draw(&mut frame, "Hi", (10, 40), Rgb([255, 255, 255]), 2);
        assert!(frame.pixels().any(|p| p[0] > 0));
    }
}
