//! Primitive drawing on RGB frames.

use image::{GrayImage, Luma, Rgb, RgbImage};

/// Fills the rectangle with inclusive corners `(x0, y0)` and `(x1, y1)`.
///
/// The rectangle is clipped to the frame; nothing is drawn when `x1 < x0`
/// or `y1 < y0`.
pub fn fill_rect(frame: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
    if x1 < x0 || y1 < y0 {
        return;
    }
    let max_x = i64::from(frame.width()) - 1;
    let max_y = i64::from(frame.height()) - 1;
    let (left, right) = (x0.max(0), x1.min(max_x));
    let (top, bottom) = (y0.max(0), y1.min(max_y));
    if left > right || top > bottom {
        return;
    }

    for y in top..=bottom {
        for x in left..=right {
            frame.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Grows a coverage mask by taking the maximum over a square of `radius`.
#[must_use]
pub fn dilate(mask: &GrayImage, radius: u32) -> GrayImage {
    if radius == 0 {
        return mask.clone();
    }
    let (width, height) = mask.dimensions();
    let r = radius as i64;
    GrayImage::from_fn(width, height, |x, y| {
        let mut best = 0u8;
        for dy in -r..=r {
            for dx in -r..=r {
                let sx = i64::from(x) + dx;
                let sy = i64::from(y) + dy;
                if sx >= 0 && sy >= 0 && sx < i64::from(width) && sy < i64::from(height) {
                    best = best.max(mask.get_pixel(sx as u32, sy as u32)[0]);
                }
            }
        }
        Luma([best])
    })
}

/// Alpha-blends `color` into `frame` using `mask` as coverage, with the
/// mask's top-left corner at `(left, top)`. Out-of-frame pixels are skipped.
pub fn blend_mask(frame: &mut RgbImage, mask: &GrayImage, left: i64, top: i64, color: Rgb<u8>) {
    let (frame_w, frame_h) = (i64::from(frame.width()), i64::from(frame.height()));
    for (mx, my, coverage) in mask.enumerate_pixels() {
        let alpha = coverage[0];
        if alpha == 0 {
            continue;
        }
        let x = left + i64::from(mx);
        let y = top + i64::from(my);
        if x < 0 || y < 0 || x >= frame_w || y >= frame_h {
            continue;
        }
        let pixel = frame.get_pixel_mut(x as u32, y as u32);
        let a = u16::from(alpha);
        for c in 0..3 {
            let src = u16::from(color[c]);
            let dst = u16::from(pixel[c]);
            pixel[c] = ((src * a + dst * (255 - a) + 127) / 255) as u8;
        }
    }
}
