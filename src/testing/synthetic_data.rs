//! Deterministic synthetic frames for stacking tests and benchmarks
//!
//! Real focus brackets are large and noisy; these generators give small
//! images whose sharpness structure is known in advance.

use image::{DynamicImage, Rgb, RgbImage};

/// Uniform image of a single color.
pub fn solid_frame(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
}

/// Copy of `frame` with one pixel recolored.
pub fn with_marked_pixel(frame: &DynamicImage, x: u32, y: u32, color: [u8; 3]) -> DynamicImage {
    let mut rgb = frame.to_rgb8();
    rgb.put_pixel(x, y, Rgb(color));
    DynamicImage::ImageRgb8(rgb)
}

/// Black and white checkerboard with square cells of `cell` pixels.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> DynamicImage {
    let cell = cell.max(1);
    let rgb = RgbImage::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            Rgb([230, 230, 230])
        } else {
            Rgb([20, 20, 20])
        }
    });
    DynamicImage::ImageRgb8(rgb)
}

/// Gradient pattern that varies with `frame_number`, useful as busy benchmark input.
pub fn synthetic_frame(frame_number: u64, width: u32, height: u32) -> DynamicImage {
    let base = (frame_number % 256) as u8;
    let rgb = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            base.wrapping_add((x % 256) as u8),
            base.wrapping_add((y % 256) as u8),
            base.wrapping_add(((x + y) % 256) as u8),
        ])
    });
    DynamicImage::ImageRgb8(rgb)
}

/// Box blur of `frame` with the given radius, edges clamped.
///
/// Stands in for an out-of-focus exposure of the same scene.
pub fn box_blur(frame: &DynamicImage, radius: u32) -> DynamicImage {
    let src = frame.to_rgb8();
    let (width, height) = src.dimensions();
    if radius == 0 || width == 0 || height == 0 {
        return DynamicImage::ImageRgb8(src);
    }

    let r = radius as i64;
    let blurred = RgbImage::from_fn(width, height, |x, y| {
        let mut sum = [0u32; 3];
        let mut count = 0u32;
        for dy in -r..=r {
            for dx in -r..=r {
                let sx = (x as i64 + dx).clamp(0, width as i64 - 1) as u32;
                let sy = (y as i64 + dy).clamp(0, height as i64 - 1) as u32;
                let p = src.get_pixel(sx, sy);
                for c in 0..3 {
                    sum[c] += u32::from(p[c]);
                }
                count += 1;
            }
        }
        Rgb([
            (sum[0] / count) as u8,
            (sum[1] / count) as u8,
            (sum[2] / count) as u8,
        ])
    });
    DynamicImage::ImageRgb8(blurred)
}

/// Scene that is sharp on the left half in one frame and on the right half in the other.
///
/// Returns `(left_sharp, right_sharp)`.
pub fn split_focus_pair(width: u32, height: u32) -> (DynamicImage, DynamicImage) {
    let sharp = checkerboard(width, height, 2).to_rgb8();
    let soft = box_blur(&DynamicImage::ImageRgb8(sharp.clone()), 3).to_rgb8();

    let mid = width / 2;
    let left = RgbImage::from_fn(width, height, |x, y| {
        if x < mid {
            *sharp.get_pixel(x, y)
        } else {
            *soft.get_pixel(x, y)
        }
    });
    let right = RgbImage::from_fn(width, height, |x, y| {
        if x < mid {
            *soft.get_pixel(x, y)
        } else {
            *sharp.get_pixel(x, y)
        }
    });

    (DynamicImage::ImageRgb8(left), DynamicImage::ImageRgb8(right))
}
