use image::{GenericImageView, Pixel, Primitive, Rgba};
use num_traits::ToPrimitive;

use super::{Plane, Rect};

/// Exposes a decoded image as a plane of 16-bit RGBA.
///
/// Channels of any depth are rescaled to `0..=65535`, so 8-bit input `v`
/// becomes `v * 257`. Coordinates outside the image read as transparent black.
pub struct RasterPlane<'a, I: ?Sized> {
    image: &'a I,
}

impl<I: ?Sized> Clone for RasterPlane<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: ?Sized> Copy for RasterPlane<'_, I> {}

impl<'a, I: GenericImageView + ?Sized> RasterPlane<'a, I> {
    pub fn new(image: &'a I) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &'a I {
        self.image
    }
}

/// Rescale a channel value to the 16-bit range.
pub fn expand_channel<S: Primitive>(value: S) -> u16 {
    let max = S::DEFAULT_MAX_VALUE.to_f64().unwrap_or(1.0);
    let v = value.to_f64().unwrap_or(0.0);
    if max <= 0.0 {
        return 0;
    }
    (v / max * 65535.0).round().clamp(0.0, 65535.0) as u16
}

impl<'a, I> Plane<Rgba<u16>> for RasterPlane<'a, I>
where
    I: GenericImageView + ?Sized,
{
    fn at(&self, x: i32, y: i32) -> Rgba<u16> {
        let (width, height) = self.image.dimensions();
        if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
            return Rgba([0, 0, 0, 0]);
        }
        let px = self.image.get_pixel(x as u32, y as u32).to_rgba();
        Rgba([
            expand_channel(px[0]),
            expand_channel(px[1]),
            expand_channel(px[2]),
            expand_channel(px[3]),
        ])
    }

    fn bounds(&self) -> Rect {
        let (width, height) = self.image.dimensions();
        // Inverted, so width() and height() report zero for an empty image.
        Rect::from_size(width, height).unwrap_or(Rect::new(0, 0, -1, -1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, RgbImage, Rgb};

    #[test]
    fn test_expands_eight_bit() {
        assert_eq!(expand_channel(0u8), 0);
        assert_eq!(expand_channel(1u8), 257);
        assert_eq!(expand_channel(255u8), 65535);
        assert_eq!(expand_channel(1234u16), 1234);
        assert_eq!(expand_channel(0.5f32), 32768);
    }

    #[test]
    fn test_reads_rgb_as_opaque_rgba16() {
        let img: RgbImage = ImageBuffer::from_pixel(3, 2, Rgb([10, 20, 30]));
        let plane = RasterPlane::new(&img);
        assert_eq!(plane.bounds(), Rect::new(0, 0, 2, 1));
        assert_eq!(plane.at(2, 1), Rgba([2570, 5140, 7710, 65535]));
    }

    #[test]
    fn test_outside_is_transparent_black() {
        let img: RgbImage = ImageBuffer::from_pixel(2, 2, Rgb([255, 255, 255]));
        let plane = RasterPlane::new(&img);
        assert_eq!(plane.at(2, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(plane.at(-1, 1), Rgba([0, 0, 0, 0]));
    }
}
