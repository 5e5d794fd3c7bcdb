/// Focus Stacking Module
///
/// Merges photographs of one scene taken at different focus distances:
/// 1. Project each image to grayscale
/// 2. Measure local sharpness with a Laplacian of Gaussian filter
/// 3. Keep, per pixel, the color of the image with the strongest response
/// 4. Record which image won each pixel and render that as a depth map
pub mod depth;
pub mod stack;

pub use depth::{DepthImage, DepthLut, LAST_IMAGE_DEPTH};
pub use stack::{FocusStack, NO_DATA};

use image::Rgba;

/// 8-bit luma of a 16-bit RGBA pixel.
///
/// Coefficients 19595, 38470 and 7471 sum to 65536; the shift by 24 folds the
/// 16-bit weight scale and the 16-to-8-bit reduction together. Alpha is ignored.
pub fn grayscale(pixel: Rgba<u16>) -> u32 {
    let r = u32::from(pixel[0]);
    let g = u32::from(pixel[1]);
    let b = u32::from(pixel[2]);
    (19595 * r + 38470 * g + 7471 * b + 16384) >> 24
}
