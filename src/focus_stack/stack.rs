/// Focus stack accumulator
///
/// Folds images in one at a time, keeping per pixel the sharpest response
/// seen so far, the index of the image that produced it and that image's color.
use image::{DynamicImage, GenericImageView, Rgb, RgbImage, Rgba};

use super::grayscale;
use crate::config::StackConfig;
use crate::errors::{Result, StackError};
use crate::filter::{log_kernel, FilteredPlane};
use crate::plane::{Matrix, Plane, RasterPlane, Rect};

/// Source index reserved for "no image has claimed this pixel yet".
pub const NO_DATA: usize = 0;

/// Builds an all-in-focus composite and a depth map from a set of images.
#[derive(Debug, Clone)]
pub struct FocusStack {
    kernel: Matrix<f32>,

    /// Output rectangle, taken from the first image and never resized.
    bounds: Rect,

    /// Number of images applied so far.
    num_images: usize,

    /// Largest-magnitude LoG response seen at every position so far.
    max_sharpness: Matrix<f32>,

    /// Index of the image each output pixel came from, `NO_DATA` if none.
    source_index: Matrix<usize>,

    /// Output pixels, alpha is ignored.
    stacked_image: RgbImage,
}

impl FocusStack {
    /// Empty stack over `bounds` using the default filter configuration.
    pub fn new(bounds: Rect) -> Result<Self> {
        Self::with_config(bounds, &StackConfig::default())
    }

    pub fn with_config(bounds: Rect, config: &StackConfig) -> Result<Self> {
        let width = bounds.width();
        let height = bounds.height();
        if width == 0 || height == 0 || bounds.is_unbounded() {
            return Err(StackError::InvalidDimensions {
                width: width as i64,
                height: height as i64,
            });
        }
        config.validate()?;

        let kernel = log_kernel(config.sigma, config.kernel_size)?;
        let max_sharpness = Matrix::new(width as usize, height as usize)?;
        let source_index = Matrix::new(width as usize, height as usize)?;
        let stacked_image = RgbImage::new(width as u32, height as u32);

        log::debug!(
            "Created focus stack {}x{} with {}x{} kernel, sigma={}",
            width,
            height,
            kernel.width(),
            kernel.height(),
            config.sigma
        );

        Ok(Self {
            kernel,
            bounds,
            num_images: 0,
            max_sharpness,
            source_index,
            stacked_image,
        })
    }

    /// Stack sized to a decoded image.
    pub fn for_image(image: &DynamicImage, config: &StackConfig) -> Result<Self> {
        let (width, height) = (image.width(), image.height());
        let bounds = Rect::from_size(width, height).ok_or(StackError::InvalidDimensions {
            width: i64::from(width),
            height: i64::from(height),
        })?;
        Self::with_config(bounds, config)
    }

    /// Fold one image into the stack.
    ///
    /// Pixels are claimed when the image's response is at least as strong as
    /// the best so far, so later images win ties. Only the overlap of the
    /// image and the stack's rectangle is visited.
    pub fn add_image<P>(&mut self, image: &P) -> Result<()>
    where
        P: Plane<Rgba<u16>> + ?Sized,
    {
        let image_bounds = image.bounds();
        if image_bounds.width() == 0 || image_bounds.height() == 0 {
            return Err(StackError::InvalidDimensions {
                width: image_bounds.width() as i64,
                height: image_bounds.height() as i64,
            });
        }

        self.num_images += 1;
        log::debug!("Adding image {} ({:?})", self.num_images, image_bounds);

        let gray = Matrix::<u32>::from_plane(image, grayscale)?;
        let filtered = FilteredPlane::new(&self.kernel, &gray);
        let origin = image_bounds.canon();

        // Writes are clipped to the output rectangle; the image has no color outside its own.
        let Some(region) = origin.intersect(&self.bounds) else {
            log::debug!("Image {} lies outside the stack bounds", self.num_images);
            return Ok(());
        };

        let mut claimed = 0usize;
        for y in region.min_y..=region.max_y {
            for x in region.min_x..=region.max_x {
                let sharpness = filtered.at(x - origin.min_x, y - origin.min_y);

                let gx = x - self.bounds.min_x;
                let gy = y - self.bounds.min_y;
                let sharper = sharpness.abs() >= self.max_sharpness.at(gx, gy).abs();
                let no_data = self.source_index.at(gx, gy) == NO_DATA;
                if sharper || no_data {
                    self.source_index.set(gx, gy, self.num_images);
                    self.max_sharpness.set(gx, gy, sharpness);
                    self.stacked_image
                        .put_pixel(gx as u32, gy as u32, narrow(image.at(x, y)));
                    claimed += 1;
                }
            }
        }

        log::debug!("Image {} claimed {} pixels", self.num_images, claimed);
        Ok(())
    }

    /// Fold a decoded image into the stack.
    pub fn add_dynamic(&mut self, image: &DynamicImage) -> Result<()> {
        self.add_image(&RasterPlane::new(image))
    }

    pub fn num_images(&self) -> usize {
        self.num_images
    }

    /// Rectangle of the first image; every output has this size.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn kernel(&self) -> &Matrix<f32> {
        &self.kernel
    }

    pub fn max_sharpness(&self) -> &Matrix<f32> {
        &self.max_sharpness
    }

    pub fn source_index(&self) -> &Matrix<usize> {
        &self.source_index
    }

    pub fn stacked_image(&self) -> &RgbImage {
        &self.stacked_image
    }

    pub fn into_stacked_image(self) -> RgbImage {
        self.stacked_image
    }
}

/// Keep the high byte of each 16-bit channel and drop alpha.
fn narrow(pixel: Rgba<u16>) -> Rgb<u8> {
    Rgb([
        (pixel[0] >> 8) as u8,
        (pixel[1] >> 8) as u8,
        (pixel[2] >> 8) as u8,
    ])
}
