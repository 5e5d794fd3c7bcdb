use std::collections::BTreeMap;

use image::{ImageBuffer, Luma};
use serde::{Deserialize, Serialize};

use super::FocusStack;
use crate::errors::{Result, StackError};

/// Single-channel 16-bit depth raster.
pub type DepthImage = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Gray level assigned to the last image after the ramp is computed.
pub const LAST_IMAGE_DEPTH: u16 = 255;

/// Lookup table from source image index to depth gray level.
///
/// Brighter is nearer the front of the stack; index 0 (no data) is black.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthLut(BTreeMap<usize, u16>);

impl DepthLut {
    pub fn get(&self, index: usize) -> Option<u16> {
        self.0.get(&index).copied()
    }

    pub fn insert(&mut self, index: usize, level: u16) {
        self.0.insert(index, level);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, u16)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<(usize, u16)> for DepthLut {
    fn from_iter<T: IntoIterator<Item = (usize, u16)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FocusStack {
    /// Strict back-to-front depth levels, assuming images were added in focus order.
    ///
    /// Returns `None` before any image has been added.
    pub fn ordered_depths(&self) -> Option<DepthLut> {
        let n = self.num_images();
        if n == 0 {
            return None;
        }

        let step = f64::from(u16::MAX) / n as f64;
        let mut lut: DepthLut = (1..=n)
            .map(|i| (i, u16::MAX - (i as f64 * step).floor() as u16))
            .collect();

        lut.insert(super::stack::NO_DATA, 0);
        lut.insert(n, LAST_IMAGE_DEPTH);

        Some(lut)
    }

    /// Render the source index of every pixel through `lut`.
    pub fn depth_map(&self, lut: &DepthLut) -> Result<DepthImage> {
        let (width, height) = self.stacked_image().dimensions();
        let mut out = DepthImage::new(width, height);

        for (x, y, src) in self.source_index().iter() {
            let level = lut.get(src).ok_or(StackError::MissingDepth { index: src })?;
            out.put_pixel(x as u32, y as u32, Luma([level]));
        }

        Ok(out)
    }
}
