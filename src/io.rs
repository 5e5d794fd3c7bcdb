//! File-level stacking: decode a set of images, stack them, write PNGs.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::{DynamicImage, EncodableLayout, ImageBuffer, ImageFormat, PixelWithColorType, RgbImage};
use serde::{Deserialize, Serialize};

use crate::config::StackConfig;
use crate::errors::{Result, StackError};
use crate::focus_stack::{DepthImage, FocusStack};

/// Metadata describing a finished stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackSummary {
    pub num_images: usize,
    pub width: u32,
    pub height: u32,
    /// Depth gray level per source index
    pub depth_levels: BTreeMap<usize, u16>,
}

/// Composite, depth map and summary of a stacking run.
#[derive(Debug, Clone)]
pub struct StackOutput {
    pub stacked: RgbImage,
    pub depth: DepthImage,
    pub summary: StackSummary,
}

/// Inputs in lexicographic order; the order decides who wins sharpness ties.
pub fn sort_paths<P: AsRef<Path>>(paths: &[P]) -> Vec<PathBuf> {
    let mut sorted: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();
    sorted.sort();
    sorted
}

pub fn load_image(path: &Path) -> Result<DynamicImage> {
    log::info!("Reading {}", path.display());
    image::open(path).map_err(|e| match e {
        image::ImageError::IoError(io) => StackError::io(path, io),
        other => StackError::image(path, other),
    })
}

/// Stack already-decoded images in the given order.
pub fn stack_images(images: &[DynamicImage], config: &StackConfig) -> Result<StackOutput> {
    let first = images.first().ok_or(StackError::NoImages)?;

    log::info!("Setting up stack");
    let mut stack = FocusStack::for_image(first, config)?;

    for (idx, img) in images.iter().enumerate() {
        log::info!("Processing {}", idx);
        stack.add_dynamic(img)?;
    }

    finish(stack)
}

/// Sort `paths`, decode every image and stack them.
///
/// All images are decoded before stacking starts so a bad file fails the run early.
pub fn stack_files<P: AsRef<Path>>(paths: &[P], config: &StackConfig) -> Result<StackOutput> {
    if paths.is_empty() {
        return Err(StackError::NoImages);
    }

    let images = sort_paths(paths)
        .iter()
        .map(|path| load_image(path))
        .collect::<Result<Vec<_>>>()?;

    stack_images(&images, config)
}

fn finish(stack: FocusStack) -> Result<StackOutput> {
    let lut = stack.ordered_depths().ok_or(StackError::NoImages)?;
    let depth = stack.depth_map(&lut)?;
    let (width, height) = stack.stacked_image().dimensions();

    let summary = StackSummary {
        num_images: stack.num_images(),
        width,
        height,
        depth_levels: lut.iter().collect(),
    };

    Ok(StackOutput {
        stacked: stack.into_stacked_image(),
        depth,
        summary,
    })
}

/// Create (truncate) an output file up front so unwritable paths fail before any work.
pub fn create_output(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| StackError::io(path, e))
}

/// Encode `image` as PNG into an already-open file.
pub fn write_png<P>(image: &ImageBuffer<P, Vec<P::Subpixel>>, file: File, path: &Path) -> Result<()>
where
    P: PixelWithColorType,
    [P::Subpixel]: EncodableLayout,
{
    let mut writer = BufWriter::new(file);
    image
        .write_to(&mut writer, ImageFormat::Png)
        .map_err(|e| StackError::image(path, e))
}

/// Encode `image` as PNG at `path`.
pub fn save_png<P>(image: &ImageBuffer<P, Vec<P::Subpixel>>, path: &Path) -> Result<()>
where
    P: PixelWithColorType,
    [P::Subpixel]: EncodableLayout,
{
    write_png(image, create_output(path)?, path)
}
