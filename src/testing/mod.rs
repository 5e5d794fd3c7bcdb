//! Testing utilities for focusstack
//!
//! Synthetic frames with known sharpness structure, for offline tests and benchmarks.

pub mod synthetic_data;

pub use synthetic_data::{
    box_blur, checkerboard, solid_frame, split_focus_pair, synthetic_frame, with_marked_pixel,
};
