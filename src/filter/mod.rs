//! Sharpness filtering: Laplacian of Gaussian kernels and convolution.
pub mod filtered;
pub mod kernel;

pub use filtered::FilteredPlane;
pub use kernel::{laplacian_of_gaussian, log_kernel};
