//! focusstack: focus stacking for macro and product photography
//!
//! Merges photographs of one scene taken at different focus distances into a
//! single all-in-focus composite, and derives a depth map recording which
//! source image each pixel came from.
//!
//! # Features
//! - Generic [`plane::Plane`] sampling over grids, images and filters
//! - Nearest-edge boundary extension for convolution
//! - Laplacian of Gaussian sharpness filtering
//! - Per-pixel winner selection with later-image tie-breaking
//! - 16-bit depth maps ordered by stacking sequence
//!
//! # Usage
//! ```rust,no_run
//! use focusstack::{FocusStack, StackConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let frames = vec![image::open("01.png")?, image::open("02.png")?];
//!
//! let mut stack = FocusStack::for_image(&frames[0], &StackConfig::default())?;
//! for frame in &frames {
//!     stack.add_dynamic(frame)?;
//! }
//!
//! let lut = stack.ordered_depths().expect("at least one frame was added");
//! let depth = stack.depth_map(&lut)?;
//! stack.stacked_image().save("stacked.png")?;
//! depth.save("depth.png")?;
//! # Ok(())
//! # }
//! ```
pub mod config;
pub mod errors;
pub mod filter;
pub mod focus_stack;
pub mod invariant_ppt;
pub mod io;
pub mod plane;

// Testing utilities - synthetic frames for offline tests and benchmarks
pub mod testing;

// Re-exports for convenience
pub use config::StackConfig;
pub use errors::{Result, StackError};
pub use focus_stack::{DepthImage, DepthLut, FocusStack};
pub use plane::{Extender, Matrix, Plane, RasterPlane, Rect};

/// Initialize logging for the stacking pipeline
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "focusstack=info");
    }
    let _ = env_logger::try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
