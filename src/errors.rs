use std::path::PathBuf;

/// Errors surfaced by the stacking engine and its I/O layer.
#[derive(Debug, thiserror::Error)]
pub enum StackError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("Invalid kernel: {0}")]
    InvalidKernel(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("No depth level for source index {index}")]
    MissingDepth { index: usize },

    #[error("No images to stack")]
    NoImages,

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image error on {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl StackError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Image {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StackError>;
