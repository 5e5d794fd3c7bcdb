/// Coordinate-addressed sampling
///
/// A [`Plane`] is anything that answers "what is the value at (x, y)" and
/// reports the rectangle it is defined over. Grids, boundary extension and
/// convolution are all planes, so they compose by wrapping one another.
pub mod extender;
pub mod matrix;
pub mod raster;

pub use extender::Extender;
pub use matrix::Matrix;
pub use raster::RasterPlane;

/// Read-only 2D sampler.
///
/// Evaluation must be deterministic and free of side effects.
pub trait Plane<T> {
    fn at(&self, x: i32, y: i32) -> T;

    fn bounds(&self) -> Rect;
}

impl<T, P: Plane<T> + ?Sized> Plane<T> for &P {
    fn at(&self, x: i32, y: i32) -> T {
        (**self).at(x, y)
    }

    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

/// Axis-aligned rectangle, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Rect {
    /// The whole `i32` plane.
    pub const UNBOUNDED: Rect = Rect {
        min_x: i32::MIN,
        min_y: i32::MIN,
        max_x: i32::MAX,
        max_y: i32::MAX,
    };

    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Rectangle covering `width x height` pixels with its top-left at the origin.
    ///
    /// Returns `None` when either side is zero or does not fit in `i32`.
    pub fn from_size(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let max_x = i32::try_from(width - 1).ok()?;
        let max_y = i32::try_from(height - 1).ok()?;
        Some(Self::new(0, 0, max_x, max_y))
    }

    /// Normalized copy with `min <= max` on each axis.
    pub fn canon(&self) -> Self {
        Self {
            min_x: self.min_x.min(self.max_x),
            min_y: self.min_y.min(self.max_y),
            max_x: self.min_x.max(self.max_x),
            max_y: self.min_y.max(self.max_y),
        }
    }

    /// Number of columns covered, zero for a non-canonical rectangle.
    pub fn width(&self) -> u64 {
        if self.max_x < self.min_x {
            0
        } else {
            (i64::from(self.max_x) - i64::from(self.min_x) + 1) as u64
        }
    }

    /// Number of rows covered, zero for a non-canonical rectangle.
    pub fn height(&self) -> u64 {
        if self.max_y < self.min_y {
            0
        } else {
            (i64::from(self.max_y) - i64::from(self.min_y) + 1) as u64
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min_x == i32::MIN
            || self.min_y == i32::MIN
            || self.max_x == i32::MAX
            || self.max_y == i32::MAX
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Overlap of both rectangles, `None` when they are disjoint.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let rect = Rect {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        };
        if rect.min_x > rect.max_x || rect.min_y > rect.max_y {
            None
        } else {
            Some(rect)
        }
    }
}
