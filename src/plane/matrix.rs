use num_traits::Zero;

use super::{Plane, Rect};
use crate::errors::{Result, StackError};

/// Dense row-major grid of numeric values.
///
/// Coordinates run over `[0, width) x [0, height)`. Reads and writes outside
/// that extent panic.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    values: Vec<T>,
    width: usize,
    height: usize,
}

impl<T: Copy + Zero> Matrix<T> {
    /// Zero-filled grid. Both sides must be non-zero.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let invalid = || StackError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        };
        if width == 0 || height == 0 || i32::try_from(width).is_err() || i32::try_from(height).is_err()
        {
            return Err(invalid());
        }
        let len = width.checked_mul(height).ok_or_else(invalid)?;

        crate::assert_invariant!(
            width > 0 && height > 0,
            "Grid dimensions are non-zero",
            "Matrix::new"
        );

        Ok(Self {
            values: vec![T::zero(); len],
            width,
            height,
        })
    }

    /// Project `input` into a grid through `converter`.
    ///
    /// The plane's bounds are sampled point by point and rebased so the
    /// top-left lands on `(0, 0)`. Empty and unbounded planes are rejected.
    pub fn from_plane<I, P, F>(input: &P, converter: F) -> Result<Self>
    where
        P: Plane<I> + ?Sized,
        F: Fn(I) -> T,
    {
        let raw = input.bounds();
        if raw.width() == 0 || raw.height() == 0 {
            return Err(StackError::InvalidDimensions {
                width: raw.width() as i64,
                height: raw.height() as i64,
            });
        }

        let bounds = raw.canon();
        if bounds.is_unbounded() {
            return Err(StackError::InvalidDimensions {
                width: bounds.width() as i64,
                height: bounds.height() as i64,
            });
        }

        let mut projected = Self::new(bounds.width() as usize, bounds.height() as usize)?;
        for y in 0..projected.height {
            for x in 0..projected.width {
                let value = converter(input.at(bounds.min_x + x as i32, bounds.min_y + y as i32));
                projected.values[y * projected.width + x] = value;
            }
        }

        Ok(projected)
    }
}

impl<T: Copy> Matrix<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn offset(&self, x: i32, y: i32) -> usize {
        crate::assert_invariant!(
            self.contains(x, y),
            "Grid coordinates lie inside the allocated extent",
            "grid index ({}, {}) out of bounds for {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        y as usize * self.width + x as usize
    }

    /// Value at `(x, y)`.
    ///
    /// # Panics
    /// If `(x, y)` is outside the grid.
    pub fn at(&self, x: i32, y: i32) -> T {
        self.values[self.offset(x, y)]
    }

    /// Value at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<T> {
        if self.contains(x, y) {
            Some(self.values[y as usize * self.width + x as usize])
        } else {
            None
        }
    }

    /// # Panics
    /// If `(x, y)` is outside the grid.
    pub fn set(&mut self, x: i32, y: i32, value: T) {
        let offset = self.offset(x, y);
        self.values[offset] = value;
    }

    /// Row-major traversal of `(x, y, value)`.
    ///
    /// Every call starts over from the top-left cell.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, T)> + '_ {
        let width = self.width;
        self.values
            .iter()
            .enumerate()
            .map(move |(i, v)| ((i % width) as i32, (i / width) as i32, *v))
    }
}

impl<T: Copy> Plane<T> for Matrix<T> {
    fn at(&self, x: i32, y: i32) -> T {
        Matrix::at(self, x, y)
    }

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32 - 1, self.height as i32 - 1)
    }
}
