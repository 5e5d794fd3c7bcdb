use std::marker::PhantomData;
use std::ops::AddAssign;

use num_traits::{NumCast, ToPrimitive, Zero};

use crate::plane::{Extender, Matrix, Plane, Rect};

/// Convolution of a plane with a kernel.
///
/// The source is wrapped in an [`Extender`] so windows hanging off the edge
/// read replicated edge pixels. Bounds are those of the un-extended source.
pub struct FilteredPlane<'k, K, E, P> {
    kernel: &'k Matrix<K>,
    extended: Extender<P>,
    source_bounds: Rect,
    _element: PhantomData<fn() -> E>,
}

impl<'k, K: Copy, E, P: Plane<E>> FilteredPlane<'k, K, E, P> {
    pub fn new(kernel: &'k Matrix<K>, source: P) -> Self {
        let source_bounds = source.bounds();
        Self {
            kernel,
            extended: Extender::new(source),
            source_bounds,
            _element: PhantomData,
        }
    }

    pub fn kernel(&self) -> &Matrix<K> {
        self.kernel
    }
}

impl<'k, K, E, P> Plane<K> for FilteredPlane<'k, K, E, P>
where
    K: Copy + Zero + AddAssign + NumCast + ToPrimitive,
    E: ToPrimitive,
    P: Plane<E>,
{
    fn at(&self, x: i32, y: i32) -> K {
        let mid_x = ((self.kernel.width() - 1) / 2) as i32;
        let mid_y = ((self.kernel.height() - 1) / 2) as i32;

        let mut value = K::zero();
        for (kx, ky, weight) in self.kernel.iter() {
            let pixel: E = self.extended.at(x + kx - mid_x, y + ky - mid_y);
            let product = weight.to_f32().unwrap_or(0.0) * pixel.to_f32().unwrap_or(0.0);
            if let Some(product) = K::from(product) {
                value += product;
            }
        }

        value
    }

    fn bounds(&self) -> Rect {
        self.source_bounds
    }
}
