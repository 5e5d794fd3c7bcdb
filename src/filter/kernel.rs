use std::f64::consts::PI;

use crate::errors::{Result, StackError};
use crate::plane::Matrix;

/// Laplacian of Gaussian at integer offset `(x, y)` from the kernel center.
///
/// See <https://homepages.inf.ed.ac.uk/rbf/HIPR2/log.htm>.
pub fn laplacian_of_gaussian(sigma: f64, x: i32, y: i32) -> f64 {
    let x_sq = f64::from(x) * f64::from(x);
    let y_sq = f64::from(y) * f64::from(y);
    let s_sq = sigma * sigma;

    (-1.0 / (PI * sigma.powi(4)))
        * (1.0 - (x_sq + y_sq) / (2.0 * s_sq))
        * (-(x_sq + y_sq) / (2.0 * s_sq)).exp()
}

/// Build an `n x n` Laplacian of Gaussian kernel.
///
/// Even sizes are bumped to `n + 1` so the kernel has a center pixel.
pub fn log_kernel(sigma: f64, n: usize) -> Result<Matrix<f32>> {
    if n == 0 {
        return Err(StackError::InvalidKernel("kernel size must be positive".to_string()));
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(StackError::InvalidKernel(format!(
            "sigma must be a positive finite number, got {}",
            sigma
        )));
    }

    let n = if n % 2 == 0 { n + 1 } else { n };
    let mut kernel = Matrix::<f32>::new(n, n)?;

    crate::assert_invariant!(
        kernel.width() % 2 == 1 && kernel.height() % 2 == 1,
        "Kernel dimensions are odd",
        "log_kernel"
    );

    let mid = ((n - 1) / 2) as i32;
    for i in 0..n as i32 {
        for j in 0..n as i32 {
            // Symmetric, but kernels are small enough to fill every cell.
            kernel.set(i, j, laplacian_of_gaussian(sigma, i - mid, j - mid) as f32);
        }
    }

    log::debug!("Built {}x{} LoG kernel, sigma={}", n, n, sigma);
    Ok(kernel)
}
