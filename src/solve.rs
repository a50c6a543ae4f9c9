//! Tail integration of the composed density and the Newton solve.

use rustfft::num_complex::Complex;

use crate::error::{AccountantError, Result};
use crate::grid::Grid;

/// Stopping tolerance on `|delta(eps) - target_delta|`.
pub const TOL_NEWTON: f64 = 1e-10;

/// Hard cap on Newton iterations. The solve converges in a handful of steps
/// on well-posed inputs; the cap turns an oscillating iterate into an error
/// instead of a hang.
const MAX_NEWTON_ITERS: usize = 200;

/// Below this magnitude the derivative carries no usable direction: the
/// privacy curve is flat on the representable domain.
const MIN_DERIVATIVE: f64 = 1e-300;

/// Evaluate `delta(eps)` and its derivative from the composed density.
///
/// The privacy curve is `delta(eps) = E[(1 - e^{eps - loss})_+]`; only grid
/// points with `x > eps` contribute. Returns
/// `dx * sum (1 - e^{eps - x_i}) Re(cfx_i)` and
/// `dx * sum (-e^{eps - x_i}) Re(cfx_i)` over that tail.
pub(crate) fn delta_and_derivative(grid: &Grid, cfx: &[Complex<f64>], eps: f64) -> (f64, f64) {
    let start = grid.lower_index(eps) + 1;
    let mut sum = 0.0;
    let mut dsum = 0.0;
    for (&x, c) in grid.x().iter().zip(cfx.iter()).skip(start) {
        let e = (eps - x).exp();
        sum += (1.0 - e) * c.re;
        dsum -= e * c.re;
    }
    (sum * grid.dx(), dsum * grid.dx())
}

/// Solve `delta(eps) = target_delta` by Newton iteration from `eps = 0`.
///
/// Returns `f64::INFINITY` when the iterate leaves `[-l, l]`, or when the
/// derivative vanishes before convergence; both mean the requested guarantee
/// is not representable on this grid and the caller must enlarge `l` and/or
/// `nx`. Failing to converge within the iteration cap is a numerical error.
///
/// Small fractional composition counts can leave oscillatory artifacts in
/// the composed density; when the target delta is comparable to the artifact
/// amplitude, the curve is locally non-monotone and the iterate may cycle,
/// which surfaces as the iteration-cap error.
pub fn solve_epsilon(grid: &Grid, cfx: &[Complex<f64>], target_delta: f64) -> Result<f64> {
    let l = grid.half_width();
    let mut eps = 0.0_f64;
    let (mut delta, mut derivative) = delta_and_derivative(grid, cfx, eps);

    for _ in 0..MAX_NEWTON_ITERS {
        if (delta - target_delta).abs() <= TOL_NEWTON {
            return Ok(eps);
        }
        if !derivative.is_finite() || derivative.abs() < MIN_DERIVATIVE {
            return Ok(f64::INFINITY);
        }
        eps -= (delta - target_delta) / derivative;
        if eps < -l || eps > l {
            return Ok(f64::INFINITY);
        }
        (delta, derivative) = delta_and_derivative(grid, cfx, eps);
    }

    Err(AccountantError::numerical(format!(
        "newton iteration did not converge within {MAX_NEWTON_ITERS} steps"
    )))
}
