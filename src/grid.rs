//! Discretization grid for the privacy-loss domain.

use crate::error::{AccountantError, Result};

/// An evenly spaced grid of `nx` points `x_i = -l + i * dx` over `[-l, l)`,
/// with `dx = 2l / nx`.
///
/// Privacy-loss values outside `[-l, l]` cannot be represented on the grid;
/// a solve that reaches the boundary is a hard failure, not an approximation
/// error.
#[derive(Clone, Debug)]
pub struct Grid {
    x: Vec<f64>,
    dx: f64,
    l: f64,
}

impl Grid {
    /// Build a grid of `nx` points over `[-l, l)`.
    ///
    /// `nx` must be even so the circular alignment of the density is well
    /// defined.
    pub fn new(nx: usize, l: f64) -> Result<Self> {
        if nx < 2 || nx % 2 != 0 {
            return Err(AccountantError::invalid("nx must be even and >= 2"));
        }
        if !l.is_finite() || l <= 0.0 {
            return Err(AccountantError::invalid("l must be positive and finite"));
        }
        let dx = 2.0 * l / nx as f64;
        let x = (0..nx).map(|i| -l + i as f64 * dx).collect();
        Ok(Self { x, dx, l })
    }

    /// Grid coordinates.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Spacing between consecutive grid points.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Half-width of the domain.
    pub fn half_width(&self) -> f64 {
        self.l
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the grid has no points (never true for a constructed grid).
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Index of the last grid point at or below `threshold`, i.e.
    /// `floor(nx * (l + threshold) / 2l)`, saturated into `[0, nx]`.
    ///
    /// Integration domains above a threshold start at the following index.
    /// A threshold of negative infinity (e.g. `ln(1 - q)` at `q = 1`)
    /// saturates to 0.
    pub fn lower_index(&self, threshold: f64) -> usize {
        let nx = self.x.len();
        let t = (nx as f64 * (self.l + threshold) / (2.0 * self.l)).floor();
        if !t.is_finite() || t < 0.0 {
            0
        } else if t >= nx as f64 {
            nx
        } else {
            t as usize
        }
    }
}

/// Swap the lower and upper halves of `values`, exchanging index `i` with
/// `i + n/2`.
///
/// This centers the domain at index 0, matching the periodic ordering the
/// discrete transform assumes. The operation is its own inverse. `values`
/// must have even length.
pub fn flip_halves<T>(values: &mut [T]) {
    debug_assert!(values.len() % 2 == 0, "flip requires an even length");
    let half = values.len() / 2;
    let (lo, hi) = values.split_at_mut(half);
    lo.swap_with_slice(&mut hi[..half]);
}
