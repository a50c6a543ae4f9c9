//! Analytic privacy loss densities for the subsampled Gaussian mechanism.
//!
//! Both adjacency relations use a closed form: the privacy loss at a grid
//! point `x` is mapped back to noise space (`Linvx`), and the density follows
//! from the change-of-variables formula `density = ALinvx * dLinvx`, where
//! `ALinvx` is a two-component Gaussian mixture weight (mass `1 - q` centered
//! at 0, mass `q` centered at 1, both with standard deviation `sigma`).

use statrs::distribution::{Continuous, Normal};

use crate::error::{AccountantError, Result};
use crate::grid::Grid;

/// Neighboring relation used for the privacy analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeighboringRelation {
    /// Add or remove a single record (unbounded DP).
    AddOrRemoveOne,
    /// Replace a single record (bounded DP).
    ReplaceOne,
}

/// Gaussian mixture weighting the inverse-mapped loss.
struct MixtureWeight {
    center_zero: Normal,
    center_one: Normal,
    q: f64,
}

impl MixtureWeight {
    fn new(sigma: f64, q: f64) -> Result<Self> {
        let invalid = || AccountantError::invalid("sigma must be positive and finite");
        Ok(Self {
            center_zero: Normal::new(0.0, sigma).map_err(|_| invalid())?,
            center_one: Normal::new(1.0, sigma).map_err(|_| invalid())?,
            q,
        })
    }

    fn eval(&self, v: f64) -> f64 {
        (1.0 - self.q) * self.center_zero.pdf(v) + self.q * self.center_one.pdf(v)
    }
}

/// Evaluate the privacy loss density on `grid` for the requested relation.
///
/// The returned array is aligned to the grid; callers must flip it (see
/// [`crate::grid::flip_halves`]) before the forward transform.
pub fn privacy_loss_density(
    grid: &Grid,
    sigma: f64,
    q: f64,
    relation: NeighboringRelation,
) -> Result<Vec<f64>> {
    match relation {
        NeighboringRelation::AddOrRemoveOne => density_remove_add(grid, sigma, q),
        NeighboringRelation::ReplaceOne => density_substitution(grid, sigma, q),
    }
}

/// Remove/add relation. The inverse loss map is undefined at or below
/// `ln(1 - q)`; the density is zero there.
fn density_remove_add(grid: &Grid, sigma: f64, q: f64) -> Result<Vec<f64>> {
    let weight = MixtureWeight::new(sigma, q)?;
    let variance = sigma * sigma;
    let boundary = grid.lower_index((1.0 - q).ln());

    let mut fx = vec![0.0_f64; grid.len()];
    for (i, &x) in grid.x().iter().enumerate().skip(boundary + 1) {
        let ey = x.exp();
        let shifted = ey - (1.0 - q);
        if shifted <= 0.0 {
            // ln(1 - q) landed exactly on a grid point; the loss is not
            // attained there and the density stays zero.
            continue;
        }
        let linvx = variance * (shifted / q).ln() + 0.5;
        let dlinvx = variance * ey / shifted;
        fx[i] = weight.eval(linvx) * dlinvx;
    }
    Ok(fx)
}

/// Substitution relation, defined on the whole grid. The inverse loss map
/// comes from the positive root of a quadratic in `exp(Linvx / sigma^2)`.
fn density_substitution(grid: &Grid, sigma: f64, q: f64) -> Result<Vec<f64>> {
    let weight = MixtureWeight::new(sigma, q)?;
    let variance = sigma * sigma;
    let c = q * (-1.0 / (2.0 * variance)).exp();

    let mut fx = vec![0.0_f64; grid.len()];
    for (i, &x) in grid.x().iter().enumerate() {
        let ey = x.exp();
        let a = (1.0 - q) * (1.0 - ey);
        let sq = (a * a + 4.0 * c * c * ey).sqrt();
        // Floor the root so the logarithm stays defined in the far tail.
        let root = ((-a + sq) / (2.0 * c)).max(1e-16);
        let linvx = variance * root.ln();

        let nom1 = 4.0 * c * c * ey - 2.0 * (1.0 - q) * (1.0 - q) * ey * (1.0 - ey);
        let nom2 = (nom1 / (2.0 * sq) + (1.0 - q) * ey) * (sq + a);
        let dlinvx = variance * nom2 / (4.0 * c * c * ey);
        fx[i] = weight.eval(linvx) * dlinvx;
    }
    Ok(fx)
}
