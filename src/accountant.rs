//! Driver wiring the grid, density, composition and solve together.

use log::{info, warn};
use rustfft::num_complex::Complex;

use crate::compose::compose_density;
use crate::error::Result;
use crate::grid::{flip_halves, Grid};
use crate::params::AccountantParams;
use crate::pld::{privacy_loss_density, NeighboringRelation};
use crate::solve::{delta_and_derivative, solve_epsilon};

/// Exact `(epsilon, delta)` accountant for a composed subsampled Gaussian
/// mechanism.
///
/// Each query rebuilds its pipeline from the stored parameters; no state is
/// shared between invocations.
#[derive(Clone, Debug)]
pub struct FourierAccountant {
    params: AccountantParams,
}

impl FourierAccountant {
    /// Create an accountant, validating the parameters.
    pub fn new(params: AccountantParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Parameters this accountant was constructed with.
    pub fn params(&self) -> &AccountantParams {
        &self.params
    }

    fn composed_density(
        &self,
        relation: NeighboringRelation,
    ) -> Result<(Grid, Vec<Complex<f64>>)> {
        let p = &self.params;
        let grid = Grid::new(p.nx, p.l)?;
        let mut fx = privacy_loss_density(&grid, p.sigma, p.q, relation)?;
        flip_halves(&mut fx);
        let cfx = compose_density(&fx, grid.dx(), p.ncomp);
        Ok((grid, cfx))
    }

    /// Solve for the epsilon achieving `target_delta` under `relation`.
    ///
    /// Returns `f64::INFINITY` when no epsilon inside `[-l, l]` attains the
    /// target delta; enlarging `l` and/or `nx` is the caller's recovery path.
    pub fn compute_epsilon(&self, relation: NeighboringRelation) -> Result<f64> {
        let (grid, cfx) = self.composed_density(relation)?;
        let eps = solve_epsilon(&grid, &cfx, self.params.target_delta)?;
        let label = match relation {
            NeighboringRelation::AddOrRemoveOne => "unbounded",
            NeighboringRelation::ReplaceOne => "bounded",
        };
        if eps.is_finite() {
            info!(
                "{label} DP epsilon after {} compositions: {eps} (delta={})",
                self.params.ncomp, self.params.target_delta
            );
        } else {
            warn!(
                "{label} DP epsilon left the [-{l}, {l}] window (delta={}); \
                 increase l and/or nx",
                self.params.target_delta,
                l = self.params.l
            );
        }
        Ok(eps)
    }

    /// Epsilon under the add/remove-one relation (unbounded DP).
    pub fn epsilon_remove_add(&self) -> Result<f64> {
        self.compute_epsilon(NeighboringRelation::AddOrRemoveOne)
    }

    /// Epsilon under the substitute-one relation (bounded DP).
    pub fn epsilon_substitution(&self) -> Result<f64> {
        self.compute_epsilon(NeighboringRelation::ReplaceOne)
    }

    /// Evaluate the privacy curve `delta(epsilon)` at a given epsilon,
    /// without a Newton solve.
    pub fn compute_delta(&self, relation: NeighboringRelation, epsilon: f64) -> Result<f64> {
        let (grid, cfx) = self.composed_density(relation)?;
        let (delta, _) = delta_and_derivative(&grid, &cfx, epsilon);
        Ok(delta.clamp(0.0, 1.0))
    }
}
