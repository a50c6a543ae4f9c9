//! Accounting parameters and validation.

use crate::error::{AccountantError, Result};

/// Parameters for the Fourier accountant.
///
/// The defaults reproduce the reference configuration: a Gaussian mechanism
/// with `sigma = 2` under Poisson subsampling with ratio `q = 0.01`, composed
/// `10^4` times, discretized on a million-point grid over `[-20, 20)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccountantParams {
    /// Target delta at which to solve for epsilon.
    pub target_delta: f64,
    /// Noise standard deviation of the Gaussian mechanism.
    pub sigma: f64,
    /// Poisson subsampling ratio, in `(0, 1]`.
    pub q: f64,
    /// Number of compositions; fractional counts are allowed.
    pub ncomp: f64,
    /// Number of points in the discretization grid; must be even.
    pub nx: usize,
    /// Half-width of the representable privacy-loss domain `[-l, l)`.
    pub l: f64,
}

impl Default for AccountantParams {
    fn default() -> Self {
        Self {
            target_delta: 1e-6,
            sigma: 2.0,
            q: 0.01,
            ncomp: 1e4,
            nx: 1_000_000,
            l: 20.0,
        }
    }
}

impl AccountantParams {
    /// Create parameters for a mechanism, keeping the default grid.
    pub fn new(target_delta: f64, sigma: f64, q: f64, ncomp: f64) -> Result<Self> {
        let params = Self {
            target_delta,
            sigma,
            q,
            ncomp,
            ..Self::default()
        };
        params.validate()?;
        Ok(params)
    }

    /// Set the target delta.
    pub fn with_target_delta(mut self, target_delta: f64) -> Self {
        self.target_delta = target_delta;
        self
    }

    /// Set the noise standard deviation.
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set the subsampling ratio.
    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    /// Set the composition count.
    pub fn with_ncomp(mut self, ncomp: f64) -> Self {
        self.ncomp = ncomp;
        self
    }

    /// Set the discretization grid (`nx` points over `[-l, l)`).
    pub fn with_grid(mut self, nx: usize, l: f64) -> Self {
        self.nx = nx;
        self.l = l;
        self
    }

    /// Validate parameters.
    pub fn validate(&self) -> Result<()> {
        if !self.target_delta.is_finite() || self.target_delta <= 0.0 || self.target_delta >= 1.0 {
            return Err(AccountantError::invalid("target_delta must be in (0, 1)"));
        }
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(AccountantError::invalid(
                "sigma must be positive and finite",
            ));
        }
        if !self.q.is_finite() || self.q <= 0.0 || self.q > 1.0 {
            return Err(AccountantError::invalid("q must be in (0, 1]"));
        }
        if !self.ncomp.is_finite() || self.ncomp <= 0.0 {
            return Err(AccountantError::invalid(
                "ncomp must be positive and finite",
            ));
        }
        if self.nx < 2 || self.nx % 2 != 0 {
            return Err(AccountantError::invalid("nx must be even and >= 2"));
        }
        if !self.l.is_finite() || self.l <= 0.0 {
            return Err(AccountantError::invalid("l must be positive and finite"));
        }
        Ok(())
    }
}
