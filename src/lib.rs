//! Exact differential privacy accounting via the privacy loss distribution.
//!
//! This crate computes tight `(epsilon, delta)` guarantees for a Gaussian
//! mechanism under Poisson subsampling, composed with itself many times. The
//! privacy loss distribution is evaluated analytically on a discretized grid,
//! composed in the frequency domain, and the privacy curve `delta(epsilon)`
//! is inverted with a Newton iteration.
//!
//! ```no_run
//! use fourier_accountant::{AccountantParams, FourierAccountant};
//!
//! let params = AccountantParams::default();
//! let acct = FourierAccountant::new(params).unwrap();
//! let eps = acct.epsilon_remove_add().unwrap();
//! assert!(eps.is_finite());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod accountant;
pub mod compose;
pub mod error;
pub mod grid;
pub mod params;
pub mod pld;
pub mod solve;

pub use accountant::FourierAccountant;
pub use compose::compose_density;
pub use error::{AccountantError, Result};
pub use grid::{flip_halves, Grid};
pub use params::AccountantParams;
pub use pld::{privacy_loss_density, NeighboringRelation};
pub use solve::solve_epsilon;

/// Common imports for privacy accounting.
pub mod prelude {
    pub use crate::{
        AccountantError, AccountantParams, FourierAccountant, NeighboringRelation, Result,
    };
}
