//! Frequency-domain self-composition of a discretized density.
//!
//! Composition of independent privacy losses is convolution of their
//! densities, which is point-wise multiplication after the discrete Fourier
//! transform. Raising every frequency bin to the real power `ncomp` therefore
//! yields the density after `ncomp` independent compositions in a single
//! transform round trip.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::grid::flip_halves;

/// Compose a half-flipped density with itself `ncomp` times.
///
/// `aligned_fx` is the density after [`flip_halves`], so that the domain is
/// centered at index 0 as the periodic transform assumes. The density is
/// scaled by `dx`, transformed, each bin is raised to the power `ncomp`,
/// divided by `dx`, transformed back and flipped again, so the result is
/// aligned to the original grid.
///
/// `ncomp` may be fractional. `Complex::powf` evaluates the power in polar
/// form with the principal argument in `(-pi, pi]`; this is the branch
/// convention the crate commits to for fractional composition counts.
pub fn compose_density(aligned_fx: &[f64], dx: f64, ncomp: f64) -> Vec<Complex<f64>> {
    let nx = aligned_fx.len();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(nx);
    let ifft = planner.plan_fft_inverse(nx);

    let mut buf: Vec<Complex<f64>> = aligned_fx
        .iter()
        .map(|&v| Complex::new(v * dx, 0.0))
        .collect();
    fft.process(&mut buf);
    for v in buf.iter_mut() {
        *v = v.powf(ncomp) / dx;
    }
    ifft.process(&mut buf);

    // rustfft's inverse transform is unnormalized.
    let scale = 1.0 / nx as f64;
    for v in buf.iter_mut() {
        *v *= scale;
    }
    flip_halves(&mut buf);
    buf
}
