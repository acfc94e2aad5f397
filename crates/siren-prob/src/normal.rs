//! Normal distribution utilities.

use siren_core::{Error, Result};

/// Natural log of `sqrt(2π)`.
///
/// `ln(sqrt(2π)) = 0.5*ln(2π)` (precomputed to keep this crate const-friendly).
const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_7;

fn check_sigma(sigma: f64) -> Result<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(Error::Validation(format!("sigma must be finite and > 0, got {}", sigma)));
    }
    Ok(())
}

/// Log-PDF of a Normal distribution `N(mu, sigma)` at `x`.
///
/// `log p(x) = -0.5 * ((x-mu)/sigma)^2 - ln(sigma) - ln(sqrt(2π))`
pub fn logpdf(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    check_sigma(sigma)?;
    let z = (x - mu) / sigma;
    Ok(-0.5 * z * z - sigma.ln() - LN_SQRT_2PI)
}

/// PDF of a Normal distribution `N(mu, sigma)` at `x`.
pub fn pdf(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    Ok(logpdf(x, mu, sigma)?.exp())
}

/// Pull `(x - mu) / sigma`.
pub fn pull(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    check_sigma(sigma)?;
    Ok((x - mu) / sigma)
}

/// Chi-square contribution `((x - mu) / sigma)^2` of one measurement.
///
/// This is the normalization-free part of `-2 log p`; constant terms are dropped
/// so that a perfect prediction contributes exactly zero.
pub fn chi2_term(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    let z = pull(x, mu, sigma)?;
    Ok(z * z)
}
