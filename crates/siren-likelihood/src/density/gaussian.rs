use siren_core::{DensityFunction, Error, Result};
use siren_prob::math::standard_normal_logpdf;

/// Normal density `N(μ, σ)` over luminosity distance.
///
/// Useful when an upstream fit summarized the simulated distances by their
/// mean and spread instead of keeping the samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianDensity {
    mean: f64,
    sigma: f64,
    log_sigma: f64,
}

impl GaussianDensity {
    /// Create a Gaussian density; `mean` finite, `sigma` finite and > 0.
    pub fn new(mean: f64, sigma: f64) -> Result<Self> {
        if !mean.is_finite() || !sigma.is_finite() || sigma <= 0.0 {
            return Err(Error::Validation(format!(
                "GaussianDensity parameters must be finite with sigma > 0, got mean={mean}, sigma={sigma}"
            )));
        }
        Ok(Self { mean, sigma, log_sigma: sigma.ln() })
    }

    /// Mean `μ`.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Standard deviation `σ`.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl DensityFunction for GaussianDensity {
    fn density(&self, d_l: f64) -> f64 {
        let z = (d_l - self.mean) / self.sigma;
        (standard_normal_logpdf(z) - self.log_sigma).exp()
    }
}
