use siren_core::{DensityFunction, Error, Result};
use siren_prob::math::{OnlineLogSumExp, standard_normal_logpdf};

/// 1D Gaussian kernel density estimator (KDE) on the real line.
///
/// `p(x) = (1 / Σ w_i) Σ_i w_i · φ((x - x_i)/h) / h`
///
/// Built from simulated luminosity distances of a single event. When no
/// bandwidth is given it follows Scott's rule with the effective sample size
/// `n_eff = (Σ w)^2 / Σ w^2`:
///
/// `h = σ̂ · n_eff^(-1/5)`
///
/// where `σ̂` is the (weighted, bias-corrected) sample standard deviation.
#[derive(Debug, Clone)]
pub struct KdeDensity {
    centers: Vec<f64>,
    /// Per-kernel log prefactor: `ln(w_i) - ln(h)`.
    kernel_log_prefactor: Vec<f64>,
    log_sum_w: f64,
    bandwidth: f64,
    inv_bandwidth: f64,
}

impl KdeDensity {
    /// Construct a KDE from samples, optional non-negative weights, and an optional bandwidth.
    pub fn from_samples(
        centers: Vec<f64>,
        weights: Option<Vec<f64>>,
        bandwidth: Option<f64>,
    ) -> Result<Self> {
        if centers.is_empty() {
            return Err(Error::Validation("KdeDensity requires at least one sample".into()));
        }
        if centers.iter().any(|x| !x.is_finite()) {
            return Err(Error::Validation("KdeDensity samples must be finite".into()));
        }

        if let Some(w) = &weights {
            if w.len() != centers.len() {
                return Err(Error::Validation(format!(
                    "KdeDensity weights length mismatch: expected {}, got {}",
                    centers.len(),
                    w.len()
                )));
            }
            if w.iter().any(|x| !x.is_finite()) {
                return Err(Error::Validation("KdeDensity weights must be finite".into()));
            }
            if w.iter().any(|x| *x < 0.0) {
                return Err(Error::Validation("KdeDensity weights must be >= 0".into()));
            }
        }

        let sum_w: f64 = match &weights {
            Some(w) => w.iter().sum(),
            None => centers.len() as f64,
        };
        if !(sum_w.is_finite() && sum_w > 0.0) {
            return Err(Error::Validation(format!(
                "KdeDensity requires sum(weights) > 0, got {sum_w}"
            )));
        }

        let bandwidth = match bandwidth {
            Some(h) => h,
            None => scott_bandwidth(&centers, weights.as_deref(), sum_w)?,
        };
        if !bandwidth.is_finite() || bandwidth <= 0.0 {
            return Err(Error::Validation(format!(
                "KdeDensity bandwidth must be finite and > 0, got {bandwidth}"
            )));
        }

        let log_h = bandwidth.ln();
        let kernel_log_prefactor = (0..centers.len())
            .map(|i| {
                let w = weights.as_ref().map(|v| v[i]).unwrap_or(1.0);
                let log_w = if w > 0.0 { w.ln() } else { f64::NEG_INFINITY };
                log_w - log_h
            })
            .collect();

        Ok(Self {
            centers,
            kernel_log_prefactor,
            log_sum_w: sum_w.ln(),
            bandwidth,
            inv_bandwidth: 1.0 / bandwidth,
        })
    }

    /// Kernel bandwidth `h`.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Number of kernels.
    pub fn n_samples(&self) -> usize {
        self.centers.len()
    }

    /// `log p(x)`; `-inf` where every kernel underflows.
    pub fn log_density(&self, x: f64) -> f64 {
        if !x.is_finite() {
            return f64::NEG_INFINITY;
        }
        let mut acc = OnlineLogSumExp::new();
        for (x0, lpref) in self.centers.iter().zip(&self.kernel_log_prefactor) {
            let z = (x - x0) * self.inv_bandwidth;
            acc.push(lpref + standard_normal_logpdf(z));
        }
        acc.value() - self.log_sum_w
    }
}

impl DensityFunction for KdeDensity {
    fn density(&self, d_l: f64) -> f64 {
        self.log_density(d_l).exp()
    }
}

/// Scott's rule bandwidth for (optionally weighted) 1D samples.
fn scott_bandwidth(xs: &[f64], weights: Option<&[f64]>, sum_w: f64) -> Result<f64> {
    let w_at = |i: usize| weights.map(|w| w[i] / sum_w).unwrap_or(1.0 / xs.len() as f64);

    let mut mean = 0.0;
    let mut sum_w2 = 0.0;
    for (i, &x) in xs.iter().enumerate() {
        let w = w_at(i);
        mean += w * x;
        sum_w2 += w * w;
    }
    let mut var = 0.0;
    for (i, &x) in xs.iter().enumerate() {
        let d = x - mean;
        var += w_at(i) * d * d;
    }

    // Bias correction for normalized weights: 1 - Σ ŵ².
    let denom = 1.0 - sum_w2;
    if denom <= 0.0 || var <= 0.0 {
        return Err(Error::Validation(
            "KdeDensity cannot infer a bandwidth from samples without spread; pass one explicitly"
                .into(),
        ));
    }
    let sigma = (var / denom).sqrt();
    let n_eff = 1.0 / sum_w2;
    Ok(sigma * n_eff.powf(-0.2))
}
