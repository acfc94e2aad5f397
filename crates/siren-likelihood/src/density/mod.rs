//! Per-event probability densities over luminosity distance.
//!
//! Catalogs store each event's fitted distribution as a serialized
//! [`DensitySpec`]; [`DensitySpec::build`] turns it into an opaque
//! [`DensityFunction`] that the likelihood evaluates in KDE mode.

use serde::{Deserialize, Serialize};
use siren_core::{DensityFunction, Error, Result};
use std::sync::Arc;

mod gaussian;
mod histogram;
mod kde;

pub use gaussian::GaussianDensity;
pub use histogram::HistogramDensity;
pub use kde::KdeDensity;

/// Serialized form of a per-event density.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DensitySpec {
    /// Gaussian kernel density estimate fitted to simulated distances.
    Kde {
        samples: Vec<f64>,
        /// Kernel bandwidth; Scott's rule when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bandwidth: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weights: Option<Vec<f64>>,
    },
    /// Normal density `N(mean, sigma)`.
    Gaussian { mean: f64, sigma: f64 },
    /// Piecewise-constant density, zero outside the edges.
    Histogram {
        bin_edges: Vec<f64>,
        bin_content: Vec<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pseudo_count: Option<f64>,
    },
    /// Same value everywhere.
    Constant { value: f64 },
}

impl DensitySpec {
    /// Compile into an evaluable density.
    pub fn build(&self) -> Result<Arc<dyn DensityFunction>> {
        let density: Arc<dyn DensityFunction> = match self {
            DensitySpec::Kde { samples, bandwidth, weights } => {
                Arc::new(KdeDensity::from_samples(samples.clone(), weights.clone(), *bandwidth)?)
            }
            DensitySpec::Gaussian { mean, sigma } => Arc::new(GaussianDensity::new(*mean, *sigma)?),
            DensitySpec::Histogram { bin_edges, bin_content, pseudo_count } => {
                Arc::new(HistogramDensity::from_edges_and_contents(
                    bin_edges.clone(),
                    bin_content.clone(),
                    pseudo_count.unwrap_or(0.0),
                )?)
            }
            DensitySpec::Constant { value } => Arc::new(ConstantDensity::new(*value)?),
        };
        Ok(density)
    }

    /// Short kind name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            DensitySpec::Kde { .. } => "kde",
            DensitySpec::Gaussian { .. } => "gaussian",
            DensitySpec::Histogram { .. } => "histogram",
            DensitySpec::Constant { .. } => "constant",
        }
    }
}

/// Compile a whole slot of density specs, naming the failing event on error.
pub fn build_all(specs: &[DensitySpec]) -> Result<Vec<Arc<dyn DensityFunction>>> {
    specs
        .iter()
        .enumerate()
        .map(|(i, s)| {
            s.build().map_err(|e| {
                Error::Validation(format!("event {i}: invalid {} density: {e}", s.kind()))
            })
        })
        .collect()
}

/// Density that returns the same non-negative value for every input.
///
/// Not normalizable on the real line; used to neutralize an event's contribution
/// (a value of 1 contributes `ln 1 = 0`) or as a test fixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantDensity {
    value: f64,
}

impl ConstantDensity {
    /// Create a constant density; `value` must be finite and >= 0.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::Validation(format!(
                "ConstantDensity value must be finite and >= 0, got {value}"
            )));
        }
        Ok(Self { value })
    }
}

impl DensityFunction for ConstantDensity {
    fn density(&self, _d_l: f64) -> f64 {
        self.value
    }
}
