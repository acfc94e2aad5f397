//! Core traits for the siren likelihood
//!
//! These traits are the seams toward collaborators this workspace does not
//! implement: the theory code that predicts distances, the fitted per-event
//! densities pulled from a catalog, and the host sampler that scores points.

use crate::{Requirements, Result};
use std::fmt::Debug;

/// Source of predicted cosmological distances for one parameter point.
///
/// Implementations are expected to be synchronous and side-effect free from the
/// caller's perspective. The likelihood invokes the provider once per event per
/// evaluation and never keeps it beyond the call.
pub trait TheoryProvider: Sync {
    /// Angular-diameter distance at redshift `z` (Mpc).
    fn angular_diameter_distance(&self, z: f64) -> f64;
}

impl<F> TheoryProvider for F
where
    F: Fn(f64) -> f64 + Sync,
{
    fn angular_diameter_distance(&self, z: f64) -> f64 {
        self(z)
    }
}

/// Probability density over luminosity distance for a single event.
///
/// Contract: `density(d_l) >= 0` for every real input. Implementations do not
/// need to guard against returning zero; callers taking a logarithm handle it.
pub trait DensityFunction: Send + Sync + Debug {
    /// Density value at luminosity distance `d_l` (Mpc).
    fn density(&self, d_l: f64) -> f64;
}

/// Log-likelihood as consumed by a host sampler.
pub trait Likelihood: Send + Sync {
    /// Short, stable name used in logs.
    fn name(&self) -> &str;

    /// Quantities the theory provider must be able to supply before scoring.
    fn requirements(&self) -> Requirements;

    /// Log-likelihood at the parameter point represented by `provider`.
    fn log_likelihood(&self, provider: &dyn TheoryProvider) -> Result<f64>;
}
