//! Standard-siren distance likelihood.
//!
//! For each event the predicted luminosity distance is
//! `dL_th = (1+z)^2 · D_A(z)`, with `D_A` supplied by a [`TheoryProvider`].
//! Two comparison modes are supported:
//!
//! - Gaussian: `ln L = -0.5 Σ ((dL_th - dL_obs) / σ)^2`
//! - KDE: `ln L = Σ ln p_i(dL_th)` with the per-event densities of the catalog
//!
//! Events are always reduced in catalog order so results are bit-for-bit
//! reproducible across runs.

use crate::catalog::{CatalogLoader, EventCatalog};
use crate::config::{InterpolationMethod, LikelihoodConfig};
use siren_core::{Error, Likelihood, Requirements, Result, TheoryProvider};
use siren_prob::normal;

/// `(1+z)^2 · D_A`.
#[inline]
pub fn luminosity_distance(z: f64, angular_diameter_distance: f64) -> f64 {
    let a = 1.0 + z;
    a * a * angular_diameter_distance
}

/// Log-likelihood over a loaded event catalog.
///
/// A value of this type only exists once the catalog has been loaded and
/// validated, so it is always ready to evaluate. It holds no per-call state;
/// share it across threads behind an `Arc` for concurrent chains.
#[derive(Debug, Clone)]
pub struct LikelihoodEvaluator {
    catalog: EventCatalog,
    method: InterpolationMethod,
}

impl LikelihoodEvaluator {
    /// Load the catalog named by `config` and prepare for scoring.
    pub fn initialize(config: &LikelihoodConfig) -> Result<Self> {
        let catalog = CatalogLoader::new(config)?.load()?;
        log::info!(
            "Initialized standard-siren likelihood ({} events, {} comparison)",
            catalog.n_events(),
            config.interpolation_method
        );
        Ok(Self::from_catalog(catalog, config.interpolation_method))
    }

    /// Build from an already loaded catalog.
    pub fn from_catalog(catalog: EventCatalog, method: InterpolationMethod) -> Self {
        Self { catalog, method }
    }

    /// Underlying catalog.
    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    /// Comparison mode.
    pub fn method(&self) -> InterpolationMethod {
        self.method
    }

    /// Number of events.
    pub fn num_events(&self) -> usize {
        self.catalog.n_events()
    }

    /// Redshifts at which `D_A` must be supplied (exactly the catalog redshifts).
    pub fn required_inputs(&self) -> Requirements {
        Requirements::new(self.catalog.redshifts().to_vec())
    }

    fn predicted_distance(&self, i: usize, provider: &dyn TheoryProvider) -> Result<f64> {
        let z = self.catalog.redshifts()[i];
        let d_a = provider.angular_diameter_distance(z);
        let d_l = luminosity_distance(z, d_a);
        if !d_l.is_finite() {
            return Err(Error::NumericDomain {
                index: i,
                message: format!("predicted luminosity distance is not finite (z={z}, D_A={d_a})"),
            });
        }
        Ok(d_l)
    }

    /// Predicted luminosity distances `dL_th`, in catalog order.
    pub fn luminosity_distances(&self, provider: &dyn TheoryProvider) -> Result<Vec<f64>> {
        (0..self.num_events()).map(|i| self.predicted_distance(i, provider)).collect()
    }

    fn gaussian_term(&self, i: usize, d_l: f64) -> Result<f64> {
        let obs = self.catalog.observed_distance()[i];
        let term = normal::chi2_term(d_l, obs, self.catalog.distance_sigma()[i])
            .map_err(|e| Error::NumericDomain { index: i, message: e.to_string() })?;
        if !term.is_finite() {
            return Err(Error::NumericDomain {
                index: i,
                message: format!("chi-square term overflows (d_L={d_l}, observed {obs})"),
            });
        }
        Ok(term)
    }

    fn kde_term(&self, i: usize, d_l: f64) -> Result<f64> {
        let density = self.catalog.density(i).ok_or_else(|| {
            Error::Validation(format!("event index {i} out of range for {} events", self.num_events()))
        })?;
        let p = density.density(d_l);
        if !(p.is_finite() && p > 0.0) {
            return Err(Error::NumericDomain {
                index: i,
                message: format!("density at d_L={d_l} is {p}; its logarithm is undefined"),
            });
        }
        Ok(p.ln())
    }

    fn event_log_likelihood(&self, i: usize, provider: &dyn TheoryProvider) -> Result<f64> {
        let d_l = self.predicted_distance(i, provider)?;
        match self.method {
            InterpolationMethod::Gaussian => Ok(-0.5 * self.gaussian_term(i, d_l)?),
            InterpolationMethod::Kde => self.kde_term(i, d_l),
        }
    }

    /// Gaussian chi-square `Σ ((dL_th - dL_obs) / σ)^2`, independent of the configured mode.
    pub fn chi2(&self, provider: &dyn TheoryProvider) -> Result<f64> {
        let mut chi2 = 0.0;
        for i in 0..self.num_events() {
            let d_l = self.predicted_distance(i, provider)?;
            chi2 += self.gaussian_term(i, d_l)?;
            if !chi2.is_finite() {
                return Err(Error::NumericDomain {
                    index: i,
                    message: "accumulated chi-square overflows".into(),
                });
            }
        }
        Ok(chi2)
    }

    /// Per-event log-likelihood contributions, in catalog order.
    pub fn per_event_log_likelihood(&self, provider: &dyn TheoryProvider) -> Result<Vec<f64>> {
        (0..self.num_events()).map(|i| self.event_log_likelihood(i, provider)).collect()
    }

    /// Log-likelihood at the parameter point represented by `provider`.
    ///
    /// Fails with [`Error::NumericDomain`] naming the first offending event when
    /// a prediction is not finite or, in KDE mode, a density is not positive.
    pub fn evaluate(&self, provider: &dyn TheoryProvider) -> Result<f64> {
        match self.method {
            InterpolationMethod::Gaussian => Ok(-0.5 * self.chi2(provider)?),
            InterpolationMethod::Kde => {
                let mut log_likelihood = 0.0;
                for i in 0..self.num_events() {
                    let d_l = self.predicted_distance(i, provider)?;
                    log_likelihood += self.kde_term(i, d_l)?;
                }
                Ok(log_likelihood)
            }
        }
    }

    /// Sampler-facing score: like [`evaluate`](Self::evaluate), but an error
    /// rejects the point with `-inf` instead of propagating.
    pub fn log_likelihood_or_reject(&self, provider: &dyn TheoryProvider) -> f64 {
        match self.evaluate(provider) {
            Ok(v) => v,
            Err(e) if e.is_numeric_domain() => {
                log::debug!("rejecting parameter point: {e}");
                f64::NEG_INFINITY
            }
            Err(e) => {
                log::warn!("likelihood evaluation failed, rejecting parameter point: {e}");
                f64::NEG_INFINITY
            }
        }
    }
}

impl Likelihood for LikelihoodEvaluator {
    fn name(&self) -> &str {
        "siren_distance"
    }

    fn requirements(&self) -> Requirements {
        self.required_inputs()
    }

    fn log_likelihood(&self, provider: &dyn TheoryProvider) -> Result<f64> {
        self.evaluate(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::{ConstantDensity, GaussianDensity};
    use approx::assert_relative_eq;
    use siren_core::DensityFunction;
    use std::sync::Arc;

    fn catalog(zs: &[f64], d_obs: &[f64], sigma: &[f64]) -> EventCatalog {
        let dens = zs
            .iter()
            .zip(d_obs)
            .zip(sigma)
            .map(|((_, &d), &s)| {
                Arc::new(GaussianDensity::new(d, s).unwrap()) as Arc<dyn DensityFunction>
            })
            .collect();
        EventCatalog::new(zs.to_vec(), d_obs.to_vec(), sigma.to_vec(), dens, None, false).unwrap()
    }

    #[test]
    fn test_luminosity_distance() {
        assert_eq!(luminosity_distance(1.0, 1000.0), 4000.0);
        assert_eq!(luminosity_distance(0.0, 5.0), 5.0);
    }

    #[test]
    fn test_gaussian_single_event_k_sigma() {
        // D_A = 400 at z = 0.25 -> dL_th = 625; observed 615 +/- 4 -> k = 2.5.
        let cat = catalog(&[0.25], &[615.0], &[4.0]);
        let like = LikelihoodEvaluator::from_catalog(cat, InterpolationMethod::Gaussian);
        let ll = like.evaluate(&|_z: f64| 400.0).unwrap();
        assert_relative_eq!(ll, -0.5 * 2.5 * 2.5, epsilon = 1e-12);
        assert_relative_eq!(like.chi2(&|_z: f64| 400.0).unwrap(), 6.25, epsilon = 1e-12);
    }

    #[test]
    fn test_kde_with_gaussian_densities_matches_normal_logpdf() {
        let cat = catalog(&[0.1, 0.2], &[450.0, 960.0], &[30.0, 50.0]);
        let like = LikelihoodEvaluator::from_catalog(cat, InterpolationMethod::Kde);
        let provider = |z: f64| 4000.0 * z;
        let d0 = luminosity_distance(0.1, 400.0);
        let d1 = luminosity_distance(0.2, 800.0);
        let expected = siren_prob::normal::logpdf(d0, 450.0, 30.0).unwrap()
            + siren_prob::normal::logpdf(d1, 960.0, 50.0).unwrap();
        assert_relative_eq!(like.evaluate(&provider).unwrap(), expected, epsilon = 1e-10);
    }

    #[test]
    fn test_non_finite_prediction_is_numeric_domain() {
        let cat = catalog(&[0.1, 0.2], &[450.0, 960.0], &[30.0, 50.0]);
        let like = LikelihoodEvaluator::from_catalog(cat, InterpolationMethod::Gaussian);
        let provider = |z: f64| if z > 0.15 { f64::NAN } else { 400.0 };
        let err = like.evaluate(&provider).unwrap_err();
        assert_eq!(err.event_index(), Some(1));
        assert_eq!(like.log_likelihood_or_reject(&provider), f64::NEG_INFINITY);
    }

    #[test]
    fn test_overflowing_chi2_is_numeric_domain() {
        // Finite prediction, but ((dL - obs) / σ)^2 exceeds f64::MAX.
        let cat = catalog(&[0.5], &[1000.0], &[1e-10]);
        let like = LikelihoodEvaluator::from_catalog(cat, InterpolationMethod::Gaussian);
        let provider = |_z: f64| 1e160;
        let err = like.evaluate(&provider).unwrap_err();
        assert!(err.is_numeric_domain(), "{err}");
        assert_eq!(err.event_index(), Some(0));
        assert!(like.chi2(&provider).is_err());
        assert!(like.per_event_log_likelihood(&provider).is_err());
        assert_eq!(like.log_likelihood_or_reject(&provider), f64::NEG_INFINITY);
    }

    #[test]
    fn test_accumulated_chi2_overflow_names_event() {
        // Each term is finite (~1e308), their sum is not.
        let cat = catalog(&[0.1, 0.2, 0.3], &[0.0, 0.0, 0.0], &[1.0, 1.0, 1.0]);
        let like = LikelihoodEvaluator::from_catalog(cat, InterpolationMethod::Gaussian);
        let provider = |z: f64| 1.0e154 / ((1.0 + z) * (1.0 + z));
        let err = like.evaluate(&provider).unwrap_err();
        assert!(err.is_numeric_domain(), "{err}");
        assert_eq!(err.event_index(), Some(1));
    }

    #[test]
    fn test_per_event_sums_to_total() {
        let cat = catalog(&[0.1, 0.2, 0.3], &[450.0, 960.0, 1500.0], &[30.0, 50.0, 90.0]);
        for method in [InterpolationMethod::Gaussian, InterpolationMethod::Kde] {
            let like = LikelihoodEvaluator::from_catalog(cat.clone(), method);
            let provider = |z: f64| 3900.0 * z;
            let parts = like.per_event_log_likelihood(&provider).unwrap();
            assert_eq!(parts.len(), 3);
            let total: f64 = parts.iter().sum();
            assert_relative_eq!(total, like.evaluate(&provider).unwrap(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_kde_zero_density_reports_index() {
        let dens: Vec<Arc<dyn DensityFunction>> = vec![
            Arc::new(ConstantDensity::new(1.0).unwrap()),
            Arc::new(ConstantDensity::new(1.0).unwrap()),
            Arc::new(ConstantDensity::new(0.0).unwrap()),
        ];
        let cat = EventCatalog::new(
            vec![0.1, 0.2, 0.3],
            vec![450.0, 960.0, 1500.0],
            vec![30.0, 50.0, 90.0],
            dens,
            None,
            false,
        )
        .unwrap();
        let like = LikelihoodEvaluator::from_catalog(cat, InterpolationMethod::Kde);
        let err = like.evaluate(&|z: f64| 4000.0 * z).unwrap_err();
        assert!(err.is_numeric_domain());
        assert_eq!(err.event_index(), Some(2));
    }

    #[test]
    fn test_likelihood_trait_surface() {
        let cat = catalog(&[0.3, 0.1], &[1500.0, 450.0], &[90.0, 30.0]);
        let like = LikelihoodEvaluator::from_catalog(cat, InterpolationMethod::Gaussian);
        let dyn_like: &dyn Likelihood = &like;
        assert_eq!(dyn_like.name(), "siren_distance");
        assert_eq!(dyn_like.requirements().angular_diameter_distance, vec![0.3, 0.1]);
        let provider = |z: f64| 4000.0 * z;
        assert_eq!(dyn_like.log_likelihood(&provider).unwrap(), like.evaluate(&provider).unwrap());
        assert_eq!(like.num_events(), 2);
        assert_eq!(like.method(), InterpolationMethod::Gaussian);
    }
}
