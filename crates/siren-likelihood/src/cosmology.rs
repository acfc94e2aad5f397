//! Reference theory provider: spatially flat ΛCDM background.
//!
//! Production runs get angular-diameter distances from an external theory
//! code; this provider exists so hosts and tests can produce realistic
//! predictions without one.

use siren_core::{Error, Result, TheoryProvider};
use siren_prob::quadrature::integrate;

/// Speed of light in km/s.
pub const SPEED_OF_LIGHT_KM_S: f64 = 299_792.458;

/// Span of one quadrature panel in `ln(1+z)`.
///
/// The panel count grows with `ln(1+z)`, so it stays bounded (at most a few
/// thousand) for every finite redshift.
const PANEL_WIDTH: f64 = 0.5;

/// Flat ΛCDM cosmology (radiation neglected).
///
/// `E(z) = sqrt(Ωm (1+z)^3 + 1 - Ωm)`, `D_C(z) = (c/H0) ∫₀ᶻ dz'/E(z')`,
/// `D_A = D_C / (1+z)`, `D_L = (1+z) D_C`. Distances in Mpc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatLambdaCdm {
    h0: f64,
    omega_m: f64,
}

impl FlatLambdaCdm {
    /// `h0` in km/s/Mpc (> 0), `omega_m` in `[0, 1]`.
    pub fn new(h0: f64, omega_m: f64) -> Result<Self> {
        if !h0.is_finite() || h0 <= 0.0 {
            return Err(Error::Validation(format!("H0 must be finite and > 0, got {h0}")));
        }
        if !omega_m.is_finite() || !(0.0..=1.0).contains(&omega_m) {
            return Err(Error::Validation(format!("Omega_m must lie in [0, 1], got {omega_m}")));
        }
        Ok(Self { h0, omega_m })
    }

    /// Hubble constant (km/s/Mpc).
    pub fn h0(&self) -> f64 {
        self.h0
    }

    /// Matter density parameter.
    pub fn omega_m(&self) -> f64 {
        self.omega_m
    }

    /// Hubble distance `c / H0` (Mpc).
    pub fn hubble_distance(&self) -> f64 {
        SPEED_OF_LIGHT_KM_S / self.h0
    }

    /// Dimensionless expansion rate `E(z) = H(z)/H0`.
    pub fn efunc(&self, z: f64) -> f64 {
        self.efunc_at_scale(1.0 + z)
    }

    /// `E` as a function of `a = 1+z`.
    fn efunc_at_scale(&self, a: f64) -> f64 {
        (self.omega_m * a * a * a + 1.0 - self.omega_m).sqrt()
    }

    /// Line-of-sight comoving distance (Mpc). Zero for `z <= 0`.
    pub fn comoving_distance(&self, z: f64) -> f64 {
        if !z.is_finite() {
            return f64::NAN;
        }
        if z <= 0.0 {
            return 0.0;
        }
        // Integrate in u = ln(1+z), where dz = (1+z) du and the integrand is smooth.
        let u_max = z.ln_1p();
        let n_panels = (u_max / PANEL_WIDTH).ceil().max(1.0) as usize;
        let step = u_max / n_panels as f64;
        let integrand = |u: f64| {
            let a = u.exp();
            a / self.efunc_at_scale(a)
        };
        let total: f64 = (0..n_panels)
            .map(|k| {
                let u = k as f64 * step;
                integrate(&integrand, u, u + step)
            })
            .sum();
        self.hubble_distance() * total
    }

    /// Angular-diameter distance (Mpc).
    pub fn angular_diameter_distance(&self, z: f64) -> f64 {
        self.comoving_distance(z) / (1.0 + z)
    }

    /// Luminosity distance (Mpc).
    pub fn luminosity_distance(&self, z: f64) -> f64 {
        self.comoving_distance(z) * (1.0 + z)
    }
}

impl TheoryProvider for FlatLambdaCdm {
    fn angular_diameter_distance(&self, z: f64) -> f64 {
        FlatLambdaCdm::angular_diameter_distance(self, z)
    }
}
