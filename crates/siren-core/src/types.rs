//! Common data types for the siren likelihood

use serde::{Deserialize, Serialize};

/// Quantities a likelihood needs from the theory provider.
///
/// Mirrors the declared-requirements surface a host sampler uses to schedule
/// distance computations before scoring a point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    /// Redshifts at which an angular-diameter distance must be available.
    pub angular_diameter_distance: Vec<f64>,
}

impl Requirements {
    /// Create requirements for the given redshifts.
    pub fn new(redshifts: Vec<f64>) -> Self {
        Self { angular_diameter_distance: redshifts }
    }

    /// Number of required redshifts.
    pub fn len(&self) -> usize {
        self.angular_diameter_distance.len()
    }

    /// `true` if nothing is required.
    pub fn is_empty(&self) -> bool {
        self.angular_diameter_distance.is_empty()
    }

    /// `true` if `z` is one of the required redshifts (exact match).
    pub fn contains(&self, z: f64) -> bool {
        self.angular_diameter_distance.iter().any(|&x| x == z)
    }

    /// Required redshifts, sorted ascending with exact duplicates removed.
    pub fn sorted_unique(&self) -> Vec<f64> {
        let mut zs = self.angular_diameter_distance.clone();
        zs.sort_by(f64::total_cmp);
        zs.dedup();
        zs
    }
}
