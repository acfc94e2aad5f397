//! Standard-siren event catalog: on-disk format, validation, and loading.
//!
//! A catalog file is a JSON array with five positional slots:
//!
//! ```text
//! [redshifts, density_uncorrected, observed_distance, distance_sigma, density_corrected?]
//! ```
//!
//! The fifth slot may be omitted (or `null`) when the catalog was produced
//! without a peculiar-velocity correction.

use crate::config::LikelihoodConfig;
use crate::density::{DensitySpec, build_all};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use siren_core::{DataLoadKind, DensityFunction, Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File extension of catalog files.
pub const CATALOG_EXTENSION: &str = "json";

/// Deserialized catalog file, before validation.
///
/// (De)serializes as the positional five-slot array, not as a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogFile {
    /// Slot 0: event redshifts.
    pub redshifts: Vec<f64>,
    /// Slot 1: densities fitted without peculiar-velocity correction.
    pub density_uncorrected: Vec<DensitySpec>,
    /// Slot 2: observed luminosity distances (Mpc).
    pub observed_distance: Vec<f64>,
    /// Slot 3: 1-sigma luminosity-distance uncertainties (Mpc).
    pub distance_sigma: Vec<f64>,
    /// Slot 4: densities fitted with peculiar-velocity correction.
    pub density_corrected: Option<Vec<DensitySpec>>,
}

/// Positional on-disk layout; the fifth slot may be missing.
#[derive(Deserialize)]
struct CatalogSlots(
    Vec<f64>,
    Vec<DensitySpec>,
    Vec<f64>,
    Vec<f64>,
    #[serde(default)] Option<Vec<DensitySpec>>,
);

impl Serialize for CatalogFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (
            &self.redshifts,
            &self.density_uncorrected,
            &self.observed_distance,
            &self.distance_sigma,
            &self.density_corrected,
        )
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CatalogFile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let CatalogSlots(
            redshifts,
            density_uncorrected,
            observed_distance,
            distance_sigma,
            density_corrected,
        ) = CatalogSlots::deserialize(deserializer)?;
        Ok(Self {
            redshifts,
            density_uncorrected,
            observed_distance,
            distance_sigma,
            density_corrected,
        })
    }
}

impl CatalogFile {
    /// Parse a catalog from JSON bytes.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Serialize to the positional JSON layout.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write the catalog to `path` (conversion step for catalogs produced elsewhere).
    pub fn write_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Number of events according to the redshift slot.
    pub fn n_events(&self) -> usize {
        self.redshifts.len()
    }
}

/// `<network>_<cosmology>_<dataset>.json`
pub fn catalog_file_name(network: &str, cosmology: &str, dataset: &str) -> Result<String> {
    for (what, value) in [("network", network), ("cosmology", cosmology), ("dataset", dataset)] {
        if value.is_empty() {
            return Err(Error::Configuration(format!("catalog {what} identifier must be non-empty")));
        }
    }
    Ok(format!("{network}_{cosmology}_{dataset}.{CATALOG_EXTENSION}"))
}

/// Full path of a catalog file inside `directory`.
pub fn catalog_path(
    directory: &Path,
    network: &str,
    cosmology: &str,
    dataset: &str,
) -> Result<PathBuf> {
    Ok(directory.join(catalog_file_name(network, cosmology, dataset)?))
}

/// Validated, immutable event catalog.
///
/// Index `i` refers to the same event in every sequence. The density slot used
/// for scoring is chosen once at construction.
#[derive(Debug, Clone)]
pub struct EventCatalog {
    redshifts: Vec<f64>,
    observed_distance: Vec<f64>,
    distance_sigma: Vec<f64>,
    density_uncorrected: Vec<Arc<dyn DensityFunction>>,
    density_corrected: Option<Vec<Arc<dyn DensityFunction>>>,
    vp_correction: bool,
}

impl EventCatalog {
    /// Build a catalog from in-memory sequences.
    ///
    /// Rejects empty catalogs, length mismatches, non-positive or non-finite
    /// redshifts, non-finite distances, and `distance_sigma <= 0`.
    pub fn new(
        redshifts: Vec<f64>,
        observed_distance: Vec<f64>,
        distance_sigma: Vec<f64>,
        density_uncorrected: Vec<Arc<dyn DensityFunction>>,
        density_corrected: Option<Vec<Arc<dyn DensityFunction>>>,
        vp_correction: bool,
    ) -> Result<Self> {
        let n = redshifts.len();
        if n == 0 {
            return Err(Error::Validation("event catalog must contain at least one event".into()));
        }

        let check_len = |slot: &str, len: usize| -> Result<()> {
            if len != n {
                return Err(Error::Validation(format!(
                    "{slot} length mismatch: expected {n}, got {len}"
                )));
            }
            Ok(())
        };
        check_len("observed_distance", observed_distance.len())?;
        check_len("distance_sigma", distance_sigma.len())?;
        check_len("density_uncorrected", density_uncorrected.len())?;
        if let Some(c) = &density_corrected {
            check_len("density_corrected", c.len())?;
        }
        if vp_correction && density_corrected.is_none() {
            return Err(Error::Validation(
                "velocity-corrected densities requested but absent from the catalog".into(),
            ));
        }

        for (i, &z) in redshifts.iter().enumerate() {
            if !z.is_finite() || z <= 0.0 {
                return Err(Error::Validation(format!(
                    "redshift of event {i} must be finite and > 0, got {z}"
                )));
            }
        }
        for (i, &d) in observed_distance.iter().enumerate() {
            if !d.is_finite() {
                return Err(Error::Validation(format!(
                    "observed distance of event {i} must be finite, got {d}"
                )));
            }
        }
        for (i, &s) in distance_sigma.iter().enumerate() {
            if !s.is_finite() || s <= 0.0 {
                return Err(Error::NumericDomain {
                    index: i,
                    message: format!("distance sigma must be finite and > 0, got {s}"),
                });
            }
        }

        Ok(Self {
            redshifts,
            observed_distance,
            distance_sigma,
            density_uncorrected,
            density_corrected,
            vp_correction,
        })
    }

    /// Compile and validate a deserialized catalog file.
    pub fn from_file(file: CatalogFile, vp_correction: bool) -> Result<Self> {
        let uncorrected = build_all(&file.density_uncorrected)?;
        let corrected = file.density_corrected.as_deref().map(build_all).transpose()?;
        Self::new(
            file.redshifts,
            file.observed_distance,
            file.distance_sigma,
            uncorrected,
            corrected,
            vp_correction,
        )
    }

    /// Number of events `N` (always >= 1).
    pub fn n_events(&self) -> usize {
        self.redshifts.len()
    }

    /// Event redshifts in catalog order.
    pub fn redshifts(&self) -> &[f64] {
        &self.redshifts
    }

    /// Observed luminosity distances in catalog order.
    pub fn observed_distance(&self) -> &[f64] {
        &self.observed_distance
    }

    /// Luminosity-distance uncertainties in catalog order.
    pub fn distance_sigma(&self) -> &[f64] {
        &self.distance_sigma
    }

    /// Whether the velocity-corrected densities are selected.
    pub fn vp_correction(&self) -> bool {
        self.vp_correction
    }

    /// `true` if the catalog carries velocity-corrected densities.
    pub fn has_corrected_densities(&self) -> bool {
        self.density_corrected.is_some()
    }

    /// Densities selected for scoring, in catalog order.
    pub fn densities(&self) -> &[Arc<dyn DensityFunction>] {
        match (&self.density_corrected, self.vp_correction) {
            (Some(corrected), true) => corrected,
            _ => &self.density_uncorrected,
        }
    }

    /// Selected density of event `i`, `None` past the last event.
    pub fn density(&self, i: usize) -> Option<&dyn DensityFunction> {
        self.densities().get(i).map(|d| d.as_ref())
    }
}

/// Resolves and loads the catalog named by a [`LikelihoodConfig`].
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    directory: PathBuf,
    file_name: String,
    vp_correction: bool,
}

impl CatalogLoader {
    /// Loader for the catalog described by `config`.
    pub fn new(config: &LikelihoodConfig) -> Result<Self> {
        config.validate()?;
        Self::from_parts(
            &config.data_directory,
            &config.gw_network,
            &config.fiducial_cosmology,
            &config.grb_dataset,
            config.vp_correction,
        )
    }

    /// Loader from explicit identifiers.
    pub fn from_parts(
        directory: impl Into<PathBuf>,
        network: &str,
        cosmology: &str,
        dataset: &str,
        vp_correction: bool,
    ) -> Result<Self> {
        Ok(Self {
            directory: directory.into(),
            file_name: catalog_file_name(network, cosmology, dataset)?,
            vp_correction,
        })
    }

    /// Catalog file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Directory searched for the file.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Full path of the catalog file.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    fn data_load_error(&self, kind: DataLoadKind) -> Error {
        Error::DataLoad { file: self.file_name.clone(), directory: self.directory.clone(), kind }
    }

    /// Read, parse, and validate the catalog.
    pub fn load(&self) -> Result<EventCatalog> {
        let path = self.path();
        let bytes = std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => self.data_load_error(DataLoadKind::NotFound),
            _ => self.data_load_error(DataLoadKind::Unreadable(e.to_string())),
        })?;

        let file = CatalogFile::from_json_slice(&bytes)
            .map_err(|e| self.data_load_error(DataLoadKind::Malformed(e.to_string())))?;
        let catalog = EventCatalog::from_file(file, self.vp_correction)
            .map_err(|e| self.data_load_error(DataLoadKind::Malformed(e.to_string())))?;

        log::info!("Data file {} read from {}", self.file_name, self.directory.display());
        if catalog.vp_correction() {
            log::info!("Taking peculiar velocity correction into account");
        }
        log::info!("Number of events: {}", catalog.n_events());
        Ok(catalog)
    }
}
