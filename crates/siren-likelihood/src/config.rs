//! Likelihood configuration.
//!
//! The configuration is an explicit record validated at construction time:
//! a config that loads successfully is complete, so nothing downstream has to
//! re-check field presence or the comparison mode.

use serde::Deserialize;
use siren_core::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How predicted distances are compared with the observed events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum InterpolationMethod {
    /// Chi-square of Gaussian residuals against `observed_distance ± distance_sigma`.
    #[default]
    Gaussian,
    /// Sum of log per-event densities at the predicted distance.
    Kde,
}

impl InterpolationMethod {
    /// Canonical lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            InterpolationMethod::Gaussian => "gaussian",
            InterpolationMethod::Kde => "kde",
        }
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterpolationMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gaussian" => Ok(InterpolationMethod::Gaussian),
            "kde" => Ok(InterpolationMethod::Kde),
            _ => Err(Error::Configuration(format!(
                "unknown interpolation_method '{s}' (expected 'gaussian' or 'kde')"
            ))),
        }
    }
}

impl TryFrom<String> for InterpolationMethod {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// Settings that locate the event catalog and select the comparison mode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LikelihoodConfig {
    /// Detector network name (first file-name component).
    pub gw_network: String,
    /// Fiducial cosmology used to simulate the catalog (second component).
    pub fiducial_cosmology: String,
    /// Auxiliary (electromagnetic counterpart) dataset name (third component).
    pub grb_dataset: String,
    /// Directory holding the catalog files.
    pub data_directory: PathBuf,
    /// Use the peculiar-velocity-corrected densities in KDE mode.
    #[serde(default)]
    pub vp_correction: bool,
    /// Comparison mode.
    #[serde(default)]
    pub interpolation_method: InterpolationMethod,
}

impl LikelihoodConfig {
    /// Create a validated config with `vp_correction = false` and Gaussian comparison.
    pub fn new(
        gw_network: impl Into<String>,
        fiducial_cosmology: impl Into<String>,
        grb_dataset: impl Into<String>,
        data_directory: impl Into<PathBuf>,
    ) -> Result<Self> {
        let cfg = Self {
            gw_network: gw_network.into(),
            fiducial_cosmology: fiducial_cosmology.into(),
            grb_dataset: grb_dataset.into(),
            data_directory: data_directory.into(),
            vp_correction: false,
            interpolation_method: InterpolationMethod::default(),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Select the velocity-corrected or uncorrected density slot.
    pub fn with_vp_correction(mut self, vp_correction: bool) -> Self {
        self.vp_correction = vp_correction;
        self
    }

    /// Select the comparison mode.
    pub fn with_interpolation_method(mut self, method: InterpolationMethod) -> Self {
        self.interpolation_method = method;
        self
    }

    /// Check that every identifier and the data directory are non-empty.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("gw_network", &self.gw_network),
            ("fiducial_cosmology", &self.fiducial_cosmology),
            ("grb_dataset", &self.grb_dataset),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Configuration(format!("{field} must be non-empty")));
            }
        }
        if self.data_directory.as_os_str().is_empty() {
            return Err(Error::Configuration("data_directory must be non-empty".into()));
        }
        Ok(())
    }

    /// Parse and validate a config from YAML (or JSON) text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_yaml_ng::from_str(text)
            .map_err(|e| Error::Configuration(format!("failed to parse likelihood config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse, and validate a config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        let cfg: Self = serde_yaml_ng::from_str(&text).map_err(|e| {
            Error::Configuration(format!(
                "failed to parse likelihood config (YAML/JSON) from {}: {e}",
                path.display()
            ))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_is_case_insensitive() {
        for s in ["gaussian", "Gaussian", "GAUSSIAN", " gaussian "] {
            assert_eq!(s.parse::<InterpolationMethod>().unwrap(), InterpolationMethod::Gaussian);
        }
        for s in ["kde", "KDE", "Kde"] {
            assert_eq!(s.parse::<InterpolationMethod>().unwrap(), InterpolationMethod::Kde);
        }
    }

    #[test]
    fn test_unknown_method_is_configuration_error() {
        let err = "spline".parse::<InterpolationMethod>().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)), "{err}");
        assert!(err.to_string().contains("spline"));
    }

    #[test]
    fn test_from_yaml_defaults() {
        let cfg = LikelihoodConfig::from_yaml_str(
            "gw_network: ET\nfiducial_cosmology: Planck18\ngrb_dataset: THESEUS\ndata_directory: /data\n",
        )
        .unwrap();
        assert_eq!(cfg.gw_network, "ET");
        assert_eq!(cfg.data_directory, PathBuf::from("/data"));
        assert!(!cfg.vp_correction);
        assert_eq!(cfg.interpolation_method, InterpolationMethod::Gaussian);
    }

    #[test]
    fn test_from_yaml_full() {
        let cfg = LikelihoodConfig::from_yaml_str(
            r#"
gw_network: ET
fiducial_cosmology: Planck18
grb_dataset: THESEUS
data_directory: /data
vp_correction: true
interpolation_method: KDE
"#,
        )
        .unwrap();
        assert!(cfg.vp_correction);
        assert_eq!(cfg.interpolation_method, InterpolationMethod::Kde);
    }

    #[test]
    fn test_from_json_text() {
        let cfg = LikelihoodConfig::from_yaml_str(
            r#"{"gw_network":"CE","fiducial_cosmology":"LCDM","grb_dataset":"GRB","data_directory":"d","interpolation_method":"gaussian"}"#,
        )
        .unwrap();
        assert_eq!(cfg.gw_network, "CE");
    }

    #[test]
    fn test_from_yaml_rejects_bad_method_and_missing_fields() {
        let bad = LikelihoodConfig::from_yaml_str(
            "gw_network: ET\nfiducial_cosmology: P\ngrb_dataset: G\ndata_directory: d\ninterpolation_method: cubic\n",
        );
        assert!(matches!(bad, Err(Error::Configuration(_))));

        let missing = LikelihoodConfig::from_yaml_str("gw_network: ET\n");
        assert!(matches!(missing, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_validate_empty_identifiers() {
        assert!(LikelihoodConfig::new("", "P", "G", "/d").is_err());
        assert!(LikelihoodConfig::new("ET", " ", "G", "/d").is_err());
        assert!(LikelihoodConfig::new("ET", "P", "G", "").is_err());
        let cfg = LikelihoodConfig::new("ET", "P", "G", "/d")
            .unwrap()
            .with_vp_correction(true)
            .with_interpolation_method(InterpolationMethod::Kde);
        assert!(cfg.vp_correction);
        assert_eq!(cfg.interpolation_method.to_string(), "kde");
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = LikelihoodConfig::from_path(Path::new("/nonexistent/siren.yaml")).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("/nonexistent/siren.yaml"));
    }
}
