//! # siren-likelihood
//!
//! Log-likelihood of a cosmological model given a catalog of standard-siren
//! events (gravitational-wave sources with a measured luminosity distance).
//!
//! This crate provides:
//! - A positional catalog file format and a [`CatalogLoader`] that resolves
//!   `<network>_<cosmology>_<dataset>.json` inside a data directory.
//! - Per-event distance densities ([`KdeDensity`], [`GaussianDensity`],
//!   [`HistogramDensity`]) compiled from serialized [`DensitySpec`]s.
//! - A [`LikelihoodEvaluator`] with Gaussian and KDE comparison modes,
//!   implementing [`siren_core::Likelihood`] so a host sampler can score points.
//! - A reference flat ΛCDM [`FlatLambdaCdm`] theory provider.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod config;
pub mod cosmology;
pub mod density;
pub mod likelihood;

pub use catalog::{CatalogFile, CatalogLoader, EventCatalog, catalog_file_name, catalog_path};
pub use config::{InterpolationMethod, LikelihoodConfig};
pub use cosmology::FlatLambdaCdm;
pub use density::{ConstantDensity, DensitySpec, GaussianDensity, HistogramDensity, KdeDensity};
pub use likelihood::{LikelihoodEvaluator, luminosity_distance};
