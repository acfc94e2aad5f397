//! # siren-core
//!
//! Core types, traits, and error handling for the standard-siren likelihood.
//!
//! This crate provides:
//! - The error taxonomy ([`Error`], [`DataLoadKind`])
//! - Capability traits at the seams toward external collaborators
//!   (theory provider, per-event densities, host sampler)
//! - Shared data structures ([`Requirements`])

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{DataLoadKind, Error, Result};
pub use traits::{DensityFunction, Likelihood, TheoryProvider};
pub use types::Requirements;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
