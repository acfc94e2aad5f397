//! Probability building blocks for the siren likelihood.
//!
//! This crate hosts the small amount of probability math shared by the
//! likelihood modes and the density functions:
//! - the standard-normal log-density
//! - Normal distribution terms (logpdf, pull, chi-square contribution)
//! - a streaming, numerically-stable logsumexp
//! - fixed-order Gauss-Legendre quadrature

pub mod math;
pub mod normal;
pub mod quadrature;
