//! Time-series utilities between raw prices and the estimator.
//!
//! Modules include:
//! - `returns`: sample prices at a granularity and compute simple returns
//! - `align`: timestamp-keyed join of two return series
/// Timestamp-keyed join of asset and benchmark returns.
pub mod align;
/// End-of-period sampling and simple returns.
pub mod returns;
