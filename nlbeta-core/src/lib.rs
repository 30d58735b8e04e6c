//! nlbeta-core
//!
//! Series types, statistics, and the beta estimator shared across the nlbeta
//! workspace.
//!
//! - `series`: price, return, and aligned-pair value types.
//! - `timeseries`: periodic returns construction and timestamp alignment.
//! - `stats`: moments, covariance, and least-squares fitting.
//! - `estimator`: the `BetaEstimator` and directional partitioning.
//! - `rolling`: trailing-window beta series.
//! - `connector`: the `BetaConnector` trait and capability provider traits.
//!
//! Everything except `connector` is synchronous and free of shared mutable
//! state; an estimator can be shared across tasks behind an `Arc`.
#![warn(missing_docs)]

/// Connector capability traits and the primary `BetaConnector` interface.
pub mod connector;
/// Beta estimation over aligned return pairs.
pub mod estimator;
/// Trailing-window beta series.
pub mod rolling;
/// Price, return, and aligned-pair value types.
pub mod series;
/// Descriptive statistics and least-squares fitting.
pub mod stats;
/// Returns construction and alignment.
pub mod timeseries;

pub use connector::{BetaConnector, PriceRequest, PriceSeriesProvider, ReportedBetaProvider};
pub use estimator::{BetaEstimator, DirectionalSplit};
pub use rolling::{RollingSummary, rolling_beta};
pub use series::{
    AlignedReturnPair, Observation, PricePoint, PriceSeries, ReturnPoint, ReturnSeries,
};
pub use stats::LinearFit;
pub use timeseries::align::align;
pub use timeseries::returns::build_returns;

pub use nlbeta_types::*;
