//! nlbeta estimates how strongly an equity moves with its market benchmark.
//!
//! Overview
//! - Routes price requests to connectors that implement the `nlbeta_core`
//!   contracts, in registration order or per-symbol preference.
//! - Builds periodic returns (daily, weekly, or monthly end-of-period samples),
//!   aligns them with the benchmark on timestamps, and runs the `BetaEstimator`.
//! - Reports the headline beta with correlation, R², alpha, standard error,
//!   volatilities, and directional (up-market / down-market) betas.
//!
//! Key behaviors and trade-offs
//! - Benchmarks: tried in configured order (`^GSPC`, then `SPY` by default);
//!   the first that yields returns is shared by every estimate of a call.
//! - Fetching: priority with fallback and a per-provider timeout; errors are
//!   aggregated when every provider fails.
//! - Batches: per-symbol failures are captured with a `FailureKind` so callers
//!   can tell "not enough history" from "data source failed"; an optional
//!   request deadline bounds the whole fan-out.
//! - Undersized samples fail closed; directional betas below the subset
//!   minimum are reported as unavailable, never as zero.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use nlbeta::{BetaAnalyzer, EstimatorConfig, SamplingMode};
//!
//! let analyzer = BetaAnalyzer::builder()
//!     .with_connector(Arc::new(nlbeta_mock::MockConnector::new()))
//!     .sampling(SamplingMode::Monthly)
//!     .estimator(EstimatorConfig::default().with_max_observations(60))
//!     .build()?;
//!
//! let report = analyzer.analyze("AAPL", start, end).await?;
//! println!("beta {:.2} vs {}", report.beta, report.benchmark);
//!
//! let batch = analyzer
//!     .batch()
//!     .symbols(&["AAPL", "MSFT", "KO"])?
//!     .period(start, end)
//!     .run()
//!     .await?;
//! for f in &batch.failures {
//!     eprintln!("{}: {:?} ({})", f.symbol, f.kind, f.error);
//! }
//! ```
//!
//! See `nlbeta/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{BetaAnalyzer, BetaAnalyzerBuilder};
pub use router::batch::BatchBuilder;
pub use router::util::{collapse_errors, join_with_deadline};

// Re-export core types for convenience
pub use nlbeta_core::{
    AlignedReturnPair, AnalyzerConfig, BatchReport, BetaConnector, BetaError, BetaEstimator,
    BetaMethod, BetaReport, Capability, DEFAULT_BENCHMARKS, DEFAULT_MIN_SAMPLE_SIZE,
    DEFAULT_MIN_SUBSET_SIZE, DirectionalBeta, DirectionalSplit, Estimate, EstimatorConfig,
    FailureKind, MatchGrade, Observation, PricePoint, PriceRequest, PriceSeries,
    PriceSeriesProvider, ReportedBetaProvider, ReturnPoint, ReturnSeries, RollingBeta,
    RollingSummary, SamplingMode, SymbolFailure, Unavailable, VarianceConvention,
    VendorComparison, VerificationReport, VerificationSummary, align, build_returns,
    rolling_beta,
};
