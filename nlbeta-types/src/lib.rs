//! nlbeta-specific error, configuration, and report value objects.
#![warn(missing_docs)]

mod capability;
mod config;
mod connector;
mod error;
mod reports;

pub use capability::Capability;
pub use config::{
    AnalyzerConfig, BetaMethod, DEFAULT_BENCHMARKS, DEFAULT_MIN_SAMPLE_SIZE,
    DEFAULT_MIN_SUBSET_SIZE, EstimatorConfig, SamplingMode, VarianceConvention,
};
pub use connector::ConnectorKey;
pub use error::{BetaError, FailureKind};
pub use reports::{
    BatchReport, BetaReport, DirectionalBeta, Estimate, MatchGrade, RollingBeta, SymbolFailure,
    Unavailable, VendorComparison, VerificationReport, VerificationSummary,
};
