use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the nlbeta workspace.
///
/// Covers insufficient history, degenerate statistics, argument validation,
/// provider-tagged failures, and an aggregate for multi-provider attempts.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BetaError {
    /// Fewer than two valid price points remained to form any return.
    #[error("insufficient data for {symbol}: {points} valid price point(s), need at least 2")]
    InsufficientData {
        /// Symbol of the series that was too short.
        symbol: String,
        /// Number of valid (sampled) price points available.
        points: usize,
    },

    /// An aligned or directional sample is smaller than the configured minimum.
    #[error("insufficient sample: required {required}, got {actual}")]
    InsufficientSample {
        /// Configured minimum number of observations.
        required: usize,
        /// Number of observations actually available.
        actual: usize,
    },

    /// Benchmark return variance is exactly zero over the window.
    #[error("benchmark return variance is zero over the window")]
    ZeroVariance,

    /// The data source could not deliver the requested series.
    #[error("{provider} data unavailable: {msg}")]
    DataUnavailable {
        /// Provider name that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A resource or symbol could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "prices for AAPL".
        what: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Issues with the returned or expected data (ordering, duplicates, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// The requested capability is not implemented by any registered connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// Capability label (e.g. "price-history").
        capability: String,
    },

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {provider}")]
    ProviderTimeout {
        /// Provider name that timed out.
        provider: String,
        /// Capability label.
        capability: String,
    },

    /// The overall request exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Capability label for which the request timed out.
        capability: String,
    },

    /// All selected providers failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<BetaError>),
}

/// Operational classification of a [`BetaError`].
///
/// Presentation layers use this to tell "not enough history" apart from
/// "the data source failed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// The symbol has too little history (or too few aligned observations).
    InsufficientHistory,
    /// The data source failed, timed out, or does not know the symbol.
    DataSource,
    /// The statistic is undefined for the window (e.g. flat benchmark).
    Computation,
    /// The caller supplied an invalid argument or malformed series.
    InvalidInput,
}

impl BetaError {
    /// Helper: build an `Unsupported` error for a capability string.
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `DataUnavailable` error with the provider name and message.
    pub fn data_unavailable(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::DataUnavailable {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(provider: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            provider: provider.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    pub fn request_timeout(capability: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: capability.into(),
        }
    }

    /// Helper: build an `InsufficientSample` error.
    #[must_use]
    pub const fn insufficient_sample(required: usize, actual: usize) -> Self {
        Self::InsufficientSample { required, actual }
    }

    /// Classify this error for user-visible reporting.
    ///
    /// Aggregates are classified as `DataSource` when every inner error is a
    /// data-source failure, and as `InsufficientHistory` when every inner error is.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InsufficientData { .. } | Self::InsufficientSample { .. } => {
                FailureKind::InsufficientHistory
            }
            Self::ZeroVariance => FailureKind::Computation,
            Self::InvalidArg(_) | Self::Data(_) => FailureKind::InvalidInput,
            Self::DataUnavailable { .. }
            | Self::NotFound { .. }
            | Self::Unsupported { .. }
            | Self::ProviderTimeout { .. }
            | Self::RequestTimeout { .. } => FailureKind::DataSource,
            Self::AllProvidersFailed(inner) => {
                if !inner.is_empty()
                    && inner
                        .iter()
                        .all(|e| e.kind() == FailureKind::InsufficientHistory)
                {
                    FailureKind::InsufficientHistory
                } else {
                    FailureKind::DataSource
                }
            }
        }
    }

    /// True when the failure stems from too little history.
    #[must_use]
    pub fn is_insufficient_history(&self) -> bool {
        self.kind() == FailureKind::InsufficientHistory
    }

    /// True when the failure stems from the data source.
    #[must_use]
    pub fn is_data_source_failure(&self) -> bool {
        self.kind() == FailureKind::DataSource
    }
}
