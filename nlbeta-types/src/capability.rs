use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level capability labels for routing, errors, and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Historical closing prices for a single symbol.
    PriceHistory,
    /// Benchmark returns resolved through the configured fallback order.
    Benchmark,
    /// Vendor-reported beta for a single symbol.
    ReportedBeta,
    /// Beta estimation for a single symbol.
    Estimate,
    /// Beta estimation for a batch of symbols against one benchmark.
    BatchEstimate,
    /// Comparison of computed betas against vendor-reported betas.
    Verify,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceHistory => "price-history",
            Self::Benchmark => "benchmark",
            Self::ReportedBeta => "reported-beta",
            Self::Estimate => "estimate",
            Self::BatchEstimate => "batch:estimate",
            Self::Verify => "verify",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
