//! Report value objects produced by the estimator and the analyzer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{BetaMethod, SamplingMode, VarianceConvention};
use crate::error::{BetaError, FailureKind};

/// Why a derived figure could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unavailable {
    /// The subset had fewer observations than the configured minimum.
    BelowMinimum {
        /// Configured minimum subset size.
        required: usize,
        /// Observations in the subset.
        actual: usize,
    },
    /// The benchmark was constant over the subset or window.
    ZeroVariance,
    /// An input the figure depends on is itself unavailable.
    MissingInput,
    /// The denominator of a ratio is zero.
    ZeroDenominator,
}

/// A derived figure that is either available or explicitly unavailable.
///
/// Unavailable is never encoded as a numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Estimate {
    /// The figure was computed.
    Available(f64),
    /// The figure could not be computed, with the reason.
    Unavailable(Unavailable),
}

impl Estimate {
    /// The value when available.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Available(v) => Some(*v),
            Self::Unavailable(_) => None,
        }
    }

    /// True when the figure was computed.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// Beta restricted to one side of the benchmark's sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalBeta {
    /// Observations in the subset.
    pub samples: usize,
    /// Beta over the subset.
    pub beta: Estimate,
}

/// Immutable result of one beta estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetaReport {
    /// Asset symbol.
    pub symbol: String,
    /// Benchmark symbol.
    pub benchmark: String,
    /// Sampling granularity of the underlying returns.
    pub sampling: SamplingMode,
    /// Formula used for `beta`.
    pub method: BetaMethod,
    /// Denominator convention used for every variance and covariance.
    pub variance_convention: VarianceConvention,
    /// Headline beta.
    pub beta: f64,
    /// Pearson correlation; `None` when the asset returns are constant.
    pub correlation: Option<f64>,
    /// Squared correlation; `None` when the correlation is undefined.
    pub r_squared: Option<f64>,
    /// Regression intercept (per-period alpha).
    pub alpha: f64,
    /// Standard error of the slope; `None` with fewer than three observations.
    pub standard_error: Option<f64>,
    /// Beta over observations where the benchmark rose.
    pub positive: DirectionalBeta,
    /// Beta over observations where the benchmark fell.
    pub negative: DirectionalBeta,
    /// Observations where the benchmark return was exactly zero.
    pub zero_samples: usize,
    /// `positive / negative` directional beta.
    pub beta_ratio: Estimate,
    /// Mean per-period asset return.
    pub mean_return: f64,
    /// Mean per-period benchmark return.
    pub benchmark_mean_return: f64,
    /// Per-period standard deviation of asset returns.
    pub volatility: f64,
    /// Per-period standard deviation of benchmark returns.
    pub benchmark_volatility: f64,
    /// Annualized asset volatility, when an annualization factor was supplied.
    pub annualized_volatility: Option<f64>,
    /// Annualized benchmark volatility, when an annualization factor was supplied.
    pub benchmark_annualized_volatility: Option<f64>,
    /// Mean return over volatility, per period; `None` when volatility is zero.
    pub return_to_volatility: Option<f64>,
    /// Number of aligned observations used.
    pub observations: usize,
    /// Timestamp of the first aligned observation.
    pub start: DateTime<Utc>,
    /// Timestamp of the last aligned observation.
    pub end: DateTime<Utc>,
}

/// One point of a rolling beta series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingBeta {
    /// Timestamp of the last observation in the window.
    pub end: DateTime<Utc>,
    /// Beta over the window.
    pub beta: Estimate,
}

/// Quality bucket for the distance between a computed and a reported beta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchGrade {
    /// Absolute deviation at most 0.05.
    Excellent,
    /// Absolute deviation at most 0.15.
    Good,
    /// Absolute deviation at most 0.30.
    Fair,
    /// Absolute deviation above 0.30.
    Poor,
}

impl MatchGrade {
    /// Bucket an absolute deviation.
    #[must_use]
    pub fn from_deviation(deviation: f64) -> Self {
        let d = deviation.abs();
        if d <= 0.05 {
            Self::Excellent
        } else if d <= 0.15 {
            Self::Good
        } else if d <= 0.30 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    /// True for `Excellent` and `Good`.
    #[must_use]
    pub const fn is_accurate(self) -> bool {
        matches!(self, Self::Excellent | Self::Good)
    }
}

/// Computed beta set against a vendor-reported beta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorComparison {
    /// Symbol compared.
    pub symbol: String,
    /// Beta computed by the estimator.
    pub computed: f64,
    /// Beta reported by the vendor.
    pub reported: f64,
    /// `|computed - reported|`.
    pub deviation: f64,
    /// Deviation as a percentage of the reported beta; `None` when it is zero.
    pub deviation_pct: Option<f64>,
    /// Quality bucket.
    pub grade: MatchGrade,
}

impl VendorComparison {
    /// Compare a computed beta with the vendor's figure.
    pub fn new(symbol: impl Into<String>, computed: f64, reported: f64) -> Self {
        let deviation = (computed - reported).abs();
        let deviation_pct = if reported == 0.0 {
            None
        } else {
            Some(deviation / reported.abs() * 100.0)
        };
        Self {
            symbol: symbol.into(),
            computed,
            reported,
            deviation,
            deviation_pct,
            grade: MatchGrade::from_deviation(deviation),
        }
    }
}

/// Aggregate agreement statistics over many comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationSummary {
    /// Number of comparisons.
    pub compared: usize,
    /// Count of `Excellent` grades.
    pub excellent: usize,
    /// Count of `Good` grades.
    pub good: usize,
    /// Count of `Fair` grades.
    pub fair: usize,
    /// Count of `Poor` grades.
    pub poor: usize,
    /// Mean absolute deviation.
    pub mean_deviation: f64,
    /// Median absolute deviation.
    pub median_deviation: f64,
    /// Smallest absolute deviation.
    pub min_deviation: f64,
    /// Largest absolute deviation.
    pub max_deviation: f64,
    /// Share of `Excellent` and `Good` grades, in percent.
    pub accuracy_score: f64,
}

impl VerificationSummary {
    /// Aggregate a set of comparisons; `None` when the set is empty.
    #[must_use]
    pub fn from_comparisons(comparisons: &[VendorComparison]) -> Option<Self> {
        if comparisons.is_empty() {
            return None;
        }
        let mut deviations: Vec<f64> = comparisons.iter().map(|c| c.deviation).collect();
        deviations.sort_by(f64::total_cmp);

        let n = deviations.len();
        let mid = n / 2;
        let median_deviation = if n % 2 == 0 {
            (deviations[mid - 1] + deviations[mid]) / 2.0
        } else {
            deviations[mid]
        };
        let count = |g: MatchGrade| comparisons.iter().filter(|c| c.grade == g).count();
        let excellent = count(MatchGrade::Excellent);
        let good = count(MatchGrade::Good);

        #[allow(clippy::cast_precision_loss)]
        let nf = n as f64;
        #[allow(clippy::cast_precision_loss)]
        let accuracy_score = (excellent + good) as f64 / nf * 100.0;

        Some(Self {
            compared: n,
            excellent,
            good,
            fair: count(MatchGrade::Fair),
            poor: count(MatchGrade::Poor),
            mean_deviation: deviations.iter().sum::<f64>() / nf,
            median_deviation,
            min_deviation: deviations[0],
            max_deviation: deviations[n - 1],
            accuracy_score,
        })
    }
}

/// A symbol that could not be processed, with its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolFailure {
    /// Symbol that failed.
    pub symbol: String,
    /// Operational classification of the failure.
    pub kind: FailureKind,
    /// Underlying error.
    pub error: BetaError,
}

impl SymbolFailure {
    /// Wrap an error for a symbol, deriving the classification.
    pub fn new(symbol: impl Into<String>, error: BetaError) -> Self {
        Self {
            symbol: symbol.into(),
            kind: error.kind(),
            error,
        }
    }
}

/// Outcome of a batch estimation against one shared benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Benchmark symbol that resolved.
    pub benchmark: String,
    /// Successful reports in request order.
    pub reports: Vec<BetaReport>,
    /// Per-symbol failures in request order.
    pub failures: Vec<SymbolFailure>,
}

/// Outcome of comparing computed betas with vendor-reported betas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Individual comparisons in request order.
    pub comparisons: Vec<VendorComparison>,
    /// Aggregate statistics; `None` when nothing could be compared.
    pub summary: Option<VerificationSummary>,
    /// Symbols skipped because either side was unavailable.
    pub skipped: Vec<SymbolFailure>,
}
