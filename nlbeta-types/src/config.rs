//! Configuration types shared across the estimator and the analyzer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::BetaError;

/// Default minimum number of aligned observations required for an estimate.
///
/// Two years of monthly returns.
pub const DEFAULT_MIN_SAMPLE_SIZE: usize = 24;

/// Default minimum number of observations in a directional subset.
///
/// A positive- or negative-market subset with fewer observations reports its
/// beta as unavailable. One value is used for every sampling mode.
pub const DEFAULT_MIN_SUBSET_SIZE: usize = 10;

/// Benchmark symbols tried in order when none are configured.
pub const DEFAULT_BENCHMARKS: &[&str] = &["^GSPC", "SPY"];

/// Sampling granularity used to turn prices into periodic returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SamplingMode {
    /// Every bar delivered by the provider.
    Daily,
    /// Last observation of each Monday-start week.
    Weekly,
    /// Last observation of each calendar month.
    #[default]
    Monthly,
}

impl SamplingMode {
    /// Number of sampling periods per year, used for annualization.
    #[must_use]
    pub const fn periods_per_year(self) -> u32 {
        match self {
            Self::Daily => 252,
            Self::Weekly => 52,
            Self::Monthly => 12,
        }
    }

    /// Stable lowercase label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl core::fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Denominator convention for variance and covariance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VarianceConvention {
    /// Divide by `n - 1`.
    #[default]
    Sample,
    /// Divide by `n`.
    Population,
}

impl VarianceConvention {
    /// Degrees of freedom subtracted from `n` in the denominator.
    #[must_use]
    pub const fn ddof(self) -> usize {
        match self {
            Self::Sample => 1,
            Self::Population => 0,
        }
    }
}

/// Formula used to compute the headline beta.
///
/// All variants agree to floating-point tolerance; they differ only in the
/// arithmetic path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BetaMethod {
    /// `Cov(asset, benchmark) / Var(benchmark)`.
    #[default]
    CovarianceRatio,
    /// Ordinary least squares slope of asset on benchmark (normal equations).
    RegressionSlope,
    /// `Corr(asset, benchmark) * StdDev(asset) / StdDev(benchmark)`.
    CorrelationVolatility,
}

/// Tunables for a single beta estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Minimum number of aligned observations; smaller samples are refused.
    pub min_sample_size: usize,
    /// Minimum number of observations in a directional subset.
    pub min_subset_size: usize,
    /// Denominator convention applied to every variance and covariance.
    pub variance_convention: VarianceConvention,
    /// Formula used for the headline beta.
    pub method: BetaMethod,
    /// Sampling periods per year for annualized volatility.
    ///
    /// Must match the sampling mode of the estimated pair when set. When unset,
    /// annualized figures are omitted from the report.
    pub periods_per_year: Option<u32>,
    /// Keep only the most recent `n` aligned observations before estimating.
    pub max_observations: Option<usize>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            min_sample_size: DEFAULT_MIN_SAMPLE_SIZE,
            min_subset_size: DEFAULT_MIN_SUBSET_SIZE,
            variance_convention: VarianceConvention::Sample,
            method: BetaMethod::CovarianceRatio,
            periods_per_year: None,
            max_observations: None,
        }
    }
}

impl EstimatorConfig {
    /// Set the minimum aligned sample size.
    #[must_use]
    pub const fn with_min_sample_size(mut self, n: usize) -> Self {
        self.min_sample_size = n;
        self
    }

    /// Set the minimum directional subset size.
    #[must_use]
    pub const fn with_min_subset_size(mut self, n: usize) -> Self {
        self.min_subset_size = n;
        self
    }

    /// Select the variance convention.
    #[must_use]
    pub const fn with_variance_convention(mut self, convention: VarianceConvention) -> Self {
        self.variance_convention = convention;
        self
    }

    /// Select the beta formula.
    #[must_use]
    pub const fn with_method(mut self, method: BetaMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the annualization factor explicitly.
    #[must_use]
    pub const fn with_periods_per_year(mut self, periods: u32) -> Self {
        self.periods_per_year = Some(periods);
        self
    }

    /// Set the annualization factor from a sampling mode.
    #[must_use]
    pub const fn annualized_for(mut self, sampling: SamplingMode) -> Self {
        self.periods_per_year = Some(sampling.periods_per_year());
        self
    }

    /// Keep only the most recent `n` aligned observations.
    #[must_use]
    pub const fn with_max_observations(mut self, n: usize) -> Self {
        self.max_observations = Some(n);
        self
    }

    /// Validate thresholds.
    ///
    /// # Errors
    /// Returns `InvalidArg` when a threshold is below 2, when the trailing window
    /// is smaller than the minimum sample, or when `periods_per_year` is zero.
    pub fn validate(&self) -> Result<(), BetaError> {
        if self.min_sample_size < 2 {
            return Err(BetaError::InvalidArg(format!(
                "min_sample_size must be at least 2, got {}",
                self.min_sample_size
            )));
        }
        if self.min_subset_size < 2 {
            return Err(BetaError::InvalidArg(format!(
                "min_subset_size must be at least 2, got {}",
                self.min_subset_size
            )));
        }
        if let Some(max) = self.max_observations
            && max < self.min_sample_size
        {
            return Err(BetaError::InvalidArg(format!(
                "max_observations ({max}) is below min_sample_size ({})",
                self.min_sample_size
            )));
        }
        if self.periods_per_year == Some(0) {
            return Err(BetaError::InvalidArg(
                "periods_per_year must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Global configuration for the `BetaAnalyzer` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Benchmark symbols in fallback order; the first that resolves is used.
    pub benchmarks: Vec<String>,
    /// Sampling granularity for both asset and benchmark returns.
    pub sampling: SamplingMode,
    /// Estimator tunables.
    pub estimator: EstimatorConfig,
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// Optional overall deadline for fan-out operations (batch, verify).
    pub request_timeout: Option<Duration>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            benchmarks: DEFAULT_BENCHMARKS.iter().map(|s| (*s).to_string()).collect(),
            sampling: SamplingMode::Monthly,
            estimator: EstimatorConfig::default(),
            provider_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}
