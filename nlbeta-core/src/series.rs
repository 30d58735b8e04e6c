use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use nlbeta_types::{BetaError, SamplingMode};

/// A single closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Bar timestamp.
    pub ts: DateTime<Utc>,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Build a point.
    #[must_use]
    pub const fn new(ts: DateTime<Utc>, close: f64) -> Self {
        Self { ts, close }
    }

    /// A price is usable for returns when it is finite and strictly positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.close.is_finite() && self.close > 0.0
    }
}

/// Ordered closing prices for one symbol.
///
/// Invalid rows (non-finite or non-positive closes) are kept as delivered and
/// skipped when returns are built.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
    timezone: Option<Tz>,
}

impl PriceSeries {
    /// Build a series from points in ascending timestamp order.
    ///
    /// # Errors
    /// Returns `Data` if timestamps are not strictly increasing.
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, BetaError> {
        let symbol = symbol.into();
        if let Some(w) = points.windows(2).find(|w| w[0].ts >= w[1].ts) {
            return Err(BetaError::Data(format!(
                "prices for {symbol} are not strictly increasing at {}",
                w[1].ts
            )));
        }
        Ok(Self {
            symbol,
            points,
            timezone: None,
        })
    }

    /// Attach the exchange timezone used for period bucketing.
    #[must_use]
    pub const fn with_timezone(mut self, tz: Tz) -> Self {
        self.timezone = Some(tz);
        self
    }

    /// Symbol of the series.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// All points, including invalid rows.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Exchange timezone, when known.
    #[must_use]
    pub const fn timezone(&self) -> Option<Tz> {
        self.timezone
    }

    /// Number of points, including invalid rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points usable for returns.
    pub fn valid_points(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.iter().filter(|p| p.is_valid())
    }
}

/// One periodic return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReturnPoint {
    /// Bar timestamp (daily) or period end (weekly, monthly).
    pub ts: DateTime<Utc>,
    /// Simple return over the period.
    pub value: f64,
}

/// Ordered simple returns for one symbol at one sampling granularity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries {
    symbol: String,
    sampling: SamplingMode,
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    /// Build a series from precomputed returns.
    ///
    /// # Errors
    /// Returns `Data` if timestamps are not strictly increasing or a value is
    /// not finite.
    pub fn from_points(
        symbol: impl Into<String>,
        sampling: SamplingMode,
        points: Vec<ReturnPoint>,
    ) -> Result<Self, BetaError> {
        let symbol = symbol.into();
        if let Some(w) = points.windows(2).find(|w| w[0].ts >= w[1].ts) {
            return Err(BetaError::Data(format!(
                "returns for {symbol} are not strictly increasing at {}",
                w[1].ts
            )));
        }
        if let Some(p) = points.iter().find(|p| !p.value.is_finite()) {
            return Err(BetaError::Data(format!(
                "non-finite return for {symbol} at {}",
                p.ts
            )));
        }
        Ok(Self {
            symbol,
            sampling,
            points,
        })
    }

    pub(crate) const fn from_parts(
        symbol: String,
        sampling: SamplingMode,
        points: Vec<ReturnPoint>,
    ) -> Self {
        Self {
            symbol,
            sampling,
            points,
        }
    }

    /// Symbol of the series.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Sampling granularity.
    #[must_use]
    pub const fn sampling(&self) -> SamplingMode {
        self.sampling
    }

    /// Returns in ascending timestamp order.
    #[must_use]
    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    /// Number of returns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when there are no returns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Return values without timestamps.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Asset and benchmark returns sharing one timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    /// Shared timestamp.
    pub ts: DateTime<Utc>,
    /// Asset return.
    pub asset: f64,
    /// Benchmark return.
    pub benchmark: f64,
}

/// Timestamp-aligned asset and benchmark returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedReturnPair {
    asset_symbol: String,
    benchmark_symbol: String,
    sampling: SamplingMode,
    observations: Vec<Observation>,
}

impl AlignedReturnPair {
    /// Build a pair from already-aligned observations.
    ///
    /// # Errors
    /// Returns `Data` if timestamps are not strictly increasing or a value is
    /// not finite.
    pub fn from_observations(
        asset_symbol: impl Into<String>,
        benchmark_symbol: impl Into<String>,
        sampling: SamplingMode,
        observations: Vec<Observation>,
    ) -> Result<Self, BetaError> {
        if let Some(w) = observations.windows(2).find(|w| w[0].ts >= w[1].ts) {
            return Err(BetaError::Data(format!(
                "observations are not strictly increasing at {}",
                w[1].ts
            )));
        }
        if let Some(o) = observations
            .iter()
            .find(|o| !(o.asset.is_finite() && o.benchmark.is_finite()))
        {
            return Err(BetaError::Data(format!("non-finite return at {}", o.ts)));
        }
        Ok(Self::from_parts(
            asset_symbol.into(),
            benchmark_symbol.into(),
            sampling,
            observations,
        ))
    }

    pub(crate) const fn from_parts(
        asset_symbol: String,
        benchmark_symbol: String,
        sampling: SamplingMode,
        observations: Vec<Observation>,
    ) -> Self {
        Self {
            asset_symbol,
            benchmark_symbol,
            sampling,
            observations,
        }
    }

    /// Asset symbol.
    #[must_use]
    pub fn asset_symbol(&self) -> &str {
        &self.asset_symbol
    }

    /// Benchmark symbol.
    #[must_use]
    pub fn benchmark_symbol(&self) -> &str {
        &self.benchmark_symbol
    }

    /// Sampling granularity shared by both legs.
    #[must_use]
    pub const fn sampling(&self) -> SamplingMode {
        self.sampling
    }

    /// Observations in ascending timestamp order.
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// True when there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Asset returns in order.
    #[must_use]
    pub fn asset_returns(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.asset).collect()
    }

    /// Benchmark returns in order.
    #[must_use]
    pub fn benchmark_returns(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.benchmark).collect()
    }

    /// Timestamp of the first observation.
    #[must_use]
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.observations.first().map(|o| o.ts)
    }

    /// Timestamp of the last observation.
    #[must_use]
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.observations.last().map(|o| o.ts)
    }

    /// Keep only the most recent `n` observations.
    #[must_use]
    pub fn tail(&self, n: usize) -> Self {
        let skip = self.observations.len().saturating_sub(n);
        Self {
            asset_symbol: self.asset_symbol.clone(),
            benchmark_symbol: self.benchmark_symbol.clone(),
            sampling: self.sampling,
            observations: self.observations[skip..].to_vec(),
        }
    }
}
