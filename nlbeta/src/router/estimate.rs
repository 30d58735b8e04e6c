use chrono::{DateTime, Utc};
use nlbeta_core::{
    BetaError, BetaReport, PriceRequest, ReturnSeries, RollingBeta, align, rolling_beta,
};

use crate::BetaAnalyzer;

impl BetaAnalyzer {
    /// Estimate beta for one symbol against the first resolvable benchmark.
    ///
    /// Asset and benchmark prices are fetched concurrently over `[start, end]`.
    ///
    /// # Errors
    /// Returns the asset failure first, then the benchmark failure, then any
    /// alignment or estimation error.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "nlbeta::router", skip(self))
    )]
    pub async fn analyze(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<BetaReport, BetaError> {
        let req = PriceRequest::try_new(symbol, start, end, self.cfg.sampling)?;
        let (asset, benchmark) =
            tokio::join!(self.returns(req), self.benchmark_returns(start, end));
        let asset = asset?;
        let benchmark = benchmark?;
        self.estimator.estimate_returns(&asset, &benchmark)
    }

    /// Estimate beta for one symbol against already-resolved benchmark returns.
    ///
    /// # Errors
    /// Propagates fetch, alignment, and estimation failures.
    pub async fn analyze_with_benchmark(
        &self,
        symbol: &str,
        benchmark: &ReturnSeries,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<BetaReport, BetaError> {
        let req = PriceRequest::try_new(symbol, start, end, self.cfg.sampling)?;
        let asset = self.returns(req).await?;
        self.estimator.estimate_returns(&asset, benchmark)
    }

    /// Trailing-window beta series for one symbol.
    ///
    /// Uses the configured variance convention; the alignment only requires
    /// `window` observations, not the estimator's minimum sample.
    ///
    /// # Errors
    /// Propagates fetch and alignment failures, and `InvalidArg` for `window < 2`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "nlbeta::router", skip(self))
    )]
    pub async fn rolling(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        window: usize,
    ) -> Result<Vec<RollingBeta>, BetaError> {
        let req = PriceRequest::try_new(symbol, start, end, self.cfg.sampling)?;
        let (asset, benchmark) =
            tokio::join!(self.returns(req), self.benchmark_returns(start, end));
        let asset = asset?;
        let benchmark = benchmark?;
        let pair = align(&asset, &benchmark, window.max(2))?;
        rolling_beta(&pair, window, self.cfg.estimator.variance_convention)
    }
}
