use std::sync::Arc;

use chrono::{DateTime, Utc};
use nlbeta_core::{BetaError, Capability, PriceRequest, PriceSeries, ReturnSeries, build_returns};

use crate::BetaAnalyzer;

impl BetaAnalyzer {
    /// Fetch closing prices for `req.symbol` from the first provider that succeeds.
    ///
    /// Behavior and trade-offs:
    /// - Providers are tried in priority order with the per-provider timeout.
    /// - `NotFound` from every provider maps to one `NotFound` for the symbol.
    ///
    /// # Errors
    /// Returns an error if no provider succeeds or none serves price history.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "nlbeta::router",
            skip(self, req),
            fields(symbol = %req.symbol),
        )
    )]
    pub async fn prices(&self, req: PriceRequest) -> Result<PriceSeries, BetaError> {
        let symbol = req.symbol.clone();
        self.fetch_single(&symbol, Capability::PriceHistory, "prices", move |c| {
            c.as_price_provider()?;
            let req = req.clone();
            Some(async move {
                match c.as_price_provider() {
                    Some(p) => p.fetch(req).await,
                    None => Err(BetaError::unsupported(Capability::PriceHistory.as_str())),
                }
            })
        })
        .await
    }

    /// Fetch prices and build returns at the configured sampling.
    ///
    /// # Errors
    /// Propagates fetch failures and `InsufficientData` from returns construction.
    pub async fn returns(&self, req: PriceRequest) -> Result<ReturnSeries, BetaError> {
        let prices = self.prices(req).await?;
        build_returns(&prices, self.cfg.sampling)
    }

    /// Resolve benchmark returns, trying configured benchmarks in order.
    ///
    /// The first benchmark whose returns can be built wins. The result is shared
    /// read-only across the estimates of a call.
    ///
    /// # Errors
    /// Returns the single failure when one benchmark is configured, otherwise
    /// `AllProvidersFailed` with one error per benchmark.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "nlbeta::router", skip(self))
    )]
    pub async fn benchmark_returns(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Arc<ReturnSeries>, BetaError> {
        let mut errors = Vec::new();
        for symbol in &self.cfg.benchmarks {
            let req = PriceRequest::try_new(symbol.as_str(), start, end, self.cfg.sampling)?;
            match self.returns(req).await {
                Ok(r) => return Ok(Arc::new(r)),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        benchmark = %symbol,
                        error = %e,
                        "benchmark unavailable; trying next"
                    );
                    errors.push(e);
                }
            }
        }
        if errors.len() == 1
            && let Some(only) = errors.pop()
        {
            return Err(only);
        }
        Err(BetaError::AllProvidersFailed(errors))
    }
}
