//! Mock connectors for CI-safe tests and examples.
//!
//! - [`MockConnector`] serves deterministic synthetic prices and vendor betas.
//! - [`DynamicMockConnector`] defers every call to a test-side controller.
use async_trait::async_trait;
use nlbeta_core::connector::{BetaConnector, PriceSeriesProvider, ReportedBetaProvider};
use nlbeta_core::{BetaError, PriceRequest, PriceSeries};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};

/// Delay applied to the `TIMEOUT` symbol.
pub const TIMEOUT_DELAY: std::time::Duration = std::time::Duration::from_millis(200);

/// Symbols the static fixtures can serve prices for.
pub const FIXTURE_SYMBOLS: &[&str] = &[
    "^GSPC", "SPY", "AAPL", "MSFT", "TSLA", "KO", "NEWCO", "GAPPY",
];

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
///
/// Fixture equities are generated from a shared market factor over
/// 2019-01-02..=2024-12-31 with known betas: AAPL 1.25, MSFT 1.05, TSLA 2.1,
/// KO 0.55. `NEWCO` lists in September 2024; `GAPPY` carries NaN and zero
/// closes and has no reported beta. `FAIL` always fails and `TIMEOUT`
/// answers after [`TIMEOUT_DELAY`].
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Create the connector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_fail_or_timeout(
        symbol: &str,
        capability: &'static str,
    ) -> Result<(), BetaError> {
        match symbol {
            "FAIL" => Err(BetaError::data_unavailable(
                "nlbeta-mock",
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                tokio::time::sleep(TIMEOUT_DELAY).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl BetaConnector for MockConnector {
    fn name(&self) -> &'static str {
        "nlbeta-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_price_provider(&self) -> Option<&dyn PriceSeriesProvider> {
        Some(self as &dyn PriceSeriesProvider)
    }

    fn as_reported_beta_provider(&self) -> Option<&dyn ReportedBetaProvider> {
        Some(self as &dyn ReportedBetaProvider)
    }
}

#[async_trait]
impl PriceSeriesProvider for MockConnector {
    async fn fetch(&self, req: PriceRequest) -> Result<PriceSeries, BetaError> {
        let s = req.symbol.as_str();
        Self::maybe_fail_or_timeout(s, "price-history").await?;
        let points: Vec<_> = fixtures::prices::by_symbol(s)
            .ok_or_else(|| BetaError::not_found(format!("prices for {s}")))?
            .into_iter()
            .filter(|p| p.ts >= req.start && p.ts <= req.end)
            .collect();
        if points.is_empty() {
            return Err(BetaError::not_found(format!(
                "prices for {s} between {} and {}",
                req.start, req.end
            )));
        }
        Ok(PriceSeries::new(s, points)?.with_timezone(chrono_tz::America::New_York))
    }
}

#[async_trait]
impl ReportedBetaProvider for MockConnector {
    async fn reported_beta(&self, symbol: &str) -> Result<f64, BetaError> {
        Self::maybe_fail_or_timeout(symbol, "reported-beta").await?;
        fixtures::reported::by_symbol(symbol)
            .ok_or_else(|| BetaError::not_found(format!("reported beta for {symbol}")))
    }
}
