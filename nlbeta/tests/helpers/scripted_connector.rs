#![allow(dead_code)]
#![allow(clippy::missing_const_for_fn)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use nlbeta::{
    BetaConnector, BetaError, PriceRequest, PriceSeries, PriceSeriesProvider, ReportedBetaProvider,
};
use tokio::time::{Duration, sleep};

/// Simple in-memory connector used by integration tests.
/// Serves canned series and reported betas, optionally after a delay or with
/// a forced failure.
pub struct ScriptedConnector {
    pub name: &'static str,
    pub delay_ms: u64,
    pub prices: HashMap<String, PriceSeries>,
    pub reported: HashMap<String, f64>,
    pub fail_with: Option<BetaError>,
    pub serves_reported: bool,
    pub price_calls: Arc<AtomicUsize>,
}

impl ScriptedConnector {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            delay_ms: 0,
            prices: HashMap::new(),
            reported: HashMap::new(),
            fail_with: None,
            serves_reported: true,
            price_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_prices(mut self, series: PriceSeries) -> Self {
        self.prices.insert(series.symbol().to_string(), series);
        self
    }

    pub fn with_reported(mut self, symbol: &str, beta: f64) -> Self {
        self.reported.insert(symbol.to_string(), beta);
        self
    }

    pub fn delay_ms(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn failing(mut self, e: BetaError) -> Self {
        self.fail_with = Some(e);
        self
    }

    pub fn prices_only(mut self) -> Self {
        self.serves_reported = false;
        self
    }

    /// Shared counter of price fetches, readable after the connector is moved.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.price_calls)
    }

    pub fn arc(self) -> Arc<dyn BetaConnector> {
        Arc::new(self)
    }

    async fn gate(&self) -> Result<(), BetaError> {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

impl BetaConnector for ScriptedConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn as_price_provider(&self) -> Option<&dyn PriceSeriesProvider> {
        Some(self as &dyn PriceSeriesProvider)
    }

    fn as_reported_beta_provider(&self) -> Option<&dyn ReportedBetaProvider> {
        if self.serves_reported {
            Some(self as &dyn ReportedBetaProvider)
        } else {
            None
        }
    }
}

#[async_trait]
impl PriceSeriesProvider for ScriptedConnector {
    async fn fetch(&self, req: PriceRequest) -> Result<PriceSeries, BetaError> {
        self.price_calls.fetch_add(1, Ordering::SeqCst);
        self.gate().await?;
        let series = self
            .prices
            .get(&req.symbol)
            .ok_or_else(|| BetaError::not_found(format!("prices for {}", req.symbol)))?;
        let points: Vec<_> = series
            .points()
            .iter()
            .copied()
            .filter(|p| p.ts >= req.start && p.ts <= req.end)
            .collect();
        if points.is_empty() {
            return Err(BetaError::not_found(format!("prices for {}", req.symbol)));
        }
        PriceSeries::new(req.symbol, points)
    }
}

#[async_trait]
impl ReportedBetaProvider for ScriptedConnector {
    async fn reported_beta(&self, symbol: &str) -> Result<f64, BetaError> {
        self.gate().await?;
        self.reported
            .get(symbol)
            .copied()
            .ok_or_else(|| BetaError::not_found(format!("reported beta for {symbol}")))
    }
}
