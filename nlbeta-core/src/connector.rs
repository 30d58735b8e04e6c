use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::series::PriceSeries;
pub use nlbeta_types::ConnectorKey;
use nlbeta_types::{BetaError, SamplingMode};

/// Closing-price history request for one symbol over `[start, end]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRequest {
    /// Symbol to fetch.
    pub symbol: String,
    /// Inclusive start of the window.
    pub start: DateTime<Utc>,
    /// Inclusive end of the window.
    pub end: DateTime<Utc>,
    /// Granularity the caller will sample at; providers may return finer bars.
    pub sampling_hint: SamplingMode,
}

impl PriceRequest {
    /// Build a validated request.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the symbol is blank or `start` is not before `end`.
    pub fn try_new(
        symbol: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        sampling_hint: SamplingMode,
    ) -> Result<Self, BetaError> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(BetaError::InvalidArg("symbol must not be empty".into()));
        }
        if start >= end {
            return Err(BetaError::InvalidArg(format!(
                "start ({start}) must be before end ({end})"
            )));
        }
        Ok(Self {
            symbol,
            start,
            end,
            sampling_hint,
        })
    }

    /// Same window and hint for another symbol.
    #[must_use]
    pub fn for_symbol(&self, symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..self.clone()
        }
    }
}

/// Focused role trait for connectors that provide closing-price history.
#[async_trait]
pub trait PriceSeriesProvider: Send + Sync {
    /// Fetch ordered closing prices for the request window.
    ///
    /// Failures surface as `DataUnavailable` or `NotFound`.
    async fn fetch(&self, req: PriceRequest) -> Result<PriceSeries, BetaError>;
}

/// Focused role trait for connectors that publish their own beta figure.
#[async_trait]
pub trait ReportedBetaProvider: Send + Sync {
    /// Vendor-reported beta for `symbol`.
    async fn reported_beta(&self, symbol: &str) -> Result<f64, BetaError>;
}

/// Primary connector trait. Capabilities are advertised through the `as_*`
/// accessors; a connector overrides only the ones it serves.
pub trait BetaConnector: Send + Sync {
    /// A stable identifier for priority lists (e.g., "nlbeta-mock").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise price history capability.
    fn as_price_provider(&self) -> Option<&dyn PriceSeriesProvider> {
        None
    }

    /// Advertise vendor-reported beta capability.
    fn as_reported_beta_provider(&self) -> Option<&dyn ReportedBetaProvider> {
        None
    }
}
