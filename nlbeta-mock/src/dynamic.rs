use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use nlbeta_core::connector::{BetaConnector, PriceSeriesProvider, ReportedBetaProvider};
use nlbeta_core::{BetaError, PriceRequest, PriceSeries};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(BetaError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    price_rules: HashMap<String, MockBehavior<PriceSeries>>,
    beta_rules: HashMap<String, MockBehavior<f64>>,
    price_requests: Vec<PriceRequest>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `fetch` calls for a specific symbol.
    pub async fn set_price_behavior(
        &self,
        symbol: impl Into<String>,
        behavior: MockBehavior<PriceSeries>,
    ) {
        let mut guard = self.state.lock().await;
        guard.price_rules.insert(symbol.into(), behavior);
    }

    /// Set the behavior for `reported_beta` calls for a specific symbol.
    pub async fn set_reported_beta_behavior(
        &self,
        symbol: impl Into<String>,
        behavior: MockBehavior<f64>,
    ) {
        let mut guard = self.state.lock().await;
        guard.beta_rules.insert(symbol.into(), behavior);
    }

    /// Return a copy of every price request received, in arrival order.
    pub async fn price_requests(&self) -> Vec<PriceRequest> {
        self.state.lock().await.price_requests.clone()
    }

    /// Number of price requests received for `symbol`.
    pub async fn price_request_count(&self, symbol: &str) -> usize {
        self.state
            .lock()
            .await
            .price_requests
            .iter()
            .filter(|r| r.symbol == symbol)
            .count()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.price_rules.clear();
        guard.beta_rules.clear();
        guard.price_requests.clear();
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Symbols without a configured behavior answer `Unsupported`.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn BetaConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn BetaConnector>, controller)
    }
}

async fn resolve<T>(behavior: Option<MockBehavior<T>>, capability: &str) -> Result<T, BetaError> {
    match behavior {
        Some(MockBehavior::Return(v)) => Ok(v),
        Some(MockBehavior::Fail(e)) => Err(e),
        Some(MockBehavior::Hang) => {
            std::future::pending::<()>().await;
            unreachable!()
        }
        None => Err(BetaError::unsupported(capability)),
    }
}

impl BetaConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_price_provider(&self) -> Option<&dyn PriceSeriesProvider> {
        Some(self as &dyn PriceSeriesProvider)
    }

    fn as_reported_beta_provider(&self) -> Option<&dyn ReportedBetaProvider> {
        Some(self as &dyn ReportedBetaProvider)
    }
}

#[async_trait]
impl PriceSeriesProvider for DynamicMockConnector {
    async fn fetch(&self, req: PriceRequest) -> Result<PriceSeries, BetaError> {
        // Snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            let b = guard.price_rules.get(&req.symbol).cloned();
            guard.price_requests.push(req);
            b
        };
        resolve(behavior, "price-history").await
    }
}

#[async_trait]
impl ReportedBetaProvider for DynamicMockConnector {
    async fn reported_beta(&self, symbol: &str) -> Result<f64, BetaError> {
        let behavior = {
            let guard = self.state.lock().await;
            guard.beta_rules.get(symbol).cloned()
        };
        resolve(behavior, "reported-beta").await
    }
}
