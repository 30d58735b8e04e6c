use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use nlbeta_core::connector::ConnectorKey;
use nlbeta_core::{
    AnalyzerConfig, BetaConnector, BetaError, BetaEstimator, Capability, EstimatorConfig,
    SamplingMode,
};

/// Orchestrator that fetches prices across registered providers and estimates beta.
pub struct BetaAnalyzer {
    pub(crate) connectors: Vec<Arc<dyn BetaConnector>>,
    pub(crate) cfg: AnalyzerConfig,
    pub(crate) per_symbol_priority: HashMap<String, Vec<ConnectorKey>>,
    pub(crate) estimator: Arc<BetaEstimator>,
}

/// Builder for constructing a `BetaAnalyzer` with custom configuration.
pub struct BetaAnalyzerBuilder {
    connectors: Vec<Arc<dyn BetaConnector>>,
    cfg: AnalyzerConfig,
    per_symbol_priority: HashMap<String, Vec<ConnectorKey>>,
}

impl Default for BetaAnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BetaAnalyzerBuilder {
    /// Create a new builder with defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no connectors; register at least one via [`Self::with_connector`].
    /// - Defaults: `^GSPC` then `SPY` as benchmarks, monthly sampling, sample
    ///   variance, 24 observations minimum, 10s provider timeout, no request deadline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: AnalyzerConfig::default(),
            per_symbol_priority: HashMap::new(),
        }
    }

    /// Register a provider connector.
    ///
    /// Registration order is the fetch priority unless a symbol preference applies.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn BetaConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: AnalyzerConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set benchmark symbols in fallback order.
    ///
    /// The first benchmark that yields usable returns is used for every estimate
    /// of a call.
    #[must_use]
    pub fn benchmarks(mut self, symbols: &[&str]) -> Self {
        self.cfg.benchmarks = symbols.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Select the sampling granularity for asset and benchmark returns.
    #[must_use]
    pub const fn sampling(mut self, mode: SamplingMode) -> Self {
        self.cfg.sampling = mode;
        self
    }

    /// Set estimator tunables.
    ///
    /// When `periods_per_year` is unset, `build` fills it from the sampling mode.
    #[must_use]
    pub const fn estimator(mut self, cfg: EstimatorConfig) -> Self {
        self.cfg.estimator = cfg;
        self
    }

    /// Set the per-provider request timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set an overall deadline for fan-out operations (batch, verify).
    ///
    /// When exceeded, the whole call returns `RequestTimeout`.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Set preferred providers for a symbol using connector instances.
    ///
    /// The list is an ordering hint; unlisted connectors are still tried after the
    /// listed ones.
    #[must_use]
    pub fn prefer_symbol(
        mut self,
        symbol: &str,
        connectors_desc: &[Arc<dyn BetaConnector>],
    ) -> Self {
        let keys: Vec<ConnectorKey> = connectors_desc.iter().map(|c| c.key()).collect();
        self.per_symbol_priority.insert(symbol.to_string(), keys);
        self
    }

    /// Build the analyzer.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors are registered, no benchmark is
    /// configured, the estimator configuration is invalid, or an explicit
    /// `periods_per_year` contradicts the sampling mode.
    pub fn build(mut self) -> Result<BetaAnalyzer, BetaError> {
        if self.connectors.is_empty() {
            return Err(BetaError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        self.cfg.benchmarks.retain(|s| !s.trim().is_empty());
        if self.cfg.benchmarks.is_empty() {
            return Err(BetaError::InvalidArg("no benchmark symbols configured".into()));
        }

        let sampling = self.cfg.sampling;
        match self.cfg.estimator.periods_per_year {
            None => self.cfg.estimator = self.cfg.estimator.annualized_for(sampling),
            Some(p) if p != sampling.periods_per_year() => {
                return Err(BetaError::InvalidArg(format!(
                    "periods_per_year {p} contradicts {sampling} sampling"
                )));
            }
            Some(_) => {}
        }
        let estimator = BetaEstimator::new(self.cfg.estimator)?;

        // Drop unknown connector keys and duplicates from preferences.
        let known: HashSet<&'static str> = self.connectors.iter().map(|c| c.name()).collect();
        for keys in self.per_symbol_priority.values_mut() {
            let mut seen = HashSet::new();
            keys.retain(|k| known.contains(k.as_str()) && seen.insert(k.as_str()));
        }

        Ok(BetaAnalyzer {
            connectors: self.connectors,
            cfg: self.cfg,
            per_symbol_priority: self.per_symbol_priority,
            estimator: Arc::new(estimator),
        })
    }
}

/// Attribute an untagged error to the connector that produced it.
pub(crate) fn tag_err(connector: &str, e: BetaError) -> BetaError {
    match e {
        e @ (BetaError::NotFound { .. }
        | BetaError::DataUnavailable { .. }
        | BetaError::ProviderTimeout { .. }
        | BetaError::RequestTimeout { .. }
        | BetaError::AllProvidersFailed(_)
        | BetaError::InsufficientData { .. }
        | BetaError::InsufficientSample { .. }) => e,
        other => BetaError::data_unavailable(connector, other.to_string()),
    }
}

/// Apply an optional deadline to a future, mapping expiry to `RequestTimeout`.
pub(crate) async fn with_request_deadline<T, Fut>(
    deadline: Option<Duration>,
    capability: Capability,
    fut: Fut,
) -> Result<T, BetaError>
where
    Fut: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| BetaError::request_timeout(capability.as_str())),
        None => Ok(fut.await),
    }
}

impl BetaAnalyzer {
    /// Start building a new `BetaAnalyzer`.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use nlbeta::{BetaAnalyzer, SamplingMode};
    ///
    /// let analyzer = BetaAnalyzer::builder()
    ///     .with_connector(Arc::new(nlbeta_mock::MockConnector::new()))
    ///     .benchmarks(&["^GSPC", "SPY"])
    ///     .sampling(SamplingMode::Monthly)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> BetaAnalyzerBuilder {
        BetaAnalyzerBuilder::new()
    }

    /// Effective configuration after `build` validation.
    #[must_use]
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.cfg
    }

    /// Shared estimator used for every call.
    #[must_use]
    pub fn estimator(&self) -> &BetaEstimator {
        &self.estimator
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "nlbeta::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = %capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: Capability,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, BetaError>
    where
        Fut: core::future::Future<Output = Result<T, BetaError>>,
    {
        (tokio::time::timeout(timeout, fut).await).unwrap_or_else(|_| {
            Err(BetaError::provider_timeout(
                connector_name,
                capability.as_str(),
            ))
        })
    }

    pub(crate) fn ordered(&self, symbol: &str) -> Vec<Arc<dyn BetaConnector>> {
        let mut out: Vec<(usize, Arc<dyn BetaConnector>)> =
            self.connectors.iter().cloned().enumerate().collect();
        if let Some(pref) = self.per_symbol_priority.get(symbol) {
            let pos: HashMap<_, _> = pref
                .iter()
                .enumerate()
                .map(|(i, k)| (k.as_str(), i))
                .collect();
            out.sort_by_key(|(orig_i, c)| {
                (pos.get(c.name()).copied().unwrap_or(usize::MAX), *orig_i)
            });
        }
        out.into_iter().map(|(_, c)| c).collect()
    }

    /// Try providers in priority order until one succeeds.
    ///
    /// - Applies the per-provider timeout to every attempt.
    /// - All `NotFound` collapses to a single `NotFound` for the symbol.
    /// - No provider exposing the capability yields `Unsupported`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "nlbeta::core::fetch_single",
            skip(self, call),
            fields(symbol = %symbol, capability = %capability),
        )
    )]
    pub(crate) async fn fetch_single<T, F, Fut>(
        &self,
        symbol: &str,
        capability: Capability,
        not_found_label: &'static str,
        call: F,
    ) -> Result<T, BetaError>
    where
        T: Send,
        F: Fn(Arc<dyn BetaConnector>) -> Option<Fut> + Send,
        Fut: core::future::Future<Output = Result<T, BetaError>> + Send,
    {
        let mut attempted_any = false;
        let mut errors: Vec<BetaError> = Vec::new();

        for c in self.ordered(symbol) {
            let Some(fut) = call(Arc::clone(&c)) else {
                continue;
            };
            attempted_any = true;
            match Self::provider_call_with_timeout(
                c.name(),
                capability,
                self.cfg.provider_timeout,
                fut,
            )
            .await
            {
                Ok(v) => return Ok(v),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        connector = c.name(),
                        error = %e,
                        "provider failed; falling back"
                    );
                    errors.push(tag_err(c.name(), e));
                }
            }
        }

        Err(crate::router::util::collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(format!("{not_found_label} for {symbol}")),
        ))
    }
}
