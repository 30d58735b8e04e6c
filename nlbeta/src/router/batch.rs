use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use nlbeta_core::{
    BatchReport, BetaError, BetaReport, Capability, PriceRequest, ReturnSeries, SymbolFailure,
};

use crate::BetaAnalyzer;
use crate::router::util::join_with_deadline;

/// Builder to orchestrate beta estimation for many symbols against one benchmark.
pub struct BatchBuilder<'a> {
    pub(crate) analyzer: &'a BetaAnalyzer,
    pub(crate) symbols: Vec<String>,
    pub(crate) period: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl<'a> BatchBuilder<'a> {
    /// Create a new builder bound to a `BetaAnalyzer`.
    ///
    /// Starts with no symbols and no period; both are required by `run()`.
    #[must_use]
    pub const fn new(analyzer: &'a BetaAnalyzer) -> Self {
        Self {
            analyzer,
            symbols: Vec::new(),
            period: None,
        }
    }

    /// Replace the symbol list.
    ///
    /// # Errors
    /// Returns `InvalidArg` if a symbol is blank or appears twice.
    pub fn symbols(mut self, symbols: &[&str]) -> Result<Self, BetaError> {
        let mut seen = HashSet::new();
        for s in symbols {
            reject_blank(s)?;
            if !seen.insert(*s) {
                return Err(BetaError::InvalidArg(format!(
                    "duplicate symbol '{s}' in symbols list"
                )));
            }
        }
        self.symbols = symbols.iter().map(|s| (*s).to_string()).collect();
        Ok(self)
    }

    /// Add a single symbol to the list.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the symbol is blank or already listed.
    pub fn add_symbol(mut self, symbol: &str) -> Result<Self, BetaError> {
        reject_blank(symbol)?;
        if self.symbols.iter().any(|s| s == symbol) {
            return Err(BetaError::InvalidArg(format!(
                "duplicate symbol '{symbol}' already exists in symbols list"
            )));
        }
        self.symbols.push(symbol.to_string());
        Ok(self)
    }

    /// Set the price window `[start, end]`.
    #[must_use]
    pub const fn period(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.period = Some((start, end));
        self
    }

    /// Resolve the benchmark once, then estimate every symbol concurrently.
    ///
    /// Behavior and trade-offs:
    /// - The benchmark returns are fetched once and shared read-only across tasks.
    /// - Per-symbol failures land in `failures` with their classification and do
    ///   not abort the batch.
    /// - The optional request deadline bounds the whole fan-out.
    ///
    /// # Errors
    /// Returns an error if no symbols or period are set, the benchmark cannot be
    /// resolved, or the request deadline elapses.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "nlbeta::router",
            name = "nlbeta::batch::run",
            skip(self),
            fields(symbols = self.symbols.len()),
        )
    )]
    pub async fn run(self) -> Result<BatchReport, BetaError> {
        let deadline = self.analyzer.cfg.request_timeout;
        self.run_within(deadline).await
    }

    /// Body of `run()` with the fan-out deadline supplied by the caller.
    ///
    /// Callers that already bound the whole operation pass `None`.
    pub(crate) async fn run_within(
        self,
        deadline: Option<Duration>,
    ) -> Result<BatchReport, BetaError> {
        if self.symbols.is_empty() {
            return Err(BetaError::InvalidArg(
                "no symbols specified for batch".into(),
            ));
        }
        let Some((start, end)) = self.period else {
            return Err(BetaError::InvalidArg("no period specified for batch".into()));
        };
        if start >= end {
            return Err(BetaError::InvalidArg(format!(
                "start ({start}) must be before end ({end})"
            )));
        }

        let benchmark: Arc<ReturnSeries> = self.analyzer.benchmark_returns(start, end).await?;

        let analyzer = self.analyzer;
        let sampling_hint = analyzer.cfg.sampling;
        let tasks = self.symbols.iter().map(|symbol| {
            let req = PriceRequest {
                symbol: symbol.clone(),
                start,
                end,
                sampling_hint,
            };
            let benchmark = Arc::clone(&benchmark);
            async move {
                let res = match analyzer.returns(req).await {
                    Ok(asset) => analyzer.estimator.estimate_returns(&asset, &benchmark),
                    Err(e) => Err(e),
                };
                (symbol.clone(), res)
            }
        });

        let joined: Vec<(String, Result<BetaReport, BetaError>)> =
            join_with_deadline(tasks, deadline, Capability::BatchEstimate).await?;

        let mut reports = Vec::new();
        let mut failures = Vec::new();
        for (symbol, res) in joined {
            match res {
                Ok(r) => reports.push(r),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(symbol = %symbol, kind = ?e.kind(), error = %e, "symbol failed");
                    failures.push(SymbolFailure::new(symbol, e));
                }
            }
        }

        Ok(BatchReport {
            benchmark: benchmark.symbol().to_string(),
            reports,
            failures,
        })
    }
}

fn reject_blank(symbol: &str) -> Result<(), BetaError> {
    if symbol.trim().is_empty() {
        return Err(BetaError::InvalidArg("symbol must not be empty".into()));
    }
    Ok(())
}

impl BetaAnalyzer {
    /// Start a batch estimation.
    #[must_use]
    pub const fn batch(&self) -> BatchBuilder<'_> {
        BatchBuilder::new(self)
    }
}
