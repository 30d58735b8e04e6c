use std::collections::HashMap;

use chrono::{DateTime, Utc};
use nlbeta_core::{
    BetaError, Capability, SymbolFailure, VendorComparison, VerificationReport,
    VerificationSummary,
};

use futures::future::join_all;

use crate::BetaAnalyzer;
use crate::core::with_request_deadline;

impl BetaAnalyzer {
    /// Fetch the vendor-reported beta for `symbol` from the first provider that
    /// publishes one.
    ///
    /// # Errors
    /// Returns an error if no provider succeeds, none publishes reported betas,
    /// or the figure is not finite.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "nlbeta::router", skip(self))
    )]
    pub async fn reported_beta(&self, symbol: &str) -> Result<f64, BetaError> {
        let owned = symbol.to_string();
        let beta = self
            .fetch_single(symbol, Capability::ReportedBeta, "reported beta", move |c| {
                c.as_reported_beta_provider()?;
                let symbol = owned.clone();
                Some(async move {
                    match c.as_reported_beta_provider() {
                        Some(p) => p.reported_beta(&symbol).await,
                        None => Err(BetaError::unsupported(Capability::ReportedBeta.as_str())),
                    }
                })
            })
            .await?;
        if beta.is_finite() {
            Ok(beta)
        } else {
            Err(BetaError::Data(format!(
                "non-finite reported beta for {symbol}"
            )))
        }
    }

    /// Estimate every symbol and compare with vendor-reported betas.
    ///
    /// Behavior and trade-offs:
    /// - Estimation runs as one batch against a shared benchmark.
    /// - Reported betas are fetched concurrently for the symbols that estimated.
    /// - The optional request deadline bounds both phases together.
    /// - A symbol missing either figure is skipped with its classified failure;
    ///   skipped entries keep request order.
    ///
    /// # Errors
    /// Returns an error if the batch cannot run (no symbols, unresolved
    /// benchmark) or the request deadline elapses.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "nlbeta::router", skip(self))
    )]
    pub async fn verify(
        &self,
        symbols: &[&str],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<VerificationReport, BetaError> {
        let builder = self.batch().symbols(symbols)?.period(start, end);

        // One deadline covers estimation and the reported-beta fan-out together.
        let (failures, joined) = with_request_deadline(
            self.cfg.request_timeout,
            Capability::Verify,
            async {
                let batch = builder.run_within(None).await?;
                let tasks = batch.reports.iter().map(|report| async move {
                    let reported = self.reported_beta(&report.symbol).await;
                    (report.symbol.clone(), report.beta, reported)
                });
                let joined = join_all(tasks).await;
                Ok::<_, BetaError>((batch.failures, joined))
            },
        )
        .await??;

        let mut comparisons = Vec::new();
        let mut skipped = failures;
        for (symbol, computed, reported) in joined {
            match reported {
                Ok(r) => comparisons.push(VendorComparison::new(symbol, computed, r)),
                Err(e) => skipped.push(SymbolFailure::new(symbol, e)),
            }
        }

        let order: HashMap<&str, usize> =
            symbols.iter().enumerate().map(|(i, s)| (*s, i)).collect();
        skipped.sort_by_key(|f| order.get(f.symbol.as_str()).copied().unwrap_or(usize::MAX));

        Ok(VerificationReport {
            summary: VerificationSummary::from_comparisons(&comparisons),
            comparisons,
            skipped,
        })
    }
}
