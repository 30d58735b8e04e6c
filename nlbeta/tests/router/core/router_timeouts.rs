use std::sync::Arc;
use std::time::Duration;

use nlbeta::{BetaAnalyzer, BetaError, Capability};
use nlbeta_mock::MockConnector;

use crate::helpers::{
    GSPC, ScriptedConnector, bench_returns, fixture_window, monthly_series, scaled_returns,
    scripted_window,
};

fn serving(name: &'static str) -> ScriptedConnector {
    ScriptedConnector::new(name)
        .with_prices(monthly_series(GSPC, &bench_returns()))
        .with_prices(monthly_series("X", &scaled_returns(1.2)))
}

#[tokio::test]
async fn slow_single_provider_times_out() {
    let analyzer = BetaAnalyzer::builder()
        .with_connector(serving("slow").delay_ms(200).arc())
        .provider_timeout(Duration::from_millis(20))
        .build()
        .unwrap();

    let (start, end) = scripted_window();
    let err = analyzer.analyze("X", start, end).await.unwrap_err();
    assert_eq!(
        err,
        BetaError::provider_timeout("slow", Capability::PriceHistory.as_str())
    );
    assert!(err.is_data_source_failure());
}

#[tokio::test]
async fn slow_provider_is_skipped_for_fast_one() {
    let analyzer = BetaAnalyzer::builder()
        .with_connector(serving("slow").delay_ms(200).arc())
        .with_connector(serving("fast").arc())
        .provider_timeout(Duration::from_millis(20))
        .build()
        .unwrap();

    let (start, end) = scripted_window();
    let report = analyzer.analyze("X", start, end).await.unwrap();
    assert!((report.beta - 1.2).abs() < 1e-9);
}

#[tokio::test]
async fn request_deadline_bounds_batch() {
    let analyzer = BetaAnalyzer::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .request_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let (start, end) = fixture_window();
    let err = analyzer
        .batch()
        .symbols(&["AAPL", "TIMEOUT"])
        .unwrap()
        .period(start, end)
        .run()
        .await
        .unwrap_err();
    assert_eq!(
        err,
        BetaError::request_timeout(Capability::BatchEstimate.as_str())
    );
}

#[tokio::test]
async fn generous_deadline_lets_batch_finish() {
    let analyzer = BetaAnalyzer::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .request_timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let (start, end) = fixture_window();
    let batch = analyzer
        .batch()
        .symbols(&["AAPL", "TIMEOUT"])
        .unwrap()
        .period(start, end)
        .run()
        .await
        .unwrap();
    assert_eq!(batch.reports.len(), 1);
    // TIMEOUT eventually answers NotFound: no fixture prices exist for it.
    assert_eq!(batch.failures.len(), 1);
    assert_eq!(batch.failures[0].symbol, "TIMEOUT");
}
