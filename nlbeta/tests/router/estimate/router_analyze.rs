use std::sync::Arc;

use nlbeta::{BetaAnalyzer, BetaError, FailureKind, SamplingMode};
use nlbeta_mock::MockConnector;

use crate::helpers::{
    AAPL, GSPC, KO, MONTHS, MSFT, ScriptedConnector, analyzer_with, bench_returns,
    fixture_window, mock_analyzer, monthly_series, scaled_returns, scripted_window,
};

#[tokio::test]
async fn exact_multiple_recovers_beta() {
    let c = ScriptedConnector::new("scripted")
        .with_prices(monthly_series(GSPC, &bench_returns()))
        .with_prices(monthly_series("X", &scaled_returns(1.5)))
        .arc();
    let analyzer = analyzer_with(&[c]);

    let (start, end) = scripted_window();
    let r = analyzer.analyze("X", start, end).await.unwrap();

    assert_eq!(r.symbol, "X");
    assert_eq!(r.benchmark, GSPC);
    assert_eq!(r.sampling, SamplingMode::Monthly);
    assert_eq!(r.observations, MONTHS);
    assert!((r.beta - 1.5).abs() < 1e-9, "beta {}", r.beta);
    assert!(r.alpha.abs() < 1e-9);
    assert!((r.r_squared.unwrap() - 1.0).abs() < 1e-9);
    assert!(r.standard_error.unwrap() < 1e-6);

    let annual = r.annualized_volatility.expect("annualized for monthly sampling");
    assert!((annual - r.volatility * 12f64.sqrt()).abs() < 1e-12);

    let pos = r.positive.beta.value().expect("positive side large enough");
    let neg = r.negative.beta.value().expect("negative side large enough");
    assert!((pos - 1.5).abs() < 1e-9);
    assert!((neg - 1.5).abs() < 1e-9);
    assert!((r.beta_ratio.value().unwrap() - 1.0).abs() < 1e-9);
    assert_eq!(
        r.positive.samples + r.negative.samples + r.zero_samples,
        r.observations
    );
}

#[tokio::test]
async fn fixture_betas_follow_their_profiles() {
    let analyzer = mock_analyzer();
    let (start, end) = fixture_window();

    let aapl = analyzer.analyze(AAPL, start, end).await.unwrap();
    let msft = analyzer.analyze(MSFT, start, end).await.unwrap();
    let ko = analyzer.analyze(KO, start, end).await.unwrap();
    let tsla = analyzer.analyze("TSLA", start, end).await.unwrap();

    // Sixty month-ends yield 59 monthly returns.
    assert_eq!(aapl.observations, 59);
    assert!(aapl.beta > 0.9 && aapl.beta < 1.6, "AAPL beta {}", aapl.beta);
    assert!(ko.beta < msft.beta && msft.beta < tsla.beta);
    assert!(aapl.annualized_volatility.is_some());
    assert_eq!(aapl.benchmark, GSPC);
}

#[tokio::test]
async fn weekly_sampling_uses_more_observations() {
    let analyzer = BetaAnalyzer::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .sampling(SamplingMode::Weekly)
        .build()
        .unwrap();
    let (start, end) = fixture_window();

    let r = analyzer.analyze(MSFT, start, end).await.unwrap();
    assert_eq!(r.sampling, SamplingMode::Weekly);
    assert!(r.observations > 250, "observations {}", r.observations);
    let annual = r.annualized_volatility.unwrap();
    assert!((annual - r.volatility * 52f64.sqrt()).abs() < 1e-12);
}

#[tokio::test]
async fn recent_listing_reports_insufficient_history() {
    let analyzer = mock_analyzer();
    let (start, end) = fixture_window();

    let err = analyzer.analyze("NEWCO", start, end).await.unwrap_err();
    assert!(matches!(err, BetaError::InsufficientSample { required: 24, .. }), "got {err:?}");
    assert_eq!(err.kind(), FailureKind::InsufficientHistory);
}

#[tokio::test]
async fn invalid_rows_do_not_block_estimation() {
    let analyzer = mock_analyzer();
    let (start, end) = fixture_window();

    let r = analyzer.analyze("GAPPY", start, end).await.unwrap();
    assert!(r.beta.is_finite());
    assert!(r.observations >= 24);
}

#[tokio::test]
async fn unknown_symbol_and_forced_failure_are_data_source_errors() {
    let analyzer = mock_analyzer();
    let (start, end) = fixture_window();

    let err = analyzer.analyze("NOPE", start, end).await.unwrap_err();
    assert_eq!(err, BetaError::not_found("prices for NOPE"));

    let err = analyzer.analyze("FAIL", start, end).await.unwrap_err();
    assert!(matches!(err, BetaError::DataUnavailable { .. }), "got {err:?}");
    assert!(err.is_data_source_failure());
}

#[tokio::test]
async fn empty_window_is_invalid() {
    let analyzer = mock_analyzer();
    let (start, _) = fixture_window();

    let err = analyzer.analyze(AAPL, start, start).await.unwrap_err();
    assert!(matches!(err, BetaError::InvalidArg(_)), "got {err:?}");
}

#[tokio::test]
async fn shared_benchmark_matches_single_call() {
    let analyzer = mock_analyzer();
    let (start, end) = fixture_window();

    let benchmark = analyzer.benchmark_returns(start, end).await.unwrap();
    let shared = analyzer
        .analyze_with_benchmark(MSFT, &benchmark, start, end)
        .await
        .unwrap();
    let single = analyzer.analyze(MSFT, start, end).await.unwrap();
    assert_eq!(shared.beta.to_bits(), single.beta.to_bits());
    assert_eq!(shared.observations, single.observations);
}

#[tokio::test]
async fn trailing_window_limits_observations() {
    let analyzer = BetaAnalyzer::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .estimator(nlbeta::EstimatorConfig::default().with_max_observations(36))
        .build()
        .unwrap();
    let (start, end) = fixture_window();

    let r = analyzer.analyze(AAPL, start, end).await.unwrap();
    assert_eq!(r.observations, 36);
}
