use nlbeta::{BetaError, RollingSummary};

use crate::helpers::{
    GSPC, MONTHS, MSFT, ScriptedConnector, analyzer_with, bench_returns, fixture_window,
    mock_analyzer, monthly_series, scaled_returns, scripted_window,
};

#[tokio::test]
async fn rolling_over_fixtures_has_one_point_per_window() {
    let analyzer = mock_analyzer();
    let (start, end) = fixture_window();

    let series = analyzer.rolling(MSFT, start, end, 12).await.unwrap();
    assert_eq!(series.len(), 59 - 12 + 1);
    assert!(series.windows(2).all(|w| w[0].end < w[1].end));
    assert!(series.iter().all(|p| p.beta.is_available()));

    let summary = RollingSummary::from_series(&series).unwrap();
    assert_eq!(summary.windows, series.len());
    assert!(summary.min <= summary.mean && summary.mean <= summary.max);
}

#[tokio::test]
async fn rolling_on_exact_multiple_is_flat() {
    let c = ScriptedConnector::new("scripted")
        .with_prices(monthly_series(GSPC, &bench_returns()))
        .with_prices(monthly_series("X", &scaled_returns(0.8)))
        .arc();
    let analyzer = analyzer_with(&[c]);
    let (start, end) = scripted_window();

    let series = analyzer.rolling("X", start, end, 6).await.unwrap();
    assert_eq!(series.len(), MONTHS - 6 + 1);
    for p in &series {
        let b = p.beta.value().unwrap();
        assert!((b - 0.8).abs() < 1e-9, "beta {b}");
    }
}

#[tokio::test]
async fn rolling_rejects_degenerate_window() {
    let analyzer = mock_analyzer();
    let (start, end) = fixture_window();

    let err = analyzer.rolling(MSFT, start, end, 1).await.unwrap_err();
    assert!(matches!(err, BetaError::InvalidArg(_)), "got {err:?}");
}

#[tokio::test]
async fn rolling_window_longer_than_history_is_insufficient() {
    let analyzer = mock_analyzer();
    let (start, end) = fixture_window();

    let err = analyzer.rolling(MSFT, start, end, 120).await.unwrap_err();
    assert!(err.is_insufficient_history(), "got {err:?}");
}
