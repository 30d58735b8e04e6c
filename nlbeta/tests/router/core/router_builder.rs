use std::sync::Arc;

use nlbeta::{BetaAnalyzer, BetaError, EstimatorConfig, SamplingMode};
use nlbeta_mock::MockConnector;

fn mock() -> Arc<MockConnector> {
    Arc::new(MockConnector::new())
}

#[test]
fn build_without_connectors_is_rejected() {
    let err = BetaAnalyzer::builder().build().err().expect("must fail");
    assert!(matches!(err, BetaError::InvalidArg(_)), "got {err:?}");
}

#[test]
fn blank_benchmarks_are_rejected() {
    let err = BetaAnalyzer::builder()
        .with_connector(mock())
        .benchmarks(&["", "  "])
        .build()
        .err()
        .expect("must fail");
    assert!(matches!(err, BetaError::InvalidArg(_)), "got {err:?}");
}

#[test]
fn periods_per_year_is_filled_from_sampling() {
    let monthly = BetaAnalyzer::builder().with_connector(mock()).build().unwrap();
    assert_eq!(monthly.config().estimator.periods_per_year, Some(12));
    assert_eq!(monthly.estimator().config().periods_per_year, Some(12));

    let weekly = BetaAnalyzer::builder()
        .with_connector(mock())
        .sampling(SamplingMode::Weekly)
        .build()
        .unwrap();
    assert_eq!(weekly.config().estimator.periods_per_year, Some(52));
}

#[test]
fn contradicting_periods_per_year_is_rejected() {
    let err = BetaAnalyzer::builder()
        .with_connector(mock())
        .sampling(SamplingMode::Monthly)
        .estimator(EstimatorConfig::default().with_periods_per_year(252))
        .build()
        .err()
        .expect("must fail");
    assert!(matches!(err, BetaError::InvalidArg(_)), "got {err:?}");
}

#[test]
fn matching_periods_per_year_is_accepted() {
    let analyzer = BetaAnalyzer::builder()
        .with_connector(mock())
        .sampling(SamplingMode::Daily)
        .estimator(EstimatorConfig::default().with_periods_per_year(252))
        .build()
        .unwrap();
    assert_eq!(analyzer.config().sampling, SamplingMode::Daily);
}

#[test]
fn invalid_estimator_thresholds_are_rejected() {
    let err = BetaAnalyzer::builder()
        .with_connector(mock())
        .estimator(EstimatorConfig::default().with_min_sample_size(1))
        .build()
        .err()
        .expect("must fail");
    assert!(matches!(err, BetaError::InvalidArg(_)), "got {err:?}");
}

#[test]
fn defaults_match_documented_values() {
    let analyzer = BetaAnalyzer::builder().with_connector(mock()).build().unwrap();
    let cfg = analyzer.config();
    assert_eq!(cfg.benchmarks, vec!["^GSPC".to_string(), "SPY".to_string()]);
    assert_eq!(cfg.sampling, SamplingMode::Monthly);
    assert_eq!(cfg.estimator.min_sample_size, nlbeta::DEFAULT_MIN_SAMPLE_SIZE);
    assert_eq!(cfg.estimator.min_subset_size, nlbeta::DEFAULT_MIN_SUBSET_SIZE);
    assert!(cfg.request_timeout.is_none());
}
