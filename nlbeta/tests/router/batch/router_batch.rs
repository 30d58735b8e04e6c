use nlbeta::{BetaError, FailureKind};
use nlbeta_mock::{DynamicMockConnector, MockBehavior};

use crate::helpers::{
    AAPL, GSPC, MSFT, analyzer_with, bench_returns, fixture_window, mock_analyzer,
    monthly_series, scaled_returns, scripted_window,
};

#[tokio::test]
async fn batch_separates_reports_from_classified_failures() {
    let analyzer = mock_analyzer();
    let (start, end) = fixture_window();

    let batch = analyzer
        .batch()
        .symbols(&[AAPL, MSFT, "NEWCO", "NOPE", "FAIL"])
        .unwrap()
        .period(start, end)
        .run()
        .await
        .unwrap();

    assert_eq!(batch.benchmark, GSPC);
    let ok: Vec<_> = batch.reports.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(ok, vec![AAPL, MSFT]);

    let failed: Vec<_> = batch
        .failures
        .iter()
        .map(|f| (f.symbol.as_str(), f.kind))
        .collect();
    assert_eq!(
        failed,
        vec![
            ("NEWCO", FailureKind::InsufficientHistory),
            ("NOPE", FailureKind::DataSource),
            ("FAIL", FailureKind::DataSource),
        ]
    );
}

#[tokio::test]
async fn batch_reports_serialize_failure_kinds() {
    let analyzer = mock_analyzer();
    let (start, end) = fixture_window();

    let batch = analyzer
        .batch()
        .symbols(&["NEWCO"])
        .unwrap()
        .period(start, end)
        .run()
        .await
        .unwrap();

    let v = serde_json::to_value(&batch).unwrap();
    assert_eq!(v["failures"][0]["symbol"], "NEWCO");
    assert_eq!(v["failures"][0]["kind"], "InsufficientHistory");
    assert!(v["reports"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn benchmark_is_fetched_once_per_batch() {
    let (connector, controller) = DynamicMockConnector::new_with_controller("dyn");
    controller
        .set_price_behavior(GSPC, MockBehavior::Return(monthly_series(GSPC, &bench_returns())))
        .await;
    for (sym, beta) in [("A", 0.5), ("B", 1.0), ("C", 1.5)] {
        controller
            .set_price_behavior(
                sym,
                MockBehavior::Return(monthly_series(sym, &scaled_returns(beta))),
            )
            .await;
    }

    let analyzer = analyzer_with(&[connector]);
    let (start, end) = scripted_window();
    let batch = analyzer
        .batch()
        .symbols(&["A", "B", "C"])
        .unwrap()
        .period(start, end)
        .run()
        .await
        .unwrap();

    assert_eq!(batch.reports.len(), 3);
    for (r, expected) in batch.reports.iter().zip([0.5, 1.0, 1.5]) {
        assert!((r.beta - expected).abs() < 1e-9, "{} beta {}", r.symbol, r.beta);
    }
    assert_eq!(controller.price_request_count(GSPC).await, 1);
    for sym in ["A", "B", "C"] {
        assert_eq!(controller.price_request_count(sym).await, 1);
    }
}

#[tokio::test]
async fn unresolvable_benchmark_fails_the_batch() {
    let (connector, controller) = DynamicMockConnector::new_with_controller("dyn");
    controller
        .set_price_behavior("A", MockBehavior::Return(monthly_series("A", &scaled_returns(1.0))))
        .await;

    let analyzer = analyzer_with(&[connector]);
    let (start, end) = scripted_window();
    let res = analyzer
        .batch()
        .symbols(&["A"])
        .unwrap()
        .period(start, end)
        .run()
        .await;
    assert!(res.is_err());
    // The asset is never requested once the benchmark is unresolved.
    assert_eq!(controller.price_request_count("A").await, 0);
}

#[test]
fn duplicate_symbols_are_rejected() {
    let analyzer = mock_analyzer();

    let err = analyzer.batch().symbols(&[AAPL, MSFT, AAPL]).err().unwrap();
    assert!(matches!(err, BetaError::InvalidArg(_)), "got {err:?}");

    let err = analyzer
        .batch()
        .add_symbol(AAPL)
        .unwrap()
        .add_symbol(AAPL)
        .err()
        .unwrap();
    assert!(matches!(err, BetaError::InvalidArg(_)), "got {err:?}");
}

#[tokio::test]
async fn empty_batch_and_missing_period_are_rejected() {
    let analyzer = mock_analyzer();
    let (start, end) = fixture_window();

    let err = analyzer.batch().period(start, end).run().await.unwrap_err();
    assert!(matches!(err, BetaError::InvalidArg(_)), "got {err:?}");

    let err = analyzer
        .batch()
        .symbols(&[AAPL])
        .unwrap()
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, BetaError::InvalidArg(_)), "got {err:?}");
}

#[test]
fn blank_symbols_are_rejected_wherever_they_appear() {
    let analyzer = mock_analyzer();

    for list in [[AAPL, " "], [" ", AAPL], ["", MSFT]] {
        let err = analyzer.batch().symbols(&list).err().unwrap();
        assert!(matches!(err, BetaError::InvalidArg(_)), "{list:?} got {err:?}");
    }

    let err = analyzer
        .batch()
        .add_symbol(AAPL)
        .unwrap()
        .add_symbol("  ")
        .err()
        .unwrap();
    assert!(matches!(err, BetaError::InvalidArg(_)), "got {err:?}");
}

#[tokio::test]
async fn reversed_period_is_rejected_before_any_fetch() {
    let (connector, controller) = DynamicMockConnector::new_with_controller("dyn");
    controller
        .set_price_behavior(GSPC, MockBehavior::Return(monthly_series(GSPC, &bench_returns())))
        .await;

    let analyzer = analyzer_with(&[connector]);
    let (start, end) = scripted_window();
    let err = analyzer
        .batch()
        .symbols(&["A", "B"])
        .unwrap()
        .period(end, start)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, BetaError::InvalidArg(_)), "got {err:?}");
    assert_eq!(controller.price_request_count(GSPC).await, 0);
}
