use nlbeta::{BetaAnalyzer, BetaError};
use nlbeta_mock::{DynamicMockConnector, MockBehavior};

use crate::helpers::{
    GSPC, SPY, ScriptedConnector, analyzer_with, bench_returns, monthly_series, scaled_returns,
    scripted_window,
};

#[tokio::test]
async fn falls_back_to_second_benchmark() {
    let (connector, controller) = DynamicMockConnector::new_with_controller("dyn");
    controller
        .set_price_behavior(
            GSPC,
            MockBehavior::Fail(BetaError::data_unavailable("dyn", "index feed down")),
        )
        .await;
    controller
        .set_price_behavior(SPY, MockBehavior::Return(monthly_series(SPY, &bench_returns())))
        .await;
    controller
        .set_price_behavior("X", MockBehavior::Return(monthly_series("X", &scaled_returns(1.1))))
        .await;

    let analyzer = analyzer_with(&[connector]);
    let (start, end) = scripted_window();
    let r = analyzer.analyze("X", start, end).await.unwrap();

    assert_eq!(r.benchmark, SPY);
    assert!((r.beta - 1.1).abs() < 1e-9);
    assert_eq!(controller.price_request_count(GSPC).await, 1);
    assert_eq!(controller.price_request_count(SPY).await, 1);
}

#[tokio::test]
async fn every_benchmark_failing_is_aggregated() {
    let (connector, controller) = DynamicMockConnector::new_with_controller("dyn");
    for b in [GSPC, SPY] {
        controller
            .set_price_behavior(b, MockBehavior::Fail(BetaError::data_unavailable("dyn", "down")))
            .await;
    }
    controller
        .set_price_behavior("X", MockBehavior::Return(monthly_series("X", &scaled_returns(1.0))))
        .await;

    let analyzer = analyzer_with(&[connector]);
    let (start, end) = scripted_window();
    let err = analyzer.analyze("X", start, end).await.unwrap_err();
    match err {
        BetaError::AllProvidersFailed(es) => {
            assert_eq!(es.len(), 2);
            assert!(es.iter().all(BetaError::is_data_source_failure));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn single_configured_benchmark_error_passes_through() {
    let c = ScriptedConnector::new("scripted")
        .with_prices(monthly_series("X", &scaled_returns(1.0)))
        .arc();
    let analyzer = BetaAnalyzer::builder()
        .with_connector(c)
        .benchmarks(&["QQQ"])
        .build()
        .unwrap();

    let (start, end) = scripted_window();
    let err = analyzer.analyze("X", start, end).await.unwrap_err();
    assert_eq!(err, BetaError::not_found("prices for QQQ"));
}

#[tokio::test]
async fn custom_benchmark_is_used() {
    let c = ScriptedConnector::new("scripted")
        .with_prices(monthly_series("QQQ", &bench_returns()))
        .with_prices(monthly_series("X", &scaled_returns(0.7)))
        .arc();
    let analyzer = BetaAnalyzer::builder()
        .with_connector(c)
        .benchmarks(&["QQQ", SPY])
        .build()
        .unwrap();

    let (start, end) = scripted_window();
    let r = analyzer.analyze("X", start, end).await.unwrap();
    assert_eq!(r.benchmark, "QQQ");
    assert!((r.beta - 0.7).abs() < 1e-9);
}

#[tokio::test]
async fn benchmark_with_single_price_is_skipped() {
    let (connector, controller) = DynamicMockConnector::new_with_controller("dyn");
    let one_point = monthly_series(GSPC, &[]);
    controller
        .set_price_behavior(GSPC, MockBehavior::Return(one_point))
        .await;
    controller
        .set_price_behavior(SPY, MockBehavior::Return(monthly_series(SPY, &bench_returns())))
        .await;
    controller
        .set_price_behavior("X", MockBehavior::Return(monthly_series("X", &scaled_returns(1.3))))
        .await;

    let analyzer = analyzer_with(&[connector]);
    let (start, end) = scripted_window();
    let r = analyzer.analyze("X", start, end).await.unwrap();
    assert_eq!(r.benchmark, SPY);
}
