mod common;
use std::sync::Arc;
use std::time::Duration;

use common::five_years;
use nlbeta::{BetaAnalyzer, BetaConnector, BetaError};
use nlbeta_mock::{DynamicMockConnector, MockBehavior, MockConnector};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A scripted provider that is down for AAPL, registered ahead of the fixtures.
    let (flaky, controller) = DynamicMockConnector::new_with_controller("flaky");
    controller
        .set_price_behavior(
            "AAPL",
            MockBehavior::Fail(BetaError::data_unavailable("flaky", "maintenance window")),
        )
        .await;
    controller.set_price_behavior("MSFT", MockBehavior::Hang).await;

    let fixtures: Arc<dyn BetaConnector> = Arc::new(MockConnector::new());
    let analyzer = BetaAnalyzer::builder()
        .with_connector(flaky)
        .with_connector(Arc::clone(&fixtures))
        // Benchmarks always come from the fixture provider first.
        .prefer_symbol("^GSPC", &[Arc::clone(&fixtures)])
        .provider_timeout(Duration::from_millis(250))
        .build()?;
    let (start, end) = five_years();

    for sym in ["AAPL", "MSFT"] {
        let r = analyzer.analyze(sym, start, end).await?;
        println!("{sym}: beta {:.3} (fell back past the scripted provider)", r.beta);
    }
    println!("scripted provider saw {} request(s)", controller.price_requests().await.len());

    Ok(())
}
