mod common;
use common::{five_years, get_connector};
use nlbeta::BetaAnalyzer;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,nlbeta=trace,nlbeta_core=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let analyzer = BetaAnalyzer::builder()
        .with_connector(get_connector())
        .build()?;
    let (start, end) = five_years();

    let _ = analyzer.analyze("AAPL", start, end).await?;
    // GAPPY carries invalid closes; the returns builder logs the dropped rows.
    let _ = analyzer.analyze("GAPPY", start, end).await?;
    // A failing symbol shows the provider fallback events.
    let _ = analyzer.analyze("FAIL", start, end).await;

    Ok(())
}
