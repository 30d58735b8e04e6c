mod common;
use common::{five_years, get_connector};
use nlbeta::{BetaAnalyzer, RollingSummary, SamplingMode};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Weekly returns with a 52-week trailing window.
    let analyzer = BetaAnalyzer::builder()
        .with_connector(get_connector())
        .sampling(SamplingMode::Weekly)
        .build()?;
    let (start, end) = five_years();

    let series = analyzer.rolling("TSLA", start, end, 52).await?;
    for p in series.iter().step_by(13) {
        match p.beta.value() {
            Some(b) => println!("{}  {b:.3}", p.end.date_naive()),
            None => println!("{}  n/a", p.end.date_naive()),
        }
    }
    if let Some(s) = RollingSummary::from_series(&series) {
        println!(
            "{} windows: min {:.3}, mean {:.3}, max {:.3}",
            s.windows, s.min, s.mean, s.max
        );
    }

    Ok(())
}
