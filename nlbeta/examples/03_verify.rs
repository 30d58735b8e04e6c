mod common;
use common::{five_years, get_connector};
use nlbeta::BetaAnalyzer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = BetaAnalyzer::builder()
        .with_connector(get_connector())
        .build()?;
    let (start, end) = five_years();

    let report = analyzer
        .verify(&["AAPL", "MSFT", "TSLA", "KO", "GAPPY"], start, end)
        .await?;

    println!("{:<6} {:>8} {:>8} {:>8}  grade", "symbol", "computed", "reported", "dev");
    for c in &report.comparisons {
        println!(
            "{:<6} {:>8.3} {:>8.3} {:>8.3}  {:?}",
            c.symbol, c.computed, c.reported, c.deviation, c.grade
        );
    }
    if let Some(s) = report.summary {
        println!(
            "\n{} compared; mean deviation {:.3}, median {:.3}; accuracy {:.0}%",
            s.compared, s.mean_deviation, s.median_deviation, s.accuracy_score
        );
    }
    for f in &report.skipped {
        eprintln!("skipped {}: {}", f.symbol, f.error);
    }

    Ok(())
}
