mod common;
use common::{five_years, get_connector};
use nlbeta::{BetaAnalyzer, FailureKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = BetaAnalyzer::builder()
        .with_connector(get_connector())
        .build()?;
    let (start, end) = five_years();

    let batch = analyzer
        .batch()
        .symbols(&["AAPL", "MSFT", "TSLA", "KO", "NEWCO", "NOPE"])?
        .period(start, end)
        .run()
        .await?;

    println!("benchmark: {}", batch.benchmark);
    for r in &batch.reports {
        println!("{:<6} beta {:>6.3}  obs {}", r.symbol, r.beta, r.observations);
    }
    for f in &batch.failures {
        let why = match f.kind {
            FailureKind::InsufficientHistory => "not enough history",
            FailureKind::DataSource => "data source failed",
            FailureKind::Computation => "not computable",
            FailureKind::InvalidInput => "invalid input",
        };
        eprintln!("{:<6} skipped: {why} ({})", f.symbol, f.error);
    }

    Ok(())
}
