mod common;
use common::{five_years, get_connector};
use nlbeta::{BetaAnalyzer, Estimate};

fn show(label: &str, e: Estimate) -> String {
    match e {
        Estimate::Available(v) => format!("{label} {v:.3}"),
        Estimate::Unavailable(why) => format!("{label} n/a ({why:?})"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build the analyzer with default settings: monthly returns vs ^GSPC (then SPY).
    let analyzer = BetaAnalyzer::builder()
        .with_connector(get_connector())
        .build()?;

    // 2. Estimate over five years.
    let (start, end) = five_years();
    let r = analyzer.analyze("AAPL", start, end).await?;

    // 3. Print the headline figures.
    println!(
        "{} vs {}: beta {:.3} over {} {} observations",
        r.symbol, r.benchmark, r.beta, r.observations, r.sampling
    );
    if let (Some(c), Some(r2)) = (r.correlation, r.r_squared) {
        println!("  correlation {c:.3}, R² {r2:.3}");
    }
    println!("  alpha {:.5} per period", r.alpha);
    if let Some(se) = r.standard_error {
        println!("  standard error {se:.4}");
    }
    if let Some(v) = r.annualized_volatility {
        println!("  annualized volatility {:.1}%", v * 100.0);
    }
    println!(
        "  {} ({} obs), {} ({} obs), {}",
        show("up-market", r.positive.beta),
        r.positive.samples,
        show("down-market", r.negative.beta),
        r.negative.samples,
        show("ratio", r.beta_ratio),
    );

    Ok(())
}
