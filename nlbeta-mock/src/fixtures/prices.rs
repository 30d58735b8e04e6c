//! Synthetic daily closes generated from a shared market factor.
//!
//! Every equity follows `alpha + beta * market + noise` on each trading day,
//! so the beta recovered by the estimator lands near the profile's `beta`.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc, Weekday};
use nlbeta_core::PricePoint;

// 16:00 New York during standard time
const CLOSE: NaiveTime = match NaiveTime::from_hms_opt(21, 0, 0) {
    Some(t) => t,
    None => NaiveTime::MIN,
};

struct Profile {
    base: f64,
    beta: f64,
    alpha: f64,
    noise: f64,
    seed: f64,
    listed: Option<NaiveDate>,
    gaps: bool,
}

impl Profile {
    const fn equity(base: f64, beta: f64, alpha: f64, seed: f64) -> Self {
        Self {
            base,
            beta,
            alpha,
            noise: 0.004,
            seed,
            listed: None,
            gaps: false,
        }
    }
}

fn profile(s: &str) -> Option<Profile> {
    let p = match s {
        "^GSPC" => Profile {
            noise: 0.0,
            ..Profile::equity(2500.0, 1.0, 0.0, 0.0)
        },
        "SPY" => Profile {
            noise: 0.0005,
            ..Profile::equity(250.0, 1.0, -0.000_004, 2.9)
        },
        "AAPL" => Profile::equity(40.0, 1.25, 0.0004, 0.7),
        "MSFT" => Profile::equity(100.0, 1.05, 0.0003, 1.9),
        "TSLA" => Profile {
            noise: 0.006,
            ..Profile::equity(20.0, 2.1, 0.0002, 3.3)
        },
        "KO" => Profile::equity(45.0, 0.55, 0.0001, 4.1),
        "NEWCO" => Profile {
            listed: NaiveDate::from_ymd_opt(2024, 9, 3),
            ..Profile::equity(10.0, 1.5, 0.0, 5.6)
        },
        "GAPPY" => Profile {
            gaps: true,
            ..Profile::equity(30.0, 0.9, 0.0, 6.2)
        },
        _ => return None,
    };
    Some(p)
}

fn trading_days() -> Vec<DateTime<Utc>> {
    let (Some(mut d), Some(last)) = (
        NaiveDate::from_ymd_opt(2019, 1, 2),
        NaiveDate::from_ymd_opt(2024, 12, 31),
    ) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    while d <= last {
        if !matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
            out.push(d.and_time(CLOSE).and_utc());
        }
        match d.checked_add_days(Days::new(1)) {
            Some(next) => d = next,
            None => break,
        }
    }
    out
}

#[allow(clippy::cast_precision_loss)]
fn market_return(day: usize, ts: DateTime<Utc>) -> f64 {
    let t = day as f64;
    let month = f64::from((ts.year() - 2019) * 12) + f64::from(ts.month0());
    // monthly regime spread over ~21 sessions
    let regime = 0.04 * (month * 2.1).sin() / 21.0;
    0.0003 + regime + 0.009 * (t * 0.61).sin() + 0.006 * (t * 1.37 + 0.4).cos()
}

#[allow(clippy::cast_precision_loss)]
pub fn by_symbol(s: &str) -> Option<Vec<PricePoint>> {
    let p = profile(s)?;
    let mut price = p.base;
    let mut out = Vec::new();
    for (i, ts) in trading_days().into_iter().enumerate() {
        let idio = p.noise * (i as f64 * 0.93 + p.seed).sin();
        price *= 1.0 + p.alpha + p.beta * market_return(i, ts) + idio;
        if p.listed.is_some_and(|d| ts.date_naive() < d) {
            continue;
        }
        let close = if p.gaps && i % 17 == 5 {
            f64::NAN
        } else if p.gaps && i % 29 == 3 {
            0.0
        } else {
            price
        };
        out.push(PricePoint::new(ts, close));
    }
    Some(out)
}
