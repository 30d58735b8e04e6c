use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::series::{PricePoint, PriceSeries, ReturnPoint, ReturnSeries};
use nlbeta_types::{BetaError, SamplingMode};

fn local_date(ts: DateTime<Utc>, tz: Option<Tz>) -> NaiveDate {
    tz.map_or_else(|| ts.date_naive(), |tz| ts.with_timezone(&tz).date_naive())
}

fn as_utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn week_end(date: NaiveDate) -> Option<NaiveDate> {
    let to_sunday = 6 - date.weekday().num_days_from_monday();
    date.checked_add_days(Days::new(u64::from(to_sunday)))
}

fn month_end(date: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}

/// Period key for a timestamp.
///
/// Daily keeps the bar timestamp. Weekly and monthly map to the last calendar
/// day of the period (Sunday for Monday-start weeks) at 00:00 UTC, with the
/// period computed in `tz` when given.
#[must_use]
pub fn period_end(
    ts: DateTime<Utc>,
    sampling: SamplingMode,
    tz: Option<Tz>,
) -> Option<DateTime<Utc>> {
    match sampling {
        SamplingMode::Daily => Some(ts),
        SamplingMode::Weekly => week_end(local_date(ts, tz)).map(as_utc_midnight),
        SamplingMode::Monthly => month_end(local_date(ts, tz)).map(as_utc_midnight),
    }
}

/// Keep the last point of each bucket, keyed by the bucket.
///
/// Input must be sorted. A bucket earlier than the current one is folded into
/// it; points without a bucket are dropped.
fn sample_by<'a, I, F>(points: I, bucket_of: F) -> Vec<PricePoint>
where
    I: IntoIterator<Item = &'a PricePoint>,
    F: Fn(DateTime<Utc>) -> Option<DateTime<Utc>>,
{
    let mut out: Vec<PricePoint> = Vec::new();
    for p in points {
        let Some(bucket) = bucket_of(p.ts) else {
            continue;
        };
        match out.last_mut() {
            Some(last) if last.ts >= bucket => last.close = p.close,
            _ => out.push(PricePoint::new(bucket, p.close)),
        }
    }
    out
}

/// Sample a price series at `sampling` and compute simple returns.
///
/// Invalid rows are dropped before sampling, so a gap never becomes a zero
/// return and periods without a valid price are absent.
///
/// # Errors
/// Returns `InsufficientData` when fewer than two sampled prices remain.
pub fn build_returns(
    prices: &PriceSeries,
    sampling: SamplingMode,
) -> Result<ReturnSeries, BetaError> {
    #[cfg(feature = "tracing")]
    {
        let dropped = prices.len() - prices.valid_points().count();
        if dropped > 0 {
            tracing::debug!(
                symbol = prices.symbol(),
                dropped,
                "excluding invalid price rows"
            );
        }
    }

    let tz = prices.timezone();
    let sampled = sample_by(prices.valid_points(), |ts| period_end(ts, sampling, tz));
    if sampled.len() < 2 {
        return Err(BetaError::InsufficientData {
            symbol: prices.symbol().to_string(),
            points: sampled.len(),
        });
    }

    let returns = sampled
        .windows(2)
        .map(|w| ReturnPoint {
            ts: w[1].ts,
            value: (w[1].close - w[0].close) / w[0].close,
        })
        .collect();
    Ok(ReturnSeries::from_parts(
        prices.symbol().to_string(),
        sampling,
        returns,
    ))
}
