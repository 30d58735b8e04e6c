use std::cmp::Ordering;

use crate::series::{AlignedReturnPair, Observation, ReturnSeries};
use nlbeta_types::BetaError;

/// Join two return series on identical timestamps.
///
/// Observations are kept only where both series have a return; the join never
/// pairs values by position.
///
/// # Errors
/// - `InvalidArg` when the series use different sampling modes.
/// - `InsufficientSample` when fewer than `min_sample` timestamps intersect.
pub fn align(
    asset: &ReturnSeries,
    benchmark: &ReturnSeries,
    min_sample: usize,
) -> Result<AlignedReturnPair, BetaError> {
    if asset.sampling() != benchmark.sampling() {
        return Err(BetaError::InvalidArg(format!(
            "cannot align {} {} returns with {} {} returns",
            asset.symbol(),
            asset.sampling(),
            benchmark.symbol(),
            benchmark.sampling()
        )));
    }

    let a = asset.points();
    let b = benchmark.points();
    let mut observations = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].ts.cmp(&b[j].ts) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                observations.push(Observation {
                    ts: a[i].ts,
                    asset: a[i].value,
                    benchmark: b[j].value,
                });
                i += 1;
                j += 1;
            }
        }
    }

    if observations.len() < min_sample {
        return Err(BetaError::insufficient_sample(min_sample, observations.len()));
    }

    Ok(AlignedReturnPair::from_parts(
        asset.symbol().to_string(),
        benchmark.symbol().to_string(),
        asset.sampling(),
        observations,
    ))
}
