use serde::{Deserialize, Serialize};

use crate::estimator::beta_of;
use crate::series::AlignedReturnPair;
use nlbeta_types::{BetaError, BetaMethod, Estimate, RollingBeta, Unavailable, VarianceConvention};

/// Covariance-ratio beta over every trailing window of `window` observations.
///
/// Entry `k` covers observations `k..k + window` and is stamped with the last
/// of them. Windows with a constant benchmark are reported as unavailable.
///
/// # Errors
/// - `InvalidArg` when `window < 2`.
/// - `InsufficientSample` when the pair is shorter than `window`.
pub fn rolling_beta(
    pair: &AlignedReturnPair,
    window: usize,
    convention: VarianceConvention,
) -> Result<Vec<RollingBeta>, BetaError> {
    if window < 2 {
        return Err(BetaError::InvalidArg(format!(
            "rolling window must be at least 2, got {window}"
        )));
    }
    if pair.len() < window {
        return Err(BetaError::insufficient_sample(window, pair.len()));
    }
    let xs = pair.benchmark_returns();
    let ys = pair.asset_returns();
    let out = pair
        .observations()
        .windows(window)
        .enumerate()
        .map(|(k, w)| {
            let span = k..k + window;
            let beta = match beta_of(
                &xs[span.clone()],
                &ys[span],
                convention,
                BetaMethod::CovarianceRatio,
            ) {
                Ok(b) => Estimate::Available(b),
                Err(BetaError::ZeroVariance) => Estimate::Unavailable(Unavailable::ZeroVariance),
                Err(_) => Estimate::Unavailable(Unavailable::MissingInput),
            };
            RollingBeta {
                end: w[window - 1].ts,
                beta,
            }
        })
        .collect();
    Ok(out)
}

/// Range and mean of the available entries of a rolling series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingSummary {
    /// Total windows.
    pub windows: usize,
    /// Windows with an available beta.
    pub available: usize,
    /// Smallest available beta.
    pub min: f64,
    /// Largest available beta.
    pub max: f64,
    /// Mean of available betas.
    pub mean: f64,
}

impl RollingSummary {
    /// Summarize a rolling series; `None` when no window has an available beta.
    #[must_use]
    pub fn from_series(series: &[RollingBeta]) -> Option<Self> {
        let values: Vec<f64> = series.iter().filter_map(|r| r.beta.value()).collect();
        let mean = crate::stats::mean(&values)?;
        Some(Self {
            windows: series.len(),
            available: values.len(),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean,
        })
    }
}
