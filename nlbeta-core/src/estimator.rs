use std::borrow::Cow;

use crate::series::{AlignedReturnPair, Observation, ReturnSeries};
use crate::stats::{self, correlation, is_constant, mean, ols, std_dev, variance};
use crate::timeseries::align::align;
use nlbeta_types::{
    BetaError, BetaMethod, BetaReport, DirectionalBeta, Estimate, EstimatorConfig, Unavailable,
    VarianceConvention,
};

/// Observations partitioned by the sign of the benchmark return.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DirectionalSplit {
    /// Benchmark return strictly above zero.
    pub positive: Vec<Observation>,
    /// Benchmark return strictly below zero.
    pub negative: Vec<Observation>,
    /// Benchmark return exactly zero.
    pub zero: Vec<Observation>,
}

impl DirectionalSplit {
    /// Partition the observations of `pair`, preserving order within each side.
    #[must_use]
    pub fn of(pair: &AlignedReturnPair) -> Self {
        let mut split = Self::default();
        for o in pair.observations() {
            if o.benchmark > 0.0 {
                split.positive.push(*o);
            } else if o.benchmark < 0.0 {
                split.negative.push(*o);
            } else {
                split.zero.push(*o);
            }
        }
        split
    }

    /// Observations across all three subsets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.positive.len() + self.negative.len() + self.zero.len()
    }
}

/// Beta of `ys` on `xs` by `method`.
///
/// # Errors
/// - `ZeroVariance` when `xs` is constant or its variance is not positive.
/// - `InsufficientSample` when too few values are given for `convention`.
pub(crate) fn beta_of(
    xs: &[f64],
    ys: &[f64],
    convention: VarianceConvention,
    method: BetaMethod,
) -> Result<f64, BetaError> {
    let too_few = || BetaError::insufficient_sample(convention.ddof() + 1, xs.len());
    if is_constant(xs) {
        return Err(BetaError::ZeroVariance);
    }
    let var_b = variance(xs, convention).ok_or_else(too_few)?;
    if !(var_b > 0.0 && var_b.is_finite()) {
        return Err(BetaError::ZeroVariance);
    }
    let beta = match method {
        BetaMethod::CovarianceRatio => {
            stats::covariance(xs, ys, convention).ok_or_else(too_few)? / var_b
        }
        BetaMethod::RegressionSlope => ols(xs, ys).ok_or(BetaError::ZeroVariance)?.slope,
        BetaMethod::CorrelationVolatility => match correlation(xs, ys) {
            Some(r) => r * std_dev(ys, convention).ok_or_else(too_few)? / var_b.sqrt(),
            // constant asset: zero covariance
            None => 0.0,
        },
    };
    if beta.is_finite() {
        Ok(beta)
    } else {
        Err(BetaError::ZeroVariance)
    }
}

/// Computes beta and its diagnostics over aligned return pairs.
///
/// Holds only its configuration; estimation is pure and deterministic, so one
/// estimator can serve many concurrent callers.
#[derive(Debug, Clone)]
pub struct BetaEstimator {
    config: EstimatorConfig,
}

impl BetaEstimator {
    /// Build an estimator.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the configuration fails validation.
    pub fn new(config: EstimatorConfig) -> Result<Self, BetaError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Align two return series and estimate.
    ///
    /// # Errors
    /// Propagates alignment and estimation failures.
    pub fn estimate_returns(
        &self,
        asset: &ReturnSeries,
        benchmark: &ReturnSeries,
    ) -> Result<BetaReport, BetaError> {
        let pair = align(asset, benchmark, self.config.min_sample_size)?;
        self.estimate(&pair)
    }

    /// Partition the (windowed) pair by benchmark sign.
    #[must_use]
    pub fn directional(&self, pair: &AlignedReturnPair) -> DirectionalSplit {
        DirectionalSplit::of(&self.window(pair))
    }

    fn window<'a>(&self, pair: &'a AlignedReturnPair) -> Cow<'a, AlignedReturnPair> {
        match self.config.max_observations {
            Some(n) if n < pair.len() => Cow::Owned(pair.tail(n)),
            _ => Cow::Borrowed(pair),
        }
    }

    fn directional_beta(&self, subset: &[Observation]) -> DirectionalBeta {
        let samples = subset.len();
        let required = self.config.min_subset_size;
        if samples < required {
            return DirectionalBeta {
                samples,
                beta: Estimate::Unavailable(Unavailable::BelowMinimum {
                    required,
                    actual: samples,
                }),
            };
        }
        let xs: Vec<f64> = subset.iter().map(|o| o.benchmark).collect();
        let ys: Vec<f64> = subset.iter().map(|o| o.asset).collect();
        let beta = match beta_of(&xs, &ys, self.config.variance_convention, self.config.method) {
            Ok(b) => Estimate::Available(b),
            Err(BetaError::ZeroVariance) => Estimate::Unavailable(Unavailable::ZeroVariance),
            Err(_) => Estimate::Unavailable(Unavailable::MissingInput),
        };
        DirectionalBeta { samples, beta }
    }

    /// Estimate beta and diagnostics for an aligned pair.
    ///
    /// The trailing-window limit is applied first when configured.
    ///
    /// # Errors
    /// - `InsufficientSample` when the pair is shorter than `min_sample_size`.
    /// - `InvalidArg` when `periods_per_year` does not match the pair's sampling.
    /// - `ZeroVariance` when the benchmark returns are constant.
    pub fn estimate(&self, pair: &AlignedReturnPair) -> Result<BetaReport, BetaError> {
        let pair = self.window(pair);
        let n = pair.len();
        let required = self.config.min_sample_size;
        if n < required {
            return Err(BetaError::insufficient_sample(required, n));
        }
        if let Some(ppy) = self.config.periods_per_year
            && ppy != pair.sampling().periods_per_year()
        {
            return Err(BetaError::InvalidArg(format!(
                "periods_per_year {ppy} does not match {} sampling ({})",
                pair.sampling(),
                pair.sampling().periods_per_year()
            )));
        }
        let (Some(start), Some(end)) = (pair.start(), pair.end()) else {
            return Err(BetaError::insufficient_sample(required, n));
        };

        let conv = self.config.variance_convention;
        let too_few = || BetaError::insufficient_sample(required, n);
        let xs = pair.benchmark_returns();
        let ys = pair.asset_returns();

        let beta = beta_of(&xs, &ys, conv, self.config.method)?;
        let fit = ols(&xs, &ys).ok_or(BetaError::ZeroVariance)?;
        let correlation = correlation(&xs, &ys);

        let split = DirectionalSplit::of(&pair);
        let positive = self.directional_beta(&split.positive);
        let negative = self.directional_beta(&split.negative);
        let beta_ratio = match (positive.beta, negative.beta) {
            (Estimate::Available(_), Estimate::Available(neg)) if neg == 0.0 => {
                Estimate::Unavailable(Unavailable::ZeroDenominator)
            }
            (Estimate::Available(pos), Estimate::Available(neg)) => Estimate::Available(pos / neg),
            _ => Estimate::Unavailable(Unavailable::MissingInput),
        };

        let mean_return = mean(&ys).ok_or_else(too_few)?;
        let benchmark_mean_return = mean(&xs).ok_or_else(too_few)?;
        let volatility = std_dev(&ys, conv).ok_or_else(too_few)?;
        let benchmark_volatility = std_dev(&xs, conv).ok_or_else(too_few)?;
        let annualizer = self.config.periods_per_year.map(|p| f64::from(p).sqrt());

        Ok(BetaReport {
            symbol: pair.asset_symbol().to_string(),
            benchmark: pair.benchmark_symbol().to_string(),
            sampling: pair.sampling(),
            method: self.config.method,
            variance_convention: conv,
            beta,
            correlation,
            r_squared: correlation.map(|r| r * r),
            alpha: fit.intercept,
            standard_error: fit.slope_std_error,
            positive,
            negative,
            zero_samples: split.zero.len(),
            beta_ratio,
            mean_return,
            benchmark_mean_return,
            volatility,
            benchmark_volatility,
            annualized_volatility: annualizer.map(|k| volatility * k),
            benchmark_annualized_volatility: annualizer.map(|k| benchmark_volatility * k),
            return_to_volatility: (volatility > 0.0).then(|| mean_return / volatility),
            observations: n,
            start,
            end,
        })
    }
}
