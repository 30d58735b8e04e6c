//! Moments and least-squares helpers over `f64` slices.
//!
//! Functions return `None` instead of NaN when a statistic is undefined for
//! the input (too few values, mismatched lengths, or a zero denominator).

use nlbeta_types::VarianceConvention;

#[allow(clippy::cast_precision_loss)]
const fn as_f64(n: usize) -> f64 {
    n as f64
}

/// Arithmetic mean.
#[must_use]
pub fn mean(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    Some(xs.iter().sum::<f64>() / as_f64(xs.len()))
}

/// Covariance of two equally long slices under `convention`.
#[must_use]
pub fn covariance(xs: &[f64], ys: &[f64], convention: VarianceConvention) -> Option<f64> {
    let n = xs.len();
    if n != ys.len() || n <= convention.ddof() {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;
    let s: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mx) * (y - my)).sum();
    Some(s / as_f64(n - convention.ddof()))
}

/// Variance under `convention`.
#[must_use]
pub fn variance(xs: &[f64], convention: VarianceConvention) -> Option<f64> {
    covariance(xs, xs, convention)
}

/// Standard deviation under `convention`.
#[must_use]
pub fn std_dev(xs: &[f64], convention: VarianceConvention) -> Option<f64> {
    variance(xs, convention).map(f64::sqrt)
}

/// True when every value equals the first (or the slice is empty).
#[must_use]
pub fn is_constant(xs: &[f64]) -> bool {
    xs.first().is_none_or(|first| xs.iter().all(|x| x == first))
}

/// Pearson correlation; `None` when either side is constant.
#[must_use]
pub fn correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if is_constant(xs) || is_constant(ys) {
        return None;
    }
    // The convention cancels out.
    let c = VarianceConvention::Population;
    let r = covariance(xs, ys, c)? / (std_dev(xs, c)? * std_dev(ys, c)?);
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Ordinary least squares fit of `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Slope.
    pub slope: f64,
    /// Intercept.
    pub intercept: f64,
    /// Standard error of the slope; `None` with fewer than three points.
    pub slope_std_error: Option<f64>,
}

/// Fit `ys` on `xs` by least squares over centered sums.
///
/// The slope is `Sxy / Sxx` around the means and the intercept passes through
/// the means, so the slope agrees with `covariance / variance` under either
/// convention. `None` when lengths differ, fewer than two points are given, or
/// `xs` is constant.
#[must_use]
pub fn ols(xs: &[f64], ys: &[f64]) -> Option<LinearFit> {
    let n = xs.len();
    if n != ys.len() || n < 2 || is_constant(xs) {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;
    let (mut sxx, mut sxy) = (0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        sxx += dx * dx;
        sxy += dx * (y - my);
    }
    if !(sxx > 0.0 && sxx.is_finite()) {
        return None;
    }
    let slope = sxy / sxx;
    let intercept = slope.mul_add(-mx, my);

    let slope_std_error = (n > 2).then(|| {
        let ssr: f64 = xs
            .iter()
            .zip(ys)
            .map(|(x, y)| {
                let resid = y - slope.mul_add(*x, intercept);
                resid * resid
            })
            .sum();
        (ssr / as_f64(n - 2)).sqrt() / sxx.sqrt()
    });

    Some(LinearFit {
        slope,
        intercept,
        slope_std_error,
    })
}
