//! Statistical helper functions for the DEDI pipeline.
//!
//! Every function here ignores NaN entries, which mark both missing grid
//! cells and the 29 February placeholder of non-leap years.

mod grid;

pub use grid::nan_mean_sd_axis0;

/// Arithmetic mean of the non-NaN values. Returns NaN if there are none.
pub fn nan_mean(data: &[f64]) -> f64 {
    nan_moments(data.iter().copied(), 0).0
}

/// Variance of the non-NaN values with an `n - ddof` denominator.
///
/// `ddof = 1` gives the sample variance (matching R's `var()` and numpy's
/// `nanvar(ddof=1)`). Returns NaN when `n <= ddof`.
pub fn nan_variance(data: &[f64], ddof: usize) -> f64 {
    nan_moments(data.iter().copied(), ddof).1
}

/// Standard deviation of the non-NaN values with an `n - ddof` denominator.
/// Returns NaN when `n <= ddof`.
pub fn nan_sd(data: &[f64], ddof: usize) -> f64 {
    nan_variance(data, ddof).sqrt()
}

/// Two-pass mean and variance over the non-NaN items of `values`.
pub(crate) fn nan_moments<I>(values: I, ddof: usize) -> (f64, f64)
where
    I: Iterator<Item = f64> + Clone,
{
    let (n, sum) = values
        .clone()
        .filter(|x| !x.is_nan())
        .fold((0usize, 0.0), |(n, s), x| (n + 1, s + x));
    if n == 0 {
        return (f64::NAN, f64::NAN);
    }
    let mean = sum / n as f64;
    if n <= ddof {
        return (mean, f64::NAN);
    }
    let ss: f64 = values
        .filter(|x| !x.is_nan())
        .map(|x| (x - mean) * (x - mean))
        .sum();
    (mean, ss / (n - ddof) as f64)
}
