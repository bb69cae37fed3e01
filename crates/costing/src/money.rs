//! Monetary rounding.

/// Round to 2 decimal places.
///
/// Rounds the exact binary value of `value`, so `0.015` (stored as
/// `0.01499…`) goes down to `0.01`. Exact ties go to the even cent.
/// Applied per composition line and to the markup percentage; sums of
/// already-rounded lines are left alone.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // `{:.2}` is correctly rounded from the exact value with ties to even;
    // scaling by 100 first would round twice.
    let rounded = format!("{value:.2}").parse::<f64>().unwrap_or(value);
    // Normalise -0.0 so an empty or tiny negative figure prints as 0.
    rounded + 0.0
}
