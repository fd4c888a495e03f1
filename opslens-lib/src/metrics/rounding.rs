/// Round `value` to `decimals` decimal places.
///
/// The exact binary value is rounded, with ties going to the even digit, so
/// `0.125` becomes `0.12` at two places. Rounding is symmetric:
/// `round_to(-x, d) == -round_to(x, d)`.
#[must_use]
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Convert a line count to a metric value.
#[expect(clippy::cast_precision_loss, reason = "line counts never approach 2^52")]
#[must_use]
pub const fn count_value(count: usize) -> f64 {
    count as f64
}
