/// Percentage of `total` represented by `count`.
///
/// `None` when the total is zero or either input is non-finite.
pub fn share(count: f64, total: f64) -> Option<f64> {
    if total == 0.0 || !total.is_finite() || !count.is_finite() {
        return None;
    }
    Some(100.0 * count / total)
}
