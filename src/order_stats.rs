//! Median and percentile over sorted values
//!
//! Both functions index into the slice directly and expect ascending input.
//! [`sort_values`] does the one sort per source when the input is not
//! already known to be ordered.

/// Sort ascending. NaN values sort after every number instead of panicking.
pub fn sort_values(values: &mut [f64]) {
    values.sort_unstable_by(|a, b| a.total_cmp(b));
}

/// Median of ascending `values`.
///
/// For an even length this is the lower of the two middle elements, not
/// their mean. Empty input yields `0`.
pub fn median(values: &[f64]) -> f64 {
    let l = values.len();
    if l == 0 {
        return 0.0;
    }
    if l % 2 == 1 {
        return values[l / 2];
    }
    values[l / 2 - 1]
}

/// Value at percentile `rank` (1..=100) of ascending `values`.
///
/// The index is `floor(len * rank / 100) - 1`, clamped into the slice.
/// A rank above 100 counts as 100. A rank `<= 0` or empty input yields `0`.
pub fn percentile(values: &[f64], rank: i64) -> f64 {
    if rank <= 0 || values.is_empty() {
        return 0.0;
    }

    let rank = rank.min(100);
    let len = values.len() as i64;
    let index = (len * rank / 100 - 1).clamp(0, len - 1);
    values[index as usize]
}
