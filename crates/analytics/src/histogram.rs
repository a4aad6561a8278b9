use crate::error::AnalyticsError;
use crate::report::HistogramBin;

/// Bin count used by the delivery-time distribution when none is requested.
pub const DEFAULT_BINS: usize = 30;

/// Upper bound on the bin count a caller may ask for.
pub const MAX_BINS: usize = 1000;

/// Splits `values` into `bins` equal-width buckets spanning their min and max.
///
/// When every value is the same the range is widened by half a unit on each side.
/// An empty input yields no bins. `bins` must be in `1..=MAX_BINS`.
pub fn histogram(values: &[i64], bins: usize) -> Result<Vec<HistogramBin>, AnalyticsError> {
    if bins == 0 || bins > MAX_BINS {
        return Err(AnalyticsError::InvalidBinCount(bins));
    }
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return Ok(Vec::new());
    };

    let (lo, hi) = if min == max {
        (min as f64 - 0.5, max as f64 + 0.5)
    } else {
        (min as f64, max as f64)
    };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let slot = (((v as f64 - lo) / width).floor() as usize).min(bins - 1);
        counts[slot] += 1;
    }

    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + width * i as f64,
            upper: lo + width * (i + 1) as f64,
            count,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_value_once() {
        let values = vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let bins = histogram(&values, 5).unwrap();
        assert_eq!(bins.len(), 5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[4].upper, 10.0);
        // The maximum lands in the last bin, which is closed on the right.
        assert_eq!(bins[4].count, 3);
    }

    #[test]
    fn handles_negative_durations() {
        let bins = histogram(&[-2, -1, 0, 30], 2).unwrap();
        assert_eq!(bins[0].count, 3);
        assert_eq!(bins[1].count, 1);
    }

    #[test]
    fn constant_values_get_a_unit_range() {
        let bins = histogram(&[4, 4, 4], 30).unwrap();
        assert_eq!(bins.len(), 30);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
        assert_eq!(bins[0].lower, 3.5);
    }

    #[test]
    fn empty_input_and_zero_bins() {
        assert!(histogram(&[], DEFAULT_BINS).unwrap().is_empty());
        assert_eq!(histogram(&[1], 0), Err(AnalyticsError::InvalidBinCount(0)));
    }

    #[test]
    fn bin_count_is_capped() {
        assert_eq!(histogram(&[1, 2], MAX_BINS).unwrap().len(), MAX_BINS);
        assert_eq!(
            histogram(&[1, 2], MAX_BINS + 1),
            Err(AnalyticsError::InvalidBinCount(MAX_BINS + 1))
        );
        assert_eq!(histogram(&[1, 2], usize::MAX), Err(AnalyticsError::InvalidBinCount(usize::MAX)));
    }
}
