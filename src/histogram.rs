//! Binning of the profit sequence for display.
//! Bins are equal-width, half-open `[lower, upper)` with the last bin closed,
//! and jointly cover `[min, max]` of the input.

use tracing::{debug, warn};

use crate::error::{Result, SimError};
use crate::models::{Histogram, HistogramBin, Marker, MarkerKind, Summary};
use crate::monte_carlo::quantile_sorted;

/// Upper bound on the automatically chosen bin count.
pub const MAX_AUTO_BINS: usize = 10_000;

/// Half-width of the single bin used when every value is identical.
const DEGENERATE_HALF_WIDTH: f64 = 0.5;

/// Reference lines for a summary: mean, median, ±1sd, ±2sd and the risk threshold.
pub fn markers_for(summary: &Summary) -> Vec<Marker> {
    let m = summary.mean;
    let sd = summary.sample_std;
    vec![
        Marker { kind: MarkerKind::Mean, value: m },
        Marker { kind: MarkerKind::Median, value: summary.median },
        Marker { kind: MarkerKind::PlusOneSd, value: m + sd },
        Marker { kind: MarkerKind::MinusOneSd, value: m - sd },
        Marker { kind: MarkerKind::PlusTwoSd, value: m + 2.0 * sd },
        Marker { kind: MarkerKind::MinusTwoSd, value: m - 2.0 * sd },
        Marker { kind: MarkerKind::RiskThreshold, value: summary.risk_threshold },
    ]
}

/// Bin count from the larger of the Sturges and Freedman-Diaconis estimates.
/// Falls back to Sturges alone when the interquartile range is zero.
pub fn auto_bin_count(sorted: &[f64]) -> usize {
    let n = sorted.len();
    if n < 2 {
        return 1;
    }
    let range = sorted[n - 1] - sorted[0];
    if range <= 0.0 {
        return 1;
    }

    let sturges = (n as f64).log2().ceil() as usize + 1;

    let iqr = quantile_sorted(sorted, 0.75) - quantile_sorted(sorted, 0.25);
    let fd = if iqr > 0.0 {
        let width = 2.0 * iqr / (n as f64).cbrt();
        (range / width).ceil() as usize
    } else {
        0
    };

    sturges.max(fd).clamp(1, MAX_AUTO_BINS)
}

/// Build a histogram with an automatically chosen bin count.
pub fn build(profits: &[f64], markers: Vec<Marker>) -> Result<Histogram> {
    if profits.is_empty() {
        return Err(SimError::insufficient_samples(1, 0));
    }
    let mut finite: Vec<f64> = profits.iter().copied().filter(|v| v.is_finite()).collect();
    finite.sort_by(f64::total_cmp);
    let bin_count = auto_bin_count(&finite);
    Ok(bin_values(&finite, profits.len() - finite.len(), bin_count, markers))
}

/// Build a histogram with exactly `bin_count` bins (unless degenerate).
pub fn build_with_bins(profits: &[f64], markers: Vec<Marker>, bin_count: usize) -> Result<Histogram> {
    if bin_count == 0 {
        return Err(SimError::invalid_parameter("bins", "must be > 0", bin_count));
    }
    if profits.is_empty() {
        return Err(SimError::insufficient_samples(1, 0));
    }
    let finite: Vec<f64> = profits.iter().copied().filter(|v| v.is_finite()).collect();
    Ok(bin_values(&finite, profits.len() - finite.len(), bin_count, markers))
}

/// Single padded bin around `center`.
fn single_bin(center: f64, count: usize, non_finite: usize, markers: Vec<Marker>) -> Histogram {
    Histogram {
        bins: vec![HistogramBin {
            lower: center - DEGENERATE_HALF_WIDTH,
            upper: center + DEGENERATE_HALF_WIDTH,
            count,
        }],
        markers,
        degenerate: true,
        non_finite,
    }
}

/// Bin the finite values; `non_finite` values were dropped by the caller and
/// are reported on the histogram instead of being binned.
fn bin_values(values: &[f64], non_finite: usize, bin_count: usize, markers: Vec<Marker>) -> Histogram {
    let min = values.iter().copied().reduce(f64::min);
    let max = values.iter().copied().reduce(f64::max);
    let (min, max) = match (min, max) {
        (Some(min), Some(max)) => (min, max),
        _ => {
            warn!(non_finite, "no finite profits to bin");
            return single_bin(0.0, 0, non_finite, markers);
        }
    };
    if non_finite > 0 {
        warn!(non_finite, "profits overflowed, binning finite values only");
    }

    if max <= min {
        warn!(value = min, "all profits identical, using a single bin");
        return single_bin(min, values.len(), non_finite, markers);
    }

    let k = bin_count as f64;
    let range_overflows = !(max - min).is_finite();
    let width = if range_overflows {
        max / k - min / k
    } else {
        (max - min) / k
    };
    // Halve before stepping when the full range does not fit in an f64
    let edge = |i: usize| {
        if range_overflows {
            2.0 * (min / 2.0 + i as f64 * (width / 2.0))
        } else {
            min + i as f64 * width
        }
    };
    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            lower: edge(i),
            upper: edge(i + 1),
            count: 0,
        })
        .collect();
    // Neighbouring edges share one expression, so bins stay contiguous;
    // only the outer edges are pinned to the exact extremes.
    bins[0].lower = min;
    bins[bin_count - 1].upper = max;

    // Locate each value by the stored edges: the first bin whose upper edge
    // exceeds it, or the closed last bin.
    let uppers: Vec<f64> = bins[..bin_count - 1].iter().map(|b| b.upper).collect();
    for &value in values {
        let idx = uppers.partition_point(|&upper| upper <= value);
        bins[idx].count += 1;
    }
    debug!(bins = bin_count, width, "built histogram");

    Histogram {
        bins,
        markers,
        degenerate: non_finite > 0,
        non_finite,
    }
}
