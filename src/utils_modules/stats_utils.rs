#[doc = r#"
    Linearly interpolated percentile over an ascending-sorted slice.

    `p` is in [0, 1]. Matches the interpolation used by spreadsheet tools:
    the rank `p * (n - 1)` is split into its integer and fractional parts and
    the two neighbouring values are blended.

    # Panics
    Never; an empty slice returns 0.0.
"#]
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank: f64 = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower_idx: usize = rank.floor() as usize;
    let upper_idx: usize = rank.ceil() as usize;
    let fraction: f64 = rank - lower_idx as f64;

    sorted[lower_idx] + (sorted[upper_idx] - sorted[lower_idx]) * fraction
}

#[doc = "Five-number summary (min, q1, median, q3, max) of an ascending-sorted slice"]
pub fn five_number_summary(sorted: &[f64]) -> (f64, f64, f64, f64, f64) {
    (
        sorted.first().copied().unwrap_or(0.0),
        percentile(sorted, 0.25),
        percentile(sorted, 0.5),
        percentile(sorted, 0.75),
        sorted.last().copied().unwrap_or(0.0),
    )
}

#[doc = "Sample standard deviation (n - 1 denominator)"]
pub fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

#[doc = r#"
    Automatic histogram bin edges over `sorted` values.

    Bin count is the larger of the Freedman-Diaconis and Sturges estimates,
    so that low-spread data still gets a sensible number of bins. Returns
    `bin_count + 1` ascending edges spanning [min, max]; degenerate input
    (all values equal, or fewer than two values) gets a single unit-wide bin
    centred on the value.
"#]
pub fn auto_bin_edges(sorted: &[f64]) -> Vec<f64> {
    if sorted.is_empty() {
        return Vec::new();
    }

    let min_val: f64 = sorted[0];
    let max_val: f64 = sorted[sorted.len() - 1];

    if sorted.len() < 2 || (max_val - min_val) <= f64::EPSILON {
        return vec![min_val - 0.5, min_val + 0.5];
    }

    let n: f64 = sorted.len() as f64;
    let sturges_bins: usize = (n.log2().ceil() as usize) + 1;

    let iqr: f64 = percentile(sorted, 0.75) - percentile(sorted, 0.25);
    let fd_width: f64 = 2.0 * iqr / n.cbrt();
    let fd_bins: usize = if fd_width > 0.0 {
        ((max_val - min_val) / fd_width).ceil() as usize
    } else {
        0
    };

    let bin_count: usize = sturges_bins.max(fd_bins).max(1);
    let bin_width: f64 = (max_val - min_val) / bin_count as f64;

    (0..=bin_count)
        .map(|i| min_val + bin_width * i as f64)
        .collect()
}

#[doc = "Counts how many of `sorted` fall in each bin; the last bin is right-inclusive"]
pub fn bin_counts(sorted: &[f64], edges: &[f64]) -> Vec<usize> {
    if edges.len() < 2 {
        return Vec::new();
    }

    let mut counts: Vec<usize> = vec![0; edges.len() - 1];

    for &value in sorted {
        let mut placed = false;
        for bin_idx in 0..counts.len() - 1 {
            if value >= edges[bin_idx] && value < edges[bin_idx + 1] {
                counts[bin_idx] += 1;
                placed = true;
                break;
            }
        }
        /* values on the final edge belong to the last bin */
        if !placed && value >= edges[counts.len() - 1] && value <= edges[counts.len()] {
            let last_idx = counts.len() - 1;
            counts[last_idx] += 1;
        }
    }

    counts
}
