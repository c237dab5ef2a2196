//! Descriptive Statistics
//!
//! Summarizes a batch of simulated fires-per-century rates: mean, sample
//! standard deviation, median, and percentile-based 95%/99% confidence
//! intervals. Every simulation value participates; the batch is the
//! distribution of interest, so nothing is treated as an outlier.

/// Descriptive summary of one simulation batch.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveSummary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (n − 1 denominator).
    pub std_dev: f64,
    /// Median (50th percentile).
    pub median: f64,
    /// 95% interval: (2.5th, 97.5th) percentiles.
    pub ci95: (f64, f64),
    /// 99% interval: (0.5th, 99.5th) percentiles.
    pub ci99: (f64, f64),
    /// Number of values summarized.
    pub sample_count: usize,
}

/// Compute a single percentile with linear interpolation between ranks.
pub fn compute_percentile(samples: &[f64], percentile: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    if samples.len() == 1 {
        return samples[0];
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = (percentile / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let fraction = rank - lower as f64;

    sorted[lower] + fraction * (sorted[upper] - sorted[lower])
}

/// Summarize a simulation batch.
///
/// An empty batch yields an all-zero summary rather than an error; the
/// orchestrator never produces one, but callers replaying persisted runs
/// might.
pub fn compute_descriptive(samples: &[f64]) -> DescriptiveSummary {
    if samples.is_empty() {
        return DescriptiveSummary {
            mean: 0.0,
            std_dev: 0.0,
            median: 0.0,
            ci95: (0.0, 0.0),
            ci99: (0.0, 0.0),
            sample_count: 0,
        };
    }

    let n = samples.len();
    let mean = samples.iter().sum::<f64>() / n as f64;

    let std_dev = if n < 2 {
        0.0
    } else {
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    };

    DescriptiveSummary {
        mean,
        std_dev,
        median: compute_percentile(samples, 50.0),
        ci95: (
            compute_percentile(samples, 2.5),
            compute_percentile(samples, 97.5),
        ),
        ci99: (
            compute_percentile(samples, 0.5),
            compute_percentile(samples, 99.5),
        ),
        sample_count: n,
    }
}
