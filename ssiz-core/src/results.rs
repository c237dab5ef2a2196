//! Analysis Result Records
//!
//! One record per (segment, sample-size) combination, built from that
//! combination's simulation batch and immutable afterwards.

use serde::{Deserialize, Serialize};
use ssiz_stats::{UNDEFINED, Weibull, compute_descriptive};
use tracing::warn;

use crate::segment::Segment;

/// Descriptive and Weibull statistics for one simulation batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// Candidate sample size the batch was drawn at.
    pub number_of_samples: usize,
    /// Segment the batch was aggregated over.
    pub segment: Segment,
    /// Mean fires-per-century rate across simulations.
    pub mean: f64,
    /// Sample standard deviation across simulations.
    pub std_dev: f64,
    /// Median rate across simulations.
    pub median: f64,
    /// Lower bound of the 95% interval (2.5th percentile).
    pub ci95_lower: f64,
    /// Upper bound of the 95% interval (97.5th percentile).
    pub ci95_upper: f64,
    /// Lower bound of the 99% interval (0.5th percentile).
    pub ci99_lower: f64,
    /// Upper bound of the 99% interval (99.5th percentile).
    pub ci99_upper: f64,
    /// Mean of the fitted Weibull distribution.
    pub weibull_mean: f64,
    /// Median of the fitted Weibull distribution.
    pub weibull_median: f64,
    /// 2.5 exceedence percentile of the fitted Weibull.
    pub weibull_ci95_lower: f64,
    /// 97.5 exceedence percentile of the fitted Weibull.
    pub weibull_ci95_upper: f64,
    /// 99.0 exceedence percentile of the fitted Weibull.
    pub weibull_ci99: f64,
}

impl AnalysisResults {
    /// Summarize one simulation batch.
    ///
    /// The Weibull fit needs strictly positive rates; a batch containing a
    /// zero-fire simulation cannot be fitted, so its Weibull columns carry
    /// the [`UNDEFINED`] sentinel while the descriptive columns remain
    /// valid.
    pub fn from_simulations(number_of_samples: usize, segment: Segment, samples: &[f64]) -> Self {
        let summary = compute_descriptive(samples);

        let (weibull_mean, weibull_median, weibull_ci95_lower, weibull_ci95_upper, weibull_ci99) =
            match Weibull::fit(samples) {
                Ok(w) => (
                    w.mean(),
                    w.median(),
                    w.exceedence_percentile(2.5),
                    w.exceedence_percentile(97.5),
                    w.exceedence_percentile(99.0),
                ),
                Err(err) => {
                    warn!(number_of_samples, %err, "Weibull fit unavailable for batch");
                    (UNDEFINED, UNDEFINED, UNDEFINED, UNDEFINED, UNDEFINED)
                }
            };

        AnalysisResults {
            number_of_samples,
            segment,
            mean: summary.mean,
            std_dev: summary.std_dev,
            median: summary.median,
            ci95_lower: summary.ci95.0,
            ci95_upper: summary.ci95.1,
            ci99_lower: summary.ci99.0,
            ci99_upper: summary.ci99.1,
            weibull_mean,
            weibull_median,
            weibull_ci95_lower,
            weibull_ci95_upper,
            weibull_ci99,
        }
    }
}
