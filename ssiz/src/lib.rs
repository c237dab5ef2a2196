#![warn(missing_docs)]
//! # SSIZ
//!
//! Monte Carlo sample-size analysis for tree-ring fire-history chronologies.
//!
//! Given a pool of fire-scar series, SSIZ estimates how many samples a
//! fire-frequency study needs: it sweeps candidate sample sizes from one up
//! to the pool size, repeatedly resamples the pool at each size, converts
//! each draw into a fires-per-century rate over the analysis segment, and
//! summarizes every batch with descriptive and Weibull statistics.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ssiz::{CancellationToken, InMemoryReader, SsizConfig, SsizRunner};
//!
//! let reader = InMemoryReader::from_codes(1900, &rows)?;
//! let runner = SsizRunner::new(SsizConfig::default());
//! let run = runner.run(&reader, &[], &CancellationToken::new())?;
//! for record in &run.results {
//!     println!("n = {}: {:.2} fires/century", record.number_of_samples, record.mean);
//! }
//! ```

// Re-export the engine surface
pub use ssiz_core::{
    AnalysisModel, AnalysisResults, AnalysisRun, CancellationToken, EventCode, EventType,
    FilterArrays, FireHistoryReader, InMemoryReader, ResamplingMode, RunMeta, Segment, Series,
    SeriesPool, SsizConfig, SsizError, SsizRunner, ThresholdFilter, YearCounts,
    adjust_segment_year_boundaries, default_segments, exclude_empty_segments, fires_by_year,
    resample,
};

// Re-export the numeric layer
pub use ssiz_stats::{
    DescriptiveSummary, UNDEFINED, Weibull, WeibullError, compute_descriptive, compute_percentile,
    la_gamma,
};
