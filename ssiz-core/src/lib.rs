#![warn(missing_docs)]
//! SSIZ Core - Sample-Size Analysis Engine
//!
//! Estimates, by Monte Carlo resampling of tree-ring fire-scar series, the
//! minimum number of samples needed for statistically reliable fire-frequency
//! estimates. The engine sweeps candidate sample sizes from one up to the
//! size of the series pool; for each size it repeatedly resamples the pool,
//! aggregates fire events per year over the analysis segment, converts the
//! count of fire years into a fires-per-century rate, and summarizes the
//! resulting distribution with descriptive and Weibull statistics.
//!
//! ## Pipeline Overview
//!
//! ```text
//! FireHistoryReader (per-series coded event data)
//!       │
//!       ▼
//! ┌─────────────┐
//! │   model     │  Build pool, apply restrictions, seed generators
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │  resample   │  Draw sub-pools with/without replacement
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │  aggregate  │  Count fires per year, filter, trim to segment
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   engine    │  Segment × sample-size × simulation sweep
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   results   │  Descriptive + Weibull summary per batch (parallel)
//! └─────────────┘
//! ```

mod aggregate;
mod config;
mod engine;
mod error;
mod event;
mod model;
mod reader;
mod resample;
mod results;
mod segment;

pub use aggregate::{ThresholdFilter, YearCounts, fires_by_year};
pub use config::SsizConfig;
pub use engine::{AnalysisRun, CancellationToken, RunMeta, SsizRunner};
pub use error::SsizError;
pub use event::{EventCode, EventType, Series, SeriesPool};
pub use model::AnalysisModel;
pub use reader::{FilterArrays, FireHistoryReader, InMemoryReader};
pub use resample::{ResamplingMode, resample};
pub use results::AnalysisResults;
pub use segment::{
    Segment, adjust_segment_year_boundaries, default_segments, exclude_empty_segments,
};
