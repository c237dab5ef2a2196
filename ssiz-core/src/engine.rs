//! SSIZ Orchestrator
//!
//! Drives the segment × sample-size × simulation sweep. Simulations run
//! strictly sequentially so the per-sample-size generator states evolve in
//! a reproducible order; only the per-batch summary statistics are computed
//! in parallel, after a segment's simulations have all finished.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aggregate::{ThresholdFilter, fires_by_year};
use crate::config::SsizConfig;
use crate::error::SsizError;
use crate::event::EventType;
use crate::model::AnalysisModel;
use crate::reader::FireHistoryReader;
use crate::resample::ResamplingMode;
use crate::results::AnalysisResults;
use crate::segment::{
    Segment, adjust_segment_year_boundaries, default_segments, exclude_empty_segments,
};

/// Cooperative cancellation flag checked between simulations.
///
/// A full sweep is segments × sample sizes × simulations resampling passes,
/// which can be large; hosts hand a clone of this token to the UI thread
/// and trigger it to stop the run at the next simulation boundary.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// A fresh, untriggered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the run fails with [`SsizError::Cancelled`]
    /// at the next check.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Configuration and provenance captured with a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMeta {
    /// When the run started.
    pub timestamp: DateTime<Utc>,
    /// Simulations per (segment, sample-size) combination.
    pub simulations: usize,
    /// Base RNG seed.
    pub seed: u64,
    /// Resampling mode used.
    pub resampling: ResamplingMode,
    /// Threshold filter used.
    pub threshold: ThresholdFilter,
    /// Event class analyzed.
    pub event_type: EventType,
    /// Segments actually analyzed, after clamping and exclusion.
    pub segments: Vec<Segment>,
}

/// A finished analysis: the accumulator object returned by the runner.
///
/// Replaces any notion of process-wide result state; each call to
/// [`SsizRunner::run`] builds a fresh one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRun {
    /// Run configuration and provenance.
    pub meta: RunMeta,
    /// One record per (segment, sample size), in sweep order.
    pub results: Vec<AnalysisResults>,
}

impl AnalysisRun {
    /// Look up the record for a segment and candidate sample size.
    pub fn result_for(&self, segment: Segment, number_of_samples: usize) -> Option<&AnalysisResults> {
        self.results
            .iter()
            .find(|r| r.segment == segment && r.number_of_samples == number_of_samples)
    }
}

/// Runs the sample-size analysis for one configuration.
#[derive(Debug, Clone)]
pub struct SsizRunner {
    config: SsizConfig,
}

impl SsizRunner {
    /// Create a runner over the given configuration.
    pub fn new(config: SsizConfig) -> Self {
        SsizRunner { config }
    }

    /// Execute the full sweep.
    ///
    /// An empty `segments` slice auto-populates a single segment covering
    /// the whole analysis range. Supplied segments are clamped to the
    /// model's range; segments fully outside it are dropped. Configuration
    /// errors abort the run with no partial results.
    pub fn run(
        &self,
        reader: &dyn FireHistoryReader,
        segments: &[Segment],
        cancel: &CancellationToken,
    ) -> Result<AnalysisRun, SsizError> {
        let cfg = &self.config;
        if cfg.simulations == 0 {
            return Err(SsizError::NoSimulations);
        }

        let timestamp = Utc::now();
        let mut model = AnalysisModel::from_reader(reader, cfg.event_type, cfg.seed)?;
        if cfg.common_years_only {
            model.restrict_to_common_years();
        }
        if cfg.events_only {
            model.restrict_to_series_with_events();
        }

        let mut segments = if segments.is_empty() {
            default_segments(model.first_year(), model.last_year())?
        } else {
            segments.to_vec()
        };
        adjust_segment_year_boundaries(&mut segments, model.first_year(), model.last_year());
        exclude_empty_segments(&mut segments, model.first_year(), model.last_year());
        for segment in &segments {
            if !segment.within(model.first_year(), model.last_year()) {
                return Err(SsizError::SegmentOutOfBounds {
                    first: segment.first_year,
                    last: segment.last_year,
                    range_first: model.first_year(),
                    range_last: model.last_year(),
                });
            }
        }

        let filters = reader.filter_arrays(cfg.event_type);
        let year_axis = reader.year_array();
        let pool_size = model.number_of_series();

        let mut results = Vec::with_capacity(segments.len() * pool_size);
        for segment in &segments {
            let multiplier = segment.century_multiplier();

            let mut batches: Vec<(usize, Vec<f64>)> = Vec::with_capacity(pool_size);
            for sample_size in 1..=pool_size {
                let mut batch = Vec::with_capacity(cfg.simulations);
                for _ in 0..cfg.simulations {
                    if cancel.is_cancelled() {
                        return Err(SsizError::Cancelled);
                    }
                    let Some(sample) = model.resample_with_bank(sample_size, cfg.resampling)?
                    else {
                        warn!(sample_size, "no generator for sample size; skipping");
                        break;
                    };
                    let counts =
                        fires_by_year(&sample, cfg.threshold, &filters, &year_axis, *segment)?;
                    let fire_years = counts.fires.iter().filter(|&&f| f > 0).count();
                    batch.push(fire_years as f64 * multiplier);
                }
                if !batch.is_empty() {
                    batches.push((sample_size, batch));
                }
            }
            debug!(
                first = segment.first_year,
                last = segment.last_year,
                batches = batches.len(),
                "segment simulations complete"
            );

            // Each batch is summarized independently; parallelism here
            // cannot perturb the sequential RNG draws above.
            let mut segment_results: Vec<AnalysisResults> = batches
                .par_iter()
                .map(|(size, samples)| AnalysisResults::from_simulations(*size, *segment, samples))
                .collect();
            results.append(&mut segment_results);
        }

        Ok(AnalysisRun {
            meta: RunMeta {
                timestamp,
                simulations: cfg.simulations,
                seed: cfg.seed,
                resampling: cfg.resampling,
                threshold: cfg.threshold,
                event_type: cfg.event_type,
                segments,
            },
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::InMemoryReader;

    fn reader() -> InMemoryReader {
        InMemoryReader::from_codes(
            1991,
            &[
                vec![0, 0, 0, 0, 0, 1, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 1, 0, 1, 0, 0],
                vec![0, 1, 0, 0, 0, 0, 0, 0, 1, 0],
            ],
        )
        .unwrap()
    }

    fn config(simulations: usize) -> SsizConfig {
        SsizConfig {
            simulations,
            seed: 1000,
            ..SsizConfig::default()
        }
    }

    #[test]
    fn test_sweep_produces_one_record_per_sample_size() {
        let runner = SsizRunner::new(config(50));
        let run = runner
            .run(&reader(), &[], &CancellationToken::new())
            .unwrap();

        // One auto-populated segment, pool of three: sample sizes 1..=3.
        assert_eq!(run.meta.segments.len(), 1);
        assert_eq!(run.results.len(), 3);
        for (i, record) in run.results.iter().enumerate() {
            assert_eq!(record.number_of_samples, i + 1);
            assert!(record.mean >= 0.0);
        }
        let segment = run.meta.segments[0];
        assert!(run.result_for(segment, 2).is_some());
        assert!(run.result_for(segment, 4).is_none());
    }

    #[test]
    fn test_zero_simulations_is_a_configuration_error() {
        let runner = SsizRunner::new(config(0));
        assert!(matches!(
            runner.run(&reader(), &[], &CancellationToken::new()),
            Err(SsizError::NoSimulations)
        ));
    }

    #[test]
    fn test_cancellation_aborts_the_run() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let runner = SsizRunner::new(config(50));
        assert!(matches!(
            runner.run(&reader(), &[], &cancel),
            Err(SsizError::Cancelled)
        ));
    }

    #[test]
    fn test_segments_are_clamped_and_outside_segments_dropped() {
        let runner = SsizRunner::new(config(10));
        let segments = vec![
            Segment::new(1985, 1995).unwrap(),
            Segment::new(1900, 1950).unwrap(),
        ];
        let run = runner
            .run(&reader(), &segments, &CancellationToken::new())
            .unwrap();
        assert_eq!(run.meta.segments.len(), 1);
        assert_eq!(run.meta.segments[0].first_year, 1991);
        assert_eq!(run.meta.segments[0].last_year, 1995);
    }

    #[test]
    fn test_identical_seeds_reproduce_identical_statistics() {
        let runner = SsizRunner::new(config(40));
        let first = runner
            .run(&reader(), &[], &CancellationToken::new())
            .unwrap();
        let second = runner
            .run(&reader(), &[], &CancellationToken::new())
            .unwrap();
        assert_eq!(first.results, second.results);
    }

    #[test]
    fn test_without_replacement_sweep_runs() {
        let cfg = SsizConfig {
            resampling: ResamplingMode::WithoutReplacement,
            ..config(20)
        };
        let run = SsizRunner::new(cfg)
            .run(&reader(), &[], &CancellationToken::new())
            .unwrap();
        assert_eq!(run.results.len(), 3);

        // At the full pool size every draw is the whole pool, so every
        // simulation sees the same fire years and the spread collapses.
        let full = run.result_for(run.meta.segments[0], 3).unwrap();
        assert!((full.std_dev - 0.0).abs() < f64::EPSILON);
    }
}
