//! Analysis Model
//!
//! Owns the series pool, the effective analysis year range, and the bank of
//! per-series-index random generators. Restriction operations replace the
//! pool wholesale and recompute the year range; they never mutate series in
//! place.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::error::SsizError;
use crate::event::{EventType, SeriesPool};
use crate::reader::FireHistoryReader;
use crate::resample::{ResamplingMode, resample};

/// The engine's working copy of one file's event data.
#[derive(Debug)]
pub struct AnalysisModel {
    first_year: i32,
    last_year: i32,
    pool: SeriesPool,
    start_years: Vec<i32>,
    end_years: Vec<i32>,
    generators: Vec<StdRng>,
}

impl AnalysisModel {
    /// Build the model from a reader, validating its year bounds and
    /// seeding one generator per series index as `seed + index`.
    pub fn from_reader(
        reader: &dyn FireHistoryReader,
        event_type: EventType,
        seed: u64,
    ) -> Result<Self, SsizError> {
        let first_year = reader.first_year();
        let last_year = reader.last_year();
        if first_year == 0 || last_year == 0 || first_year >= last_year {
            return Err(SsizError::InvalidYearBounds {
                first: first_year,
                last: last_year,
            });
        }

        let generators = (0..reader.number_of_series())
            .map(|i| StdRng::seed_from_u64(seed.wrapping_add(i as u64)))
            .collect();

        Ok(AnalysisModel {
            first_year,
            last_year,
            pool: reader.event_data(event_type),
            start_years: reader.start_year_per_series(),
            end_years: reader.last_year_per_series(),
            generators,
        })
    }

    /// First year of the effective analysis range.
    pub fn first_year(&self) -> i32 {
        self.first_year
    }

    /// Last year of the effective analysis range.
    pub fn last_year(&self) -> i32 {
        self.last_year
    }

    /// The current series pool.
    pub fn pool(&self) -> &SeriesPool {
        &self.pool
    }

    /// Number of series currently in the pool.
    pub fn number_of_series(&self) -> usize {
        self.pool.len()
    }

    /// The generator for a given bank index, or `None` when the index is
    /// outside the bank. The bank is sized at construction and deliberately
    /// not resized by restriction operations.
    pub fn generator(&mut self, index: usize) -> Option<&mut StdRng> {
        self.generators.get_mut(index)
    }

    /// Resample the pool for one simulation at the given candidate sample
    /// size.
    ///
    /// The generator is keyed by `sample_size − 1`, not per draw: every
    /// simulation targeting the same sample size shares one generator whose
    /// internal state evolves across segments and simulations. Identical
    /// seeds therefore reproduce identical draw sequences only when the
    /// whole (segment, sample-size, simulation) call order is identical.
    /// A sample size with no generator yields `Ok(None)`.
    pub fn resample_with_bank(
        &mut self,
        sample_size: usize,
        mode: ResamplingMode,
    ) -> Result<Option<SeriesPool>, SsizError> {
        let Some(index) = sample_size.checked_sub(1) else {
            return Ok(None);
        };
        let Some(rng) = self.generators.get_mut(index) else {
            return Ok(None);
        };
        resample(&self.pool, sample_size, mode, rng).map(Some)
    }

    /// Narrow the analysis range to the years covered by every series.
    ///
    /// The new first year is the latest per-series start (never earlier
    /// than the current first year); the new last year is the earliest
    /// per-series end (never later than the current last year). An empty
    /// intersection leaves the range untouched.
    pub fn restrict_to_common_years(&mut self) {
        let (Some(&latest_start), Some(&earliest_end)) =
            (self.start_years.iter().max(), self.end_years.iter().min())
        else {
            return;
        };

        let first = latest_start.max(self.first_year);
        let last = earliest_end.min(self.last_year);
        if first <= last {
            debug!(first, last, "restricted analysis range to common years");
            self.first_year = first;
            self.last_year = last;
        } else {
            // Not an error: the pool simply has no overlap.
            info!("no common years across series; analysis range unchanged");
        }
    }

    /// Drop every series with zero recorded events, replacing the pool
    /// wholesale. When any series is dropped, the analysis range is
    /// recomputed from the retained series' start and end years.
    pub fn restrict_to_series_with_events(&mut self) {
        let before = self.pool.len();

        let mut pool = SeriesPool::with_capacity(before);
        let mut start_years = Vec::with_capacity(before);
        let mut end_years = Vec::with_capacity(before);
        for ((series, &start), &end) in self
            .pool
            .iter()
            .zip(&self.start_years)
            .zip(&self.end_years)
        {
            if series.has_events() {
                pool.push(series.clone());
                start_years.push(start);
                end_years.push(end);
            }
        }

        if pool.len() == before {
            debug!("every series records at least one event; pool unchanged");
            return;
        }
        if pool.is_empty() {
            warn!("no series records any event; pool is now empty");
            self.pool = pool;
            self.start_years = start_years;
            self.end_years = end_years;
            return;
        }

        info!(
            dropped = before - pool.len(),
            retained = pool.len(),
            "dropped series without events"
        );
        // min/max are over the retained series only.
        self.first_year = start_years.iter().copied().min().unwrap_or(self.first_year);
        self.last_year = end_years.iter().copied().max().unwrap_or(self.last_year);
        self.pool = pool;
        self.start_years = start_years;
        self.end_years = end_years;
    }
}
