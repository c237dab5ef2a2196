//! Fire-History Reader Seam
//!
//! The engine never parses files itself; it consumes a [`FireHistoryReader`]
//! supplied by the surrounding application. All accessors return owned
//! snapshots so the engine's state cannot alias a reader's internals.

use crate::error::SsizError;
use crate::event::{EventCode, EventType, Series, SeriesPool};

/// Per-year filter values used by threshold filtering: the composite event
/// count and the fraction of recording series scarred, both aligned to the
/// reader's year axis.
#[derive(Debug, Clone)]
pub struct FilterArrays {
    /// Number of events in each year.
    pub event_counts: Vec<f64>,
    /// Fraction (0..1) of recording series with an event in each year.
    pub event_fractions: Vec<f64>,
}

/// Source of per-series coded event data.
///
/// Implemented over a parsed fire-history file by the host application;
/// [`InMemoryReader`] covers tests and programmatic embedding.
pub trait FireHistoryReader {
    /// First year covered by the file. Never zero; there is no year 0.
    fn first_year(&self) -> i32;

    /// Last year covered by the file. Never zero.
    fn last_year(&self) -> i32;

    /// Number of series in the file.
    fn number_of_series(&self) -> usize;

    /// First year with data, per series.
    fn start_year_per_series(&self) -> Vec<i32>;

    /// Last year with data, per series.
    fn last_year_per_series(&self) -> Vec<i32>;

    /// Per-series coded event rows for the requested event class, each
    /// aligned to [`FireHistoryReader::year_array`].
    fn event_data(&self, event_type: EventType) -> SeriesPool;

    /// Per-year filter values for the requested event class.
    fn filter_arrays(&self, event_type: EventType) -> FilterArrays;

    /// The absolute year axis, ordered, with no year 0.
    fn year_array(&self) -> Vec<i32>;
}

/// In-memory reader over pre-decoded series, used by tests and embedders.
#[derive(Debug, Clone)]
pub struct InMemoryReader {
    year_axis: Vec<i32>,
    pool: SeriesPool,
    start_years: Vec<i32>,
    end_years: Vec<i32>,
}

impl InMemoryReader {
    /// Build a reader whose year axis starts at `first_year` and spans the
    /// width of the supplied rows, skipping the nonexistent year 0.
    ///
    /// All rows must be the same nonzero length and `first_year` must not
    /// be zero.
    pub fn new(first_year: i32, pool: SeriesPool) -> Result<Self, SsizError> {
        let width = pool.first().map(Series::len).unwrap_or(0);
        if first_year == 0 || width == 0 || pool.iter().any(|s| s.len() != width) {
            return Err(SsizError::InvalidYearBounds {
                first: first_year,
                last: first_year + width as i32,
            });
        }

        let mut year_axis = Vec::with_capacity(width);
        let mut year = first_year;
        for _ in 0..width {
            year_axis.push(year);
            year += 1;
            if year == 0 {
                year = 1;
            }
        }

        let (start_years, end_years) = pool
            .iter()
            .map(|series| {
                let first_data = series
                    .cells()
                    .iter()
                    .position(|&c| c != EventCode::NoData)
                    .unwrap_or(0);
                let last_data = series
                    .cells()
                    .iter()
                    .rposition(|&c| c != EventCode::NoData)
                    .unwrap_or(width - 1);
                (year_axis[first_data], year_axis[last_data])
            })
            .unzip();

        Ok(InMemoryReader {
            year_axis,
            pool,
            start_years,
            end_years,
        })
    }

    /// Convenience constructor from rows of raw integer codes.
    pub fn from_codes(first_year: i32, rows: &[Vec<i32>]) -> Result<Self, SsizError> {
        let pool = rows
            .iter()
            .map(|row| {
                Series::from_codes(row).ok_or_else(|| {
                    let bad = row
                        .iter()
                        .copied()
                        .find(|&c| EventCode::from_code(c).is_none())
                        .unwrap_or_default();
                    SsizError::UnrecognizedEventCode(bad)
                })
            })
            .collect::<Result<SeriesPool, _>>()?;
        InMemoryReader::new(first_year, pool)
    }
}

impl FireHistoryReader for InMemoryReader {
    fn first_year(&self) -> i32 {
        self.year_axis[0]
    }

    fn last_year(&self) -> i32 {
        *self.year_axis.last().unwrap_or(&0)
    }

    fn number_of_series(&self) -> usize {
        self.pool.len()
    }

    fn start_year_per_series(&self) -> Vec<i32> {
        self.start_years.clone()
    }

    fn last_year_per_series(&self) -> Vec<i32> {
        self.end_years.clone()
    }

    // The in-memory reader stores a single event class; the class selector
    // only matters for readers backed by a full fire-history file.
    fn event_data(&self, _event_type: EventType) -> SeriesPool {
        self.pool.clone()
    }

    fn filter_arrays(&self, _event_type: EventType) -> FilterArrays {
        let width = self.year_axis.len();
        let mut counts = vec![0.0; width];
        let mut recording = vec![0u32; width];
        for series in &self.pool {
            for (j, &cell) in series.cells().iter().enumerate() {
                match cell {
                    EventCode::EventRecorded => {
                        counts[j] += 1.0;
                        recording[j] += 1;
                    }
                    EventCode::RecordingNoEvent => recording[j] += 1,
                    EventCode::NoData => {}
                }
            }
        }
        let event_fractions = counts
            .iter()
            .zip(&recording)
            .map(|(&c, &r)| if r == 0 { 0.0 } else { c / r as f64 })
            .collect();
        FilterArrays {
            event_counts: counts,
            event_fractions,
        }
    }

    fn year_array(&self) -> Vec<i32> {
        self.year_axis.clone()
    }
}
