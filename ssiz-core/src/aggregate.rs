//! Fire-Year Aggregation
//!
//! Converts a pool of per-year coded series into per-year fire and
//! recording counts, applies the configured threshold filter, and trims the
//! result to the requested segment. Pure function of its inputs.

use serde::{Deserialize, Serialize};

use crate::error::SsizError;
use crate::event::{EventCode, SeriesPool};
use crate::reader::FilterArrays;
use crate::segment::Segment;

/// Threshold filter applied to the per-year fire counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "value")]
pub enum ThresholdFilter {
    /// No filtering; every counted fire year is kept.
    #[default]
    None,
    /// Zero out years whose composite event count is nonzero but below the
    /// given minimum.
    NumberOfEvents(f64),
    /// Zero out years whose percentage of scarred recording series is
    /// nonzero but below the given minimum (in percent).
    PercentageOfEvents(f64),
}

/// Per-year counts over a segment, as owned snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearCounts {
    /// Number of series recording a fire event in each year.
    pub fires: Vec<u32>,
    /// Number of series capable of recording in each year.
    pub recording: Vec<u32>,
}

/// Count fires and recording series per year across `pool`, filter, and
/// trim to `segment`.
///
/// `year_axis` and `filters` are aligned to the full file range; the
/// segment's years are located in the axis to produce the trimmed window.
/// Segment years are clamped to the model range upstream, so a missed
/// lookup is a fatal precondition violation, not a recoverable condition.
pub fn fires_by_year(
    pool: &SeriesPool,
    threshold: ThresholdFilter,
    filters: &FilterArrays,
    year_axis: &[i32],
    segment: Segment,
) -> Result<YearCounts, SsizError> {
    let width = year_axis.len();
    let mut fires = vec![0u32; width];
    let mut recording = vec![0u32; width];

    for series in pool {
        for (j, &cell) in series.cells().iter().take(width).enumerate() {
            match cell {
                EventCode::EventRecorded => {
                    fires[j] += 1;
                    recording[j] += 1;
                }
                EventCode::RecordingNoEvent => recording[j] += 1,
                EventCode::NoData => {}
            }
        }
    }

    match threshold {
        // Explicit no-filter arm; skipping is a valid configuration.
        ThresholdFilter::None => {}
        ThresholdFilter::NumberOfEvents(minimum) => {
            for (j, fire) in fires.iter_mut().enumerate() {
                let value = filters.event_counts[j];
                if value != 0.0 && value < minimum {
                    *fire = 0;
                }
            }
        }
        ThresholdFilter::PercentageOfEvents(minimum) => {
            for (j, fire) in fires.iter_mut().enumerate() {
                let value = filters.event_fractions[j];
                if value != 0.0 && value * 100.0 < minimum {
                    *fire = 0;
                }
            }
        }
    }

    let start = year_axis
        .iter()
        .position(|&y| y == segment.first_year)
        .ok_or(SsizError::YearNotInAxis(segment.first_year))?;
    let end = year_axis
        .iter()
        .position(|&y| y == segment.last_year)
        .ok_or(SsizError::YearNotInAxis(segment.last_year))?;

    Ok(YearCounts {
        fires: fires[start..=end].to_vec(),
        recording: recording[start..=end].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{FireHistoryReader, InMemoryReader};

    fn three_series_reader() -> InMemoryReader {
        // Ten years starting 1991. Series A scars at index 5, series B at
        // indices 5 and 7, series C never.
        InMemoryReader::from_codes(
            1991,
            &[
                vec![0, 0, 0, 0, 0, 1, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 1, 0, 1, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_three_series_example() {
        let reader = three_series_reader();
        let segment = Segment::new(1991, 2000).unwrap();
        let counts = fires_by_year(
            &reader.event_data(Default::default()),
            ThresholdFilter::None,
            &reader.filter_arrays(Default::default()),
            &reader.year_array(),
            segment,
        )
        .unwrap();

        let mut expected = vec![0u32; 10];
        expected[5] = 2;
        expected[7] = 1;
        assert_eq!(counts.fires, expected);
        assert!(counts.recording.iter().all(|&r| r == 3));
    }

    #[test]
    fn test_counts_bounded_by_pool_size() {
        let reader = three_series_reader();
        let pool = reader.event_data(Default::default());
        let segment = Segment::new(1993, 1998).unwrap();
        let counts = fires_by_year(
            &pool,
            ThresholdFilter::None,
            &reader.filter_arrays(Default::default()),
            &reader.year_array(),
            segment,
        )
        .unwrap();

        assert_eq!(counts.fires.len(), 6);
        assert!(counts.fires.iter().all(|&f| f as usize <= pool.len()));
    }

    #[test]
    fn test_number_threshold_zeroes_sub_threshold_years() {
        let reader = three_series_reader();
        let segment = Segment::new(1991, 2000).unwrap();
        let counts = fires_by_year(
            &reader.event_data(Default::default()),
            ThresholdFilter::NumberOfEvents(2.0),
            &reader.filter_arrays(Default::default()),
            &reader.year_array(),
            segment,
        )
        .unwrap();

        // Index 7 had one fire, below the threshold of two; index 5 keeps
        // its two fires.
        assert_eq!(counts.fires[5], 2);
        assert_eq!(counts.fires[7], 0);
    }

    #[test]
    fn test_percentage_threshold() {
        let reader = three_series_reader();
        let segment = Segment::new(1991, 2000).unwrap();
        // Index 5: 2/3 recording = 66.7%; index 7: 1/3 = 33.3%.
        let counts = fires_by_year(
            &reader.event_data(Default::default()),
            ThresholdFilter::PercentageOfEvents(50.0),
            &reader.filter_arrays(Default::default()),
            &reader.year_array(),
            segment,
        )
        .unwrap();
        assert_eq!(counts.fires[5], 2);
        assert_eq!(counts.fires[7], 0);
    }

    #[test]
    fn test_unmatched_segment_year_fails_fast() {
        let reader = three_series_reader();
        let segment = Segment {
            first_year: 1891,
            last_year: 2000,
            bad: false,
        };
        let err = fires_by_year(
            &reader.event_data(Default::default()),
            ThresholdFilter::None,
            &reader.filter_arrays(Default::default()),
            &reader.year_array(),
            segment,
        )
        .unwrap_err();
        assert!(matches!(err, SsizError::YearNotInAxis(1891)));
    }
}
