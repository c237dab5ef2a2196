//! Analysis Segments
//!
//! A segment is a contiguous sub-range of years analyzed independently.
//! Segments arrive from the caller (or are auto-populated over the whole
//! range), get clamped against the model's year range, and are effectively
//! frozen once handed to a run.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SsizError;

/// A contiguous year range under analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// First year of the segment. Never zero.
    pub first_year: i32,
    /// Last year of the segment. Never zero.
    pub last_year: i32,
    /// Marks a segment that fell fully outside the analysis range during
    /// boundary adjustment; such segments are dropped before the run.
    #[serde(default)]
    pub bad: bool,
}

impl Segment {
    /// Create a segment, rejecting year 0 and unordered bounds.
    pub fn new(first_year: i32, last_year: i32) -> Result<Self, SsizError> {
        if first_year == 0 || last_year == 0 || first_year >= last_year {
            return Err(SsizError::InvalidSegment {
                first: first_year,
                last: last_year,
            });
        }
        Ok(Segment {
            first_year,
            last_year,
            bad: false,
        })
    }

    /// Number of years the segment spans. One extra year is added when the
    /// segment ends after year 0, so that e.g. [1901, 2000] counts the full
    /// 100 calendar years.
    pub fn years_in_segment(&self) -> i32 {
        let mut years = self.last_year - self.first_year;
        if self.last_year > 0 {
            years += 1;
        }
        years
    }

    /// Scale factor converting a fire-year count over this segment into a
    /// fires-per-century rate.
    pub fn century_multiplier(&self) -> f64 {
        100.0 / self.years_in_segment() as f64
    }

    /// Whether the segment lies entirely inside `[first, last]`.
    pub fn within(&self, first: i32, last: i32) -> bool {
        self.first_year >= first && self.last_year <= last
    }
}

/// Auto-populate a single segment covering the whole analysis range.
pub fn default_segments(first_year: i32, last_year: i32) -> Result<Vec<Segment>, SsizError> {
    Ok(vec![Segment::new(first_year, last_year)?])
}

/// Clamp each segment to `[first_year, last_year]`. Segments fully outside
/// the range cannot be clamped into it and are flagged bad instead.
pub fn adjust_segment_year_boundaries(segments: &mut [Segment], first_year: i32, last_year: i32) {
    for segment in segments.iter_mut() {
        if segment.last_year < first_year || segment.first_year > last_year {
            segment.bad = true;
            continue;
        }
        if segment.first_year < first_year {
            segment.first_year = first_year;
        }
        if segment.last_year > last_year {
            segment.last_year = last_year;
        }
    }
}

/// Drop segments flagged bad or lying fully outside `[first_year, last_year]`.
pub fn exclude_empty_segments(segments: &mut Vec<Segment>, first_year: i32, last_year: i32) {
    let before = segments.len();
    segments.retain(|s| !s.bad && s.last_year >= first_year && s.first_year <= last_year);
    if segments.len() < before {
        debug!(
            dropped = before - segments.len(),
            "excluded segments outside the analysis range"
        );
    }
}
