//! Event Codes and Series
//!
//! A series is one sample/tree's year-by-year coded fire record, aligned to
//! the file's absolute year axis. A pool is the ordered collection of series
//! considered for one analysis run.

use serde::{Deserialize, Serialize};

/// Per-year state of one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCode {
    /// The tree was not alive or not sampled at this ring (code -1).
    NoData,
    /// Recording year without a fire event (code 0).
    RecordingNoEvent,
    /// A fire event was recorded (code 1).
    EventRecorded,
}

impl EventCode {
    /// Decode the on-disk integer code; anything outside {-1, 0, 1} is
    /// unrecognized.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(EventCode::NoData),
            0 => Some(EventCode::RecordingNoEvent),
            1 => Some(EventCode::EventRecorded),
            _ => None,
        }
    }

    /// The on-disk integer code.
    pub fn as_code(self) -> i32 {
        match self {
            EventCode::NoData => -1,
            EventCode::RecordingNoEvent => 0,
            EventCode::EventRecorded => 1,
        }
    }
}

/// Which event class the reader materializes into the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    /// Fire scars only.
    #[default]
    FireScar,
    /// Other (non-fire) injuries only.
    OtherInjury,
    /// Fire scars and other injuries combined.
    FireAndInjury,
}

/// One sample's fixed-length coded record, aligned to the pool's year axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    cells: Vec<EventCode>,
}

impl Series {
    /// Wrap an already-decoded cell vector.
    pub fn new(cells: Vec<EventCode>) -> Self {
        Series { cells }
    }

    /// Decode a row of integer codes; `None` if any code is unrecognized.
    pub fn from_codes(codes: &[i32]) -> Option<Self> {
        codes
            .iter()
            .map(|&c| EventCode::from_code(c))
            .collect::<Option<Vec<_>>>()
            .map(Series::new)
    }

    /// Number of years covered.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the series covers no years at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The per-year cells.
    pub fn cells(&self) -> &[EventCode] {
        &self.cells
    }

    /// Whether at least one year recorded an event.
    pub fn has_events(&self) -> bool {
        self.cells.iter().any(|&c| c == EventCode::EventRecorded)
    }
}

/// The full or resampled collection of series for one analysis run.
pub type SeriesPool = Vec<Series>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for code in [-1, 0, 1] {
            assert_eq!(EventCode::from_code(code).unwrap().as_code(), code);
        }
        assert!(EventCode::from_code(2).is_none());
        assert!(EventCode::from_code(-2).is_none());
    }

    #[test]
    fn test_series_from_codes() {
        let series = Series::from_codes(&[-1, 0, 1, 0]).unwrap();
        assert_eq!(series.len(), 4);
        assert!(series.has_events());
        assert_eq!(series.cells()[2], EventCode::EventRecorded);

        assert!(Series::from_codes(&[0, 7]).is_none());
    }

    #[test]
    fn test_has_events() {
        assert!(!Series::from_codes(&[-1, 0, 0]).unwrap().has_events());
        assert!(Series::from_codes(&[0, 1]).unwrap().has_events());
    }
}
