//! Error Taxonomy
//!
//! Configuration errors and precondition violations abort the whole run;
//! degenerate-but-valid states (no common years, nothing dropped, no
//! threshold filter) are logged by their operations and never surface here.

use thiserror::Error;

/// Errors raised by the SSIZ engine.
#[derive(Debug, Error)]
pub enum SsizError {
    /// Reader or model year bounds are unusable.
    #[error("invalid year bounds: first year {first} and last year {last} must be nonzero with first < last")]
    InvalidYearBounds {
        /// First year reported.
        first: i32,
        /// Last year reported.
        last: i32,
    },

    /// A segment's own years are malformed (year zero, or not ordered).
    #[error("invalid segment years [{first}, {last}]: years must be nonzero with first < last")]
    InvalidSegment {
        /// Requested segment start.
        first: i32,
        /// Requested segment end.
        last: i32,
    },

    /// A segment survived clamping yet still falls outside the model range.
    #[error("segment [{first}, {last}] lies outside the analysis range [{range_first}, {range_last}]")]
    SegmentOutOfBounds {
        /// Segment start.
        first: i32,
        /// Segment end.
        last: i32,
        /// Model range start.
        range_first: i32,
        /// Model range end.
        range_last: i32,
    },

    /// Without-replacement draw asked for more series than the pool holds.
    #[error("cannot draw {requested} series without replacement from a pool of {available}")]
    SampleSizeExceedsPool {
        /// Series requested.
        requested: usize,
        /// Series available.
        available: usize,
    },

    /// Resampling from an empty pool.
    #[error("cannot resample from an empty series pool")]
    EmptyPool,

    /// A coded cell value outside {-1, 0, 1}.
    #[error("unrecognized event code {0}; expected -1, 0, or 1")]
    UnrecognizedEventCode(i32),

    /// A segment year was not found in the file's year axis. Segments are
    /// clamped to the model range before aggregation, so this indicates a
    /// logic bug upstream rather than bad input.
    #[error("year {0} not present in the file's year axis")]
    YearNotInAxis(i32),

    /// The run was configured with zero simulations.
    #[error("simulation count must be at least 1")]
    NoSimulations,

    /// The cancellation token was triggered between simulations.
    #[error("analysis cancelled")]
    Cancelled,
}
