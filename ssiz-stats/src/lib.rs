#![warn(missing_docs)]
//! SSIZ Statistical Engine
//!
//! Numeric layer for fire-history sample-size analysis:
//! - Two-parameter Weibull fitting via Newton-Raphson maximum likelihood
//! - Lanczos approximation of the Gamma function
//! - Descriptive summary statistics with percentile-based confidence intervals

mod descriptive;
mod gamma;
mod weibull;

pub use descriptive::{DescriptiveSummary, compute_descriptive, compute_percentile};
pub use gamma::la_gamma;
pub use weibull::{Weibull, WeibullError};

/// Sentinel for Weibull queries that are undefined at the fitted shape
/// (mode below shape 1, hazard interval at or below shape 1.005).
pub const UNDEFINED: f64 = -99.0;

/// Maximum Newton-Raphson iterations for the Weibull shape fit.
pub const MAX_NEWTON_ITERATIONS: usize = 50;

/// Convergence tolerance on the shape update between iterations.
pub const NEWTON_TOLERANCE: f64 = 0.0001;

/// Floor for the Newton denominator; below this the iteration stops with
/// the last valid shape rather than dividing by a collapsing value.
pub const MIN_NEWTON_DENOMINATOR: f64 = 0.01;
