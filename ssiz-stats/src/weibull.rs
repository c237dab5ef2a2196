//! Weibull Parameter Estimation
//!
//! Fits a two-parameter Weibull distribution to a sample of per-century fire
//! rates via Newton-Raphson maximum likelihood, then answers moment and
//! percentile queries from the fitted (shape, scale) pair.
//!
//! The fit solves the profile likelihood equation for the shape m:
//!
//! ```text
//! f(m) = 1/m + Σln(x)/n − Σ(x^m·ln x)/Σ(x^m) = 0
//! ```
//!
//! with the scale recomputed every pass as `x0 = (Σx^m / n)^(1/m)` from the
//! shape in effect *before* that pass's update. The update order matters for
//! result parity with long-standing fire-history tooling and must not be
//! rearranged.

use thiserror::Error;

use crate::gamma::la_gamma;
use crate::{MAX_NEWTON_ITERATIONS, MIN_NEWTON_DENOMINATOR, NEWTON_TOLERANCE, UNDEFINED};

/// Errors raised when a Weibull fit cannot be attempted.
#[derive(Debug, Error)]
pub enum WeibullError {
    /// The sample was empty.
    #[error("cannot fit a Weibull distribution to an empty sample")]
    EmptySample,

    /// A sample value was zero, negative, or not finite; ln(x) is taken of
    /// every value, so all must be strictly positive.
    #[error("sample value {0} is not a positive finite number")]
    NonPositiveValue(f64),
}

/// A fitted two-parameter Weibull distribution.
///
/// Constructed once from a sample; the (shape, scale) pair is immutable
/// afterwards and every query derives from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weibull {
    shape: f64,
    scale: f64,
}

impl Weibull {
    /// Fit shape and scale to `sample` by Newton-Raphson MLE.
    ///
    /// Starts from m = 1.0 and iterates at most
    /// [`MAX_NEWTON_ITERATIONS`] times, stopping when the shape update
    /// falls below [`NEWTON_TOLERANCE`] or the Newton denominator drops
    /// under [`MIN_NEWTON_DENOMINATOR`] (in which case the last valid
    /// shape is kept).
    pub fn fit(sample: &[f64]) -> Result<Self, WeibullError> {
        if sample.is_empty() {
            return Err(WeibullError::EmptySample);
        }
        if let Some(&bad) = sample.iter().find(|&&x| !(x.is_finite() && x > 0.0)) {
            return Err(WeibullError::NonPositiveValue(bad));
        }

        let n = sample.len() as f64;
        let slnx: f64 = sample.iter().map(|x| x.ln()).sum();

        let mut m = 1.0_f64;
        let mut x0 = 0.0_f64;

        for _ in 0..MAX_NEWTON_ITERATIONS {
            let mut sxm = 0.0_f64;
            let mut sxmlnx = 0.0_f64;
            let mut sxmlnx2 = 0.0_f64;
            for &x in sample {
                let xm = x.powf(m);
                let lx = x.ln();
                sxm += xm;
                sxmlnx += xm * lx;
                sxmlnx2 += xm * lx * lx;
            }

            // Scale uses the shape in effect before this pass's update.
            x0 = (sxm / n).powf(1.0 / m);

            let numerator = 1.0 / m + slnx / n - sxmlnx / sxm;
            let denominator = 1.0 / (m * m) + (sxm * sxmlnx2 - sxmlnx * sxmlnx) / (sxm * sxm);
            if denominator < MIN_NEWTON_DENOMINATOR {
                break;
            }

            let next = m + numerator / denominator;
            let delta = (next - m).abs();
            m = next;
            if delta < NEWTON_TOLERANCE {
                break;
            }
        }

        Ok(Weibull { shape: m, scale: x0 })
    }

    /// Fitted shape parameter m.
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Fitted scale parameter x0.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Distribution mean: `scale · Γ(1 + 1/shape)`.
    pub fn mean(&self) -> f64 {
        self.scale * la_gamma(1.0 + 1.0 / self.shape)
    }

    /// Distribution median: `scale · (ln 2)^(1/shape)`.
    pub fn median(&self) -> f64 {
        self.scale * std::f64::consts::LN_2.powf(1.0 / self.shape)
    }

    /// Distribution mode.
    ///
    /// Zero at shape exactly 1 (the exponential case); [`UNDEFINED`] below
    /// shape 1, where the density has no interior maximum.
    pub fn mode(&self) -> f64 {
        if self.shape == 1.0 {
            0.0
        } else if self.shape < 1.0 {
            UNDEFINED
        } else {
            self.scale * ((self.shape - 1.0) / self.shape).powf(1.0 / self.shape)
        }
    }

    /// Distribution standard deviation.
    pub fn sigma(&self) -> f64 {
        let g1 = la_gamma(1.0 + 1.0 / self.shape);
        let g2 = la_gamma(1.0 + 2.0 / self.shape);
        (self.scale * self.scale * (g2 - g1 * g1)).sqrt()
    }

    /// Distribution skewness.
    ///
    /// Combines the raw third moment `Γ(1 + 3/shape) · scale³` with the
    /// already-derived mean and sigma.
    pub fn skew(&self) -> f64 {
        let mean = self.mean();
        let sigma = self.sigma();
        let third_moment = la_gamma(1.0 + 3.0 / self.shape) * self.scale.powi(3);
        (third_moment - 3.0 * mean * sigma * sigma - mean.powi(3)) / sigma.powi(3)
    }

    /// Maximum hazard interval.
    ///
    /// [`UNDEFINED`] at shape ≤ 1.005: the formula diverges as the shape
    /// approaches 1 from above, and below 1 the hazard is decreasing.
    pub fn maximum_hazard_interval(&self) -> f64 {
        if self.shape <= 1.005 {
            UNDEFINED
        } else {
            self.scale * (1.0 / (self.shape - 1.0)).powf(1.0 / self.shape)
        }
    }

    /// Exceedence percentile: the value below which `p` percent of the
    /// fitted distribution falls (inverse CDF at p/100).
    pub fn exceedence_percentile(&self, p: f64) -> f64 {
        ((-(1.0 - p / 100.0).ln()).ln() / self.shape + self.scale.ln()).exp()
    }

    #[cfg(test)]
    fn from_parts(shape: f64, scale: f64) -> Self {
        Weibull { shape, scale }
    }
}
