//! Resampling Engine
//!
//! Draws random sub-pools of a requested size from the full series pool.
//! Index selection is a floored `uniform × pool size` draw so that a given
//! generator state always reproduces the same index sequence.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::SsizError;
use crate::event::SeriesPool;

/// How draws treat previously chosen series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ResamplingMode {
    /// Every draw sees the full pool; duplicates allowed, any count valid.
    #[default]
    WithReplacement,
    /// Each chosen series is removed from a working copy; the count must
    /// not exceed the pool size.
    WithoutReplacement,
}

/// Draw `count` series from `pool` using `rng`.
///
/// With replacement the output always has exactly `count` entries, even
/// when `count` exceeds the pool size. Without replacement a `count` larger
/// than the pool is a precondition violation and fails.
pub fn resample(
    pool: &SeriesPool,
    count: usize,
    mode: ResamplingMode,
    rng: &mut StdRng,
) -> Result<SeriesPool, SsizError> {
    if pool.is_empty() && count > 0 {
        return Err(SsizError::EmptyPool);
    }

    match mode {
        ResamplingMode::WithReplacement => {
            let mut out = Vec::with_capacity(count);
            for _ in 0..count {
                let index = (rng.gen::<f64>() * pool.len() as f64).floor() as usize;
                out.push(pool[index].clone());
            }
            Ok(out)
        }
        ResamplingMode::WithoutReplacement => {
            if count > pool.len() {
                return Err(SsizError::SampleSizeExceedsPool {
                    requested: count,
                    available: pool.len(),
                });
            }
            let mut working = pool.clone();
            let mut out = Vec::with_capacity(count);
            for _ in 0..count {
                let index = (rng.gen::<f64>() * working.len() as f64).floor() as usize;
                out.push(working.remove(index));
            }
            Ok(out)
        }
    }
}
