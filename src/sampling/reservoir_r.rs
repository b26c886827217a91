//! Algorithm R over record offsets.
//!
//! The reservoir holds offsets, never record bytes, so memory stays
//! proportional to the sample size (or to the record count when the whole
//! file is collected for shuffling).

use crate::config::{ReplacementMode, SamplerConfig};
use crate::core::{MersenneTwister, OffsetReservoir, RecordSource, GROWTH_INCREMENT};
use crate::error::Result;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct SamplingOutcome {
    pub reservoir: OffsetReservoir,
    pub records_seen: u64,
}

/// Uniform sample of at most `k` record offsets, without replacement.
///
/// The first `k` records fill the reservoir in order. Record `i >= k`
/// (0-based) is kept with probability `k / (i + 1)` and then overwrites a
/// uniformly chosen slot.
pub fn sample_fixed<S: RecordSource + ?Sized>(
    source: &mut S,
    k: usize,
    rng: &mut MersenneTwister,
) -> Result<SamplingOutcome> {
    let mut reservoir = OffsetReservoir::with_capacity(k)?;
    let mut seen: u64 = 0;

    while let Some(offset) = source.next_boundary()? {
        if !reservoir.push(offset) {
            let p = k as f64 / (seen + 1) as f64;
            // u 可以等于 1.0，必须严格大于
            if p > rng.next_unit_double() {
                let slot = (u64::from(rng.next_u32()) % k as u64) as usize;
                reservoir.set(slot, offset);
            }
        }
        seen += 1;
    }

    if reservoir.len() < k {
        warn!(
            requested = k,
            available = reservoir.len(),
            "fewer records than requested sample size"
        );
    }
    debug!(records_seen = seen, kept = reservoir.len(), "fixed-size pass complete");

    Ok(SamplingOutcome {
        reservoir,
        records_seen: seen,
    })
}

/// Every record offset in file order.
pub fn sample_all<S: RecordSource + ?Sized>(source: &mut S) -> Result<SamplingOutcome> {
    let mut reservoir = OffsetReservoir::with_capacity(GROWTH_INCREMENT)?;
    let mut seen: u64 = 0;

    while let Some(offset) = source.next_boundary()? {
        reservoir.push_growing(offset)?;
        seen += 1;
    }

    debug!(records_seen = seen, capacity = reservoir.capacity(), "collected all offsets");

    Ok(SamplingOutcome {
        reservoir,
        records_seen: seen,
    })
}

/// `m` independent uniform draws from `original`. The original reservoir is
/// consumed; an empty original yields an empty result.
pub fn resample_with_replacement(
    original: OffsetReservoir,
    m: usize,
    rng: &mut MersenneTwister,
) -> Result<OffsetReservoir> {
    let n = original.len();
    if n == 0 {
        return OffsetReservoir::with_capacity(0);
    }

    let mut sample = OffsetReservoir::with_capacity(m)?;
    let pool = original.as_slice();
    for _ in 0..m {
        sample.push(pool[rng.next_index(n)]);
    }

    debug!(pool = n, drawn = sample.len(), "resampled with replacement");
    Ok(sample)
}

/// Runs the scan pass (and the resample pass when sampling with replacement).
pub fn sample<S: RecordSource + ?Sized>(
    source: &mut S,
    config: &SamplerConfig,
    rng: &mut MersenneTwister,
) -> Result<SamplingOutcome> {
    match (config.replacement, config.sample_size) {
        (ReplacementMode::Without, Some(k)) => sample_fixed(source, k, rng),
        (ReplacementMode::Without, None) => sample_all(source),
        (ReplacementMode::With, requested) => {
            let SamplingOutcome {
                reservoir,
                records_seen,
            } = sample_all(source)?;
            let m = requested.unwrap_or(reservoir.len());
            let reservoir = resample_with_replacement(reservoir, m, rng)?;
            Ok(SamplingOutcome {
                reservoir,
                records_seen,
            })
        }
    }
}
