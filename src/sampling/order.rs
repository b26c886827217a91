use crate::config::OrderMode;
use crate::core::MersenneTwister;
use tracing::debug;

/// In-place Fisher-Yates permutation.
pub fn shuffle(offsets: &mut [u64], rng: &mut MersenneTwister) {
    for i in (1..offsets.len()).rev() {
        let j = rng.next_index(i + 1);
        offsets.swap(i, j);
    }
}

/// Ascending file order, so materialization only ever seeks forward.
pub fn sort(offsets: &mut [u64]) {
    offsets.sort_unstable();
}

pub fn apply(order: OrderMode, offsets: &mut [u64], rng: &mut MersenneTwister) {
    match order {
        OrderMode::Preserve => sort(offsets),
        OrderMode::Shuffle => shuffle(offsets, rng),
    }
    debug!(?order, len = offsets.len(), "ordered reservoir");
}
