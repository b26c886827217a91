pub mod order;
pub mod reservoir_r;

pub use order::{shuffle, sort};
pub use reservoir_r::{resample_with_replacement, sample, sample_all, sample_fixed, SamplingOutcome};
