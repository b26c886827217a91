//! Reservoir sampling of newline-delimited files by byte offset.
//!
//! Only record start offsets are held in memory; selected records are
//! re-read from the file once the sample is fixed.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod materialize;
pub mod runner;
pub mod sampling;
pub mod source;

pub use config::{IoMode, OrderMode, ReplacementMode, SamplerConfig};
pub use error::{Result, SampleError};
pub use runner::{run, run_to_writer};
