use crate::config::{Config, IoMode, OrderMode, ReplacementMode, SamplerConfig};
use crate::error::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "sample",
    version,
    about = "Reservoir sampling of newline-delimited files by byte offset",
    long_about = "Performs reservoir sampling on very large newline-delimited files. \
                  Only the byte offset of each candidate record is kept in memory. \
                  Without --sample-size the whole file is shuffled."
)]
pub struct Cli {
    /// Number of records to retrieve
    #[arg(short = 'k', long = "sample-size")]
    pub sample_size: Option<usize>,

    /// Number of lines per record
    #[arg(short = 'l', long = "lines-per-offset")]
    pub lines_per_offset: Option<usize>,

    /// Sample without replacement (default)
    #[arg(short = 'o', long = "sample-without-replacement", conflicts_with = "with_replacement")]
    pub without_replacement: bool,

    /// Sample with replacement
    #[arg(short = 'r', long = "sample-with-replacement")]
    pub with_replacement: bool,

    /// Shuffle the sample written to standard output (default)
    #[arg(short = 's', long, conflicts_with = "preserve_order")]
    pub shuffle: bool,

    /// Write the sample in file order
    #[arg(short = 'p', long = "preserve-order")]
    pub preserve_order: bool,

    /// Memory-map the input file (default)
    #[arg(short = 'm', long, conflicts_with_all = ["cstdio", "hybrid"])]
    pub mmap: bool,

    /// Read the input file sequentially
    #[arg(short = 'c', long, conflicts_with = "hybrid")]
    pub cstdio: bool,

    /// Scan sequentially, write through a memory map
    #[arg(short = 'y', long)]
    pub hybrid: bool,

    /// Seed for the Mersenne Twister (positive integer)
    #[arg(short = 'd', long = "rng-seed", value_parser = clap::value_parser!(u32).range(1..))]
    pub rng_seed: Option<u32>,

    /// Print a JSON run report on standard error
    #[arg(long)]
    pub report: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Newline-delimited input file
    pub file: PathBuf,
}

impl Cli {
    fn io_mode(&self, env: &Config) -> IoMode {
        if self.cstdio {
            IoMode::Sequential
        } else if self.hybrid {
            IoMode::Hybrid
        } else if self.mmap {
            IoMode::Mapped
        } else {
            env.io_mode
        }
    }

    /// Flags win over `SAMPLE_*` environment defaults.
    pub fn sampler_config(&self, env: &Config) -> Result<SamplerConfig> {
        let replacement = if self.with_replacement {
            ReplacementMode::With
        } else {
            ReplacementMode::Without
        };
        let order = if self.preserve_order {
            OrderMode::Preserve
        } else {
            OrderMode::Shuffle
        };

        let config = SamplerConfig::configure(
            self.sample_size,
            self.lines_per_offset.unwrap_or(env.lines_per_offset),
            replacement,
            order,
            self.rng_seed.or(env.rng_seed),
        )?;
        Ok(config.with_io_mode(self.io_mode(env)))
    }

    pub fn log_level(&self, env: &Config) -> tracing::Level {
        match self.verbose {
            0 => env.tracing_level(),
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
