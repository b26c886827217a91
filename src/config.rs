use crate::error::{Result, SampleError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReplacementMode {
    #[default]
    Without,
    With,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderMode {
    #[default]
    Shuffle,
    Preserve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IoMode {
    Sequential,
    #[default]
    Mapped,
    Hybrid,
}

impl fmt::Display for IoMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Sequential => "sequential",
            Self::Mapped => "mapped",
            Self::Hybrid => "hybrid",
        };
        f.write_str(name)
    }
}

impl FromStr for IoMode {
    type Err = SampleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "cstdio" => Ok(Self::Sequential),
            "mapped" | "mmap" => Ok(Self::Mapped),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(SampleError::InvalidConfig(format!(
                "unknown I/O mode '{}' (expected sequential, mapped or hybrid)",
                other
            ))),
        }
    }
}

/// Immutable description of one sampling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// `None` shuffles (or resamples) the whole file.
    pub sample_size: Option<usize>,
    #[serde(default = "default_lines_per_offset")]
    pub lines_per_offset: usize,
    #[serde(default)]
    pub replacement: ReplacementMode,
    #[serde(default)]
    pub order: OrderMode,
    #[serde(default)]
    pub io_mode: IoMode,
    pub seed: Option<u32>,
}

fn default_lines_per_offset() -> usize {
    1
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            sample_size: None,
            lines_per_offset: default_lines_per_offset(),
            replacement: ReplacementMode::default(),
            order: OrderMode::default(),
            io_mode: IoMode::default(),
            seed: None,
        }
    }
}

impl SamplerConfig {
    pub fn configure(
        sample_size: Option<usize>,
        lines_per_offset: usize,
        replacement: ReplacementMode,
        order: OrderMode,
        seed: Option<u32>,
    ) -> Result<Self> {
        let config = Self {
            sample_size,
            lines_per_offset,
            replacement,
            order,
            seed,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_io_mode(mut self, io_mode: IoMode) -> Self {
        self.io_mode = io_mode;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.lines_per_offset < 1 {
            return Err(SampleError::InvalidConfig(
                "lines per offset must be at least 1".to_string(),
            ));
        }
        if self.sample_size == Some(0) {
            return Err(SampleError::InvalidConfig(
                "sample size must be a positive integer".to_string(),
            ));
        }
        // 种子为 0 时 69069 递推全为零
        if self.seed == Some(0) {
            return Err(SampleError::InvalidConfig(
                "RNG seed must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

/// Environment-level defaults, overridden by command-line flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub io_mode: IoMode,
    #[serde(default = "default_lines_per_offset")]
    pub lines_per_offset: usize,
    pub rng_seed: Option<u32>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Ok(Self::from_vars(|key| std::env::var(key).ok())?)
    }

    /// Builds the config from `lookup`; a variable that is set but does not
    /// parse is an error, never a silent fallback to the default.
    fn from_vars<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        let io_mode = match lookup("SAMPLE_IO_MODE") {
            Some(v) => v.parse::<IoMode>()?,
            None => IoMode::default(),
        };

        let config = Self {
            io_mode,
            lines_per_offset: positive_var("SAMPLE_LINES_PER_OFFSET", lookup("SAMPLE_LINES_PER_OFFSET"))?
                .unwrap_or_else(default_lines_per_offset),
            rng_seed: positive_var("SAMPLE_RNG_SEED", lookup("SAMPLE_RNG_SEED"))?,
            log_level: lookup("SAMPLE_LOG_LEVEL").unwrap_or_else(default_log_level),
        };

        Ok(config)
    }

    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level
            .parse()
            .unwrap_or(tracing::Level::WARN)
    }
}

fn positive_var<T>(key: &str, value: Option<String>) -> Result<Option<T>>
where
    T: FromStr + PartialEq + From<u8>,
{
    let Some(raw) = value else {
        return Ok(None);
    };
    match raw.trim().parse::<T>() {
        Ok(v) if v != T::from(0) => Ok(Some(v)),
        _ => Err(SampleError::InvalidConfig(format!(
            "{} must be a positive integer, got '{}'",
            key, raw
        ))),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            io_mode: IoMode::default(),
            lines_per_offset: default_lines_per_offset(),
            rng_seed: None,
            log_level: default_log_level(),
        }
    }
}
