//! Configuration management for passeval
//!
//! Settings are layered with figment (see [`core::ConfigLoader`]) and then
//! extracted into the typed [`PassevalConfig`]. The dispatcher never sees
//! this struct directly; it gets a resolved [`RunConfig`] from
//! [`PassevalConfig::run_config`].

pub mod core;
pub mod overrides;
pub mod smart_load;

pub use self::core::ConfigLoader;

use crate::error::EvalError;
use crate::io::{OutputFormat, TextEncoding};
use crate::parallel::RunConfig;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PassevalConfig {
    pub evaluation: EvaluationConfig,
    pub parallel: ParallelConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

/// Labeling settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Samples scoring at or above this are strong
    pub strength_threshold: f64,
}

/// Worker pool settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParallelConfig {
    /// Worker threads (0 = derive from available cores)
    pub max_threads: usize,
    /// Percentage of CPU cores to use when `max_threads` is 0 (1-100)
    pub thread_percentage: u8,
    /// Channel buffer size multiplier (buffer = workers * multiplier)
    pub channel_buffer_multiplier: usize,
    /// Progress update frequency (every N items)
    pub progress_interval: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    pub encoding: TextEncoding,
    /// Strip surrounding whitespace from every line
    pub trim: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub encoding: TextEncoding,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            strength_threshold: 0.5,
        }
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            max_threads: 0,
            thread_percentage: 100,
            channel_buffer_multiplier: 2,
            progress_interval: 1000,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::Utf8,
            trim: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Csv,
            encoding: TextEncoding::Utf8,
        }
    }
}

impl PassevalConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), EvalError> {
        if !self.evaluation.strength_threshold.is_finite() {
            return Err(EvalError::InvalidConfig(
                "evaluation.strength_threshold must be a finite number".into(),
            ));
        }
        if self.parallel.progress_interval == 0 {
            return Err(EvalError::InvalidConfig(
                "parallel.progress_interval must be at least 1".into(),
            ));
        }
        if !(1..=100).contains(&self.parallel.thread_percentage) {
            return Err(EvalError::InvalidConfig(format!(
                "parallel.thread_percentage must be between 1 and 100, got {}",
                self.parallel.thread_percentage
            )));
        }
        if self.parallel.channel_buffer_multiplier == 0 {
            return Err(EvalError::InvalidConfig(
                "parallel.channel_buffer_multiplier must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the settings for one dispatch
    pub fn run_config(&self) -> Result<RunConfig, EvalError> {
        self.validate()?;
        Ok(RunConfig {
            strength_threshold: self.evaluation.strength_threshold,
            worker_count: RunConfig::calculate_workers(
                self.parallel.max_threads,
                self.parallel.thread_percentage,
            ),
            progress_interval: self.parallel.progress_interval,
        })
    }
}
