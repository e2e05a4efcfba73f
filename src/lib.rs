//! # passeval - parallel password strength evaluation
//!
//! Reads a newline-delimited wordlist, scores every password with a
//! [`StrengthMeter`](eval::StrengthMeter), computes its Shannon entropy and
//! labels it weak or strong against a threshold. Scoring runs on a bounded
//! worker pool; results come back in input order.
//!
//! ## Quick Start
//!
//! ```bash
//! passeval evaluate rockyou.txt --threshold 0.6
//! passeval config show --format yaml
//! ```
//!
//! ## Library use
//!
//! ```
//! use passeval::eval::{PasswordMeter, aggregate};
//! use passeval::parallel::{Dispatcher, NullObserver, RunConfig};
//!
//! let samples = vec!["123456".to_string(), "c0rrect-Horse-battery".to_string()];
//! let dispatcher = Dispatcher::new(RunConfig { worker_count: 2, ..RunConfig::default() });
//! let outcomes = dispatcher.run(samples, &PasswordMeter::new(), &NullObserver)?;
//! let dataset = aggregate(outcomes)?;
//! assert_eq!(dataset.len(), 2);
//! # Ok::<(), passeval::error::EvalError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod eval;
pub mod io;
pub mod parallel;
pub mod pipeline;

pub use cli::{Cli, Output};
pub use config::PassevalConfig;
pub use error::EvalError;

/// Result type alias for passeval operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
