//! Parallel evaluation engine
//!
//! This module owns the worker pool that drives sample evaluation:
//!
//! ```text
//! ┌────────────┐  (index, sample)  ┌───────────┐  (index, outcome)  ┌────────────┐
//! │  Producer  │──────────────────▶│ Worker xN │───────────────────▶│ Collector  │
//! │ (1 thread) │  bounded channel  │ evaluate  │  bounded channel   │ (caller)   │
//! └────────────┘                   └───────────┘                    └────────────┘
//!                                                                         │
//!                                                          progress / skipped signals
//!                                                                         ▼
//!                                                                   RunObserver
//! ```
//!
//! # What This Module Does
//! - Resolves the worker count from configuration and available cores
//! - Runs exactly `worker_count` threads inside a crossbeam scope
//! - Collects exactly one outcome per submitted sample on a single thread
//! - Emits a progress signal every `progress_interval` completions
//!
//! # What This Module Does NOT Do
//! - Score passwords (see [`crate::eval`])
//! - Read or write files (see [`crate::io`])
//!
//! # Example
//!
//! ```rust
//! use passeval::eval::PasswordMeter;
//! use passeval::parallel::{Dispatcher, RunConfig, NullObserver};
//!
//! let config = RunConfig { strength_threshold: 0.5, worker_count: 2, progress_interval: 1000 };
//! let samples = vec!["hunter2".to_string(), "Tr0ub4dor&3".to_string()];
//! let outcomes = Dispatcher::new(config)
//!     .run(samples, &PasswordMeter::new(), &NullObserver)
//!     .unwrap();
//! assert_eq!(outcomes.len(), 2);
//! ```

pub mod core;
pub mod progress;

pub use self::core::{DEFAULT_BUFFER_MULTIPLIER, Dispatcher, RunConfig, WORKER_THREAD_PREFIX};
pub use progress::{BarObserver, NullObserver, RecordingObserver, RunObserver, TracingObserver};
