//! Per-sample evaluation
//!
//! Everything here is pure and thread-safe: the dispatcher in
//! [`crate::parallel`] fans samples out to workers that call [`evaluate`],
//! and [`aggregate`] turns the collected outcomes into a [`Dataset`].

pub mod aggregate;
pub mod entropy;
pub mod evaluator;
pub mod meter;
pub mod types;

pub use aggregate::{Dataset, aggregate};
pub use entropy::shannon_entropy;
pub use evaluator::evaluate;
pub use meter::{MeterError, PasswordMeter, Strength, StrengthMeter};
pub use types::{EvaluationOutcome, EvaluationRecord, Label};
