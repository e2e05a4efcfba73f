//! Typed error conditions for the evaluation pipeline.
//!
//! Most plumbing returns `anyhow::Result`; the conditions below are the ones a
//! caller has to tell apart (for example to skip persistence when nothing was
//! evaluated). They can be recovered from an `anyhow::Error` with
//! `downcast_ref::<EvalError>()`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvalError {
    /// The input source yielded zero samples.
    #[error("No samples to evaluate in {0}")]
    EmptyInput(String),

    /// Every sample was skipped, so there is nothing to persist.
    #[error("No data to save: all {skipped} samples were skipped")]
    NoUsableResults { skipped: usize },

    /// A worker or producer thread died outside of item evaluation.
    #[error("Worker pool failure: {0}")]
    WorkerPool(String),

    /// The collector saw fewer outcomes than samples were submitted.
    #[error("Lost outcomes during dispatch: submitted {submitted}, collected {collected}")]
    LostOutcomes { submitted: usize, collected: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
