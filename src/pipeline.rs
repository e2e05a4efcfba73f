//! End-to-end evaluation of one wordlist file: read, dispatch, aggregate,
//! write.

use crate::config::PassevalConfig;
use crate::error::EvalError;
use crate::eval::{Label, StrengthMeter, aggregate};
use crate::io::{default_output_path, read_samples, write_dataset};
use crate::parallel::{Dispatcher, RunObserver};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Counts from one completed file evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub read: usize,
    pub evaluated: usize,
    pub skipped: usize,
    pub strong: usize,
    pub weak: usize,
    pub workers: usize,
    pub elapsed: Duration,
    pub output: PathBuf,
}

/// Evaluate every line of `input` and write the labelled table.
///
/// `output` defaults to `<stem>_evaluated.<ext>` next to the input.
/// `make_observer` receives the sample count once the file is read, so a
/// progress bar can be sized before dispatch starts.
///
/// Fails with [`EvalError::EmptyInput`] when the file holds no samples and
/// with [`EvalError::NoUsableResults`] when every sample was skipped; in
/// both cases nothing is written.
pub fn evaluate_file<M, O, F>(
    input: &Path,
    output: Option<&Path>,
    config: &PassevalConfig,
    meter: &M,
    make_observer: F,
) -> Result<PipelineReport>
where
    M: StrengthMeter + ?Sized,
    O: RunObserver,
    F: FnOnce(usize) -> O,
{
    let start_time = Instant::now();
    let run_config = config.run_config()?;

    tracing::info!("Reading passwords from {}", input.display());
    let samples = read_samples(input, config.input.encoding, config.input.trim)?;
    if samples.is_empty() {
        return Err(EvalError::EmptyInput(input.display().to_string()).into());
    }
    let read = samples.len();
    tracing::info!("Loaded {} passwords", read);

    let observer = make_observer(read);
    let dispatcher = Dispatcher::new(run_config)
        .with_buffer_multiplier(config.parallel.channel_buffer_multiplier);
    let outcomes = dispatcher.run(samples, meter, &observer)?;

    let dataset = aggregate(outcomes)?;

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(input, config.output.format),
    };
    write_dataset(&output, &dataset, config.output.format, config.output.encoding)?;
    tracing::info!("Data saved to {}", output.display());

    Ok(PipelineReport {
        read,
        evaluated: dataset.len(),
        skipped: dataset.skipped(),
        strong: dataset.count_label(Label::Strong),
        weak: dataset.count_label(Label::Weak),
        workers: dispatcher.config().worker_count,
        elapsed: start_time.elapsed(),
        output,
    })
}
