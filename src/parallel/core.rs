use super::progress::RunObserver;
use crate::error::EvalError;
use crate::eval::{EvaluationOutcome, StrengthMeter, evaluate};
use crossbeam::channel::{Receiver, Sender, bounded};

/// Default work channel capacity per worker
pub const DEFAULT_BUFFER_MULTIPLIER: usize = 2;

/// Name prefix of evaluation worker threads (`passeval-worker-<id>`)
pub const WORKER_THREAD_PREFIX: &str = "passeval-worker-";

/// Settings for a single dispatch. Created once per run and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    /// Scores at or above this are labeled strong
    pub strength_threshold: f64,
    /// Exact number of worker threads
    pub worker_count: usize,
    /// Completed items between progress signals
    pub progress_interval: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            strength_threshold: 0.5,
            worker_count: num_cpus::get().max(1),
            progress_interval: 1000,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), EvalError> {
        if self.worker_count == 0 {
            return Err(EvalError::InvalidConfig("worker_count must be at least 1".into()));
        }
        if self.progress_interval == 0 {
            return Err(EvalError::InvalidConfig("progress_interval must be at least 1".into()));
        }
        if !self.strength_threshold.is_finite() {
            return Err(EvalError::InvalidConfig(format!(
                "strength_threshold must be finite, got {}",
                self.strength_threshold
            )));
        }
        Ok(())
    }

    /// Worker count from system resources and configuration limits.
    ///
    /// An explicit `max_threads` is used as-is. `0` derives the count from the
    /// available cores scaled by `thread_percentage`, never below one.
    pub fn calculate_workers(max_threads: usize, thread_percentage: u8) -> usize {
        if max_threads > 0 {
            return max_threads;
        }
        let available_cores = num_cpus::get();
        std::cmp::max(1, (available_cores * thread_percentage as usize) / 100)
    }
}

/// Fixed-size worker pool that evaluates samples in parallel.
///
/// A producer thread feeds `(index, sample)` pairs into a bounded channel in
/// input order, `worker_count` workers evaluate them, and the calling thread
/// is the only one that touches the collected outcomes.
pub struct Dispatcher {
    config: RunConfig,
    buffer_size: usize,
}

impl Dispatcher {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            buffer_size: config.worker_count.max(1) * DEFAULT_BUFFER_MULTIPLIER,
        }
    }

    /// Override the work channel capacity (`workers * multiplier`)
    pub fn with_buffer_multiplier(mut self, multiplier: usize) -> Self {
        self.buffer_size = self.config.worker_count.max(1) * multiplier.max(1);
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Evaluate every sample and return one outcome per sample, in input order.
    ///
    /// Blocks until all work has completed. Per-sample failures come back as
    /// `Skipped` outcomes and are reported through `observer`; only pool
    /// failures (a dead thread, lost outcomes) are returned as errors.
    pub fn run<I, M, O>(
        &self,
        samples: I,
        meter: &M,
        observer: &O,
    ) -> Result<Vec<EvaluationOutcome>, EvalError>
    where
        I: IntoIterator<Item = String>,
        I::IntoIter: Send,
        M: StrengthMeter + ?Sized,
        O: RunObserver + ?Sized,
    {
        self.config.validate()?;

        let mut samples = samples.into_iter().peekable();
        if samples.peek().is_none() {
            return Ok(Vec::new());
        }

        let workers = self.config.worker_count;
        let threshold = self.config.strength_threshold;
        observer.started(workers);

        let (work_tx, work_rx): (Sender<(usize, String)>, Receiver<(usize, String)>) =
            bounded(self.buffer_size);
        let (result_tx, result_rx): (
            Sender<(usize, EvaluationOutcome)>,
            Receiver<(usize, EvaluationOutcome)>,
        ) = bounded(self.buffer_size * 2);

        let (submitted, mut indexed) = crossbeam::thread::scope(|s| {
            for worker_id in 0..workers {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                s.builder()
                    .name(format!("{WORKER_THREAD_PREFIX}{worker_id}"))
                    .spawn(move |_| Self::worker(worker_id, work_rx, result_tx, meter, threshold))
                    .map_err(|e| EvalError::WorkerPool(format!("failed to spawn worker: {e}")))?;
            }

            // Workers hold the only receivers now, so the producer fails fast if they all die
            drop(work_rx);
            drop(result_tx);

            let producer = s.spawn(move |_| {
                let mut submitted = 0usize;
                for (index, sample) in samples.enumerate() {
                    if work_tx.send((index, sample)).is_err() {
                        break; // Workers dropped
                    }
                    submitted += 1;
                }
                submitted
            });

            let collected = self.collect_results(result_rx, observer);

            let submitted = producer
                .join()
                .map_err(|_| EvalError::WorkerPool("producer thread panicked".into()))?;
            Ok::<_, EvalError>((submitted, collected))
        })
        .map_err(|_| EvalError::WorkerPool("worker thread panicked".into()))??;

        if indexed.len() != submitted {
            return Err(EvalError::LostOutcomes {
                submitted,
                collected: indexed.len(),
            });
        }

        observer.finished(submitted);

        indexed.sort_by_key(|(index, _)| *index);
        Ok(indexed.into_iter().map(|(_, outcome)| outcome).collect())
    }

    fn worker<M>(
        worker_id: usize,
        work_rx: Receiver<(usize, String)>,
        result_tx: Sender<(usize, EvaluationOutcome)>,
        meter: &M,
        threshold: f64,
    ) where
        M: StrengthMeter + ?Sized,
    {
        let mut processed = 0usize;
        while let Ok((index, sample)) = work_rx.recv() {
            let outcome = evaluate(sample, threshold, meter);
            if result_tx.send((index, outcome)).is_err() {
                break; // Collector dropped
            }
            processed += 1;
        }
        tracing::trace!("worker-{} finished after {} samples", worker_id, processed);
    }

    /// Single writer for the outcome collection. Drains until every worker
    /// has dropped its sender.
    fn collect_results<O>(
        &self,
        result_rx: Receiver<(usize, EvaluationOutcome)>,
        observer: &O,
    ) -> Vec<(usize, EvaluationOutcome)>
    where
        O: RunObserver + ?Sized,
    {
        let mut results = Vec::new();
        let mut completed = 0usize;

        for (index, outcome) in result_rx.iter() {
            completed += 1;

            if let EvaluationOutcome::Skipped { sample, reason } = &outcome {
                observer.skipped(index, sample, reason);
            }
            if completed % self.config.progress_interval == 0 {
                observer.progress(completed);
            }

            results.push((index, outcome));
        }

        results
    }
}
