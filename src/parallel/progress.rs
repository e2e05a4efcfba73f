use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Instant;

/// Sink for run-level signals emitted by the dispatcher.
///
/// All calls come from the collecting thread, one at a time. Progress is a
/// liveness signal only; nothing downstream depends on it.
pub trait RunObserver {
    /// The pool is about to start with `workers` threads
    fn started(&self, _workers: usize) {}

    /// `completed` items are done; called every `progress_interval` items
    fn progress(&self, completed: usize);

    /// A sample failed scoring and was left out of the results
    fn skipped(&self, index: usize, sample: &str, reason: &str);

    /// All `total` items are done
    fn finished(&self, _total: usize) {}
}

impl<T: RunObserver + ?Sized> RunObserver for Box<T> {
    fn started(&self, workers: usize) {
        (**self).started(workers)
    }

    fn progress(&self, completed: usize) {
        (**self).progress(completed)
    }

    fn skipped(&self, index: usize, sample: &str, reason: &str) {
        (**self).skipped(index, sample, reason)
    }

    fn finished(&self, total: usize) {
        (**self).finished(total)
    }
}

/// Discards every signal
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl RunObserver for NullObserver {
    fn progress(&self, _completed: usize) {}
    fn skipped(&self, _index: usize, _sample: &str, _reason: &str) {}
}

/// Reports through `tracing`
#[derive(Debug)]
pub struct TracingObserver {
    start_time: Instant,
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl TracingObserver {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }
}

impl RunObserver for TracingObserver {
    fn started(&self, workers: usize) {
        tracing::info!("Using {} workers for parallel evaluation.", workers);
    }

    fn progress(&self, completed: usize) {
        tracing::info!("Evaluated {} passwords.", completed);
    }

    fn skipped(&self, index: usize, sample: &str, reason: &str) {
        tracing::warn!(
            "Error evaluating password: {}. Skipping password #{}: {:?}",
            reason,
            index + 1,
            sample
        );
    }

    fn finished(&self, total: usize) {
        tracing::info!(
            "Parallel processing finished: {} passwords in {:.2}s",
            total,
            self.start_time.elapsed().as_secs_f64()
        );
    }
}

/// Terminal progress bar; skips are still logged through `tracing`
pub struct BarObserver {
    bar: ProgressBar,
    inner: TracingObserver,
}

impl BarObserver {
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} passwords ({eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏  "),
        );

        Self {
            bar,
            inner: TracingObserver::new(),
        }
    }
}

impl RunObserver for BarObserver {
    fn started(&self, workers: usize) {
        self.bar.set_message(format!("{workers} workers"));
        self.bar.suspend(|| self.inner.started(workers));
    }

    fn progress(&self, completed: usize) {
        self.bar.set_position(completed as u64);
        // No terminal to draw on (piped or CI), so fall back to log lines
        if self.bar.is_hidden() {
            self.inner.progress(completed);
        }
    }

    fn skipped(&self, index: usize, sample: &str, reason: &str) {
        self.bar.suspend(|| self.inner.skipped(index, sample, reason));
    }

    fn finished(&self, total: usize) {
        self.bar.set_position(total as u64);
        self.bar.finish_and_clear();
        self.inner.finished(total);
    }
}

/// Keeps every signal in memory. Useful for summaries and tests.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    started: Mutex<Option<usize>>,
    progress: Mutex<Vec<usize>>,
    skipped: Mutex<Vec<(usize, String, String)>>,
    finished: Mutex<Option<usize>>,
}

impl RecordingObserver {
    pub fn started_with(&self) -> Option<usize> {
        *self.started.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn progress_counts(&self) -> Vec<usize> {
        self.progress.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Skipped samples in the order they were reported
    pub fn skipped_samples(&self) -> Vec<String> {
        self.skipped
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, sample, _)| sample.clone())
            .collect()
    }

    pub fn skipped_reasons(&self) -> Vec<String> {
        self.skipped
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, _, reason)| reason.clone())
            .collect()
    }

    pub fn finished_with(&self) -> Option<usize> {
        *self.finished.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RunObserver for RecordingObserver {
    fn started(&self, workers: usize) {
        *self.started.lock().unwrap_or_else(|e| e.into_inner()) = Some(workers);
    }

    fn progress(&self, completed: usize) {
        self.progress.lock().unwrap_or_else(|e| e.into_inner()).push(completed);
    }

    fn skipped(&self, index: usize, sample: &str, reason: &str) {
        self.skipped
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((index, sample.to_string(), reason.to_string()));
    }

    fn finished(&self, total: usize) {
        *self.finished.lock().unwrap_or_else(|e| e.into_inner()) = Some(total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer() {
        let observer = RecordingObserver::default();
        observer.started(4);
        observer.progress(10);
        observer.skipped(3, "", "empty password");
        observer.progress(20);
        observer.finished(25);

        assert_eq!(observer.started_with(), Some(4));
        assert_eq!(observer.progress_counts(), vec![10, 20]);
        assert_eq!(observer.skipped_samples(), vec![String::new()]);
        assert_eq!(observer.skipped_reasons(), vec!["empty password".to_string()]);
        assert_eq!(observer.finished_with(), Some(25));
    }

    #[test]
    fn test_tracing_observer() {
        let observer = TracingObserver::new();
        observer.started(2);
        observer.progress(1000);
        observer.skipped(0, "bad", "reason");
        observer.finished(1000);
    }

    #[test]
    fn test_bar_observer() {
        let observer = BarObserver::new(100);
        observer.started(4);
        observer.progress(50);
        observer.skipped(7, "x", "reason");
        observer.finished(100);
    }

    #[test]
    fn test_boxed_observer_forwards() {
        let boxed = Box::new(RecordingObserver::default());
        RunObserver::started(&boxed, 3);
        RunObserver::skipped(&boxed, 1, "x", "empty password");

        assert_eq!(boxed.started_with(), Some(3));
        assert_eq!(boxed.skipped_samples(), vec!["x".to_string()]);
    }
}
