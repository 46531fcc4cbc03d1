//! Batch coordinator for concurrent video downloads.
//!
//! This module provides the `DownloadEngine` which executes a list of
//! [`DownloadTask`]s using a semaphore-based concurrency control pattern and
//! aggregates the per-task outcomes into a [`BatchSummary`].
//!
//! # Overview
//!
//! The engine overlaps at most `concurrency` downloads at a time; as each
//! task completes, the freed slot immediately admits the next queued task.
//! Order of completion is unspecified and irrelevant.
//!
//! # Example
//!
//! ```no_run
//! use vidgrab_core::download::{
//!     DownloadConfig, DownloadEngine, DownloadTask, HttpClient, ProgressReporter,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DownloadConfig::default();
//! let client = HttpClient::new(&config);
//! let engine = DownloadEngine::new(&config)?;
//! let tasks = vec![DownloadTask::new("https://example.com/clip.mp4", "./downloaded_videos")];
//! let report = engine
//!     .process_batch(&client, &tasks, &ProgressReporter::hidden())
//!     .await?;
//! println!("Downloaded: {}/{}", report.summary.succeeded(), report.summary.total());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use super::client::HttpClient;
use super::config::DownloadConfig;
use super::progress::ProgressReporter;
use super::task::{DownloadOutcome, DownloadResult, DownloadTask};

/// Minimum allowed concurrency value.
const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
const MAX_CONCURRENCY: usize = 100;

/// Error type for batch coordinator operations.
///
/// Per-task download failures are NOT engine errors; they are contained in
/// the task's outcome and tallied in the summary. The engine itself only
/// fails on invalid configuration.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// Semaphore was closed unexpectedly.
    #[error("semaphore closed unexpectedly")]
    SemaphoreClosed,
}

/// Aggregate counts from a batch download run.
///
/// Accumulated incrementally as outcomes arrive, using atomic counters for
/// thread-safe updates from concurrent download tasks; finalized only after
/// every task has reached a terminal outcome. The invariant
/// `total() == succeeded() + skipped() + failed()` always holds, and after
/// `process_batch` returns, `total()` equals the input task list length.
#[derive(Debug, Default)]
pub struct BatchSummary {
    succeeded: AtomicUsize,
    skipped: AtomicUsize,
    failed: AtomicUsize,
}

impl BatchSummary {
    /// Creates a new summary with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of successfully downloaded videos.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.succeeded.load(Ordering::SeqCst)
    }

    /// Returns the number of tasks skipped because the response was not a video.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::SeqCst)
    }

    /// Returns the number of failed downloads.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    /// Returns the total number of tasks that reached a terminal outcome.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded() + self.skipped() + self.failed()
    }

    fn record_success(&self) {
        self.succeeded.fetch_add(1, Ordering::SeqCst);
    }

    fn record_skip(&self) {
        self.skipped.fetch_add(1, Ordering::SeqCst);
    }

    fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Everything a finished batch run produced: the aggregate summary plus the
/// per-task outcome records, in input order.
///
/// A worker that panicked has no record in `results` but is still counted in
/// `summary`, so `summary.total()` is always the input task list length.
#[derive(Debug)]
pub struct BatchReport {
    /// Aggregate counts.
    pub summary: BatchSummary,
    /// One terminal record per task that ran to completion.
    pub results: Vec<DownloadResult>,
}

/// Batch coordinator for concurrent video downloads.
///
/// The engine uses a semaphore to limit the number of concurrent downloads,
/// preventing resource exhaustion while keeping all worker slots busy.
///
/// # Concurrency Model
///
/// - Each download runs in its own Tokio task
/// - A semaphore permit is acquired before spawning each download
/// - Permits are released automatically when downloads complete (RAII)
/// - The shared target directory is synchronized exclusively through the
///   resolver's atomic create-exclusive filename reservation
///
/// # Failure Isolation
///
/// One task's failure never prevents the others from completing. A worker
/// that fails (or panics) is logged and counted as failed; no task is ever
/// silently dropped, so the summary always accounts for every input task.
#[derive(Debug)]
pub struct DownloadEngine {
    /// Semaphore for concurrency control.
    semaphore: Arc<Semaphore>,
    /// Configured concurrency limit.
    concurrency: usize,
}

impl DownloadEngine {
    /// Creates a new download engine from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConcurrency`] if `config.concurrency`
    /// is outside the valid range (1-100).
    #[instrument(level = "debug", skip(config))]
    pub fn new(config: &DownloadConfig) -> Result<Self, EngineError> {
        let concurrency = config.concurrency;
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(EngineError::InvalidConcurrency { value: concurrency });
        }

        debug!(concurrency, "creating download engine");

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
        })
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Executes all tasks, overlapping at most `concurrency` downloads.
    ///
    /// Returns the report once every task has reached a terminal outcome.
    /// Individual outcomes are surfaced as log lines and in the report's
    /// `results`; failures and skips do NOT cause this method to error.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SemaphoreClosed`] if the semaphore is closed,
    /// which would indicate a bug in the engine itself.
    #[instrument(skip(self, client, tasks, progress), fields(task_count = tasks.len()))]
    pub async fn process_batch(
        &self,
        client: &HttpClient,
        tasks: &[DownloadTask],
        progress: &ProgressReporter,
    ) -> Result<BatchReport, EngineError> {
        let summary = Arc::new(BatchSummary::new());
        let mut handles = Vec::with_capacity(tasks.len());

        info!("starting batch download");

        for task in tasks {
            // Acquire semaphore permit (blocks while at the concurrency limit)
            let permit = self
                .semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| EngineError::SemaphoreClosed)?;

            // Clone values for the spawned task
            let client = client.clone();
            let task = task.clone();
            let summary = Arc::clone(&summary);
            let progress = progress.clone();

            handles.push(tokio::spawn(async move {
                // Permit is dropped when this block exits (RAII)
                let _permit = permit;

                let outcome = client.download_task(&task, &progress).await;
                match &outcome {
                    DownloadOutcome::Success { path, bytes } => {
                        info!(url = %task.url, path = %path.display(), bytes, "download completed");
                        summary.record_success();
                    }
                    DownloadOutcome::SkippedNotVideo => {
                        info!(url = %task.url, "skipped: response is not a video");
                        summary.record_skip();
                    }
                    DownloadOutcome::Failed(e) => {
                        warn!(url = %task.url, error = %e, "download failed");
                        summary.record_failure();
                    }
                }
                DownloadResult { task, outcome }
            }));
        }

        debug!(
            task_count = handles.len(),
            "waiting for downloads to complete"
        );

        // Wait for all tasks to complete. A panicked worker never recorded an
        // outcome, so it is counted as failed here rather than dropped.
        let mut results = Vec::with_capacity(tasks.len());
        for handle in handles {
            match handle.await {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!(error = %e, "download task panicked");
                    summary.record_failure();
                }
            }
        }

        info!(
            succeeded = summary.succeeded(),
            skipped = summary.skipped(),
            failed = summary.failed(),
            total = summary.total(),
            "batch download complete"
        );

        // All tasks are done, so we should have sole ownership of the Arc.
        // If not (which would be a bug), rebuild the summary from the counts.
        let summary = match Arc::try_unwrap(summary) {
            Ok(summary) => summary,
            Err(arc_summary) => {
                let rebuilt = BatchSummary::new();
                rebuilt
                    .succeeded
                    .store(arc_summary.succeeded(), Ordering::SeqCst);
                rebuilt
                    .skipped
                    .store(arc_summary.skipped(), Ordering::SeqCst);
                rebuilt
                    .failed
                    .store(arc_summary.failed(), Ordering::SeqCst);
                rebuilt
            }
        };

        Ok(BatchReport { summary, results })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config_with_concurrency(concurrency: usize) -> DownloadConfig {
        DownloadConfig {
            concurrency,
            ..DownloadConfig::default()
        }
    }

    #[test]
    fn test_engine_new_valid_concurrency() {
        let engine = DownloadEngine::new(&config_with_concurrency(1)).unwrap();
        assert_eq!(engine.concurrency(), 1);

        let engine = DownloadEngine::new(&DownloadConfig::default()).unwrap();
        assert_eq!(engine.concurrency(), 5);

        let engine = DownloadEngine::new(&config_with_concurrency(100)).unwrap();
        assert_eq!(engine.concurrency(), 100);
    }

    #[test]
    fn test_engine_new_invalid_concurrency_zero() {
        let result = DownloadEngine::new(&config_with_concurrency(0));
        assert!(matches!(
            result,
            Err(EngineError::InvalidConcurrency { value: 0 })
        ));
    }

    #[test]
    fn test_engine_new_invalid_concurrency_too_high() {
        let result = DownloadEngine::new(&config_with_concurrency(101));
        assert!(matches!(
            result,
            Err(EngineError::InvalidConcurrency { value: 101 })
        ));
    }

    #[test]
    fn test_batch_summary_default() {
        let summary = BatchSummary::default();
        assert_eq!(summary.succeeded(), 0);
        assert_eq!(summary.skipped(), 0);
        assert_eq!(summary.failed(), 0);
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_batch_summary_record() {
        let summary = BatchSummary::new();

        summary.record_success();
        summary.record_success();
        summary.record_skip();
        summary.record_failure();

        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.skipped(), 1);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_batch_summary_thread_safe() {
        use std::thread;

        let summary = Arc::new(BatchSummary::new());
        let mut handles = Vec::new();

        for _ in 0..10 {
            let summary = Arc::clone(&summary);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    summary.record_success();
                    summary.record_skip();
                    summary.record_failure();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(summary.succeeded(), 1000);
        assert_eq!(summary.skipped(), 1000);
        assert_eq!(summary.failed(), 1000);
        assert_eq!(summary.total(), 3000);
    }

    #[test]
    fn test_engine_error_display() {
        let error = EngineError::InvalidConcurrency { value: 0 };
        let msg = error.to_string();
        assert!(msg.contains("invalid concurrency"));
        assert!(msg.contains('0'));
        assert!(msg.contains('1')); // min
        assert!(msg.contains("100")); // max
    }
}
