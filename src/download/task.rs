//! Task and outcome types for batch downloads.

use std::path::PathBuf;

use super::error::DownloadError;

/// One unit of work: download a single resource into a target directory.
///
/// Tasks are immutable and consumed by exactly one worker; there is no
/// shared mutation between tasks.
#[derive(Debug, Clone)]
pub struct DownloadTask {
    /// Source URL of the resource.
    pub url: String,
    /// Directory the downloaded file is written into.
    pub output_dir: PathBuf,
}

impl DownloadTask {
    /// Creates a new task for `url` targeting `output_dir`.
    pub fn new(url: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            output_dir: output_dir.into(),
        }
    }
}

/// Terminal per-task result: success, skip (non-video), or failure with reason.
#[derive(Debug)]
pub enum DownloadOutcome {
    /// Resource was streamed to disk completely.
    Success {
        /// Final path on disk.
        path: PathBuf,
        /// Total bytes written.
        bytes: u64,
    },
    /// Response Content-Type did not identify a video; nothing was written.
    SkippedNotVideo,
    /// Download failed; any partial file has been removed best-effort.
    Failed(DownloadError),
}

impl DownloadOutcome {
    /// Returns true for [`DownloadOutcome::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Per-task record produced by the engine, exactly one per input task.
#[derive(Debug)]
pub struct DownloadResult {
    /// The task this record belongs to.
    pub task: DownloadTask,
    /// The terminal outcome of the task.
    pub outcome: DownloadOutcome,
}
