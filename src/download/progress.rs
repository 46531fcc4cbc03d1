//! Per-file progress bars for download runs.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

/// Shared handle to the terminal progress area.
///
/// Each worker adds one bar per file, keyed by the resolved filename shown
/// as the bar message. When the reporter is disabled (quiet mode, or stderr
/// is not a terminal) every bar is hidden and updates are no-ops, so the
/// download path never has to branch on display state.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    multi: MultiProgress,
    enabled: bool,
}

impl ProgressReporter {
    /// Creates a reporter; `enabled` controls whether bars are drawn.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            multi: MultiProgress::new(),
            enabled,
        }
    }

    /// Creates a reporter that never draws. Used in tests and quiet runs.
    #[must_use]
    pub fn hidden() -> Self {
        Self::new(false)
    }

    /// Adds a byte-scaled bar for one file.
    ///
    /// `total` is the declared Content-Length; when absent the bar is an
    /// indeterminate spinner that still counts bytes.
    #[must_use]
    pub fn file_bar(&self, filename: &str, total: Option<u64>) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let bar = match total {
            Some(len) => {
                let bar = self.multi.add(ProgressBar::new(len));
                bar.set_style(
                    ProgressStyle::with_template(
                        "{msg} [{bar:30}] {bytes}/{total_bytes} ({bytes_per_sec})",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
                );
                bar
            }
            None => {
                let bar = self.multi.add(ProgressBar::new_spinner());
                bar.set_style(
                    ProgressStyle::with_template("{spinner} {msg} {bytes} ({bytes_per_sec})")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar.enable_steady_tick(Duration::from_millis(100));
                bar
            }
        };
        bar.set_message(filename.to_string());
        bar
    }
}
