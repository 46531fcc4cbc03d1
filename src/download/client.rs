//! HTTP client wrapper for streaming video downloads.
//!
//! This module provides the `HttpClient` struct which handles one download
//! task at a time: streaming GET, content-type validation, filename
//! reservation, and chunked writes to disk with per-file progress.

use std::path::Path;

use futures_util::StreamExt;
use indicatif::ProgressBar;
use reqwest::Client;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::config::DownloadConfig;
use super::error::DownloadError;
use super::filename::{filename_hint, generated_filename, reserve_unique_path, sanitize_hint};
use super::progress::ProgressReporter;
use super::task::{DownloadOutcome, DownloadTask};

/// Browser User-Agent sent with every request.
///
/// Some origins reject non-browser clients outright, so the tool identifies
/// as a mainstream browser for both page fetches and video downloads.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// HTTP client for downloading videos with streaming support.
///
/// This client is designed to be created once and reused for multiple
/// downloads, taking advantage of connection pooling.
///
/// # Example
///
/// ```no_run
/// use vidgrab_core::download::{DownloadConfig, DownloadTask, HttpClient, ProgressReporter};
///
/// # async fn example() {
/// let client = HttpClient::new(&DownloadConfig::default());
/// let task = DownloadTask::new("https://example.com/clip.mp4", "./downloaded_videos");
/// let outcome = client.download_task(&task, &ProgressReporter::hidden()).await;
/// println!("{outcome:?}");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    chunk_size: usize,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(&DownloadConfig::default())
    }
}

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// Applies the configured connect/read timeouts, enables gzip
    /// decompression, and sets the browser User-Agent.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new(config: &DownloadConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .timeout(std::time::Duration::from_secs(config.read_timeout_secs))
            .gzip(true)
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self {
            client,
            chunk_size: config.chunk_size.max(1),
        }
    }

    /// Downloads one task, reporting a terminal outcome.
    ///
    /// The sequence within a task is fixed: headers first, then the
    /// content-type gate, then filename reservation, then the body stream.
    /// A response whose Content-Type does not contain `video` is skipped
    /// before any file is created. Errors are contained in the returned
    /// outcome; they never propagate to the caller.
    #[instrument(skip(self, progress), fields(url = %task.url))]
    pub async fn download_task(
        &self,
        task: &DownloadTask,
        progress: &ProgressReporter,
    ) -> DownloadOutcome {
        match self.download_inner(task, progress).await {
            Ok(outcome) => outcome,
            Err(e) => DownloadOutcome::Failed(e),
        }
    }

    async fn download_inner(
        &self,
        task: &DownloadTask,
        progress: &ProgressReporter,
    ) -> Result<DownloadOutcome, DownloadError> {
        debug!("starting download");

        let parsed_url =
            Url::parse(&task.url).map_err(|_| DownloadError::invalid_url(task.url.clone()))?;

        let response = self.client.get(parsed_url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(&task.url)
            } else {
                DownloadError::network(&task.url, e)
            }
        })?;

        if !response.status().is_success() {
            return Err(DownloadError::http_status(
                &task.url,
                response.status().as_u16(),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        // Non-video responses are skipped before any file is created.
        if !content_type.contains("video") {
            info!(content_type = %content_type, "skipping non-video resource");
            return Ok(DownloadOutcome::SkippedNotVideo);
        }

        let content_length = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        tokio::fs::create_dir_all(&task.output_dir)
            .await
            .map_err(|e| DownloadError::io(task.output_dir.clone(), e))?;

        let hint = sanitize_hint(&filename_hint(&parsed_url));
        let filename = if hint.is_empty() {
            generated_filename(&content_type)
        } else {
            hint
        };

        let (file_path, file) = reserve_unique_path(&task.output_dir, &filename).await?;
        debug!(path = %file_path.display(), "reserved output path");

        let bar = progress.file_bar(
            file_path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(&filename),
            content_length,
        );

        match self
            .stream_to_file(file, response, &task.url, &file_path, &bar)
            .await
        {
            Ok(bytes) => {
                bar.finish();
                info!(path = %file_path.display(), bytes, "download complete");
                Ok(DownloadOutcome::Success {
                    path: file_path,
                    bytes,
                })
            }
            Err(e) => {
                bar.abandon();
                // Remove the partial file; this also releases the reserved name.
                debug!(path = %file_path.display(), "cleaning up partial file after error");
                let _ = tokio::fs::remove_file(&file_path).await;
                Err(e)
            }
        }
    }

    /// Streams the response body to file, returning bytes written.
    async fn stream_to_file(
        &self,
        file: File,
        response: reqwest::Response,
        url: &str,
        file_path: &Path,
        bar: &ProgressBar,
    ) -> Result<u64, DownloadError> {
        let mut writer = BufWriter::with_capacity(self.chunk_size, file);
        let mut stream = response.bytes_stream();
        let mut bytes_written: u64 = 0;

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| {
                if e.is_timeout() {
                    DownloadError::timeout(url)
                } else {
                    DownloadError::network(url, e)
                }
            })?;

            writer
                .write_all(&chunk)
                .await
                .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

            bytes_written += chunk.len() as u64;
            bar.inc(chunk.len() as u64);
        }

        // Ensure all data is flushed to disk
        writer
            .flush()
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        Ok(bytes_written)
    }

    /// Returns a reference to the underlying reqwest client.
    ///
    /// Used by the page fetcher so page and video traffic share one
    /// connection pool and User-Agent.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}
