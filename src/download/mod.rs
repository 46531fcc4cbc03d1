//! Concurrent download engine for streaming videos to disk.
//!
//! This module provides the core of the tool: a bounded worker pool that
//! streams video resources to a shared target directory with collision-free
//! filenames and per-file progress accounting.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large files)
//! - Content-Type gate: non-video responses are skipped before any file is
//!   created
//! - Atomic filename reservation safe across concurrent writers (numeric
//!   suffix on duplicates)
//! - Semaphore-bounded concurrency with per-task failure isolation
//! - Structured error types with full context
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

mod client;
mod config;
mod constants;
mod engine;
mod error;
mod filename;
mod progress;
mod task;

pub use client::{BROWSER_USER_AGENT, HttpClient};
pub use config::DownloadConfig;
pub use constants::{DEFAULT_CHUNK_SIZE, DEFAULT_CONCURRENCY};
pub use engine::{BatchReport, BatchSummary, DownloadEngine, EngineError};
pub use error::DownloadError;
pub use progress::ProgressReporter;
pub use task::{DownloadOutcome, DownloadResult, DownloadTask};

// Note: no module-local Result aliases; use `Result<T, DownloadError>`
// explicitly in function signatures.
