//! Engine configuration with documented defaults.
//!
//! The original tool hardcoded its tuning knobs at module level; here they
//! are an explicit bundle passed into [`DownloadEngine`](super::DownloadEngine)
//! and [`HttpClient`](super::HttpClient) at construction.

use super::constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_CHUNK_SIZE, DEFAULT_CONCURRENCY, READ_TIMEOUT_SECS,
};

/// Configuration surface for a batch download run.
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Maximum number of overlapping downloads (default 5).
    pub concurrency: usize,
    /// Streaming chunk size in bytes; used as the write-buffer capacity and
    /// the granularity of progress updates (default 1024).
    pub chunk_size: usize,
    /// HTTP connect timeout in seconds (default 30).
    pub connect_timeout_secs: u64,
    /// HTTP read timeout in seconds (default 600).
    pub read_timeout_secs: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            chunk_size: DEFAULT_CHUNK_SIZE,
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = DownloadConfig::default();
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.chunk_size, 1024);
        assert_eq!(config.connect_timeout_secs, 30);
        assert_eq!(config.read_timeout_secs, 600);
    }
}
