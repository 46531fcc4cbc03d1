//! Constants for the download module (defaults, timeouts, probe bounds).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (10 minutes for large video payloads).
pub const READ_TIMEOUT_SECS: u64 = 600;

/// Default number of concurrent download slots.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Default streaming chunk size in bytes (write-buffer capacity).
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Upper bound for duplicate-name suffix probing.
pub(crate) const MAX_NAME_PROBES: u32 = 1000;
