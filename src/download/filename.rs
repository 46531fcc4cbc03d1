//! Filename extraction, sanitization, and atomic path reservation.
//!
//! This module derives a safe on-disk name from a video URL and reserves a
//! unique path in the target directory. Reservation uses a create-exclusive
//! open so that concurrent workers resolving against the same directory can
//! never pick the same disambiguated name.

use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use url::Url;

use super::constants::MAX_NAME_PROBES;
use super::error::DownloadError;

/// Extracts the filename hint from a video URL.
///
/// The query parameter `f` is the canonical filename hint used by the
/// originating service and takes precedence; the last path segment is the
/// fallback. The returned hint is unsanitized and may be empty.
#[must_use]
pub(crate) fn filename_hint(url: &Url) -> String {
    if let Some((_, value)) = url.query_pairs().find(|(key, _)| key == "f") {
        return value.into_owned();
    }

    url.path_segments()
        .and_then(|mut segments| segments.next_back().map(std::string::ToString::to_string))
        .unwrap_or_default()
}

/// Sanitizes a filename hint for filesystem safety.
///
/// Literal `%20` space-encoding sequences are removed entirely; each of the
/// characters `< > : " / \ | ? *` (and control characters) is replaced with
/// `_` individually. Bare dot segments sanitize to an empty string so the
/// caller falls back to a generated name instead of escaping the target
/// directory.
#[must_use]
pub(crate) fn sanitize_hint(hint: &str) -> String {
    let stripped = hint.replace("%20", "");
    let sanitized: String = stripped
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if matches!(sanitized.as_str(), "." | "..") {
        return String::new();
    }
    sanitized
}

/// Guess file extension from a video Content-Type header.
pub(crate) fn extension_from_content_type(content_type: &str) -> &'static str {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    match mime.as_str() {
        "video/mp4" => ".mp4",
        "video/webm" => ".webm",
        "video/x-matroska" => ".mkv",
        "video/quicktime" => ".mov",
        "video/mpeg" => ".mpg",
        "video/ogg" => ".ogv",
        _ => ".bin", // Fallback for unknown types
    }
}

/// Fallback filename when the URL yields no usable hint: `video_<timestamp><ext>`.
///
/// The extension is derived from the response Content-Type, which the caller
/// has already verified to be a video type.
#[must_use]
pub(crate) fn generated_filename(content_type: &str) -> String {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!(
        "video_{timestamp}{}",
        extension_from_content_type(content_type)
    )
}

/// Atomically reserves a unique file path, adding a numeric suffix on conflict.
///
/// Returns the reserved path together with the exclusively-created file
/// handle. Probing `stem_1.ext`, `stem_2.ext`, … is bounded by
/// [`MAX_NAME_PROBES`].
///
/// # Errors
///
/// Returns [`DownloadError::Io`] if the directory is not writable and
/// [`DownloadError::NamingExhausted`] if every candidate name is taken.
pub(crate) async fn reserve_unique_path(
    dir: &Path,
    filename: &str,
) -> Result<(PathBuf, File), DownloadError> {
    reserve_unique_path_bounded(dir, filename, MAX_NAME_PROBES).await
}

/// Reservation with a configurable probe bound (exposed for tests).
pub(crate) async fn reserve_unique_path_bounded(
    dir: &Path,
    filename: &str,
    max_probes: u32,
) -> Result<(PathBuf, File), DownloadError> {
    let filename = {
        // Ensure no path separators remain (defense in depth against traversal)
        if filename.is_empty()
            || filename.contains('/')
            || filename.contains('\\')
            || matches!(filename, "." | "..")
        {
            "video.bin".to_string()
        } else {
            filename.to_string()
        }
    };

    // Split filename into stem and extension
    let (stem, ext) = match filename.rfind('.') {
        Some(pos) => (&filename[..pos], &filename[pos..]),
        None => (filename.as_str(), ""),
    };

    for i in 0..=max_probes {
        let candidate = if i == 0 {
            filename.clone()
        } else {
            format!("{stem}_{i}{ext}")
        };
        let path = dir.join(candidate);

        // create_new is the atomic check-and-reserve: either this worker owns
        // the name, or another writer got there first and we probe the next.
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(DownloadError::io(path, e)),
        }
    }

    Err(DownloadError::naming_exhausted(dir, filename))
}
