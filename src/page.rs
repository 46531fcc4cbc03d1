//! Page fetching: retrieve the target page and save its source to disk.

use std::path::{Path, PathBuf};

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Errors that can occur while fetching the target page.
#[derive(Debug, Error)]
pub enum PageError {
    /// Network-level error fetching the page.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        /// The page URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The page URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error saving the page source.
    #[error("failed to write page source to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Fetches the page at `url`, saves its source to `save_path`, and returns
/// the HTML text for link extraction.
///
/// # Errors
///
/// Returns [`PageError::Fetch`] on transport failure, [`PageError::HttpStatus`]
/// on a non-success status, and [`PageError::Io`] if the source cannot be
/// written to disk.
#[instrument(skip(client, save_path), fields(save_path = %save_path.display()))]
pub async fn fetch_page_source(
    client: &Client,
    url: &str,
    save_path: &Path,
) -> Result<String, PageError> {
    debug!("fetching page");

    let response = client.get(url).send().await.map_err(|e| PageError::Fetch {
        url: url.to_string(),
        source: e,
    })?;

    if !response.status().is_success() {
        return Err(PageError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let html = response.text().await.map_err(|e| PageError::Fetch {
        url: url.to_string(),
        source: e,
    })?;

    tokio::fs::write(save_path, &html)
        .await
        .map_err(|e| PageError::Io {
            path: save_path.to_path_buf(),
            source: e,
        })?;

    info!(path = %save_path.display(), bytes = html.len(), "page source saved");
    Ok(html)
}
