use grocer_core::Catalog;
use std::path::PathBuf;
use std::time::Duration;

use crate::load::{load_catalog, LoadError, SourceProfile};

/// Where the price table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// `http(s)://` locations are fetched over the network; anything else is a file path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Source::Url(location.to_string())
        } else {
            Source::File(PathBuf::from(location))
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{url}"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Reads the raw text of `source`, giving up after `timeout`.
pub async fn fetch_text(source: &Source, timeout: Duration) -> Result<String, LoadError> {
    tokio::time::timeout(timeout, read_source(source))
        .await
        .map_err(|_| LoadError::Timeout(timeout.as_secs()))?
}

async fn read_source(source: &Source) -> Result<String, LoadError> {
    match source {
        Source::Url(url) => {
            let response = reqwest::get(url.as_str()).await?.error_for_status()?;
            Ok(response.text().await?)
        }
        Source::File(path) => Ok(tokio::fs::read_to_string(path).await?),
    }
}

/// Fetches and builds a catalog in one step. Nothing is returned unless the
/// whole table loaded.
pub async fn load_from(
    source: &Source,
    profile: &SourceProfile,
    timeout: Duration,
) -> Result<Catalog, LoadError> {
    tracing::info!("Loading price table from {source}");
    let text = fetch_text(source, timeout)
        .await
        .inspect_err(|e| tracing::error!("Error fetching {source}: {e}"))?;
    load_catalog(&text, profile)
}
