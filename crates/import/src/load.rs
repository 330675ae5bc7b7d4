use grocer_core::Catalog;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::build::build_catalog;
use crate::tabular::{data_lines, parse_row, Row};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceProfile {
    pub name: String,
    pub delimiter: String,
    pub quote: String,
}

impl Default for SourceProfile {
    fn default() -> Self {
        Self {
            name: "CPI grocery prices".to_string(),
            delimiter: ",".to_string(),
            quote: "\"".to_string(),
        }
    }
}

impl SourceProfile {
    pub fn from_toml(toml_content: &str) -> Result<Self, LoadError> {
        toml::from_str(toml_content).map_err(|e| LoadError::Profile(e.to_string()))
    }

    pub fn delimiter_char(&self) -> char {
        self.delimiter.chars().next().unwrap_or(',')
    }

    pub fn quote_char(&self) -> char {
        self.quote.chars().next().unwrap_or('"')
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Malformed input: need a header and at least one data row, found {0} non-empty line(s)")]
    MalformedInput(usize),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Timed out after {0}s fetching source")]
    Timeout(u64),
    #[error("Invalid source profile: {0}")]
    Profile(String),
}

/// Splits `text` into non-blank rows using the profile's delimiter and quote.
pub fn parse_rows(text: &str, profile: &SourceProfile) -> Vec<Row> {
    let delimiter = profile.delimiter_char();
    let quote = profile.quote_char();
    data_lines(text)
        .map(|line| parse_row(line, delimiter, quote))
        .collect()
}

pub fn load_catalog(text: &str, profile: &SourceProfile) -> Result<Catalog, LoadError> {
    let rows = parse_rows(text, profile);
    tracing::debug!("Parsed {} non-empty rows from {}", rows.len(), profile.name);
    build_catalog(rows).inspect_err(|e| tracing::error!("Catalog load failed: {e}"))
}
