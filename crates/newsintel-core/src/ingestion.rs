//! Loading raw headline records into [`NewsItem`]s.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::news::NewsItem;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read news file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse news records: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("news record {index} has no title")]
    MissingTitle { index: usize },

    #[error("duplicate news id: '{0}'")]
    DuplicateId(String),
}

/// One record as it appears on disk. Both fields are optional here so that
/// missing values produce a precise [`IngestError`] instead of a parse error.
#[derive(Debug, Deserialize)]
struct RawRecord {
    id: Option<String>,
    title: Option<String>,
}

/// Load news items from a YAML or JSON file.
///
/// When `path` is `None`, or points at a file that does not exist, the
/// six-headline mock dataset is returned so the rest of the pipeline still
/// has something to work on.
///
/// # Errors
///
/// Returns [`IngestError`] if an existing file cannot be read or its records
/// are invalid.
pub fn load_news_items(path: Option<&Path>) -> Result<Vec<NewsItem>, IngestError> {
    let Some(path) = path.filter(|p| p.exists()) else {
        return Ok(mock_news_items());
    };

    let content = std::fs::read_to_string(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_news_items(&content)
}

/// Parse a YAML (or JSON) sequence of `{id, title}` records.
///
/// Records without an `id` are numbered `N<position>` (1-based). CSV is not a
/// supported format; a CSV file fails to parse as a record list.
///
/// # Errors
///
/// Returns [`IngestError::MissingTitle`] for a record with an absent or blank
/// title and [`IngestError::DuplicateId`] when two records share an id.
pub fn parse_news_items(content: &str) -> Result<Vec<NewsItem>, IngestError> {
    let records: Vec<RawRecord> = serde_yaml::from_str(content)?;

    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let title = record
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(IngestError::MissingTitle { index })?;

        let id = record
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("N{}", index + 1));

        if !seen.insert(id.clone()) {
            return Err(IngestError::DuplicateId(id));
        }

        items.push(NewsItem::new(id, title));
    }

    Ok(items)
}

/// Small built-in dataset: one dividend story, three versions of the same
/// rate hike, one branch expansion and one sector-wide story.
#[must_use]
pub fn mock_news_items() -> Vec<NewsItem> {
    [
        (
            "N1",
            "HDFC Bank announces 15% dividend, board approves stock buyback",
        ),
        (
            "N2",
            "RBI raises repo rate by 25bps to 6.75%, citing inflation concerns",
        ),
        (
            "N3",
            "Reserve Bank hikes interest rates by 0.25% to fight rising prices",
        ),
        ("N4", "ICICI Bank opens 500 new branches across Tier-2 cities"),
        (
            "N5",
            "Central bank increases policy rate by 25 basis points, signals hawkish stance",
        ),
        (
            "N6",
            "Banking sector NPAs decline to 5-year low, credit growth at 16%",
        ),
    ]
    .into_iter()
    .map(|(id, title)| NewsItem::new(id, title))
    .collect()
}
