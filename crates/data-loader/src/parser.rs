//! Parser for ratings CSV files.
//!
//! Expected format: a header row naming at least `user`, `movie` and
//! `rating`, then one rating per line:
//!
//! ```text
//! user,movie,rating
//! Alice,The Matrix,5
//! Bob,Inception,4
//! ```
//!
//! Columns may appear in any order and extra columns are ignored. Blank or
//! non-numeric cells are kept as `None` so the matrix builder can report
//! which record was malformed.
//!
//! Cells are not trimmed: `"Alice "` and `"Alice"` are different users.

use crate::error::{DataLoadError, Result};
use crate::types::RatingRecord;
use std::path::Path;
use tracing::debug;

/// Columns a ratings file must provide
pub const REQUIRED_COLUMNS: [&str; 3] = ["user", "movie", "rating"];

/// Parse a ratings CSV file into raw records
pub fn parse_ratings(path: &Path) -> Result<Vec<RatingRecord>> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(DataLoadError::EmptyFile {
            path: path.display().to_string(),
        });
    }

    let missing = REQUIRED_COLUMNS
        .iter()
        .any(|column| !headers.iter().any(|h| h == *column));
    if missing {
        return Err(DataLoadError::MissingColumns {
            required: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            found: headers.iter().map(|h| h.to_string()).collect(),
        });
    }

    let mut records = Vec::new();
    for result in reader.deserialize::<RatingRecord>() {
        records.push(result?);
    }

    debug!(records = records.len(), "Parsed ratings file");
    Ok(records)
}
