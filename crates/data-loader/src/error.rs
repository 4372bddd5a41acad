//! Error types for the data-loader crate.
//!
//! Loading can fail in two places: reading the CSV file, and turning the
//! parsed records into a [`RatingMatrix`](crate::RatingMatrix). Both surface
//! through [`DataLoadError`] so callers only match on one enum.

use thiserror::Error;

/// Errors that can occur while loading ratings and building the matrix
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected the file (bad quoting, ragged rows, bad UTF-8)
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// The header row lacks one or more of the required columns
    #[error("The CSV file must contain {required:?} columns, found {found:?}")]
    MissingColumns {
        required: Vec<String>,
        found: Vec<String>,
    },

    /// The file has no header row at all
    #[error("The file '{path}' is empty")]
    EmptyFile { path: String },

    /// A rating record lacks a user, a movie or a numeric rating
    ///
    /// `record` is the zero-based position of the record in the input sequence.
    #[error("Malformed rating record #{record}: {reason}")]
    MalformedInput { record: usize, reason: String },

    /// The same (user, movie) pair was rated twice under `DuplicatePolicy::Reject`
    #[error("Duplicate rating for user '{user}' and movie '{movie}' (record #{record})")]
    DuplicateRating {
        user: String,
        movie: String,
        record: usize,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
