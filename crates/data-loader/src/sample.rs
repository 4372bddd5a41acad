//! Demonstration dataset.
//!
//! Six users rating six well-known movies. The CLI writes this file when the
//! requested ratings file does not exist, so a first run has something to
//! recommend from. Nothing in the matrix or the recommender calls this.

use crate::error::Result;
use crate::types::Rating;
use std::path::Path;
use tracing::info;

/// (user, movie, rating) triples of the sample dataset
pub const SAMPLE_RATINGS: [(&str, &str, f64); 21] = [
    ("Alice", "The Matrix", 5.0),
    ("Alice", "Inception", 4.0),
    ("Alice", "The Godfather", 3.0),
    ("Alice", "Pulp Fiction", 5.0),
    ("Bob", "The Matrix", 4.0),
    ("Bob", "Inception", 5.0),
    ("Bob", "The Dark Knight", 5.0),
    ("Bob", "Forrest Gump", 2.0),
    ("Charlie", "The Godfather", 5.0),
    ("Charlie", "Pulp Fiction", 4.0),
    ("Charlie", "The Dark Knight", 3.0),
    ("David", "Inception", 3.0),
    ("David", "The Dark Knight", 4.0),
    ("David", "Forrest Gump", 5.0),
    ("David", "The Matrix", 2.0),
    ("Eve", "Pulp Fiction", 5.0),
    ("Eve", "The Godfather", 4.0),
    ("Eve", "The Matrix", 4.0),
    ("Frank", "The Dark Knight", 5.0),
    ("Frank", "Forrest Gump", 5.0),
    ("Frank", "Inception", 4.0),
];

/// The sample dataset as validated ratings
pub fn sample_ratings() -> Vec<Rating> {
    SAMPLE_RATINGS
        .iter()
        .map(|&(user, movie, rating)| Rating::new(user, movie, rating))
        .collect()
}

/// Write the sample dataset to `path` as a `user,movie,rating` CSV
pub fn write_sample(path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["user", "movie", "rating"])?;
    for (user, movie, rating) in SAMPLE_RATINGS {
        // f64's Display writes 5.0 as "5"
        let rating = rating.to_string();
        writer.write_record([user, movie, rating.as_str()])?;
    }
    writer.flush()?;

    info!("Wrote sample ratings to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RatingMatrix, parser};
    use tempfile::tempdir;

    #[test]
    fn test_sample_round_trips_through_parser() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ratings.csv");

        write_sample(&path).unwrap();
        let records = parser::parse_ratings(&path).unwrap();
        let matrix = RatingMatrix::from_records(records).unwrap();

        assert_eq!(matrix.counts(), (6, 6, 21));
        assert_eq!(matrix.rating_of("Pulp Fiction", "Alice"), Some(5.0));
        assert_eq!(matrix.rating_of("Pulp Fiction", "Bob"), None);
    }

    #[test]
    fn test_sample_file_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ratings.csv");

        write_sample(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();

        assert!(text.starts_with("user,movie,rating\nAlice,The Matrix,5\n"));
    }
}
