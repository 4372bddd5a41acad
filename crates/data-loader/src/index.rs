//! RatingMatrix building logic.
//!
//! Turns loader output into a [`RatingMatrix`]:
//! - validate each record (user, movie and a finite numeric rating present)
//! - apply the duplicate policy
//! - populate both the movie-major and user-major indices

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::{debug, info};

impl RatingMatrix {
    /// Build a matrix from loader records, last write wins on duplicates
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = RatingRecord>,
    {
        Self::from_records_with_policy(records, DuplicatePolicy::default())
    }

    /// Build a matrix from loader records with an explicit duplicate policy
    ///
    /// Fails on the first record that lacks a user, a movie or a numeric
    /// rating. Rating values are not range-checked.
    pub fn from_records_with_policy<I>(records: I, policy: DuplicatePolicy) -> Result<Self>
    where
        I: IntoIterator<Item = RatingRecord>,
    {
        let mut matrix = RatingMatrix::new();
        let mut replaced = 0usize;

        for (idx, record) in records.into_iter().enumerate() {
            let rating = validate_record(idx, record)?;

            if policy == DuplicatePolicy::Reject
                && matrix.rating_of(&rating.movie_id, &rating.user_id).is_some()
            {
                return Err(DataLoadError::DuplicateRating {
                    user: rating.user_id,
                    movie: rating.movie_id,
                    record: idx,
                });
            }

            if matrix.insert(rating).is_some() {
                replaced += 1;
            }
        }

        if replaced > 0 {
            debug!(replaced, "Duplicate ratings overwritten by later records");
        }

        Ok(matrix)
    }

    /// Build a matrix from already validated ratings, last write wins
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = Rating>,
    {
        let mut matrix = RatingMatrix::new();
        for rating in ratings {
            matrix.insert(rating);
        }
        matrix
    }

    /// Load a ratings CSV file and build the matrix
    ///
    /// This is the main entry point for loading data.
    pub fn load_from_file(path: &Path, policy: DuplicatePolicy) -> Result<Self> {
        info!("Loading ratings from {:?}", path);

        let records = parser::parse_ratings(path)?;
        let matrix = Self::from_records_with_policy(records, policy)?;

        let (users, movies, ratings) = matrix.counts();
        info!("Loaded {} users, {} movies, {} ratings", users, movies, ratings);
        Ok(matrix)
    }
}

/// Check that a record carries everything a rating needs
fn validate_record(idx: usize, record: RatingRecord) -> Result<Rating> {
    let malformed = |reason: &str| DataLoadError::MalformedInput {
        record: idx,
        reason: reason.to_string(),
    };

    let user_id = record
        .user
        .filter(|u| !u.is_empty())
        .ok_or_else(|| malformed("missing user"))?;
    let movie_id = record
        .movie
        .filter(|m| !m.is_empty())
        .ok_or_else(|| malformed("missing movie"))?;
    let rating = record
        .rating
        .ok_or_else(|| malformed("missing or non-numeric rating"))?;

    if !rating.is_finite() {
        return Err(malformed("rating is not a finite number"));
    }

    Ok(Rating {
        user_id,
        movie_id,
        rating,
    })
}
