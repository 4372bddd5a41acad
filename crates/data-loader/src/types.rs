//! Core domain types for rating data.
//!
//! This module defines the record types that come out of the loader and the
//! [`RatingMatrix`], the sparse item → user → rating table every
//! recommendation query reads from.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// Type Aliases
// =============================================================================
// Identifiers are opaque, case-sensitive strings ("Alice", "The Matrix")

/// Identifier of a user
pub type UserId = String;

/// Identifier of a movie
pub type MovieId = String;

// =============================================================================
// Rating Types
// =============================================================================

/// A rating record as read from the input, before validation.
///
/// Every field is optional: a blank cell or a rating that is not a number
/// deserializes to `None`. [`RatingMatrix::from_records`] rejects such
/// records with `DataLoadError::MalformedInput`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RatingRecord {
    pub user: Option<UserId>,
    pub movie: Option<MovieId>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub rating: Option<f64>,
}

impl RatingRecord {
    /// Build a complete record
    pub fn new(user: impl Into<UserId>, movie: impl Into<MovieId>, rating: f64) -> Self {
        Self {
            user: Some(user.into()),
            movie: Some(movie.into()),
            rating: Some(rating),
        }
    }
}

/// A validated rating: one user's score for one movie
#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Usually 1.0 to 5.0, but the range is not enforced here
    pub rating: f64,
}

impl Rating {
    pub fn new(user_id: impl Into<UserId>, movie_id: impl Into<MovieId>, rating: f64) -> Self {
        Self {
            user_id: user_id.into(),
            movie_id: movie_id.into(),
            rating,
        }
    }
}

impl From<Rating> for RatingRecord {
    fn from(rating: Rating) -> Self {
        Self {
            user: Some(rating.user_id),
            movie: Some(rating.movie_id),
            rating: Some(rating.rating),
        }
    }
}

/// What to do when the same (user, movie) pair appears more than once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// The later record replaces the earlier one
    #[default]
    LastWriteWins,
    /// Fail with `DataLoadError::DuplicateRating`
    Reject,
}

// =============================================================================
// RatingMatrix - sparse user-item table
// =============================================================================

static NO_RATINGS: BTreeMap<MovieId, f64> = BTreeMap::new();

/// Sparse user-item rating matrix.
///
/// The primary store maps movie → user → rating. A second index maps
/// user → movie → rating so a user's whole row can be handed out without
/// scanning every column. Both are `BTreeMap`s, which keeps every
/// enumeration in identifier order.
///
/// Absence of an entry means "unrated", which is different from any
/// numeric rating including `0.0`.
#[derive(Debug, Clone, Default)]
pub struct RatingMatrix {
    /// movie → user → rating
    pub(crate) by_movie: BTreeMap<MovieId, BTreeMap<UserId, f64>>,
    /// user → movie → rating
    pub(crate) by_user: BTreeMap<UserId, BTreeMap<MovieId, f64>>,
}

impl RatingMatrix {
    /// Creates a new, empty matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// The rating `user` gave `movie`, or `None` if they never rated it
    pub fn rating_of(&self, movie: &str, user: &str) -> Option<f64> {
        self.by_movie.get(movie)?.get(user).copied()
    }

    /// All ratings made by a user, keyed by movie
    ///
    /// Returns an empty map if the user is unknown
    pub fn ratings_by_user(&self, user: &str) -> &BTreeMap<MovieId, f64> {
        self.by_user.get(user).unwrap_or(&NO_RATINGS)
    }

    /// All ratings received by a movie, keyed by user
    pub fn ratings_for_movie(&self, movie: &str) -> Option<&BTreeMap<UserId, f64>> {
        self.by_movie.get(movie)
    }

    /// Known users, in identifier order
    pub fn users(&self) -> BTreeSet<&UserId> {
        self.by_user.keys().collect()
    }

    /// Known movies, in identifier order
    pub fn items(&self) -> BTreeSet<&MovieId> {
        self.by_movie.keys().collect()
    }

    pub fn contains_user(&self, user: &str) -> bool {
        self.by_user.contains_key(user)
    }

    /// Insert a rating into both indices.
    ///
    /// Returns the previous rating for the same (user, movie) pair, if any.
    pub(crate) fn insert(&mut self, rating: Rating) -> Option<f64> {
        self.by_user
            .entry(rating.user_id.clone())
            .or_default()
            .insert(rating.movie_id.clone(), rating.rating);

        self.by_movie
            .entry(rating.movie_id)
            .or_default()
            .insert(rating.user_id, rating.rating)
    }

    /// Get (users, movies, ratings) counts for debugging/validation
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_ratings = self.by_user.values().map(|row| row.len()).sum();
        (self.by_user.len(), self.by_movie.len(), total_ratings)
    }

    pub fn is_empty(&self) -> bool {
        self.by_user.is_empty()
    }
}
