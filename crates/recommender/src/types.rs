//! Result types produced by the recommender.

use data_loader::{MovieId, UserId};
use serde::Serialize;

/// Another user with a positive Pearson correlation to the target user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor {
    pub user_id: UserId,
    /// Pearson correlation, in (0, 1]
    pub similarity: f64,
    /// Number of movies both users rated
    pub co_rated: usize,
}

/// A movie the target user has not rated, with its accumulated score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMovie {
    pub movie_id: MovieId,
    /// Sum of `similarity * rating` over every neighbor that liked the movie
    pub score: f64,
    /// How many neighbors contributed to `score`
    pub supporters: usize,
}
