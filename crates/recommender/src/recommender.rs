//! User-based collaborative filtering.
//!
//! "Users whose tastes correlate with yours liked these movies"
//!
//! ## Algorithm
//! 1. Compute the Pearson correlation between the target user and every
//!    other user. Users with an undefined correlation are dropped.
//! 2. Keep users with a positive correlation (neighbors), ordered by
//!    correlation descending, then user id ascending.
//! 3. For each neighbor, every movie they rated at least
//!    [`LIKED_RATING_THRESHOLD`] that the target has not rated gains
//!    `similarity * rating`.
//! 4. Rank movies by accumulated score descending, then movie id
//!    ascending, and keep the first `k`.

use crate::error::{RecommendError, Result};
use crate::similarity;
use crate::types::{Neighbor, ScoredMovie};
use data_loader::{MovieId, RatingMatrix, UserId};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A neighbor's rating must reach this value for the movie to be suggested
pub const LIKED_RATING_THRESHOLD: f64 = 4.0;

/// Recommender over a shared, read-only rating matrix
#[derive(Debug, Clone)]
pub struct Recommender {
    /// Shared reference to the matrix (read-only, so no Mutex needed)
    matrix: Arc<RatingMatrix>,
}

impl Recommender {
    pub fn new(matrix: Arc<RatingMatrix>) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> &RatingMatrix {
        &self.matrix
    }

    /// Pearson correlation between two users, `None` if undefined
    pub fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        similarity::pearson(
            self.matrix.ratings_by_user(a),
            self.matrix.ratings_by_user(b),
        )
    }

    /// Users positively correlated with `user`, strongest first
    #[instrument(skip(self))]
    pub fn neighbors(&self, user: &str) -> Result<Vec<Neighbor>> {
        self.ensure_known(user)?;
        Ok(self.find_neighbors(user))
    }

    /// Top `k` unrated movies for `user`, with their scores
    #[instrument(skip(self))]
    pub fn recommend_scored(&self, user: &str, k: usize) -> Result<Vec<ScoredMovie>> {
        self.ensure_known(user)?;
        Ok(self.rank(user, k))
    }

    /// Top `k` unrated movies for `user`, best first
    ///
    /// Returns fewer than `k` movies when fewer candidates exist, and an
    /// empty list when there are none. Fails only for an unknown user.
    pub fn recommend(&self, user: &str, k: usize) -> Result<Vec<MovieId>> {
        Ok(self
            .recommend_scored(user, k)?
            .into_iter()
            .map(|scored| scored.movie_id)
            .collect())
    }

    /// Recommendations for every known user, in user id order.
    ///
    /// Queries for different users are independent reads of the same
    /// matrix, so they run in parallel.
    pub fn recommend_all(&self, k: usize) -> Vec<(UserId, Vec<ScoredMovie>)> {
        let users: Vec<&UserId> = self.matrix.users().into_iter().collect();

        users
            .par_iter()
            .map(|&user| (user.clone(), self.rank(user, k)))
            .collect()
    }

    fn ensure_known(&self, user: &str) -> Result<()> {
        if self.matrix.contains_user(user) {
            Ok(())
        } else {
            Err(RecommendError::UnknownUser {
                user: user.to_string(),
            })
        }
    }

    /// Steps 1 and 2: correlate against every other user, keep positives
    fn find_neighbors(&self, user: &str) -> Vec<Neighbor> {
        let target = self.matrix.ratings_by_user(user);

        let mut neighbors: Vec<Neighbor> = self
            .matrix
            .users()
            .into_iter()
            .filter(|&other| other != user)
            .filter_map(|other| {
                let c = similarity::correlation(target, self.matrix.ratings_by_user(other))?;
                Some(Neighbor {
                    user_id: other.clone(),
                    similarity: c.coefficient,
                    co_rated: c.co_rated,
                })
            })
            .filter(|n| n.similarity > 0.0)
            .collect();

        neighbors.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });

        debug!("Found {} neighbors for user {}", neighbors.len(), user);
        neighbors
    }

    /// Step 3: accumulate `similarity * rating` per unrated, liked movie
    fn candidate_scores(
        &self,
        user: &str,
        neighbors: &[Neighbor],
    ) -> BTreeMap<MovieId, (f64, usize)> {
        let target = self.matrix.ratings_by_user(user);
        let mut scores: BTreeMap<MovieId, (f64, usize)> = BTreeMap::new();

        for neighbor in neighbors {
            for (movie_id, &rating) in self.matrix.ratings_by_user(&neighbor.user_id) {
                if target.contains_key(movie_id) || rating < LIKED_RATING_THRESHOLD {
                    continue;
                }
                let entry = scores.entry(movie_id.clone()).or_insert((0.0, 0));
                entry.0 += neighbor.similarity * rating;
                entry.1 += 1;
            }
        }
        scores
    }

    /// Step 4: sort candidates and cut to `k`
    fn rank(&self, user: &str, k: usize) -> Vec<ScoredMovie> {
        if k == 0 {
            return Vec::new();
        }

        let neighbors = self.find_neighbors(user);
        let mut candidates: Vec<ScoredMovie> = self
            .candidate_scores(user, &neighbors)
            .into_iter()
            .map(|(movie_id, (score, supporters))| ScoredMovie {
                movie_id,
                score,
                supporters,
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.movie_id.cmp(&b.movie_id))
        });
        candidates.truncate(k);

        debug!("Generated {} recommendations for user {}", candidates.len(), user);
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Rating;

    fn build(ratings: &[(&str, &str, f64)]) -> Recommender {
        let matrix = RatingMatrix::from_ratings(
            ratings
                .iter()
                .map(|&(user, movie, rating)| Rating::new(user, movie, rating)),
        );
        Recommender::new(Arc::new(matrix))
    }

    #[test]
    fn test_neighbors_are_positive_and_ordered() {
        let rec = build(&[
            ("T", "M1", 1.0),
            ("T", "M2", 2.0),
            ("T", "M3", 3.0),
            // perfect correlation
            ("A", "M1", 2.0),
            ("A", "M2", 3.0),
            ("A", "M3", 4.0),
            // weaker positive correlation (0.5)
            ("B", "M1", 2.0),
            ("B", "M2", 1.0),
            ("B", "M3", 3.0),
            // negative
            ("C", "M1", 3.0),
            ("C", "M2", 2.0),
            ("C", "M3", 1.0),
            // one co-rated movie only
            ("D", "M1", 5.0),
        ]);

        let neighbors = rec.neighbors("T").unwrap();
        let ids: Vec<&str> = neighbors.iter().map(|n| n.user_id.as_str()).collect();

        assert_eq!(ids, vec!["A", "B"]);
        assert!((neighbors[0].similarity - 1.0).abs() < 1e-9);
        assert!((neighbors[1].similarity - 0.5).abs() < 1e-9);
        assert_eq!(neighbors[0].co_rated, 3);
    }

    #[test]
    fn test_equal_similarity_breaks_ties_by_user_id() {
        let rec = build(&[
            ("T", "M1", 1.0),
            ("T", "M2", 5.0),
            ("Zed", "M1", 2.0),
            ("Zed", "M2", 4.0),
            ("Amy", "M1", 1.0),
            ("Amy", "M2", 3.0),
        ]);

        let ids: Vec<UserId> = rec
            .neighbors("T")
            .unwrap()
            .into_iter()
            .map(|n| n.user_id)
            .collect();

        assert_eq!(ids, vec!["Amy".to_string(), "Zed".to_string()]);
    }

    #[test]
    fn test_candidate_scores_accumulate_across_neighbors() {
        let rec = build(&[
            ("T", "M1", 1.0),
            ("T", "M2", 2.0),
            ("A", "M1", 1.0),
            ("A", "M2", 2.0),
            ("A", "M3", 5.0),
            ("A", "M4", 3.0), // below threshold
            ("B", "M1", 2.0),
            ("B", "M2", 4.0),
            ("B", "M3", 4.0),
            ("B", "M5", 4.0),
        ]);

        let neighbors = rec.find_neighbors("T");
        let scores = rec.candidate_scores("T", &neighbors);

        assert_eq!(scores.len(), 2);
        assert_eq!(scores["M3"], (9.0, 2));
        assert_eq!(scores["M5"], (4.0, 1));
        assert!(!scores.contains_key("M4"));
        assert!(!scores.contains_key("M1"));
    }

    #[test]
    fn test_equal_scores_break_ties_by_movie_id() {
        let rec = build(&[
            ("T", "M1", 1.0),
            ("T", "M2", 2.0),
            ("A", "M1", 1.0),
            ("A", "M2", 2.0),
            ("A", "Zulu", 5.0),
            ("A", "Alpha", 5.0),
            ("A", "Mike", 5.0),
        ]);

        let recs = rec.recommend("T", 10).unwrap();

        assert_eq!(recs, vec!["Alpha", "Mike", "Zulu"]);
    }

    #[test]
    fn test_unknown_user() {
        let rec = build(&[("A", "M1", 4.0)]);

        assert_eq!(
            rec.recommend("Nobody", 3),
            Err(RecommendError::UnknownUser {
                user: "Nobody".to_string()
            })
        );
        assert!(rec.neighbors("Nobody").is_err());
    }

    #[test]
    fn test_recommend_all_matches_single_queries() {
        let rec = build(&data_loader::sample::SAMPLE_RATINGS);

        let all = rec.recommend_all(3);

        assert_eq!(all.len(), 6);
        for (user, scored) in all {
            assert_eq!(rec.recommend_scored(&user, 3).unwrap(), scored);
        }
    }
}
