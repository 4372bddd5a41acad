//! # Data Loader Crate
//!
//! This crate loads user-movie ratings and holds them in a sparse
//! [`RatingMatrix`].
//!
//! ## Main Components
//!
//! - **types**: Identifiers, rating records and the `RatingMatrix` itself
//! - **parser**: Parse a `user,movie,rating` CSV file into records
//! - **index**: Validate records and build the matrix
//! - **sample**: The demonstration dataset written on first run
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{DuplicatePolicy, RatingMatrix};
//! use std::path::Path;
//!
//! let matrix = RatingMatrix::load_from_file(Path::new("ratings.csv"), DuplicatePolicy::LastWriteWins)?;
//!
//! let rating = matrix.rating_of("The Matrix", "Alice");
//! let row = matrix.ratings_by_user("Alice");
//!
//! println!("Alice rated {} movies", row.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod sample;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    // Core types
    Rating,
    RatingRecord,
    RatingMatrix,
    DuplicatePolicy,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_matrix_creation() {
        let matrix = RatingMatrix::new();
        let (users, movies, ratings) = matrix.counts();

        assert_eq!(users, 0);
        assert_eq!(movies, 0);
        assert_eq!(ratings, 0);
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_from_ratings() {
        let matrix = RatingMatrix::from_ratings(vec![
            Rating::new("Alice", "Inception", 4.0),
            Rating::new("Bob", "Inception", 2.5),
        ]);

        assert_eq!(matrix.rating_of("Inception", "Alice"), Some(4.0));
        assert_eq!(matrix.rating_of("Inception", "Bob"), Some(2.5));
        assert_eq!(
            matrix.users().into_iter().collect::<Vec<_>>(),
            vec!["Alice", "Bob"]
        );
        assert_eq!(matrix.items().len(), 1);
    }

    #[test]
    fn test_zero_is_a_rating() {
        let matrix = RatingMatrix::from_ratings(vec![Rating::new("Alice", "M1", 0.0)]);

        assert_eq!(matrix.rating_of("M1", "Alice"), Some(0.0));
        assert_eq!(matrix.rating_of("M2", "Alice"), None);
    }

    #[test]
    fn test_identifiers_are_case_sensitive() {
        let matrix = RatingMatrix::from_ratings(vec![Rating::new("alice", "M1", 3.0)]);

        assert!(matrix.contains_user("alice"));
        assert!(!matrix.contains_user("Alice"));
    }

    #[test]
    fn test_empty_queries() {
        let matrix = RatingMatrix::new();

        // Querying unknown users or movies returns None or empty maps
        assert!(matrix.rating_of("M1", "nobody").is_none());
        assert!(matrix.ratings_by_user("nobody").is_empty());
        assert!(matrix.ratings_for_movie("M1").is_none());
        assert!(matrix.users().is_empty());
        assert!(matrix.items().is_empty());
    }
}
