//! # Recommender Crate
//!
//! User-based collaborative filtering over a [`RatingMatrix`]:
//! "users whose ratings correlate with yours liked these movies".
//!
//! ## Components
//!
//! - **similarity**: Pearson correlation over co-rated movies
//! - **recommender**: neighbor selection, candidate scoring and ranking
//! - **types**: `Neighbor` and `ScoredMovie` results
//! - **error**: `RecommendError`
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{DuplicatePolicy, RatingMatrix};
//! use recommender::Recommender;
//! use std::sync::Arc;
//!
//! let matrix = RatingMatrix::load_from_file("ratings.csv".as_ref(), DuplicatePolicy::default())?;
//! let recommender = Recommender::new(Arc::new(matrix));
//!
//! for movie in recommender.recommend("Alice", 2)? {
//!     println!("{movie}");
//! }
//! ```
//!
//! Every query is a pure read of the matrix: the same input always gives
//! the same output, and ties are broken by identifier.

pub mod error;
pub mod types;
pub mod similarity;
pub mod recommender;

// Re-export commonly used types
pub use data_loader::RatingMatrix;
pub use error::{RecommendError, Result};
pub use recommender::{LIKED_RATING_THRESHOLD, Recommender};
pub use similarity::{Correlation, MIN_CO_RATED};
pub use types::{Neighbor, ScoredMovie};
