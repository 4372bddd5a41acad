//! Error types for the recommender crate.

use data_loader::UserId;
use thiserror::Error;

/// Errors a recommendation query can return
///
/// "No recommendations" is not an error: it is an empty `Vec`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// The target user has no ratings in the matrix
    #[error("User '{user}' not found in the dataset")]
    UnknownUser { user: UserId },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RecommendError>;
