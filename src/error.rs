//! Error taxonomy for the data layer.

use thiserror::Error;

/// Errors surfaced by the repository and its capabilities.
#[derive(Error, Debug)]
pub enum DataError {
  /// Remote call failed: connectivity, non-success response, or decode.
  #[error("network request failed: {0}")]
  Network(String),

  /// Local store operation failed. Not retried.
  #[error("cache store error: {0}")]
  Storage(String),

  /// Single-post lookup missed both the cache and the remote source.
  #[error("post {id} not found")]
  NotFound { id: i64 },
}

impl From<reqwest::Error> for DataError {
  fn from(err: reqwest::Error) -> Self {
    Self::Network(err.to_string())
  }
}

impl From<rusqlite::Error> for DataError {
  fn from(err: rusqlite::Error) -> Self {
    Self::Storage(err.to_string())
  }
}

pub type Result<T> = std::result::Result<T, DataError>;
