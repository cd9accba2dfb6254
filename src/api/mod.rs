//! Remote source capability: the posts API trait and its HTTP client.

mod client;
mod types;

pub use client::HttpPostApi;
pub use types::{ApiPost, CreatePostRequest, DEFAULT_OWNER_ID};

use async_trait::async_trait;

use crate::error::Result;

/// Capability trait for the remote posts collection.
///
/// One production implementation ([`HttpPostApi`]); tests inject an
/// in-memory fake.
#[async_trait]
pub trait PostApi: Send + Sync {
  /// Fetch the full collection.
  async fn fetch_posts(&self) -> Result<Vec<ApiPost>>;

  /// Fetch a single post by id.
  async fn fetch_post(&self, id: i64) -> Result<ApiPost>;

  /// Submit a new post. The returned record's id may be absent.
  async fn create_post(&self, req: &CreatePostRequest) -> Result<ApiPost>;
}
