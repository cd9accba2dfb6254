//! Local store capability: the cache trait, its record type, and backends.
//!
//! The cache is a derived, disposable copy of remote state. It may be
//! cleared and rebuilt at any time without losing source-of-truth data.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::posts::Post;

/// A post as persisted in the local cache.
///
/// Records are replaced whole on id conflict, never partially updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPost {
  pub id: i64,
  pub user_id: Option<i64>,
  pub title: String,
  pub body: String,
}

impl CachedPost {
  pub fn into_domain(self) -> Post {
    Post {
      id: self.id,
      user_id: self.user_id,
      title: self.title,
      body: self.body,
    }
  }

  pub fn from_domain(post: Post) -> Self {
    Self {
      id: post.id,
      user_id: post.user_id,
      title: post.title,
      body: post.body,
    }
  }
}

/// Capability trait for the local post cache.
#[async_trait]
pub trait PostStore: Send + Sync {
  /// All cached posts, newest (highest id) first.
  async fn query_all(&self) -> Result<Vec<CachedPost>>;

  /// Insert the given posts, replacing any cached record sharing an id.
  async fn upsert_all(&self, posts: Vec<CachedPost>) -> Result<()>;

  /// Delete every cached record.
  async fn clear_all(&self) -> Result<()>;
}
