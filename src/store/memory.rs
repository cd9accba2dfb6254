//! In-memory post store.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{DataError, Result};

use super::{CachedPost, PostStore};

/// Non-durable [`PostStore`] over a mutexed map.
///
/// Used when caching is disabled in config (every run starts cold) and as
/// the deterministic store in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
  posts: Mutex<BTreeMap<i64, CachedPost>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl PostStore for MemoryStore {
  async fn query_all(&self) -> Result<Vec<CachedPost>> {
    let posts = self
      .posts
      .lock()
      .map_err(|e| DataError::Storage(format!("lock poisoned: {}", e)))?;

    // BTreeMap iterates ascending by id; newest first means reversed.
    Ok(posts.values().rev().cloned().collect())
  }

  async fn upsert_all(&self, new: Vec<CachedPost>) -> Result<()> {
    let mut posts = self
      .posts
      .lock()
      .map_err(|e| DataError::Storage(format!("lock poisoned: {}", e)))?;

    for post in new {
      posts.insert(post.id, post);
    }

    Ok(())
  }

  async fn clear_all(&self) -> Result<()> {
    self
      .posts
      .lock()
      .map_err(|e| DataError::Storage(format!("lock poisoned: {}", e)))?
      .clear();

    Ok(())
  }
}
