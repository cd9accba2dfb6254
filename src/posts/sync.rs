//! Cached-then-refresh read policy for the post list.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;

use super::{Post, PostRepository};

/// Stale-while-revalidate read of the full post list.
///
/// A non-empty cache is served as-is while a detached task refreshes it
/// for the next call; an empty cache forces a blocking fetch. "Has at
/// least one record" is the only freshness signal — there is no TTL.
pub struct CachedThenRefresh {
  repo: Arc<PostRepository>,
}

impl CachedThenRefresh {
  pub fn new(repo: Arc<PostRepository>) -> Self {
    Self { repo }
  }

  pub async fn execute(&self) -> Result<Vec<Post>> {
    let cached = self.repo.cached_posts().await?;

    if !cached.is_empty() {
      // Refresh for the next call; this call never observes the outcome.
      // Spawned on the runtime, not the caller's scope, so cancelling the
      // caller leaves it running.
      let repo = Arc::clone(&self.repo);
      tokio::spawn(async move {
        if let Err(err) = repo.refresh_posts().await {
          debug!("background refresh failed: {}", err);
        }
      });

      return Ok(cached);
    }

    self.repo.refresh_posts().await
  }
}
