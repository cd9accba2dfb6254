//! Cache-coherence policy between the local store and the remote source.

use std::sync::Arc;

use tracing::debug;

use crate::api::{ApiPost, CreatePostRequest, PostApi};
use crate::error::Result;
use crate::store::{CachedPost, PostStore};

use super::Post;

/// Single authority over both the local cache and the remote source.
///
/// Cache writes only ever happen as a consequence of a successful remote
/// read or write, so the cache can lag the remote source but never lead it.
pub struct PostRepository {
  api: Arc<dyn PostApi>,
  store: Arc<dyn PostStore>,
}

impl PostRepository {
  pub fn new(api: Arc<dyn PostApi>, store: Arc<dyn PostStore>) -> Self {
    Self { api, store }
  }

  /// The full cache, newest first. Never touches the network.
  pub async fn cached_posts(&self) -> Result<Vec<Post>> {
    let cached = self.store.query_all().await?;
    Ok(cached.into_iter().map(CachedPost::into_domain).collect())
  }

  /// Fetch the full collection, upsert it into the cache, and return it in
  /// the order the remote sent it.
  ///
  /// Cached records absent from this fetch are left in place.
  pub async fn refresh_posts(&self) -> Result<Vec<Post>> {
    let fetched = self.api.fetch_posts().await?;
    let records: Vec<CachedPost> = fetched.into_iter().map(ApiPost::into_record).collect();

    self.store.upsert_all(records.clone()).await?;
    debug!(count = records.len(), "refreshed post cache");

    Ok(records.into_iter().map(CachedPost::into_domain).collect())
  }

  /// A single post: from the cache when present, otherwise fetched from
  /// the remote source and persisted.
  pub async fn get_post(&self, id: i64) -> Result<Post> {
    let cached = self
      .store
      .query_all()
      .await?
      .into_iter()
      .find(|p| p.id == id);

    if let Some(post) = cached {
      return Ok(post.into_domain());
    }

    let fetched = self.api.fetch_post(id).await?.into_domain();
    self
      .store
      .upsert_all(vec![CachedPost::from_domain(fetched.clone())])
      .await?;

    Ok(fetched)
  }

  /// Submit a new post and return the id the remote assigned, or -1 when
  /// the call succeeded without assigning one. Only assigned posts are
  /// cached.
  pub async fn create_post(&self, title: &str, body: &str) -> Result<i64> {
    let created = self
      .api
      .create_post(&CreatePostRequest::new(title, body))
      .await?;

    let id = created.id.unwrap_or(-1);
    if id > 0 {
      self.store.upsert_all(vec![created.into_record()]).await?;
    }

    Ok(id)
  }

  /// Drop every cached record. Not invoked by the sync policy itself; the
  /// reset path for callers that want the next read to start cold.
  pub async fn clear_cache(&self) -> Result<()> {
    self.store.clear_all().await
  }
}
