//! Shared test doubles.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{ApiPost, CreatePostRequest, PostApi};
use crate::error::{DataError, Result};

/// Scripted [`PostApi`] double with per-operation call counters,
/// switchable failure, and optional simulated latency.
pub struct FakeApi {
  posts: Mutex<Vec<ApiPost>>,
  created: Mutex<Option<ApiPost>>,
  fail: AtomicBool,
  delay: Mutex<Option<Duration>>,
  pub fetch_posts_calls: AtomicUsize,
  pub fetch_post_calls: AtomicUsize,
  pub create_calls: AtomicUsize,
}

impl FakeApi {
  pub fn new(posts: Vec<ApiPost>) -> Self {
    Self {
      posts: Mutex::new(posts),
      created: Mutex::new(None),
      fail: AtomicBool::new(false),
      delay: Mutex::new(None),
      fetch_posts_calls: AtomicUsize::new(0),
      fetch_post_calls: AtomicUsize::new(0),
      create_calls: AtomicUsize::new(0),
    }
  }

  pub fn post(id: Option<i64>, title: &str) -> ApiPost {
    ApiPost {
      user_id: Some(1),
      id,
      title: title.to_string(),
      body: format!("{} body", title),
    }
  }

  pub fn set_fail(&self, fail: bool) {
    self.fail.store(fail, Ordering::SeqCst);
  }

  pub fn set_delay(&self, delay: Duration) {
    *self.delay.lock().unwrap() = Some(delay);
  }

  /// Script the response to the next create calls; `None` means the
  /// server echoes the request without assigning an id.
  pub fn set_created(&self, created: Option<ApiPost>) {
    *self.created.lock().unwrap() = created;
  }

  async fn gate(&self) -> Result<()> {
    let delay = *self.delay.lock().unwrap();
    if let Some(d) = delay {
      tokio::time::sleep(d).await;
    }

    if self.fail.load(Ordering::SeqCst) {
      return Err(DataError::Network("simulated network failure".into()));
    }

    Ok(())
  }
}

#[async_trait]
impl PostApi for FakeApi {
  async fn fetch_posts(&self) -> Result<Vec<ApiPost>> {
    self.fetch_posts_calls.fetch_add(1, Ordering::SeqCst);
    self.gate().await?;

    Ok(self.posts.lock().unwrap().clone())
  }

  async fn fetch_post(&self, id: i64) -> Result<ApiPost> {
    self.fetch_post_calls.fetch_add(1, Ordering::SeqCst);
    self.gate().await?;

    let posts = self.posts.lock().unwrap();
    posts
      .iter()
      .find(|p| p.id == Some(id))
      .cloned()
      .ok_or(DataError::NotFound { id })
  }

  async fn create_post(&self, req: &CreatePostRequest) -> Result<ApiPost> {
    self.create_calls.fetch_add(1, Ordering::SeqCst);
    self.gate().await?;

    let scripted = self.created.lock().unwrap().clone();
    Ok(scripted.unwrap_or_else(|| ApiPost {
      user_id: Some(req.user_id),
      id: None,
      title: req.title.clone(),
      body: req.body.clone(),
    }))
  }
}
