//! Serde-deserializable types matching the posts API wire format.
//!
//! These are separate from the domain types so deserialization quirks
//! (nullable ids on not-yet-assigned records) stay at the edge.

use serde::{Deserialize, Serialize};

use crate::posts::Post;
use crate::store::CachedPost;

/// Owner id attached to posts created by this client.
pub const DEFAULT_OWNER_ID: i64 = 1;

/// A post as returned by the remote API.
///
/// `id` and `user_id` may be absent, e.g. on the echo of a create request
/// the server has not assigned an identity to.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPost {
  #[serde(rename = "userId")]
  pub user_id: Option<i64>,
  pub id: Option<i64>,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub body: String,
}

impl ApiPost {
  /// Convert into the domain form, substituting 0 for a missing id.
  pub fn into_domain(self) -> Post {
    Post {
      id: self.id.unwrap_or(0),
      user_id: self.user_id,
      title: self.title,
      body: self.body,
    }
  }

  /// Convert into the cached record form.
  pub fn into_record(self) -> CachedPost {
    CachedPost {
      id: self.id.unwrap_or(0),
      user_id: self.user_id,
      title: self.title,
      body: self.body,
    }
  }
}

/// Body of a post-creation request.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePostRequest {
  pub title: String,
  pub body: String,
  #[serde(rename = "userId")]
  pub user_id: i64,
}

impl CreatePostRequest {
  pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      body: body.into(),
      user_id: DEFAULT_OWNER_ID,
    }
  }
}
