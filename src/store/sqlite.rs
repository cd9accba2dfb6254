//! SQLite-backed post store.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use color_eyre::{eyre::eyre, Result as EyreResult};
use rusqlite::{params, Connection};

use crate::error::{DataError, Result};

use super::{CachedPost, PostStore};

/// Schema for the post cache.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY,
    user_id INTEGER,
    title TEXT NOT NULL,
    body TEXT NOT NULL,
    cached_at TEXT NOT NULL
);
"#;

/// SQLite-backed implementation of [`PostStore`].
///
/// The connection is shared behind a mutex and every statement runs on the
/// blocking pool, keeping disk latency off the async workers.
pub struct SqliteStore {
  conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
  /// Open or create the cache database at the default location.
  pub fn open() -> EyreResult<Self> {
    Self::open_at(&Self::default_path()?)
  }

  /// Open or create the cache database at the given path.
  pub fn open_at(path: &Path) -> EyreResult<Self> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| eyre!("Failed to create cache directory: {}", e))?;
    }

    let conn = Connection::open(path)
      .map_err(|e| eyre!("Failed to open cache database at {}: {}", path.display(), e))?;

    Self::from_connection(conn)
  }

  #[cfg(test)]
  fn open_in_memory() -> EyreResult<Self> {
    let conn = Connection::open_in_memory()
      .map_err(|e| eyre!("Failed to open in-memory database: {}", e))?;

    Self::from_connection(conn)
  }

  fn from_connection(conn: Connection) -> EyreResult<Self> {
    conn
      .execute_batch(SCHEMA)
      .map_err(|e| eyre!("Failed to run cache migrations: {}", e))?;

    Ok(Self {
      conn: Arc::new(Mutex::new(conn)),
    })
  }

  /// Default database path under the platform data directory.
  fn default_path() -> EyreResult<PathBuf> {
    let data_dir = dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .ok_or_else(|| eyre!("Could not determine data directory"))?;

    Ok(data_dir.join("postbox").join("cache.db"))
  }

  async fn with_conn<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&Connection) -> Result<T> + Send + 'static,
  {
    let conn = Arc::clone(&self.conn);

    tokio::task::spawn_blocking(move || {
      let conn = conn
        .lock()
        .map_err(|e| DataError::Storage(format!("lock poisoned: {}", e)))?;
      f(&conn)
    })
    .await
    .map_err(|e| DataError::Storage(format!("blocking task failed: {}", e)))?
  }
}

#[async_trait]
impl PostStore for SqliteStore {
  async fn query_all(&self) -> Result<Vec<CachedPost>> {
    self
      .with_conn(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, user_id, title, body FROM posts ORDER BY id DESC")?;

        let posts = stmt
          .query_map([], |row| {
            Ok(CachedPost {
              id: row.get(0)?,
              user_id: row.get(1)?,
              title: row.get(2)?,
              body: row.get(3)?,
            })
          })?
          .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(posts)
      })
      .await
  }

  async fn upsert_all(&self, posts: Vec<CachedPost>) -> Result<()> {
    self
      .with_conn(move |conn| {
        let cached_at = Utc::now().to_rfc3339();

        conn.execute("BEGIN TRANSACTION", [])?;
        for post in &posts {
          conn.execute(
            "INSERT OR REPLACE INTO posts (id, user_id, title, body, cached_at)
             VALUES (?, ?, ?, ?, ?)",
            params![post.id, post.user_id, post.title, post.body, cached_at],
          )?;
        }
        conn.execute("COMMIT", [])?;

        Ok(())
      })
      .await
  }

  async fn clear_all(&self) -> Result<()> {
    self
      .with_conn(|conn| {
        conn.execute("DELETE FROM posts", [])?;
        Ok(())
      })
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(id: i64, title: &str) -> CachedPost {
    CachedPost {
      id,
      user_id: Some(1),
      title: title.to_string(),
      body: format!("{} body", title),
    }
  }

  #[tokio::test]
  async fn test_query_all_orders_newest_first() {
    let store = SqliteStore::open_in_memory().unwrap();
    store
      .upsert_all(vec![record(3, "c"), record(5, "e"), record(1, "a")])
      .await
      .unwrap();

    let ids: Vec<i64> = store.query_all().await.unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![5, 3, 1]);
  }

  #[tokio::test]
  async fn test_upsert_replaces_on_id_conflict() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.upsert_all(vec![record(5, "old")]).await.unwrap();
    store
      .upsert_all(vec![record(5, "new"), record(3, "other")])
      .await
      .unwrap();

    let posts = store.query_all().await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, 5);
    assert_eq!(posts[0].title, "new");
  }

  #[tokio::test]
  async fn test_clear_all_empties_the_cache() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.upsert_all(vec![record(1, "a")]).await.unwrap();

    store.clear_all().await.unwrap();
    assert!(store.query_all().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_open_creates_parent_directories() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested").join("cache.db");

    let store = SqliteStore::open_at(&path).unwrap();
    store.upsert_all(vec![record(1, "a")]).await.unwrap();

    assert!(path.exists());
    assert_eq!(store.query_all().await.unwrap().len(), 1);
  }
}
