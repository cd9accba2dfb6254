use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result as EyreResult};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::error::{DataError, Result};

use super::types::{ApiPost, CreatePostRequest};
use super::PostApi;

/// HTTP implementation of [`PostApi`] for JSONPlaceholder-style APIs.
#[derive(Clone)]
pub struct HttpPostApi {
  http: Client,
  base: Url,
}

impl HttpPostApi {
  pub fn new(base_url: &str) -> EyreResult<Self> {
    let base =
      Url::parse(base_url).map_err(|e| eyre!("Invalid API base URL {}: {}", base_url, e))?;

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static("postbox"));

    let http = Client::builder()
      .default_headers(headers)
      .build()
      .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;

    Ok(Self { http, base })
  }

  fn endpoint(&self, path: &str) -> String {
    format!("{}/{}", self.base.as_str().trim_end_matches('/'), path)
  }
}

#[async_trait]
impl PostApi for HttpPostApi {
  async fn fetch_posts(&self) -> Result<Vec<ApiPost>> {
    let response = self
      .http
      .get(self.endpoint("posts"))
      .send()
      .await?
      .error_for_status()?;

    Ok(response.json().await?)
  }

  async fn fetch_post(&self, id: i64) -> Result<ApiPost> {
    let response = self
      .http
      .get(self.endpoint(&format!("posts/{}", id)))
      .send()
      .await?;

    if response.status() == StatusCode::NOT_FOUND {
      return Err(DataError::NotFound { id });
    }

    Ok(response.error_for_status()?.json().await?)
  }

  async fn create_post(&self, req: &CreatePostRequest) -> Result<ApiPost> {
    let response = self
      .http
      .post(self.endpoint("posts"))
      .json(req)
      .send()
      .await?
      .error_for_status()?;

    Ok(response.json().await?)
  }
}
