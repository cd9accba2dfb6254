use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
  pub api: ApiConfig,
  pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
  /// Base URL of the posts API.
  pub url: String,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      url: "https://jsonplaceholder.typicode.com".to_string(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
  /// Set false to keep the cache in memory only (every run starts cold).
  pub enabled: bool,
  /// Override for the cache database path.
  pub path: Option<PathBuf>,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      enabled: true,
      path: None,
    }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./postbox.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/postbox/config.yaml
  ///
  /// Built-in defaults apply when no file exists; the default API is
  /// public, so no config is required to get started.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("postbox.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("postbox").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    let config: Config = serde_yaml::from_str(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))?;

    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_partial_yaml_fills_defaults() {
    let config: Config = serde_yaml::from_str("api:\n  url: http://localhost:3000\n").unwrap();

    assert_eq!(config.api.url, "http://localhost:3000");
    assert!(config.cache.enabled);
    assert!(config.cache.path.is_none());
  }

  #[test]
  fn test_empty_yaml_is_all_defaults() {
    let config: Config = serde_yaml::from_str("{}").unwrap();

    assert_eq!(config.api.url, "https://jsonplaceholder.typicode.com");
    assert!(config.cache.enabled);
  }
}
