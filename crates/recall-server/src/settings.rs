//! Server configuration, read from an optional TOML file and `RECALL_*`
//! environment variables (environment wins).

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use recall_core::queue::QueueLimits;
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                  String,
  pub port:                  u16,
  pub store_path:            PathBuf,
  /// Due records returned by a queue request that names no limit.
  pub due_page_size:         usize,
  /// Upcoming records returned by a queue request that names no limit.
  pub upcoming_preview_size: usize,
}

impl Default for ServerConfig {
  fn default() -> Self {
    let limits = QueueLimits::default();
    Self {
      host:                  "127.0.0.1".to_string(),
      port:                  5233,
      store_path:            PathBuf::from("recall.db"),
      due_page_size:         limits.due,
      upcoming_preview_size: limits.upcoming,
    }
  }
}

impl ServerConfig {
  /// Layer `path` (if it exists) and the environment over the defaults.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("RECALL").try_parsing(true))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn queue_limits(&self) -> QueueLimits {
    QueueLimits {
      due:      self.due_page_size,
      upcoming: self.upcoming_preview_size,
    }
  }

  /// `store_path` with a leading `~` expanded to the user's home directory.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
