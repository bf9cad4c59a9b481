//! Configuration management for Mentor
//!
//! Decides which catalog to rank against, which offline search fixtures sit in
//! front of the fallback provider, and the default log filter.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::error::{CatalogError, ConfigError};
use crate::search::{FixtureSearchProvider, ProviderChain};

const CONFIG_PATHS: [&str; 3] = [".mentor.json", "mentor.json", ".mentor/config.json"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorConfig {
  /// Catalog file to rank against; the built-in catalog when unset
  #[serde(default)]
  pub catalog: Option<PathBuf>,
  /// Search fixture files, tried in order before the offline fallback
  #[serde(default)]
  pub fixtures: Vec<PathBuf>,
  /// `tracing` filter used when RUST_LOG is not set
  #[serde(default = "default_log_filter")]
  pub log_filter: String,
}

fn default_log_filter() -> String {
  "mentor=info,warn".to_string()
}

impl Default for MentorConfig {
  fn default() -> Self {
    Self { catalog: None, fixtures: Vec::new(), log_filter: default_log_filter() }
  }
}

impl MentorConfig {
  /// Load configuration from a file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| ConfigError::parse(path, e))
  }

  /// Load from the current directory, then the user config directory, else defaults
  pub fn load() -> Result<Self, ConfigError> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    if let Some(config) = Self::load_from_dir(&cwd)? {
      return Ok(config);
    }

    if let Some(user_config) = dirs::config_dir().map(|dir| dir.join("mentor").join("config.json")) {
      if user_config.exists() {
        return Self::load_from_file(user_config);
      }
    }

    Ok(Self::default())
  }

  /// First config file found under `dir`, if any
  pub fn load_from_dir(dir: &Path) -> Result<Option<Self>, ConfigError> {
    for candidate in CONFIG_PATHS {
      let path = dir.join(candidate);
      if path.exists() {
        return Self::load_from_file(path).map(Some);
      }
    }
    Ok(None)
  }

  /// Save configuration to a file
  pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(self).map_err(|e| ConfigError::serialize(path, e))?;
    std::fs::write(path, content).map_err(|e| ConfigError::io(path, e))
  }

  pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
    match &self.catalog {
      Some(path) => Catalog::load_from_file(path),
      None => Catalog::builtin(),
    }
  }

  /// Provider chain: configured fixtures in order, then the offline fallback
  pub fn build_provider(&self) -> Result<ProviderChain> {
    let mut chain = ProviderChain::new();
    for path in &self.fixtures {
      chain.push(Box::new(FixtureSearchProvider::load_from_file(path)?));
    }
    Ok(chain)
  }
}
