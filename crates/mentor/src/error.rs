use std::path::PathBuf;

use thiserror::Error;

use crate::search::SearchCategory;

/// Failures that escape the recommendation engine.
#[derive(Error, Debug)]
pub enum EngineError {
  #[error("Catalog is empty: there is no stack to recommend")]
  CatalogEmpty,
}

/// Failures while building or loading a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
  #[error("Failed to read catalog {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to parse catalog: {message}")]
  Parse { message: String },

  #[error("Stack id must not be empty (entry {index})")]
  MissingId { index: usize },

  #[error("Duplicate stack id '{id}'")]
  DuplicateId { id: String },

  #[error("{field} for technology '{technology}' must be between 1 and 5, got {value}")]
  OrdinalOutOfRange { technology: String, field: &'static str, value: u8 },
}

impl CatalogError {
  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io { path: path.into(), source }
  }

  pub fn parse(message: impl Into<String>) -> Self {
    Self::Parse { message: message.into() }
  }

  pub fn duplicate_id(id: impl Into<String>) -> Self {
    Self::DuplicateId { id: id.into() }
  }

  pub fn ordinal_out_of_range(technology: impl Into<String>, field: &'static str, value: u8) -> Self {
    Self::OrdinalOutOfRange { technology: technology.into(), field, value }
  }
}

/// Failures inside the insight layer. These never leave the gatherer.
#[derive(Error, Debug)]
pub enum InsightError {
  #[error("{category} lookup for '{technology}' failed: {message}")]
  Lookup { category: SearchCategory, technology: String, message: String },

  #[error("No {metric} figure found in popularity results")]
  PopularityParse { metric: &'static str },
}

impl InsightError {
  pub fn lookup(
    category: SearchCategory,
    technology: impl Into<String>,
    message: impl Into<String>,
  ) -> Self {
    Self::Lookup { category, technology: technology.into(), message: message.into() }
  }
}

/// Failures while loading or saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Failed to access config {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Invalid config {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("Failed to serialize config for {path}: {source}")]
  Serialize {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

impl ConfigError {
  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io { path: path.into(), source }
  }

  pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
    Self::Parse { path: path.into(), source }
  }

  pub fn serialize(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
    Self::Serialize { path: path.into(), source }
  }
}
