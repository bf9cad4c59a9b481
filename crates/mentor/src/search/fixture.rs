//! Canned search results read from a JSON file
//!
//! File shape: technology name -> category -> hits.
//!
//! ```json
//! { "React": { "trends": [ { "title": "...", "url": "...", "snippet": "...", "source": "news" } ] } }
//! ```
//!
//! Technology names match case-insensitively. A technology or category missing
//! from the file is reported as a failed lookup so a chain moves on.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{SearchCategory, SearchHit, SearchProvider};

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureEntry {
  trends: Option<Vec<SearchHit>>,
  security_alerts: Option<Vec<SearchHit>>,
  popularity: Option<Vec<SearchHit>>,
  recent_updates: Option<Vec<SearchHit>>,
}

impl FixtureEntry {
  fn hits(&self, category: SearchCategory) -> Option<&Vec<SearchHit>> {
    match category {
      SearchCategory::Trends => self.trends.as_ref(),
      SearchCategory::SecurityAlerts => self.security_alerts.as_ref(),
      SearchCategory::Popularity => self.popularity.as_ref(),
      SearchCategory::RecentUpdates => self.recent_updates.as_ref(),
    }
  }
}

#[derive(Debug, Clone)]
pub struct FixtureSearchProvider {
  source: Option<PathBuf>,
  entries: HashMap<String, FixtureEntry>,
}

impl FixtureSearchProvider {
  pub fn from_json_str(content: &str) -> Result<Self> {
    let raw: HashMap<String, FixtureEntry> =
      serde_json::from_str(content).context("Invalid search fixture document")?;
    let entries = raw.into_iter().map(|(name, entry)| (name.to_lowercase(), entry)).collect();
    Ok(Self { source: None, entries })
  }

  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read search fixtures {}", path.display()))?;

    let mut provider = Self::from_json_str(&content)
      .with_context(|| format!("Failed to load search fixtures {}", path.display()))?;
    provider.source = Some(path.to_path_buf());
    Ok(provider)
  }

  fn find(&self, category: SearchCategory, technology: &str) -> Result<Vec<SearchHit>> {
    self
      .entries
      .get(&technology.to_lowercase())
      .and_then(|entry| entry.hits(category))
      .cloned()
      .ok_or_else(|| anyhow!("no {category} fixture for '{technology}'"))
  }
}

#[async_trait]
impl SearchProvider for FixtureSearchProvider {
  fn name(&self) -> String {
    match &self.source {
      Some(path) => format!("fixture:{}", path.display()),
      None => "fixture".to_string(),
    }
  }

  async fn search_trends(&self, technology: &str) -> Result<Vec<SearchHit>> {
    self.find(SearchCategory::Trends, technology)
  }

  async fn search_security_alerts(&self, technology: &str) -> Result<Vec<SearchHit>> {
    self.find(SearchCategory::SecurityAlerts, technology)
  }

  async fn search_popularity(&self, technology: &str) -> Result<Vec<SearchHit>> {
    self.find(SearchCategory::Popularity, technology)
  }

  async fn search_recent_updates(&self, technology: &str) -> Result<Vec<SearchHit>> {
    self.find(SearchCategory::RecentUpdates, technology)
  }
}
