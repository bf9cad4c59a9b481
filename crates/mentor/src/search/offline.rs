//! Offline search results used when no real backend answers

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Datelike, Utc};

use super::{SearchCategory, SearchHit, SearchProvider, SearchSource};

/// Always-available provider returning placeholder results. It terminates every
/// [`ProviderChain`](super::ProviderChain), so it must never fail.
#[derive(Debug, Clone)]
pub struct OfflineSearchProvider {
  year: i32,
}

impl Default for OfflineSearchProvider {
  fn default() -> Self {
    Self::new()
  }
}

impl OfflineSearchProvider {
  pub fn new() -> Self {
    Self { year: Utc::now().year() }
  }

  /// Pin the year used in generated queries
  pub fn with_year(year: i32) -> Self {
    Self { year }
  }

  pub fn results(&self, category: SearchCategory, technology: &str) -> Vec<SearchHit> {
    let query = category.query(technology, self.year);
    let now = Utc::now();

    vec![
      SearchHit {
        title: format!("Latest {query} Trends and Updates"),
        url: "https://example.com/trends".to_string(),
        snippet: format!(
          "Recent developments and trends related to {query}. This is mock data for development purposes."
        ),
        published_date: Some(now),
        source: SearchSource::Web,
      },
      SearchHit {
        title: format!("{query} Community Discussion"),
        url: "https://example.com/discussion".to_string(),
        snippet: format!("Community insights and discussions about {query}. Mock data for testing."),
        published_date: Some(now),
        source: SearchSource::Web,
      },
    ]
  }
}

#[async_trait]
impl SearchProvider for OfflineSearchProvider {
  fn name(&self) -> String {
    "offline".to_string()
  }

  async fn search_trends(&self, technology: &str) -> Result<Vec<SearchHit>> {
    Ok(self.results(SearchCategory::Trends, technology))
  }

  async fn search_security_alerts(&self, technology: &str) -> Result<Vec<SearchHit>> {
    Ok(self.results(SearchCategory::SecurityAlerts, technology))
  }

  async fn search_popularity(&self, technology: &str) -> Result<Vec<SearchHit>> {
    Ok(self.results(SearchCategory::Popularity, technology))
  }

  async fn search_recent_updates(&self, technology: &str) -> Result<Vec<SearchHit>> {
    Ok(self.results(SearchCategory::RecentUpdates, technology))
  }
}
