//! Ordered provider fallback

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

use super::{lookup, OfflineSearchProvider, SearchCategory, SearchHit, SearchProvider};

/// Tries each provider in order for every lookup; the first success wins. When
/// every provider fails the terminal offline provider answers, so a chain lookup
/// never fails.
pub struct ProviderChain {
  providers: Vec<Box<dyn SearchProvider>>,
  terminal: OfflineSearchProvider,
}

impl Default for ProviderChain {
  fn default() -> Self {
    Self::new()
  }
}

impl ProviderChain {
  /// A chain holding only the offline fallback
  pub fn new() -> Self {
    Self::with_terminal(OfflineSearchProvider::new())
  }

  pub fn with_terminal(terminal: OfflineSearchProvider) -> Self {
    Self { providers: Vec::new(), terminal }
  }

  /// Append a provider, tried after those already in the chain
  pub fn with_provider<P: SearchProvider + 'static>(mut self, provider: P) -> Self {
    self.push(Box::new(provider));
    self
  }

  pub fn push(&mut self, provider: Box<dyn SearchProvider>) {
    self.providers.push(provider);
  }

  pub fn len(&self) -> usize {
    self.providers.len() + 1
  }

  pub fn is_empty(&self) -> bool {
    false
  }

  async fn first_success(&self, category: SearchCategory, technology: &str) -> Vec<SearchHit> {
    for provider in &self.providers {
      match lookup(provider.as_ref(), category, technology).await {
        Ok(hits) => {
          debug!(provider = %provider.name(), %category, hits = hits.len(), "search answered");
          return hits;
        }
        Err(e) => {
          warn!(provider = %provider.name(), %category, error = %e, "search provider failed, trying next");
        }
      }
    }

    self.terminal.results(category, technology)
  }
}

#[async_trait]
impl SearchProvider for ProviderChain {
  fn name(&self) -> String {
    let mut names: Vec<String> = self.providers.iter().map(|p| p.name()).collect();
    names.push(self.terminal.name());
    names.join(" -> ")
  }

  async fn search_trends(&self, technology: &str) -> Result<Vec<SearchHit>> {
    Ok(self.first_success(SearchCategory::Trends, technology).await)
  }

  async fn search_security_alerts(&self, technology: &str) -> Result<Vec<SearchHit>> {
    Ok(self.first_success(SearchCategory::SecurityAlerts, technology).await)
  }

  async fn search_popularity(&self, technology: &str) -> Result<Vec<SearchHit>> {
    Ok(self.first_success(SearchCategory::Popularity, technology).await)
  }

  async fn search_recent_updates(&self, technology: &str) -> Result<Vec<SearchHit>> {
    Ok(self.first_success(SearchCategory::RecentUpdates, technology).await)
  }
}
