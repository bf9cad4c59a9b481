use anyhow::{anyhow, Result};
use async_trait::async_trait;
use mentor::{Category, Complexity, Cost, SearchCategory, SearchHit, SearchProvider, Stack, Technology};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};

/// Stub search backend with canned hits and per-category failures
#[derive(Default)]
pub struct StubSearchProvider {
  pub hits: HashMap<SearchCategory, Vec<SearchHit>>,
  pub failing: HashSet<SearchCategory>,
  pub call_count: AtomicU32,
}

impl StubSearchProvider {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_hits(mut self, category: SearchCategory, snippets: &[&str]) -> Self {
    let hits = snippets
      .iter()
      .enumerate()
      .map(|(i, snippet)| SearchHit::new(format!("{category} {i}"), "https://example.com", *snippet))
      .collect();
    self.hits.insert(category, hits);
    self
  }

  pub fn failing(mut self, category: SearchCategory) -> Self {
    self.failing.insert(category);
    self
  }

  pub fn calls(&self) -> u32 {
    self.call_count.load(Ordering::SeqCst)
  }

  fn answer(&self, category: SearchCategory) -> Result<Vec<SearchHit>> {
    self.call_count.fetch_add(1, Ordering::SeqCst);
    if self.failing.contains(&category) {
      return Err(anyhow!("stub {category} lookup unavailable"));
    }
    Ok(self.hits.get(&category).cloned().unwrap_or_default())
  }
}

#[async_trait]
impl SearchProvider for StubSearchProvider {
  fn name(&self) -> String {
    "stub".to_string()
  }

  async fn search_trends(&self, _technology: &str) -> Result<Vec<SearchHit>> {
    self.answer(SearchCategory::Trends)
  }

  async fn search_security_alerts(&self, _technology: &str) -> Result<Vec<SearchHit>> {
    self.answer(SearchCategory::SecurityAlerts)
  }

  async fn search_popularity(&self, _technology: &str) -> Result<Vec<SearchHit>> {
    self.answer(SearchCategory::Popularity)
  }

  async fn search_recent_updates(&self, _technology: &str) -> Result<Vec<SearchHit>> {
    self.answer(SearchCategory::RecentUpdates)
  }
}

/// Synthetic stack that differs from its siblings only where the caller says
#[allow(dead_code)]
pub fn stack(id: &str, complexity: Complexity, cost: Cost, timeline: &str) -> Stack {
  Stack {
    id: id.to_string(),
    name: format!("Stack {id}"),
    category: Category::Spa,
    frontend: Technology::new("Widget", 2, 3),
    backend: None,
    database: None,
    deployment: Technology::new("Host", 1, 3),
    additional_tools: Vec::new(),
    key_files: Vec::new(),
    use_cases: Vec::new(),
    efficiency: String::new(),
    timeline: timeline.to_string(),
    complexity,
    cost,
  }
}
