//! Best-effort external insight for the recommended stack
//!
//! Four lookups run concurrently against the search provider. Each one fails on
//! its own: a failed lookup leaves its category empty and the rest of the bundle
//! intact. Gathering itself never fails.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::catalog::Stack;
use crate::error::InsightError;
use crate::search::{self, SearchCategory, SearchHit, SearchProvider};

pub mod popularity;

pub use popularity::PopularityMetric;

pub const MAX_TRENDS: usize = 3;
pub const MAX_SECURITY_ALERTS: usize = 2;
pub const MAX_RECENT_UPDATES: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightBundle {
  pub trends: Vec<String>,
  pub security_alerts: Vec<String>,
  pub popularity_data: BTreeMap<String, f64>,
  pub recent_updates: Vec<String>,
}

impl InsightBundle {
  pub fn github_stars(&self) -> Option<f64> {
    self.popularity_data.get(PopularityMetric::GithubStars.key()).copied()
  }

  pub fn is_empty(&self) -> bool {
    self.trends.is_empty()
      && self.security_alerts.is_empty()
      && self.popularity_data.is_empty()
      && self.recent_updates.is_empty()
  }
}

pub struct InsightGatherer<'a> {
  provider: &'a dyn SearchProvider,
}

impl<'a> InsightGatherer<'a> {
  pub fn new(provider: &'a dyn SearchProvider) -> Self {
    Self { provider }
  }

  /// Gather insight keyed by the stack's frontend technology
  pub async fn gather(&self, stack: &Stack) -> InsightBundle {
    let technology = stack.frontend.name.as_str();

    let (trends, security_alerts, popularity_hits, recent_updates) = futures::join!(
      self.fetch(SearchCategory::Trends, technology),
      self.fetch(SearchCategory::SecurityAlerts, technology),
      self.fetch(SearchCategory::Popularity, technology),
      self.fetch(SearchCategory::RecentUpdates, technology),
    );

    let bundle = InsightBundle {
      trends: snippets(trends, MAX_TRENDS),
      security_alerts: snippets(security_alerts, MAX_SECURITY_ALERTS),
      popularity_data: popularity::extract(&popularity_hits),
      recent_updates: snippets(recent_updates, MAX_RECENT_UPDATES),
    };

    debug!(
      technology,
      trends = bundle.trends.len(),
      security_alerts = bundle.security_alerts.len(),
      popularity_metrics = bundle.popularity_data.len(),
      recent_updates = bundle.recent_updates.len(),
      "insights gathered"
    );

    bundle
  }

  async fn fetch(&self, category: SearchCategory, technology: &str) -> Vec<SearchHit> {
    match search::lookup(self.provider, category, technology).await {
      Ok(hits) => hits,
      Err(e) => {
        let error = InsightError::lookup(category, technology, format!("{e:#}"));
        warn!(%error, "insight lookup failed, continuing without it");
        Vec::new()
      }
    }
  }
}

fn snippets(hits: Vec<SearchHit>, limit: usize) -> Vec<String> {
  hits.into_iter().take(limit).map(|hit| hit.snippet).collect()
}
