//! Recommendation entry point
//!
//! Ranking happens first and is final before any insight is requested, so
//! external data can move the confidence but never the choice of stack.

use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::catalog::{Catalog, Stack};
use crate::confidence;
use crate::error::EngineError;
use crate::explain::explain;
use crate::insights::{InsightBundle, InsightGatherer};
use crate::ranking;
use crate::requirements::Requirements;
use crate::scoring::ScoreBreakdown;
use crate::search::SearchProvider;

/// Everything produced for one request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
  pub primary: Stack,
  /// Next best stacks, best first, never including the primary
  pub alternatives: Vec<Stack>,
  pub insights: InsightBundle,
  pub confidence: f64,
  pub reasoning: String,
  /// The primary's raw fitness score before insight adjustment
  pub score: f64,
  pub breakdown: ScoreBreakdown,
}

#[derive(Clone)]
pub struct RecommendationEngine {
  catalog: Arc<Catalog>,
  provider: Arc<dyn SearchProvider>,
}

impl RecommendationEngine {
  pub fn new(catalog: Arc<Catalog>, provider: Arc<dyn SearchProvider>) -> Self {
    Self { catalog, provider }
  }

  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  pub async fn generate_recommendation(
    &self,
    requirements: &Requirements,
  ) -> Result<RecommendationResult, EngineError> {
    let ranking = ranking::rank(&self.catalog, requirements)?;

    let primary = ranking.primary.stack.clone();
    let breakdown = ranking.primary.breakdown;
    let score = breakdown.total;
    let alternatives: Vec<Stack> = ranking.alternatives.iter().map(|c| c.stack.clone()).collect();

    info!(
      primary = %primary.id,
      score,
      alternatives = alternatives.len(),
      "stack selected"
    );

    let insights = InsightGatherer::new(self.provider.as_ref()).gather(&primary).await;
    let confidence = confidence::estimate(score, &insights);
    let reasoning = explain(requirements, &primary, score);

    Ok(RecommendationResult { primary, alternatives, insights, confidence, reasoning, score, breakdown })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::search::{MockSearchProvider, SearchHit};
  use anyhow::anyhow;

  fn quiet_provider() -> MockSearchProvider {
    let mut provider = MockSearchProvider::new();
    provider.expect_search_trends().returning(|_| Ok(vec![]));
    provider.expect_search_security_alerts().returning(|_| Ok(vec![]));
    provider.expect_search_popularity().returning(|_| Ok(vec![]));
    provider.expect_search_recent_updates().returning(|_| Ok(vec![]));
    provider
  }

  #[tokio::test]
  async fn test_empty_catalog_fails_without_searching() {
    let mut provider = MockSearchProvider::new();
    provider.expect_search_trends().never();

    let engine = RecommendationEngine::new(Arc::new(Catalog::default()), Arc::new(provider));
    let result = engine.generate_recommendation(&Requirements::new("1 month", "small", "beginner", "low")).await;

    assert!(matches!(result, Err(EngineError::CatalogEmpty)));
  }

  #[tokio::test]
  async fn test_confidence_equals_score_without_insights() {
    let engine = RecommendationEngine::new(Arc::new(Catalog::builtin().unwrap()), Arc::new(quiet_provider()));
    let requirements = Requirements::new("2-3 months", "medium", "intermediate", "medium");

    let result = engine.generate_recommendation(&requirements).await.unwrap();

    assert_eq!(result.confidence, result.score);
    assert_eq!(result.alternatives.len(), 3);
    assert!(result.reasoning.starts_with(&format!("This {} is recommended", result.primary.name)));
  }

  #[tokio::test]
  async fn test_insights_never_change_the_ranking() {
    let catalog = Arc::new(Catalog::builtin().unwrap());
    let requirements = Requirements::new("1 month", "solo", "beginner", "minimal");

    let mut noisy = MockSearchProvider::new();
    noisy
      .expect_search_trends()
      .returning(|_| Ok(vec![SearchHit::new("t", "https://t", "trending up")]));
    noisy
      .expect_search_security_alerts()
      .returning(|_| Ok(vec![SearchHit::new("a", "https://a", "critical CVE")]));
    noisy.expect_search_popularity().returning(|_| Err(anyhow!("rate limited")));
    noisy.expect_search_recent_updates().returning(|_| Ok(vec![]));

    let quiet = RecommendationEngine::new(catalog.clone(), Arc::new(quiet_provider()));
    let noisy = RecommendationEngine::new(catalog, Arc::new(noisy));

    let a = quiet.generate_recommendation(&requirements).await.unwrap();
    let b = noisy.generate_recommendation(&requirements).await.unwrap();

    assert_eq!(a.primary.id, b.primary.id);
    let ids = |r: &RecommendationResult| r.alternatives.iter().map(|s| s.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&a), ids(&b));
    assert_eq!(b.confidence, (b.score - 5.0).clamp(0.0, 100.0));
  }
}
