//! Confidence adjustment from insight signals

use crate::insights::InsightBundle;
use crate::scoring::MAX_SCORE;

const TREND_BONUS: f64 = 5.0;
const SECURITY_PENALTY: f64 = 10.0;
const POPULARITY_BONUS: f64 = 5.0;
const POPULAR_STAR_COUNT: f64 = 10_000.0;

/// Adjust the primary stack's raw score by what the outside world says about it
pub fn estimate(raw_score: f64, insights: &InsightBundle) -> f64 {
  let mut confidence = raw_score;

  if !insights.trends.is_empty() {
    confidence += TREND_BONUS;
  }

  if !insights.security_alerts.is_empty() {
    confidence -= SECURITY_PENALTY;
  }

  if insights.github_stars().is_some_and(|stars| stars > POPULAR_STAR_COUNT) {
    confidence += POPULARITY_BONUS;
  }

  confidence.clamp(0.0, MAX_SCORE)
}
