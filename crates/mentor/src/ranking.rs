//! Catalog ranking
//!
//! Scores every stack, orders them best-first and picks the primary plus up to
//! three alternatives.

use rayon::prelude::*;
use tracing::debug;

use crate::catalog::{Catalog, Stack};
use crate::error::EngineError;
use crate::requirements::Requirements;
use crate::scoring::{self, ScoreBreakdown};

pub const MAX_ALTERNATIVES: usize = 3;

/// A stack paired with its score for one request
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
  pub stack: &'a Stack,
  pub breakdown: ScoreBreakdown,
}

impl ScoredCandidate<'_> {
  pub fn score(&self) -> f64 {
    self.breakdown.total
  }
}

#[derive(Debug, Clone)]
pub struct Ranking<'a> {
  pub primary: ScoredCandidate<'a>,
  pub alternatives: Vec<ScoredCandidate<'a>>,
}

/// Score every stack in the catalog, best first. Equal scores keep catalog order.
pub fn score_catalog<'a>(catalog: &'a Catalog, requirements: &Requirements) -> Vec<ScoredCandidate<'a>> {
  let mut candidates: Vec<ScoredCandidate<'a>> = catalog
    .stacks()
    .par_iter()
    .map(|stack| ScoredCandidate { stack, breakdown: scoring::breakdown(stack, requirements) })
    .collect();

  for candidate in &candidates {
    debug!(stack = %candidate.stack.id, score = candidate.score(), "scored stack");
  }

  // sort_by is stable, so catalog order decides ties
  candidates.sort_by(|a, b| b.score().total_cmp(&a.score()));
  candidates
}

/// Rank the catalog and split it into a primary pick and its alternatives
pub fn rank<'a>(catalog: &'a Catalog, requirements: &Requirements) -> Result<Ranking<'a>, EngineError> {
  let mut ranked = score_catalog(catalog, requirements).into_iter();
  let primary = ranked.next().ok_or(EngineError::CatalogEmpty)?;
  let alternatives = ranked.take(MAX_ALTERNATIVES).collect();

  Ok(Ranking { primary, alternatives })
}
