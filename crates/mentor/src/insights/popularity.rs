//! Popularity figures pulled out of free-text search snippets
//!
//! Grammar, case-insensitive:
//!
//! ```text
//! figure  := digits ("," digits)* ("." digits)? suffix? space* unit
//! suffix  := "k" | "m"
//! unit    := "star" | "stars" | "download" | "downloads"
//! ```
//!
//! `k` multiplies by 1,000 and `m` by 1,000,000. A metric with no figure in any
//! snippet is absent from the result; it is never reported as zero.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::InsightError;
use crate::search::SearchHit;

static FIGURE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(?i)(\d+(?:,\d+)*(?:\.\d+)?)([km])?\s*(stars?|downloads?)\b")
    .expect("popularity pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopularityMetric {
  GithubStars,
  NpmDownloads,
}

impl PopularityMetric {
  pub const ALL: [PopularityMetric; 2] = [PopularityMetric::GithubStars, PopularityMetric::NpmDownloads];

  /// Key used in `InsightBundle::popularity_data`
  pub fn key(&self) -> &'static str {
    match self {
      PopularityMetric::GithubStars => "githubStars",
      PopularityMetric::NpmDownloads => "npmDownloads",
    }
  }

  fn unit_prefix(&self) -> &'static str {
    match self {
      PopularityMetric::GithubStars => "star",
      PopularityMetric::NpmDownloads => "download",
    }
  }
}

/// First figure for `metric` in a single snippet
pub fn parse_metric(snippet: &str, metric: PopularityMetric) -> Result<f64, InsightError> {
  FIGURE
    .captures_iter(snippet)
    .filter(|captures| captures[3].to_lowercase().starts_with(metric.unit_prefix()))
    .find_map(|captures| {
      let suffix = captures.get(2).map(|m| m.as_str());
      parse_figure(&captures[1], suffix)
    })
    .ok_or(InsightError::PopularityParse { metric: metric.key() })
}

fn parse_figure(digits: &str, suffix: Option<&str>) -> Option<f64> {
  let value: f64 = digits.replace(',', "").parse().ok()?;

  let multiplier = match suffix.map(|s| s.to_ascii_lowercase()) {
    Some(s) if s == "k" => 1_000.0,
    Some(s) if s == "m" => 1_000_000.0,
    _ => 1.0,
  };

  Some(value * multiplier)
}

/// Scan hits in order; the first snippet that yields a figure decides each metric
pub fn extract(hits: &[SearchHit]) -> BTreeMap<String, f64> {
  let mut data = BTreeMap::new();

  for metric in PopularityMetric::ALL {
    let found = hits.iter().find_map(|hit| parse_metric(&hit.snippet, metric).ok());
    match found {
      Some(value) => {
        data.insert(metric.key().to_string(), value);
      }
      None => debug!(metric = metric.key(), "no popularity figure found"),
    }
  }

  data
}
