//! External search capability
//!
//! The engine only consumes the four lookups on [`SearchProvider`]. Which backend
//! answers them, and in what order backends are tried, is decided by the
//! provider implementations in this module.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub mod chain;
pub mod fixture;
pub mod offline;

pub use chain::ProviderChain;
pub use fixture::FixtureSearchProvider;
pub use offline::OfflineSearchProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SearchSource {
  Web,
  X,
  News,
  Rss,
}

impl SearchSource {
  /// Map a backend's source label onto the known sources; unknown labels are web
  pub fn from_label(label: &str) -> Self {
    match label.trim().to_lowercase().as_str() {
      "twitter" | "x" => SearchSource::X,
      "news" => SearchSource::News,
      "rss" => SearchSource::Rss,
      _ => SearchSource::Web,
    }
  }
}

impl From<String> for SearchSource {
  fn from(label: String) -> Self {
    Self::from_label(&label)
  }
}

/// One search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
  pub title: String,
  pub url: String,
  pub snippet: String,
  /// Absent when the backend gave no date or one that could not be read
  #[serde(default, deserialize_with = "lenient_date", skip_serializing_if = "Option::is_none")]
  pub published_date: Option<DateTime<Utc>>,
  pub source: SearchSource,
}

impl SearchHit {
  pub fn new(title: impl Into<String>, url: impl Into<String>, snippet: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      url: url.into(),
      snippet: snippet.into(),
      published_date: None,
      source: SearchSource::Web,
    }
  }
}

/// RFC 3339 timestamps and bare `YYYY-MM-DD` dates are kept; any other value
/// becomes `None` instead of failing the whole document.
fn lenient_date<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<serde_json::Value>::deserialize(deserializer)?;
  Ok(value.as_ref().and_then(|v| v.as_str()).and_then(parse_date))
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
  let raw = raw.trim();
  if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
    return Some(timestamp.with_timezone(&Utc));
  }
  NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}

/// The four lookups issued per recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchCategory {
  Trends,
  SecurityAlerts,
  Popularity,
  RecentUpdates,
}

impl SearchCategory {
  pub const ALL: [SearchCategory; 4] = [
    SearchCategory::Trends,
    SearchCategory::SecurityAlerts,
    SearchCategory::Popularity,
    SearchCategory::RecentUpdates,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      SearchCategory::Trends => "trends",
      SearchCategory::SecurityAlerts => "security alerts",
      SearchCategory::Popularity => "popularity",
      SearchCategory::RecentUpdates => "recent updates",
    }
  }

  /// Free-text query a search backend would run for this category
  pub fn query(&self, technology: &str, year: i32) -> String {
    match self {
      SearchCategory::Trends => format!("{technology} framework trends {year} popularity updates"),
      SearchCategory::SecurityAlerts => {
        format!("{technology} security vulnerabilities CVE alerts {year}")
      }
      SearchCategory::Popularity => {
        format!("{technology} github stars npm downloads usage statistics {year}")
      }
      SearchCategory::RecentUpdates => {
        format!("{technology} latest version release notes changelog {year}")
      }
    }
  }
}

impl fmt::Display for SearchCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Search capability consumed by the insight gatherer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
  /// Short label used in logs
  fn name(&self) -> String;

  async fn search_trends(&self, technology: &str) -> Result<Vec<SearchHit>>;

  async fn search_security_alerts(&self, technology: &str) -> Result<Vec<SearchHit>>;

  async fn search_popularity(&self, technology: &str) -> Result<Vec<SearchHit>>;

  async fn search_recent_updates(&self, technology: &str) -> Result<Vec<SearchHit>>;
}

/// Run the lookup for `category` against `provider`
pub async fn lookup(
  provider: &dyn SearchProvider,
  category: SearchCategory,
  technology: &str,
) -> Result<Vec<SearchHit>> {
  match category {
    SearchCategory::Trends => provider.search_trends(technology).await,
    SearchCategory::SecurityAlerts => provider.search_security_alerts(technology).await,
    SearchCategory::Popularity => provider.search_popularity(technology).await,
    SearchCategory::RecentUpdates => provider.search_recent_updates(technology).await,
  }
}
