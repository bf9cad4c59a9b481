//! Project requirements as declared by the user

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Capability tags grouped by the five categories the scorer understands
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
  #[serde(default)]
  pub database: BTreeSet<String>,
  #[serde(default)]
  pub features: BTreeSet<String>,
  #[serde(default)]
  pub ai_ml: BTreeSet<String>,
  #[serde(default)]
  pub performance: BTreeSet<String>,
  #[serde(default)]
  pub development: BTreeSet<String>,
}

impl Capabilities {
  pub fn is_empty(&self) -> bool {
    self.database.is_empty()
      && self.features.is_empty()
      && self.ai_ml.is_empty()
      && self.performance.is_empty()
      && self.development.is_empty()
  }
}

/// One recommendation request. Choice fields hold the raw form values
/// (`"1 month"`, `"small"`, ...); unrecognised values fall back to the
/// scorer's defaults rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
  #[serde(default)]
  pub project_description: String,
  #[serde(default)]
  pub capabilities: Capabilities,
  pub timeline: String,
  pub team_size: String,
  pub experience_level: String,
  pub budget: String,
}

impl Requirements {
  pub fn new(
    timeline: impl Into<String>,
    team_size: impl Into<String>,
    experience_level: impl Into<String>,
    budget: impl Into<String>,
  ) -> Self {
    Self {
      project_description: String::new(),
      capabilities: Capabilities::default(),
      timeline: timeline.into(),
      team_size: team_size.into(),
      experience_level: experience_level.into(),
      budget: budget.into(),
    }
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.project_description = description.into();
    self
  }

  pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
    self.capabilities = capabilities;
    self
  }

  /// Read a request document; `.yaml`/`.yml` files are YAML, anything else JSON
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read requirements {}", path.display()))?;

    let is_yaml = matches!(path.extension().and_then(|e| e.to_str()), Some("yaml" | "yml"));
    if is_yaml {
      serde_yaml::from_str(&content).with_context(|| format!("Invalid requirements {}", path.display()))
    } else {
      serde_json::from_str(&content).with_context(|| format!("Invalid requirements {}", path.display()))
    }
  }
}

/// Collect tags into a capability set
pub fn tags<I, S>(values: I) -> BTreeSet<String>
where
  I: IntoIterator<Item = S>,
  S: Into<String>,
{
  values.into_iter().map(Into::into).collect()
}
