//! Stack catalog
//!
//! The read-only set of candidate stacks a recommendation is drawn from. A catalog
//! is built once (from the embedded production document, a file, or a plain
//! `Vec<Stack>` in tests) and shared between requests behind an `Arc`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

use crate::error::CatalogError;

const BUILTIN_CATALOG: &str = include_str!("builtin.yaml");

/// A single technology referenced by one or more stacks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technology {
  pub name: String,
  pub description: String,
  /// 1 (gentle) to 5 (steep)
  pub learning_curve: u8,
  /// 1 (niche) to 5 (ubiquitous)
  pub popularity: u8,
  /// Documentation URL
  pub documentation: String,
}

impl Technology {
  pub fn new(name: impl Into<String>, learning_curve: u8, popularity: u8) -> Self {
    Self {
      name: name.into(),
      description: String::new(),
      learning_curve,
      popularity,
      documentation: String::new(),
    }
  }

  pub(crate) fn lowercase_name(&self) -> String {
    self.name.to_lowercase()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  Simple,
  Spa,
  Fullstack,
  Enterprise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
  Beginner,
  Intermediate,
  Advanced,
}

impl Complexity {
  pub fn as_str(&self) -> &'static str {
    match self {
      Complexity::Beginner => "beginner",
      Complexity::Intermediate => "intermediate",
      Complexity::Advanced => "advanced",
    }
  }

  pub fn ordinal(&self) -> u8 {
    match self {
      Complexity::Beginner => 1,
      Complexity::Intermediate => 2,
      Complexity::Advanced => 3,
    }
  }
}

impl fmt::Display for Complexity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cost {
  Free,
  Low,
  Medium,
  High,
}

impl Cost {
  pub fn as_str(&self) -> &'static str {
    match self {
      Cost::Free => "free",
      Cost::Low => "low",
      Cost::Medium => "medium",
      Cost::High => "high",
    }
  }

  pub fn level(&self) -> u8 {
    match self {
      Cost::Free => 0,
      Cost::Low => 1,
      Cost::Medium => 2,
      Cost::High => 3,
    }
  }
}

impl fmt::Display for Cost {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One complete candidate technology combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stack {
  pub id: String,
  pub name: String,
  pub category: Category,
  pub frontend: Technology,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub backend: Option<Technology>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub database: Option<Technology>,
  pub deployment: Technology,
  #[serde(default)]
  pub additional_tools: Vec<Technology>,
  #[serde(default)]
  pub key_files: Vec<String>,
  #[serde(default)]
  pub use_cases: Vec<String>,
  #[serde(default)]
  pub efficiency: String,
  /// Free-text week range such as "6-12 weeks"
  pub timeline: String,
  pub complexity: Complexity,
  pub cost: Cost,
}

impl Stack {
  fn technologies(&self) -> impl Iterator<Item = &Technology> {
    std::iter::once(&self.frontend)
      .chain(self.backend.iter())
      .chain(self.database.iter())
      .chain(std::iter::once(&self.deployment))
      .chain(self.additional_tools.iter())
  }
}

/// On-disk shape of a catalog document. `technologies` is an optional anchor table
/// that stacks reference by alias.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
  #[serde(default)]
  technologies: BTreeMap<String, Technology>,
  stacks: Vec<Stack>,
}

/// Immutable, ordered collection of stacks. Insertion order is significant: it
/// decides ranking ties.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
  stacks: Vec<Stack>,
}

impl Catalog {
  /// Build a catalog from stacks, validating ids and technology ordinals
  pub fn new(stacks: Vec<Stack>) -> Result<Self, CatalogError> {
    let mut seen = HashSet::new();

    for (index, stack) in stacks.iter().enumerate() {
      if stack.id.trim().is_empty() {
        return Err(CatalogError::MissingId { index });
      }
      if !seen.insert(stack.id.as_str()) {
        return Err(CatalogError::duplicate_id(&stack.id));
      }
      for technology in stack.technologies() {
        validate_technology(technology)?;
      }
    }

    Ok(Self { stacks })
  }

  /// The production catalog shipped with the crate
  pub fn builtin() -> Result<Self, CatalogError> {
    Self::from_yaml_str(BUILTIN_CATALOG)
  }

  pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
    let document: CatalogDocument =
      serde_yaml::from_str(content).map_err(|e| CatalogError::parse(e.to_string()))?;
    Self::from_document(document)
  }

  pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
    let document: CatalogDocument =
      serde_json::from_str(content).map_err(|e| CatalogError::parse(e.to_string()))?;
    Self::from_document(document)
  }

  /// Load a catalog file; `.json` files are read as JSON, anything else as YAML
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;

    match path.extension().and_then(|ext| ext.to_str()) {
      Some("json") => Self::from_json_str(&content),
      _ => Self::from_yaml_str(&content),
    }
  }

  fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
    for technology in document.technologies.values() {
      validate_technology(technology)?;
    }
    Self::new(document.stacks)
  }

  pub fn get(&self, id: &str) -> Option<&Stack> {
    self.stacks.iter().find(|stack| stack.id == id)
  }

  pub fn by_category(&self, category: Category) -> Vec<&Stack> {
    self.stacks.iter().filter(|stack| stack.category == category).collect()
  }

  pub fn by_complexity(&self, complexity: Complexity) -> Vec<&Stack> {
    self.stacks.iter().filter(|stack| stack.complexity == complexity).collect()
  }

  pub fn stacks(&self) -> &[Stack] {
    &self.stacks
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Stack> {
    self.stacks.iter()
  }

  pub fn len(&self) -> usize {
    self.stacks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.stacks.is_empty()
  }
}

impl<'a> IntoIterator for &'a Catalog {
  type Item = &'a Stack;
  type IntoIter = std::slice::Iter<'a, Stack>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

fn validate_technology(technology: &Technology) -> Result<(), CatalogError> {
  let ordinals = [("learningCurve", technology.learning_curve), ("popularity", technology.popularity)];
  for (field, value) in ordinals {
    if !(1..=5).contains(&value) {
      return Err(CatalogError::ordinal_out_of_range(&technology.name, field, value));
    }
  }
  Ok(())
}
