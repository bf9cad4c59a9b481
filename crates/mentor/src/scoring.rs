//! Stack fitness scoring
//!
//! Scores one stack against one set of requirements as a weighted sum of five
//! factors. Every factor is a pure function of its inputs, so stacks can be scored
//! in any order (or in parallel) with identical results.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::catalog::{Complexity, Cost, Stack};
use crate::requirements::{Capabilities, Requirements};

pub const COMPLEXITY_WEIGHT: f64 = 0.25;
pub const TIMELINE_WEIGHT: f64 = 0.20;
pub const BUDGET_WEIGHT: f64 = 0.15;
pub const CAPABILITIES_WEIGHT: f64 = 0.30;
pub const TEAM_SIZE_WEIGHT: f64 = 0.10;

pub const MAX_SCORE: f64 = 100.0;

/// Capability fit when the user selected no capability tags at all
const NEUTRAL_CAPABILITY_FIT: f64 = 50.0;
/// Ceiling for each capability category
const CATEGORY_POINTS: f64 = 20.0;

const DEFAULT_ORDINAL: i32 = 2;
const DEFAULT_STACK_WEEKS: f64 = 6.0;
const DEFAULT_REQUESTED_WEEKS: f64 = 8.0;
const WEEKS_PER_MONTH: f64 = 4.0;

const FEATURE_TECHNOLOGIES: &[(&str, &[&str])] = &[
  ("user-auth", &["firebase", "supabase", "nextjs"]),
  ("real-time", &["firebase", "supabase", "websocket"]),
  ("payments", &["stripe", "nextjs", "react"]),
  ("cms", &["nextjs", "react", "vue"]),
  ("e-commerce", &["nextjs", "react", "vue"]),
  ("blog", &["nextjs", "gatsby", "vue"]),
  ("dashboard", &["react", "vue", "svelte"]),
  ("api", &["nextjs", "express", "fastapi"]),
];

const AI_FRIENDLY: &[&str] = &["python", "fastapi", "nextjs", "react"];

const FRONTEND_PERFORMANCE: &[(&str, f64)] =
  &[("svelte", 20.0), ("nextjs", 18.0), ("vue", 16.0), ("react", 15.0), ("html", 20.0)];
const DEFAULT_PERFORMANCE: f64 = 10.0;

const COMPONENT_FRAMEWORKS: &[&str] = &["react", "vue", "svelte"];

static WEEK_RANGE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?)\s*(?:[-–]\s*(\d+(?:\.\d+)?))?\s*\+?\s*(weeks?|months?)\s*$")
    .expect("week range pattern is valid")
});

/// Per-factor view of a stack's score. Factor values are on a 0-100 scale
/// before weighting; `total` is the weighted, clamped result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
  pub complexity: f64,
  pub timeline: f64,
  pub budget: f64,
  pub capabilities: f64,
  pub team_size: f64,
  pub total: f64,
}

impl ScoreBreakdown {
  fn from_factors(
    complexity: f64,
    timeline: f64,
    budget: f64,
    capabilities: f64,
    team_size: f64,
  ) -> Self {
    let weighted = complexity * COMPLEXITY_WEIGHT
      + timeline * TIMELINE_WEIGHT
      + budget * BUDGET_WEIGHT
      + capabilities * CAPABILITIES_WEIGHT
      + team_size * TEAM_SIZE_WEIGHT;

    Self {
      complexity,
      timeline,
      budget,
      capabilities,
      team_size,
      total: weighted.clamp(0.0, MAX_SCORE),
    }
  }
}

/// Score a stack against the requirements, returning every factor
pub fn breakdown(stack: &Stack, requirements: &Requirements) -> ScoreBreakdown {
  ScoreBreakdown::from_factors(
    complexity_fit(stack.complexity, &requirements.experience_level),
    timeline_fit(&stack.timeline, &requirements.timeline),
    budget_fit(stack.cost, &requirements.budget),
    capability_fit(stack, &requirements.capabilities),
    team_size_fit(stack.complexity, &requirements.team_size),
  )
}

/// Fitness score in [0, 100]
pub fn score(stack: &Stack, requirements: &Requirements) -> f64 {
  breakdown(stack, requirements).total
}

fn normalized(choice: &str) -> String {
  choice.trim().to_lowercase()
}

pub fn experience_ordinal(experience: &str) -> i32 {
  match normalized(experience).as_str() {
    "beginner" => 1,
    "intermediate" => 2,
    "advanced" => 3,
    "expert" => 4,
    _ => DEFAULT_ORDINAL,
  }
}

pub fn team_size_ordinal(team_size: &str) -> i32 {
  match normalized(team_size).as_str() {
    "solo" => 1,
    "small" => 2,
    "medium" => 3,
    "large" => 4,
    _ => DEFAULT_ORDINAL,
  }
}

pub fn budget_level(budget: &str) -> i32 {
  match normalized(budget).as_str() {
    "minimal" => 0,
    "low" => 1,
    "medium" => 2,
    "high" => 3,
    _ => DEFAULT_ORDINAL,
  }
}

/// Week budget for a requested timeline choice
pub fn requested_weeks(timeline: &str) -> f64 {
  match normalized(timeline).as_str() {
    "asap" => 2.0,
    "1-2 weeks" => 1.5,
    "1 month" => 4.0,
    "2-3 months" => 10.0,
    "3+ months" => 16.0,
    _ => DEFAULT_REQUESTED_WEEKS,
  }
}

/// Representative week count for a stack's declared range: the midpoint of
/// "a-b weeks", "a weeks" or "a+ weeks" as-is, months converted at four weeks
/// each. The unit is required; anything else is unparseable.
pub fn stack_weeks(timeline: &str) -> f64 {
  let Some(captures) = WEEK_RANGE.captures(timeline) else {
    return DEFAULT_STACK_WEEKS;
  };

  let low = captures.get(1).and_then(|m| m.as_str().parse::<f64>().ok());
  let high = captures.get(2).and_then(|m| m.as_str().parse::<f64>().ok());
  let months = captures[3].to_lowercase().starts_with("month");

  let weeks = match (low, high) {
    (Some(low), Some(high)) => (low + high) / 2.0,
    (Some(low), None) => low,
    _ => return DEFAULT_STACK_WEEKS,
  };

  if months {
    weeks * WEEKS_PER_MONTH
  } else {
    weeks
  }
}

pub fn complexity_fit(complexity: Complexity, experience: &str) -> f64 {
  let stack_level = complexity.ordinal() as i32;
  let user_level = experience_ordinal(experience);

  if stack_level == user_level {
    100.0
  } else if stack_level == user_level - 1 {
    85.0
  } else if stack_level == user_level + 1 {
    70.0
  } else {
    (50.0 - 20.0 * (stack_level - user_level).abs() as f64).max(0.0)
  }
}

pub fn timeline_fit(stack_timeline: &str, requested: &str) -> f64 {
  let stack = stack_weeks(stack_timeline);
  let budget = requested_weeks(requested);

  if stack <= budget {
    100.0
  } else if stack <= budget * 1.5 {
    70.0
  } else {
    (50.0 - 5.0 * (stack - budget)).max(0.0)
  }
}

pub fn budget_fit(cost: Cost, budget: &str) -> f64 {
  let cost_level = cost.level() as i32;
  let budget_level = budget_level(budget);

  if cost_level <= budget_level {
    100.0
  } else {
    (100.0 - 30.0 * (cost_level - budget_level) as f64).max(0.0)
  }
}

pub fn team_size_fit(complexity: Complexity, team_size: &str) -> f64 {
  let team = team_size_ordinal(team_size);
  let comp = complexity.ordinal() as i32;

  if team >= comp {
    100.0
  } else {
    (100.0 - 25.0 * (comp - team) as f64).max(50.0)
  }
}

/// Average of the populated capability categories, or a neutral 50 when the user
/// asked for nothing. Each category contributes at most 20 points.
pub fn capability_fit(stack: &Stack, capabilities: &Capabilities) -> f64 {
  let categories: [(&BTreeSet<String>, fn(&Stack, &BTreeSet<String>) -> f64); 5] = [
    (&capabilities.database, database_points),
    (&capabilities.features, feature_points),
    (&capabilities.ai_ml, ai_points),
    (&capabilities.performance, performance_points),
    (&capabilities.development, development_points),
  ];

  let populated: Vec<f64> = categories
    .iter()
    .filter(|(tags, _)| !tags.is_empty())
    .map(|(tags, points)| points(stack, tags))
    .collect();

  if populated.is_empty() {
    NEUTRAL_CAPABILITY_FIT
  } else {
    populated.iter().sum::<f64>() / populated.len() as f64
  }
}

fn database_points(stack: &Stack, tags: &BTreeSet<String>) -> f64 {
  let Some(database) = &stack.database else {
    return 0.0;
  };
  let name = database.lowercase_name();

  let matched = tags.iter().map(|tag| tag.to_lowercase()).any(|tag| name.contains(&tag) || tag.contains(&name));
  if matched {
    CATEGORY_POINTS
  } else {
    0.0
  }
}

fn feature_points(stack: &Stack, tags: &BTreeSet<String>) -> f64 {
  let stack_technologies: Vec<String> = std::iter::once(&stack.frontend)
    .chain(stack.backend.iter())
    .chain(stack.database.iter())
    .map(|technology| technology.lowercase_name())
    .collect();

  let matched = tags
    .iter()
    .filter(|tag| {
      supporting_technologies(tag).iter().any(|keyword| {
        stack_technologies.iter().any(|technology| technology.contains(keyword))
      })
    })
    .count();

  (matched as f64 / tags.len() as f64) * CATEGORY_POINTS
}

fn supporting_technologies(feature: &str) -> &'static [&'static str] {
  FEATURE_TECHNOLOGIES
    .iter()
    .find(|(name, _)| *name == feature)
    .map(|(_, technologies)| *technologies)
    .unwrap_or(&[])
}

fn ai_points(stack: &Stack, _tags: &BTreeSet<String>) -> f64 {
  let names: Vec<String> =
    std::iter::once(&stack.frontend).chain(stack.backend.iter()).map(|t| t.lowercase_name()).collect();

  let supported = AI_FRIENDLY.iter().any(|keyword| names.iter().any(|name| name.contains(keyword)));
  if supported {
    20.0
  } else {
    5.0
  }
}

fn performance_points(stack: &Stack, _tags: &BTreeSet<String>) -> f64 {
  let frontend = stack.frontend.lowercase_name();

  FRONTEND_PERFORMANCE
    .iter()
    .find(|(name, _)| *name == frontend)
    .map(|(_, points)| *points)
    .unwrap_or(DEFAULT_PERFORMANCE)
    .min(CATEGORY_POINTS)
}

fn development_points(stack: &Stack, tags: &BTreeSet<String>) -> f64 {
  let mut points = 0.0;

  if tags.contains("typescript")
    && stack.additional_tools.iter().any(|tool| tool.lowercase_name().contains("typescript"))
  {
    points += 10.0;
  }

  if tags.contains("component-library") {
    let frontend = stack.frontend.lowercase_name();
    if COMPONENT_FRAMEWORKS.iter().any(|framework| frontend.contains(framework)) {
      points += 10.0;
    }
  }

  f64::min(points, CATEGORY_POINTS)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::{Catalog, Category, Technology};
  use crate::requirements::tags;

  fn stack_with(frontend: &str, complexity: Complexity, cost: Cost, timeline: &str) -> Stack {
    Stack {
      id: frontend.to_lowercase(),
      name: format!("{frontend} stack"),
      category: Category::Spa,
      frontend: Technology::new(frontend, 2, 4),
      backend: None,
      database: None,
      deployment: Technology::new("Vercel", 1, 5),
      additional_tools: vec![],
      key_files: vec![],
      use_cases: vec![],
      efficiency: String::new(),
      timeline: timeline.to_string(),
      complexity,
      cost,
    }
  }

  fn requirements(experience: &str) -> Requirements {
    Requirements::new("1 month", "small", experience, "medium")
  }

  #[test]
  fn test_complexity_fit_table() {
    assert_eq!(complexity_fit(Complexity::Intermediate, "intermediate"), 100.0);
    assert_eq!(complexity_fit(Complexity::Intermediate, "advanced"), 85.0);
    assert_eq!(complexity_fit(Complexity::Advanced, "intermediate"), 70.0);
    assert_eq!(complexity_fit(Complexity::Beginner, "expert"), 0.0);
    assert_eq!(complexity_fit(Complexity::Advanced, "beginner"), 10.0);
    assert_eq!(complexity_fit(Complexity::Beginner, "advanced"), 10.0);
  }

  #[test]
  fn test_unknown_experience_defaults_to_intermediate() {
    assert_eq!(complexity_fit(Complexity::Intermediate, "wizard"), 100.0);
    assert_eq!(complexity_fit(Complexity::Intermediate, ""), 100.0);
    assert_eq!(experience_ordinal("  Expert "), 4);
  }

  #[test]
  fn test_stack_weeks_parsing() {
    assert_eq!(stack_weeks("6-12 weeks"), 9.0);
    assert_eq!(stack_weeks("1-2 weeks"), 1.5);
    assert_eq!(stack_weeks("3 weeks"), 3.0);
    assert_eq!(stack_weeks("1-2 months"), 6.0);
    assert_eq!(stack_weeks("3+ months"), 12.0);
    assert_eq!(stack_weeks("1–2 weeks"), 1.5);
    assert_eq!(stack_weeks(" 4 - 8 Weeks "), 6.0);
    assert_eq!(stack_weeks("Q3 rollout"), 6.0);
    assert_eq!(stack_weeks("12"), 6.0);
    assert_eq!(stack_weeks("about 3 weeks"), 6.0);
    assert_eq!(stack_weeks("whenever"), 6.0);
    assert_eq!(stack_weeks(""), 6.0);
  }

  #[test]
  fn test_requested_weeks_table() {
    assert_eq!(requested_weeks("asap"), 2.0);
    assert_eq!(requested_weeks("1-2 weeks"), 1.5);
    assert_eq!(requested_weeks("1 month"), 4.0);
    assert_eq!(requested_weeks("2-3 months"), 10.0);
    assert_eq!(requested_weeks("3+ months"), 16.0);
    assert_eq!(requested_weeks("someday"), 8.0);
  }

  #[test]
  fn test_timeline_fit_bands() {
    // 3 weeks within a 4 week budget
    assert_eq!(timeline_fit("2-4 weeks", "1 month"), 100.0);
    // 4.5 weeks within 1.5x of 4
    assert_eq!(timeline_fit("3-6 weeks", "1 month"), 70.0);
    // 9 weeks against 4: 50 - 5 * 5
    assert_eq!(timeline_fit("6-12 weeks", "1 month"), 25.0);
    // 10 weeks against 1.5: 50 - 5 * 8.5
    assert_eq!(timeline_fit("8-12 weeks", "1-2 weeks"), 7.5);
    // 22 weeks against 2: floored at zero
    assert_eq!(timeline_fit("20-24 weeks", "asap"), 0.0);
    // open-ended months are 12 weeks, not 3
    assert_eq!(timeline_fit("3+ months", "1 month"), 10.0);
  }

  #[test]
  fn test_budget_fit_high_cost_minimal_budget() {
    assert_eq!(budget_fit(Cost::High, "minimal"), 10.0);
    assert_eq!(budget_fit(Cost::Free, "minimal"), 100.0);
    assert_eq!(budget_fit(Cost::Medium, "low"), 70.0);
    assert_eq!(budget_fit(Cost::High, "unknown"), 70.0);
  }

  #[test]
  fn test_team_size_fit() {
    assert_eq!(team_size_fit(Complexity::Advanced, "large"), 100.0);
    assert_eq!(team_size_fit(Complexity::Advanced, "small"), 75.0);
    assert_eq!(team_size_fit(Complexity::Advanced, "solo"), 50.0);
    assert_eq!(team_size_fit(Complexity::Intermediate, "???"), 100.0);
  }

  #[test]
  fn test_capability_fit_defaults_to_neutral() {
    let stack = stack_with("React", Complexity::Intermediate, Cost::Free, "3-6 weeks");
    assert_eq!(capability_fit(&stack, &Capabilities::default()), 50.0);
  }

  #[test]
  fn test_capability_fit_averages_only_populated_categories() {
    let catalog = Catalog::builtin().unwrap();
    let python = catalog.get("python-api").unwrap();

    // database matches PostgreSQL (20), aiMl matches python (20)
    let caps = Capabilities {
      database: tags(["postgres"]),
      ai_ml: tags(["chatbot"]),
      ..Default::default()
    };
    assert_eq!(capability_fit(python, &caps), 20.0);

    // adding an unmatched feature drags the average down
    let caps = Capabilities { features: tags(["blog"]), ..caps };
    assert!((capability_fit(python, &caps) - 40.0 / 3.0).abs() < 1e-9);
  }

  #[test]
  fn test_database_match_is_bidirectional_and_needs_a_database() {
    let catalog = Catalog::builtin().unwrap();
    let supabase = catalog.get("supabase-modern").unwrap();
    let landing = catalog.get("simple-landing").unwrap();

    assert_eq!(database_points(supabase, &tags(["PostgreSQL database"])), 20.0);
    assert_eq!(database_points(supabase, &tags(["gres"])), 20.0);
    assert_eq!(database_points(supabase, &tags(["nosql"])), 0.0);
    assert_eq!(database_points(landing, &tags(["sql"])), 0.0);
  }

  #[test]
  fn test_feature_points_ratio() {
    let catalog = Catalog::builtin().unwrap();
    let firebase = catalog.get("firebase-realtime").unwrap();

    // user-auth via firebase, dashboard via react, blog and file-upload miss
    let features = tags(["user-auth", "dashboard", "blog", "file-upload"]);
    assert_eq!(feature_points(firebase, &features), 10.0);
  }

  #[test]
  fn test_ai_points_binary() {
    let catalog = Catalog::builtin().unwrap();
    assert_eq!(ai_points(catalog.get("react-spa").unwrap(), &tags(["nlp"])), 20.0);
    assert_eq!(ai_points(catalog.get("vue-rapid").unwrap(), &tags(["nlp"])), 5.0);
  }

  #[test]
  fn test_performance_points_lookup() {
    let svelte = stack_with("Svelte", Complexity::Intermediate, Cost::Free, "3-6 weeks");
    let react = stack_with("React", Complexity::Intermediate, Cost::Free, "3-6 weeks");
    let other = stack_with("Angular", Complexity::Intermediate, Cost::Free, "3-6 weeks");

    assert_eq!(performance_points(&svelte, &tags(["fast-loading"])), 20.0);
    assert_eq!(performance_points(&react, &tags(["fast-loading"])), 15.0);
    assert_eq!(performance_points(&other, &tags(["fast-loading"])), 10.0);
  }

  #[test]
  fn test_development_points() {
    let catalog = Catalog::builtin().unwrap();
    let react = catalog.get("react-spa").unwrap();
    let landing = catalog.get("simple-landing").unwrap();

    assert_eq!(development_points(react, &tags(["typescript", "component-library"])), 20.0);
    assert_eq!(development_points(react, &tags(["docker"])), 0.0);
    assert_eq!(development_points(landing, &tags(["typescript", "component-library"])), 0.0);
  }

  #[test]
  fn test_weighted_total() {
    let stack = stack_with("React", Complexity::Intermediate, Cost::Free, "2-4 weeks");
    let result = breakdown(&stack, &requirements("intermediate"));

    assert_eq!(result.complexity, 100.0);
    assert_eq!(result.timeline, 100.0);
    assert_eq!(result.budget, 100.0);
    assert_eq!(result.capabilities, 50.0);
    assert_eq!(result.team_size, 100.0);
    assert!((result.total - 85.0).abs() < 1e-9);
  }

  #[test]
  fn test_builtin_scores_stay_in_range() {
    let catalog = Catalog::builtin().unwrap();
    let experiences = ["beginner", "intermediate", "advanced", "expert", "unknown"];
    let timelines = ["asap", "1-2 weeks", "1 month", "2-3 months", "3+ months"];
    let caps = Capabilities {
      database: tags(["sql"]),
      features: tags(["user-auth", "payments"]),
      ai_ml: tags(["nlp"]),
      performance: tags(["seo"]),
      development: tags(["typescript", "component-library"]),
    };

    for stack in &catalog {
      for experience in experiences {
        for timeline in timelines {
          let req = Requirements::new(timeline, "solo", experience, "minimal")
            .with_capabilities(caps.clone());
          let value = score(stack, &req);
          assert!((0.0..=100.0).contains(&value), "{} scored {value}", stack.id);
        }
      }
    }
  }
}
