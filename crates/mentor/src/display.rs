//! Terminal rendering of a recommendation

use colored::*;

use crate::catalog::{Stack, Technology};
use crate::engine::RecommendationResult;
use crate::scoring::ScoreBreakdown;

const RULE_WIDTH: usize = 60;

pub fn render(result: &RecommendationResult) -> String {
  let mut out = Vec::new();

  out.push(format!("{}", "🧭 Mentor - Stack Recommendation".purple().bold()));
  out.push("=".repeat(RULE_WIDTH));
  out.push(format!("{} {}", result.primary.name.green().bold(), format!("({})", result.primary.id).dimmed()));
  out.push(format!(
    "Score {:.1}   Confidence {}",
    result.score,
    confidence_label(result.confidence)
  ));
  out.push(String::new());

  out.extend(stack_lines(&result.primary));
  out.push(String::new());

  out.push(format!("{}", "Why".cyan().bold()));
  out.push(result.reasoning.clone());
  out.push(String::new());

  out.push(format!("{}", "Score breakdown".cyan().bold()));
  out.extend(breakdown_lines(&result.breakdown));

  if !result.alternatives.is_empty() {
    out.push(String::new());
    out.push(format!("{}", "Alternatives".cyan().bold()));
    for (i, stack) in result.alternatives.iter().enumerate() {
      out.push(format!("  {}. {} {}", i + 1, stack.name, format!("({})", stack.id).dimmed()));
    }
  }

  let insights = &result.insights;
  if !insights.is_empty() {
    out.push(String::new());
    out.push(format!("{}", format!("Insights for {}", result.primary.frontend.name).cyan().bold()));
    out.extend(bullets("Trends", &insights.trends, |s| s.normal()));
    out.extend(bullets("Security alerts", &insights.security_alerts, |s| s.red()));
    out.extend(bullets("Recent updates", &insights.recent_updates, |s| s.normal()));
    for (metric, value) in &insights.popularity_data {
      out.push(format!("  {metric}: {}", format!("{value:.0}").yellow()));
    }
  }

  out.join("\n")
}

fn stack_lines(stack: &Stack) -> Vec<String> {
  let mut lines = vec![format!("  Frontend:    {}", technology(&stack.frontend))];
  if let Some(backend) = &stack.backend {
    lines.push(format!("  Backend:     {}", technology(backend)));
  }
  if let Some(database) = &stack.database {
    lines.push(format!("  Database:    {}", technology(database)));
  }
  lines.push(format!("  Deployment:  {}", technology(&stack.deployment)));
  if !stack.additional_tools.is_empty() {
    let tools: Vec<&str> = stack.additional_tools.iter().map(|t| t.name.as_str()).collect();
    lines.push(format!("  Tools:       {}", tools.join(", ")));
  }
  lines.push(format!(
    "  Timeline:    {}   Complexity: {}   Cost: {}",
    stack.timeline, stack.complexity, stack.cost
  ));
  lines
}

fn technology(tech: &Technology) -> String {
  if tech.description.is_empty() {
    tech.name.clone()
  } else {
    format!("{} {}", tech.name, format!("- {}", tech.description).dimmed())
  }
}

fn breakdown_lines(breakdown: &ScoreBreakdown) -> Vec<String> {
  [
    ("complexity", breakdown.complexity),
    ("timeline", breakdown.timeline),
    ("budget", breakdown.budget),
    ("capabilities", breakdown.capabilities),
    ("team size", breakdown.team_size),
  ]
  .into_iter()
  .map(|(label, points)| format!("  {label:<14}{points:>6.1}"))
  .collect()
}

fn bullets(heading: &str, items: &[String], paint: impl Fn(&str) -> ColoredString) -> Vec<String> {
  if items.is_empty() {
    return Vec::new();
  }
  let mut lines = vec![format!("  {heading}:")];
  lines.extend(items.iter().map(|item| format!("    - {}", paint(item))));
  lines
}

fn confidence_label(confidence: f64) -> ColoredString {
  let text = format!("{confidence:.0}%");
  if confidence > 80.0 {
    text.green().bold()
  } else if confidence > 60.0 {
    text.yellow()
  } else {
    text.red()
  }
}
