//! Plain-language rationale for a recommendation

use crate::catalog::{Cost, Stack};
use crate::requirements::Requirements;

const EXCELLENT_THRESHOLD: f64 = 80.0;
const GOOD_THRESHOLD: f64 = 60.0;

/// Compose the reasoning text. Sentence order is fixed and the output depends
/// only on the inputs.
pub fn explain(requirements: &Requirements, stack: &Stack, raw_score: f64) -> String {
  let mut reasons = Vec::with_capacity(5);

  reasons.push(format!("This {} is recommended based on your requirements.", stack.name));
  reasons.push(tier_sentence(raw_score).to_string());
  reasons.push(format!(
    "The {} development timeline aligns with your {} requirement.",
    stack.timeline, requirements.timeline
  ));

  if stack.cost == Cost::Free {
    reasons.push("This stack uses entirely free technologies, keeping costs minimal.".to_string());
  }

  reasons.push(format!(
    "The {} complexity level matches your {} experience.",
    stack.complexity, requirements.experience_level
  ));

  reasons.join(" ")
}

fn tier_sentence(raw_score: f64) -> &'static str {
  if raw_score > EXCELLENT_THRESHOLD {
    "It's an excellent match for your project needs."
  } else if raw_score > GOOD_THRESHOLD {
    "It's a good fit with some trade-offs to consider."
  } else {
    "It's a reasonable option, though other stacks might be better suited."
  }
}
