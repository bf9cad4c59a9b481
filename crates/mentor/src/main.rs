use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

use mentor::requirements::tags;
use mentor::{display, logging, Capabilities, MentorConfig, RecommendationEngine, Requirements};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
  Pretty,
  Json,
}

/// Mentor - Technology Stack Recommendations
#[derive(Parser)]
#[command(name = "mentor")]
#[command(about = "Recommend a technology stack for a project from a catalog of proven stacks")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), ", courtesy of Kernelle Software"))]
struct Cli {
  /// Requirements document (JSON, or YAML by .yaml/.yml extension)
  #[arg(short, long, value_name = "FILE", conflicts_with_all = [
    "description", "timeline", "team_size", "experience", "budget",
    "database", "features", "ai_ml", "performance", "development",
  ])]
  requirements: Option<PathBuf>,

  /// What the project is about
  #[arg(long)]
  description: Option<String>,

  /// Desired timeline, e.g. "1 month" or "2-3 months"
  #[arg(long, default_value = "1 month")]
  timeline: String,

  /// solo, small, medium or large
  #[arg(long, default_value = "small")]
  team_size: String,

  /// beginner, intermediate, advanced or expert
  #[arg(long, default_value = "intermediate")]
  experience: String,

  /// minimal, low, medium or high
  #[arg(long, default_value = "medium")]
  budget: String,

  /// Database capability tag (repeatable)
  #[arg(long = "database", value_name = "TAG")]
  database: Vec<String>,

  /// Feature capability tag (repeatable)
  #[arg(long = "feature", value_name = "TAG")]
  features: Vec<String>,

  /// AI/ML capability tag (repeatable)
  #[arg(long = "ai-ml", value_name = "TAG")]
  ai_ml: Vec<String>,

  /// Performance capability tag (repeatable)
  #[arg(long = "performance", value_name = "TAG")]
  performance: Vec<String>,

  /// Development capability tag (repeatable)
  #[arg(long = "development", value_name = "TAG")]
  development: Vec<String>,

  /// Catalog file overriding the configured or built-in catalog
  #[arg(long, value_name = "FILE", env = "MENTOR_CATALOG")]
  catalog: Option<PathBuf>,

  /// Config file; otherwise the usual locations are searched
  #[arg(long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Output format
  #[arg(long, value_enum, default_value = "pretty")]
  format: OutputFormat,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

impl Cli {
  fn requirements(&self) -> Result<Requirements> {
    if let Some(path) = &self.requirements {
      return Requirements::load_from_file(path);
    }

    let capabilities = Capabilities {
      database: tags(self.database.iter().cloned()),
      features: tags(self.features.iter().cloned()),
      ai_ml: tags(self.ai_ml.iter().cloned()),
      performance: tags(self.performance.iter().cloned()),
      development: tags(self.development.iter().cloned()),
    };

    Ok(
      Requirements::new(&self.timeline, &self.team_size, &self.experience, &self.budget)
        .with_description(self.description.clone().unwrap_or_default())
        .with_capabilities(capabilities),
    )
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let mut config = match &cli.config {
    Some(path) => MentorConfig::load_from_file(path)?,
    None => MentorConfig::load()?,
  };
  if let Some(catalog) = &cli.catalog {
    config.catalog = Some(catalog.clone());
  }

  logging::init(cli.verbose, &config.log_filter);

  let requirements = cli.requirements()?;
  let catalog = config.load_catalog().context("Failed to load stack catalog")?;
  let provider = config.build_provider()?;
  tracing::debug!(stacks = catalog.len(), provider = %mentor::SearchProvider::name(&provider), "engine ready");

  let engine = RecommendationEngine::new(Arc::new(catalog), Arc::new(provider));
  let result = engine.generate_recommendation(&requirements).await?;

  match cli.format {
    OutputFormat::Pretty => println!("{}", display::render(&result)),
    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
  }

  Ok(())
}
