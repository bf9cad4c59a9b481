//! Mentor - technology stack recommendations
//!
//! Scores every stack in a [`Catalog`] against a project's [`Requirements`],
//! picks the best fit plus up to three alternatives, and enriches the pick with
//! best-effort search insight that adjusts confidence but never the ranking.

pub mod catalog;
pub mod confidence;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod explain;
pub mod insights;
pub mod logging;
pub mod ranking;
pub mod requirements;
pub mod scoring;
pub mod search;

pub use catalog::{Catalog, Category, Complexity, Cost, Stack, Technology};
pub use config::MentorConfig;
pub use engine::{RecommendationEngine, RecommendationResult};
pub use error::{CatalogError, ConfigError, EngineError, InsightError};
pub use insights::{InsightBundle, InsightGatherer};
pub use requirements::{Capabilities, Requirements};
pub use scoring::ScoreBreakdown;
pub use search::{
  FixtureSearchProvider, OfflineSearchProvider, ProviderChain, SearchCategory, SearchHit,
  SearchProvider, SearchSource,
};
