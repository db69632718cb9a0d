//! Shared data model and configuration for brandlens.

pub mod app_config;
pub mod brands;
pub mod config;
mod de;
pub mod interaction;
pub mod profile;

use thiserror::Error;

pub use app_config::AppConfig;
pub use brands::{Brand, BrandRelationship, BrandSearchResult, Company, CompanyRelationship, CompanyRole};
pub use config::{load_app_config, load_app_config_from_env};
pub use interaction::{AnalyzeResponse, InteractionId, ResearchResponse, SearchResponse};
pub use profile::{BrandProfile, GapFillReport, HistoryEvent, ManufacturingType, ProfileField};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
