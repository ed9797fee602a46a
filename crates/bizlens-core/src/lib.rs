//! Canonical business profile, deterministic scoring, and app configuration.

mod app_config;
mod config;
mod features;
mod profile;
mod scoring;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use features::BusinessFeatures;
pub use profile::{BusinessProfile, PriceTier, ProfileImage, ProfileView, ReviewExcerpt};
pub use scoring::{score, ScoreWeights, WeightsError};

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error(transparent)]
    Weights(#[from] WeightsError),
}
