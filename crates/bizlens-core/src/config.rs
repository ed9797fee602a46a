use crate::app_config::{AppConfig, Environment};
use crate::scoring::ScoreWeights;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let serpapi_api_key = require("SERPAPI_API_KEY")?;
    let serpapi_base_url = or_default("SERPAPI_BASE_URL", "https://serpapi.com/search");
    let openai_api_key = lookup("OPENAI_API_KEY").ok();
    let openai_model = or_default("OPENAI_MODEL", "gpt-4o-mini");
    let openai_base_url = or_default("OPENAI_BASE_URL", "https://api.openai.com/v1");

    let env = parse_environment(&or_default("BIZLENS_ENV", "development"));
    let bind_addr = parse_addr("BIZLENS_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("BIZLENS_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("BIZLENS_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("BIZLENS_USER_AGENT", "bizlens/0.1 (business-analysis)");
    let max_suggestions = parse_usize("BIZLENS_MAX_SUGGESTIONS", "5")?;

    let score_weights = ScoreWeights::new(
        parse_f64("BIZLENS_WEIGHT_REVIEWS", "0.4")?,
        parse_f64("BIZLENS_WEIGHT_CONTENT", "0.4")?,
        parse_f64("BIZLENS_WEIGHT_IMAGES", "0.2")?,
    )?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        serpapi_api_key,
        serpapi_base_url,
        openai_api_key,
        openai_model,
        openai_base_url,
        request_timeout_secs,
        user_agent,
        max_suggestions,
        score_weights,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
