use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-flash-latest";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

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
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let google_api_key = require("GOOGLE_API_KEY")?;
    let gemini_model = or_default("BRANDLENS_GEMINI_MODEL", DEFAULT_GEMINI_MODEL);
    let gemini_base_url = or_default("BRANDLENS_GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL);
    let log_level = or_default("BRANDLENS_LOG_LEVEL", "info");
    let user_agent = or_default("BRANDLENS_USER_AGENT", "brandlens/0.1 (brand-research)");

    if !gemini_base_url.starts_with("http://") && !gemini_base_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "BRANDLENS_GEMINI_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{gemini_base_url}'"),
        });
    }

    Ok(AppConfig {
        google_api_key,
        gemini_model,
        gemini_base_url,
        log_level,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
