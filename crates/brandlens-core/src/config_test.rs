use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("GOOGLE_API_KEY", "test-key");
    m
}

#[test]
fn build_app_config_fails_without_api_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GOOGLE_API_KEY"),
        "expected MissingEnvVar(GOOGLE_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_api_key_as_missing() {
    let mut map = HashMap::new();
    map.insert("GOOGLE_API_KEY", "  ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GOOGLE_API_KEY"),
        "expected MissingEnvVar(GOOGLE_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.google_api_key, "test-key");
    assert_eq!(cfg.gemini_model, "gemini-flash-latest");
    assert_eq!(
        cfg.gemini_base_url,
        "https://generativelanguage.googleapis.com/v1beta"
    );
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.user_agent, "brandlens/0.1 (brand-research)");
}

#[test]
fn build_app_config_applies_overrides() {
    let mut map = full_env();
    map.insert("BRANDLENS_GEMINI_MODEL", "gemini-2.5-pro");
    map.insert("BRANDLENS_GEMINI_BASE_URL", "http://localhost:8080/v1beta");
    map.insert("BRANDLENS_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.gemini_model, "gemini-2.5-pro");
    assert_eq!(cfg.gemini_base_url, "http://localhost:8080/v1beta");
    assert_eq!(cfg.log_level, "debug");
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map = full_env();
    map.insert("BRANDLENS_GEMINI_BASE_URL", "ftp://example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BRANDLENS_GEMINI_BASE_URL"),
        "expected InvalidEnvVar(BRANDLENS_GEMINI_BASE_URL), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_api_key() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("test-key"));
    assert!(rendered.contains("[redacted]"));
}
