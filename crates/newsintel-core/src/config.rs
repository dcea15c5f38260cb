use crate::app_config::AppConfig;
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
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_threshold = |var: &str, default: &str| -> Result<f32, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<f32>().map_err(|e| invalid(var, e.to_string()))?;
        if !(0.0..=1.0).contains(&value) {
            return Err(invalid(var, format!("{value} is outside [0, 1]")));
        }
        Ok(value)
    };

    let tei_url = require("NEWSINTEL_TEI_URL")?;

    let log_level = or_default("NEWSINTEL_LOG_LEVEL", "info");
    let tei_timeout_secs = parse_u64("NEWSINTEL_TEI_TIMEOUT_SECS", "30")?;
    let cluster_threshold = parse_threshold("NEWSINTEL_CLUSTER_THRESHOLD", "0.8")?;
    let search_top_k = parse_usize("NEWSINTEL_SEARCH_TOP_K", "5")?;
    let knowledge_base_path = lookup("NEWSINTEL_KNOWLEDGE_BASE_PATH")
        .ok()
        .map(PathBuf::from);
    let news_path = lookup("NEWSINTEL_NEWS_PATH").ok().map(PathBuf::from);

    Ok(AppConfig {
        log_level,
        tei_url,
        tei_timeout_secs,
        cluster_threshold,
        search_top_k,
        knowledge_base_path,
        news_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
