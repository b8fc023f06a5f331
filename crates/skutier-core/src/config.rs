use std::path::PathBuf;

use crate::app_config::{AppConfig, ConfigOverrides, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
/// A value present in `overrides` replaces its env var, which is then not read.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config(overrides: &ConfigOverrides) -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env(overrides)
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env(overrides: &ConfigOverrides) -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key), overrides)
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can pass a `HashMap` lookup.
/// Range checks are left to the consumers of the resolved values.
fn build_app_config<F>(lookup: F, overrides: &ConfigOverrides) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("SKUTIER_ENV", "development"))?;
    let log_level = or_default("SKUTIER_LOG_LEVEL", "info");
    let catalog_path = match &overrides.catalog_path {
        Some(path) => Some(path.clone()),
        None => lookup("SKUTIER_CATALOG_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from),
    };
    let seed = match overrides.seed {
        Some(seed) => seed,
        None => parse_u64("SKUTIER_SEED", "42")?,
    };
    let num_posts = match overrides.num_posts {
        Some(n) => n,
        None => parse_usize("SKUTIER_NUM_POSTS", "200")?,
    };

    Ok(AppConfig {
        env,
        log_level,
        catalog_path,
        seed,
        num_posts,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SKUTIER_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
