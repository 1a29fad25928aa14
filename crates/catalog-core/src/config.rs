use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:5173,http://127.0.0.1:5173,http://localhost:5174,http://127.0.0.1:5174";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
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
    use std::net::SocketAddr;
    use std::path::PathBuf;

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

    let env = parse_environment(&or_default("CATALOG_ENV", "development"))?;
    let bind_addr = parse_addr("CATALOG_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("CATALOG_LOG_LEVEL", "info");

    let data_path = or_default("CATALOG_DATA_PATH", "./data/products.json");
    if data_path.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "CATALOG_DATA_PATH".to_string(),
            reason: "path must be non-empty".to_string(),
        });
    }

    let cors_origins = parse_origins(&or_default("CATALOG_CORS_ORIGINS", DEFAULT_CORS_ORIGINS));
    if cors_origins.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "CATALOG_CORS_ORIGINS".to_string(),
            reason: "at least one origin (or \"*\") is required".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        data_path: PathBuf::from(data_path),
        cors_origins,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CATALOG_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
