use crate::app_config::{AppConfig, Environment};
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
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
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

    let api_base = require("OPTIKA_API_BASE")?
        .trim()
        .trim_end_matches('/')
        .to_string();
    let env = parse_environment(&or_default("OPTIKA_ENV", "development"))?;
    let log_level = or_default("OPTIKA_LOG_LEVEL", "info");
    let listings_path = PathBuf::from(or_default(
        "OPTIKA_LISTINGS_PATH",
        "./config/listings.yaml",
    ));

    let request_timeout_secs = parse_u64("OPTIKA_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("OPTIKA_USER_AGENT", "optika/0.1 (catalog)");
    let page_size = parse_usize("OPTIKA_PAGE_SIZE", "12")?;
    let max_probes = parse_u32("OPTIKA_MAX_PROBES", "6")?;
    let wide_max_probes = parse_u32("OPTIKA_WIDE_MAX_PROBES", "12")?;
    let wide_limit_multiplier = parse_usize("OPTIKA_WIDE_LIMIT_MULTIPLIER", "5")?;
    let title_locale = or_default("OPTIKA_TITLE_LOCALE", "el");

    for (var, value) in [
        ("OPTIKA_PAGE_SIZE", page_size),
        ("OPTIKA_MAX_PROBES", max_probes as usize),
        ("OPTIKA_WIDE_MAX_PROBES", wide_max_probes as usize),
        ("OPTIKA_WIDE_LIMIT_MULTIPLIER", wide_limit_multiplier),
    ] {
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
    }

    Ok(AppConfig {
        api_base,
        env,
        log_level,
        listings_path,
        request_timeout_secs,
        user_agent,
        page_size,
        max_probes,
        wide_max_probes,
        wide_limit_multiplier,
        title_locale,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "OPTIKA_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
