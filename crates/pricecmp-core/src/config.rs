use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let env = parse_environment(&or_default("PRICECMP_ENV", "development"))?;
    let log_level = or_default("PRICECMP_LOG_LEVEL", "info");

    let scraper_request_timeout_secs = parse_u64("PRICECMP_SCRAPER_REQUEST_TIMEOUT_SECS", "15")?;
    let scraper_connect_timeout_secs = parse_u64("PRICECMP_SCRAPER_CONNECT_TIMEOUT_SECS", "10")?;
    let scraper_min_delay_ms = parse_u64("PRICECMP_SCRAPER_MIN_DELAY_MS", "2000")?;
    let scraper_max_delay_ms = parse_u64("PRICECMP_SCRAPER_MAX_DELAY_MS", "4000")?;
    let scraper_max_concurrent_urls = parse_usize("PRICECMP_SCRAPER_MAX_CONCURRENT_URLS", "0")?;
    let cache_ttl_secs = parse_u64("PRICECMP_CACHE_TTL_SECS", "86400")?;
    let cache_sweep_interval_secs = parse_u64("PRICECMP_CACHE_SWEEP_INTERVAL_SECS", "3600")?;

    if scraper_min_delay_ms > scraper_max_delay_ms {
        return Err(ConfigError::InvalidEnvVar {
            var: "PRICECMP_SCRAPER_MIN_DELAY_MS".to_string(),
            reason: format!(
                "{scraper_min_delay_ms} exceeds PRICECMP_SCRAPER_MAX_DELAY_MS ({scraper_max_delay_ms})"
            ),
        });
    }

    if cache_sweep_interval_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PRICECMP_CACHE_SWEEP_INTERVAL_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        scraper_request_timeout_secs,
        scraper_connect_timeout_secs,
        scraper_min_delay_ms,
        scraper_max_delay_ms,
        scraper_max_concurrent_urls,
        cache_ttl_secs,
        cache_sweep_interval_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PRICECMP_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
