use url::Url;

use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://www.travel.taipei/open-api";
pub const DEFAULT_RELAY_PREFIX: &str = "https://corsproxy.io/?";
pub const DEFAULT_LANGUAGE: &str = "zh-tw";
pub const DEFAULT_USER_AGENT: &str = "taipei-explorer/0.1 (attraction-directory)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
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
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
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

    let log_level = or_default("TAIPEI_LOG_LEVEL", "info");

    let api_base_url = parse_base_url(&or_default("TAIPEI_API_BASE_URL", DEFAULT_API_BASE_URL))?;

    let relay_prefix = or_default("TAIPEI_RELAY_PREFIX", DEFAULT_RELAY_PREFIX)
        .trim()
        .to_string();
    let relay_prefix = (!relay_prefix.is_empty()).then_some(relay_prefix);

    let language = or_default("TAIPEI_LANGUAGE", DEFAULT_LANGUAGE)
        .trim()
        .to_lowercase();
    if language.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "TAIPEI_LANGUAGE".to_string(),
            reason: "language tag must not be blank".to_string(),
        });
    }

    let request_timeout_secs = parse_u64("TAIPEI_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TAIPEI_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }

    let user_agent = or_default("TAIPEI_USER_AGENT", DEFAULT_USER_AGENT);

    Ok(AppConfig {
        log_level,
        api_base_url,
        relay_prefix,
        language,
        request_timeout_secs,
        user_agent,
    })
}

/// Accepts absolute `http`/`https` URLs with a host and strips trailing
/// slashes so path segments can be appended with a single `/`.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "TAIPEI_API_BASE_URL".to_string(),
        reason: format!("'{raw}': {reason}"),
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none_or(str::is_empty) || url.cannot_be_a_base() {
        return Err(invalid("not an absolute http(s) URL with a host".to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
