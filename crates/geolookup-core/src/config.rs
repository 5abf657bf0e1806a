use crate::app_config::{AppConfig, Environment};
use crate::location::RankMode;
use crate::ConfigError;

pub(crate) const DEFAULT_PROVIDER_URL: &str = "https://nominatim.openstreetmap.org";
pub(crate) const DEFAULT_USER_AGENT: &str = "geolookup/0.1 (address-lookup)";

/// Upper bound accepted by the public Nominatim instance for `limit`.
const MAX_RESULT_LIMIT: u32 = 50;

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
/// Decoupled from the real environment so tests can use a plain `HashMap`.
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

    let env = parse_environment(&or_default("GEOLOOKUP_ENV", "development"))?;
    let log_level = or_default("GEOLOOKUP_LOG_LEVEL", env.default_log_level());

    let provider_url = or_default("GEOLOOKUP_PROVIDER_URL", DEFAULT_PROVIDER_URL);
    if !(provider_url.starts_with("http://") || provider_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "GEOLOOKUP_PROVIDER_URL".to_string(),
            reason: format!("\"{provider_url}\" is not an http(s) URL"),
        });
    }

    let user_agent = or_default("GEOLOOKUP_USER_AGENT", DEFAULT_USER_AGENT);
    let language = match lookup("GEOLOOKUP_LANGUAGE") {
        Ok(tag) if !tag.trim().is_empty() => tag.trim().to_string(),
        _ => system_language(&lookup),
    };

    let request_timeout_secs = parse_u64("GEOLOOKUP_REQUEST_TIMEOUT_SECS", "10")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "GEOLOOKUP_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let debounce_ms = parse_u64("GEOLOOKUP_DEBOUNCE_MS", "400")?;

    let rank_mode = or_default("GEOLOOKUP_RANK_MODE", "global")
        .parse::<RankMode>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "GEOLOOKUP_RANK_MODE".to_string(),
            reason,
        })?;

    let result_limit = or_default("GEOLOOKUP_RESULT_LIMIT", "10")
        .parse::<u32>()
        .map_err(|e| e.to_string())
        .and_then(|n| {
            if (1..=MAX_RESULT_LIMIT).contains(&n) {
                Ok(n)
            } else {
                Err(format!("must be between 1 and {MAX_RESULT_LIMIT}"))
            }
        })
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "GEOLOOKUP_RESULT_LIMIT".to_string(),
            reason,
        })?;

    Ok(AppConfig {
        env,
        log_level,
        provider_url,
        user_agent,
        language,
        request_timeout_secs,
        debounce_ms,
        rank_mode,
        result_limit,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GEOLOOKUP_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

/// Derive a BCP 47 language tag from the POSIX locale variables.
///
/// `LC_ALL` wins over `LANG`. `"en_US.UTF-8"` becomes `"en-US"`; `"C"`,
/// `"POSIX"` and unset values fall back to `"en"`.
fn system_language<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    ["LC_ALL", "LANG"]
        .into_iter()
        .filter_map(|var| lookup(var).ok())
        .find_map(|raw| locale_to_language_tag(&raw))
        .unwrap_or_else(|| "en".to_string())
}

fn locale_to_language_tag(raw: &str) -> Option<String> {
    let base = raw.split(['.', '@']).next()?.trim();
    if base.is_empty() || base.eq_ignore_ascii_case("c") || base.eq_ignore_ascii_case("posix") {
        return None;
    }
    Some(base.replace('_', "-"))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
