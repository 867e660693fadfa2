use crate::app_config::AppConfig;
use crate::error::ConfigError;
use crate::locale::Locale;
use crate::types::Coordinates;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
pub const DEFAULT_IP_LOCATE_URL: &str = "https://ipapi.co/json/";

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
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
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

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(invalid(var, format!("expected a boolean, got '{other}'"))),
        }
    };

    let parse_f64 = |var: &str| -> Result<Option<f64>, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(None),
        }
    };

    let gemini_api_key = require("GEMINI_API_KEY")?;

    let log_level = or_default("LOOFIND_LOG_LEVEL", "warn");
    let locale = or_default("LOOFIND_LOCALE", "de")
        .parse::<Locale>()
        .map_err(|reason| invalid("LOOFIND_LOCALE", reason))?;

    let gemini_model = or_default("LOOFIND_MODEL", DEFAULT_GEMINI_MODEL);
    let gemini_base_url = or_default("LOOFIND_GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL);
    let request_timeout_secs = match lookup("LOOFIND_REQUEST_TIMEOUT_SECS") {
        Ok(raw) => Some(
            raw.trim()
                .parse::<u64>()
                .map_err(|e| invalid("LOOFIND_REQUEST_TIMEOUT_SECS", e.to_string()))?,
        ),
        Err(_) => None,
    };

    let fixed_location = match (parse_f64("LOOFIND_LATITUDE")?, parse_f64("LOOFIND_LONGITUDE")?) {
        (Some(lat), Some(lng)) => Some(
            Coordinates::try_new(lat, lng).map_err(|e| invalid("LOOFIND_LATITUDE", e.to_string()))?,
        ),
        (None, None) => None,
        (Some(_), None) => {
            return Err(invalid(
                "LOOFIND_LONGITUDE",
                "must be set together with LOOFIND_LATITUDE".to_string(),
            ))
        }
        (None, Some(_)) => {
            return Err(invalid(
                "LOOFIND_LATITUDE",
                "must be set together with LOOFIND_LONGITUDE".to_string(),
            ))
        }
    };

    let ip_locate_enabled = parse_bool("LOOFIND_IP_LOCATE", "true")?;
    let ip_locate_url = or_default("LOOFIND_IP_LOCATE_URL", DEFAULT_IP_LOCATE_URL);
    let locate_timeout_secs = parse_u64("LOOFIND_LOCATE_TIMEOUT_SECS", "5")?;

    Ok(AppConfig {
        log_level,
        locale,
        gemini_api_key,
        gemini_model,
        gemini_base_url,
        request_timeout_secs,
        fixed_location,
        ip_locate_enabled,
        ip_locate_url,
        locate_timeout_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
