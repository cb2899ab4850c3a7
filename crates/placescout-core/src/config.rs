use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid. A missing API key
/// is not an error here; callers that talk to the Places API check it with
/// [`AppConfig::require_api_key`].
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
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

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

    let parse_positive_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let value = parse_u64(var, default)?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(value)
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let value = parse_usize(var, default)?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(value)
    };

    let parse_miles = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be a positive number of miles, got {value}"),
            });
        }
        Ok(value)
    };

    // Only `search` needs the key; see `AppConfig::require_api_key`.
    let google_maps_api_key = optional("GOOGLE_MAPS_API_KEY");

    let places_base_url = or_default(
        "PLACESCOUT_PLACES_BASE_URL",
        "https://maps.googleapis.com/maps/api/",
    );
    let log_level = or_default("PLACESCOUT_LOG_LEVEL", "info");
    let profiles_path = PathBuf::from(or_default(
        "PLACESCOUT_PROFILES_PATH",
        "./config/searches.yaml",
    ));

    let default_location = or_default("DEFAULT_LOCATION", "Denver");
    let default_place_type = or_default("DEFAULT_PLACE_TYPE", "gas");
    let default_distance_miles = parse_miles("DEFAULT_DISTANCE_MILES", "10")?;
    let max_distance_miles = parse_miles("PLACESCOUT_MAX_DISTANCE_MILES", "50")?;

    let places_request_timeout_secs =
        parse_positive_u64("PLACESCOUT_PLACES_TIMEOUT_SECS", "30")?;
    let page_token_delay_ms = parse_u64("PLACESCOUT_PAGE_TOKEN_DELAY_MS", "2000")?;
    let max_pages_per_type = parse_positive_usize("PLACESCOUT_MAX_PAGES_PER_TYPE", "3")?;
    let search_concurrency = parse_positive_usize("PLACESCOUT_SEARCH_CONCURRENCY", "2")?;

    let email_request_timeout_secs = parse_positive_u64("EMAIL_EXTRACTION_TIMEOUT", "10")?;
    let max_emails_per_website = parse_positive_usize("MAX_EMAILS_PER_WEBSITE", "5")?;
    let max_pages_per_site = parse_positive_usize("PLACESCOUT_MAX_PAGES_PER_SITE", "10")?;
    let email_concurrency = parse_positive_usize("PLACESCOUT_EMAIL_CONCURRENCY", "5")?;
    let user_agent = or_default(
        "PLACESCOUT_USER_AGENT",
        "placescout/0.1 (contact-discovery)",
    );

    if default_distance_miles > max_distance_miles {
        return Err(ConfigError::Validation(format!(
            "DEFAULT_DISTANCE_MILES ({default_distance_miles}) exceeds \
             PLACESCOUT_MAX_DISTANCE_MILES ({max_distance_miles})"
        )));
    }

    Ok(AppConfig {
        google_maps_api_key,
        places_base_url,
        log_level,
        profiles_path,
        default_location,
        default_place_type,
        default_distance_miles,
        max_distance_miles,
        places_request_timeout_secs,
        page_token_delay_ms,
        max_pages_per_type,
        search_concurrency,
        email_request_timeout_secs,
        max_emails_per_website,
        max_pages_per_site,
        email_concurrency,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
