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
/// Every variable has a default, so an empty environment yields
/// [`AppConfig::default`]. Tests drive this with a `HashMap` lookup instead of
/// touching the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = AppConfig::default();

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_usize = |var: &str, default: usize| -> Result<usize, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(default),
        }
    };

    let env = match lookup("MEDIADASH_ENV") {
        Ok(raw) => parse_environment(&raw)?,
        Err(_) => defaults.env,
    };

    let log_level = lookup("MEDIADASH_LOG_LEVEL")
        .unwrap_or_else(|_| env.default_log_level().to_string());

    let top_n = parse_usize("MEDIADASH_TOP_N", defaults.top_n)?;
    if top_n == 0 {
        return Err(invalid("MEDIADASH_TOP_N", "must be at least 1".to_string()));
    }

    let demo_rows = parse_usize("MEDIADASH_DEMO_ROWS", defaults.demo_rows)?;

    let demo_seed = match lookup("MEDIADASH_DEMO_SEED") {
        Ok(raw) => Some(
            raw.trim()
                .parse::<u64>()
                .map_err(|e| invalid("MEDIADASH_DEMO_SEED", e.to_string()))?,
        ),
        Err(_) => None,
    };

    let negative_alert_pct = match lookup("MEDIADASH_NEGATIVE_ALERT_PCT") {
        Ok(raw) => {
            let pct = raw
                .trim()
                .parse::<f64>()
                .map_err(|e| invalid("MEDIADASH_NEGATIVE_ALERT_PCT", e.to_string()))?;
            if !(0.0..=100.0).contains(&pct) {
                return Err(invalid(
                    "MEDIADASH_NEGATIVE_ALERT_PCT",
                    format!("{pct} is outside 0-100"),
                ));
            }
            pct
        }
        Err(_) => defaults.negative_alert_pct,
    };

    Ok(AppConfig {
        env,
        log_level,
        top_n,
        demo_rows,
        demo_seed,
        negative_alert_pct,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MEDIADASH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
