use std::path::PathBuf;

use crate::app_config::{AppConfig, DEFAULT_LOCATION};
use crate::tool_config::{load_tool_config, tool_config_from_env, ToolConfig};
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

/// Core parsing logic, decoupled from the real environment so tests can
/// drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let non_blank = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        if raw.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must not be blank".to_string(),
            });
        }
        Ok(raw)
    };

    let log_level = non_blank("SHOPPER_LOG_LEVEL", "info")?;
    let default_location = non_blank("SHOPPER_DEFAULT_LOCATION", DEFAULT_LOCATION)?;
    let tool_config_path = lookup("SHOPPER_TOOL_CONFIG")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        log_level,
        tool_config_path,
        default_location,
    })
}

/// Resolve the tool configuration for `app`.
///
/// When `SHOPPER_TOOL_CONFIG` names a YAML file its key wins; `SERPAPI_KEY`
/// from the environment fills in when the file omits the key or leaves it
/// blank.
///
/// # Errors
///
/// Returns `ConfigError` if the configured file cannot be read or parsed.
pub fn resolve_tool_config(app: &AppConfig) -> Result<ToolConfig, ConfigError> {
    let from_file = match &app.tool_config_path {
        Some(path) => Some(load_tool_config(path)?),
        None => None,
    };
    Ok(merge_tool_config(from_file, tool_config_from_env()))
}

fn merge_tool_config(from_file: Option<ToolConfig>, from_env: ToolConfig) -> ToolConfig {
    match from_file {
        Some(file) if file.serpapi_key().is_some() => file,
        _ => from_env,
    }
}
