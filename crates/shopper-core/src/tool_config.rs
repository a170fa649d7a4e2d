//! Typed settings handed to the deal lookup tool.
//!
//! The only recognised option is `serpapi_key`. An absent key is a normal
//! state at this layer; the lookup itself reports it as a result.

use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Environment variable consulted by [`tool_config_from_env`].
pub const SERPAPI_KEY_VAR: &str = "SERPAPI_KEY";

#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub serpapi_key: Option<String>,
}

impl ToolConfig {
    #[must_use]
    pub fn with_serpapi_key(key: impl Into<String>) -> Self {
        Self {
            serpapi_key: Some(key.into()),
        }
    }

    /// Returns the credential, treating an empty string the same as absent.
    #[must_use]
    pub fn serpapi_key(&self) -> Option<&str> {
        self.serpapi_key.as_deref().filter(|k| !k.is_empty())
    }
}

impl std::fmt::Debug for ToolConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolConfig")
            .field(
                "serpapi_key",
                &self.serpapi_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

/// Accepts either a bare `serpapi_key:` document or one nested under
/// `tool_config:`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ToolConfigFile {
    Nested { tool_config: ToolConfig },
    Flat(ToolConfig),
}

/// Load the tool configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or is not valid YAML.
pub fn load_tool_config(path: &Path) -> Result<ToolConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ToolConfigIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_tool_config(&content)
}

fn parse_tool_config(content: &str) -> Result<ToolConfig, ConfigError> {
    // An empty document deserializes to unit, not a mapping.
    if content.trim().is_empty() {
        return Ok(ToolConfig::default());
    }
    let file: ToolConfigFile = serde_yaml::from_str(content)?;
    Ok(match file {
        ToolConfigFile::Nested { tool_config } => tool_config,
        ToolConfigFile::Flat(config) => config,
    })
}

/// Build the tool configuration from `SERPAPI_KEY` in the process env.
#[must_use]
pub fn tool_config_from_env() -> ToolConfig {
    tool_config_from_lookup(|key| std::env::var(key))
}

pub(crate) fn tool_config_from_lookup<F>(lookup: F) -> ToolConfig
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    ToolConfig {
        serpapi_key: lookup(SERPAPI_KEY_VAR).ok(),
    }
}
