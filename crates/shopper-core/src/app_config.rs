use std::path::PathBuf;

/// Locale used when a caller does not name one.
pub const DEFAULT_LOCATION: &str = "K1N, Ottawa, Ontario";

/// Process-level settings for binaries that drive deal lookups.
///
/// The provider credential is deliberately not stored here; it lives in
/// [`crate::ToolConfig`] so it can be loaded from its own YAML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_level: String,
    pub tool_config_path: Option<PathBuf>,
    pub default_location: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            tool_config_path: None,
            default_location: DEFAULT_LOCATION.to_string(),
        }
    }
}
