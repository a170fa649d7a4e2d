pub mod app_config;
pub mod config;
pub mod error;
pub mod tool_config;

pub use app_config::{AppConfig, DEFAULT_LOCATION};
pub use config::{load_app_config, load_app_config_from_env, resolve_tool_config};
pub use error::ConfigError;
pub use tool_config::{load_tool_config, tool_config_from_env, ToolConfig};
