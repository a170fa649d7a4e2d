use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read tool config {path}: {source}")]
    ToolConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tool config: {0}")]
    ToolConfigParse(#[from] serde_yaml::Error),
}
