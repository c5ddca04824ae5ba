//! Error types for sunlog plugins.

use thiserror::Error;

/// Errors that can occur while setting up or driving a plugin.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Configuration file not found or unreadable
    #[error("Config error: {0}")]
    Config(String),

    /// Failed to parse configuration YAML
    #[error("Parse error: {0}")]
    Parse(String),

    /// Plugin initialization failed
    #[error("Init error: {0}")]
    Init(String),

    /// Runtime error while driving the plugin
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Generic I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for PluginError {
    fn from(err: serde_yaml::Error) -> Self {
        PluginError::Parse(err.to_string())
    }
}
