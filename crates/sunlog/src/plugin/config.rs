//! Configuration loading utilities.

use serde::de::DeserializeOwned;
use std::path::Path;

use super::error::PluginError;

/// Load configuration from a YAML file.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, Deserialize)]
/// struct MyConfig {
///     endpoint: String,
///     api_key: String,
/// }
///
/// let config: MyConfig = load_config("config.yaml")?;
/// ```
pub fn load_config<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, PluginError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .map_err(|e| PluginError::Config(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_yaml::from_str(&contents)
        .map_err(|e| PluginError::Parse(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Load configuration from a file, or use default if the file doesn't exist.
pub fn load_config_or_default<T: DeserializeOwned + Default>(
    path: impl AsRef<Path>,
) -> Result<T, PluginError> {
    let path = path.as_ref();

    if !path.exists() {
        log::info!("Config file not found, using defaults: {}", path.display());
        return Ok(T::default());
    }

    load_config(path)
}

/// Parse configuration from a YAML string.
///
/// Useful for testing or inline configuration.
pub fn parse_config<T: DeserializeOwned>(yaml: &str) -> Result<T, PluginError> {
    serde_yaml::from_str(yaml).map_err(|e| PluginError::Parse(e.to_string()))
}
