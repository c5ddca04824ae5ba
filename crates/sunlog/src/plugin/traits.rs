//! Core trait for sunlog output plugins.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::error::PluginError;
use crate::reading::Reading;

/// Metadata about an output plugin.
///
/// Static information about the plugin for discovery, logging, and
/// debugging purposes.
///
/// Use the `plugin_metadata!` macro to generate this from Cargo.toml:
/// ```rust,ignore
/// fn metadata() -> PluginMetadata {
///     plugin_metadata!()
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PluginMetadata {
    /// Short name identifier from CARGO_PKG_NAME
    pub name: &'static str,
    /// SemVer version string from CARGO_PKG_VERSION
    pub version: &'static str,
    /// Human-readable description from CARGO_PKG_DESCRIPTION
    pub description: &'static str,
}

/// Macro to generate PluginMetadata from the Cargo.toml manifest.
///
/// Extracts name, version, and description from the package's Cargo.toml.
#[macro_export]
macro_rules! plugin_metadata {
    () => {
        $crate::plugin::PluginMetadata {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
        }
    };
}

/// The core trait that all sunlog output plugins implement.
///
/// Lifecycle:
/// 1. `metadata()` - Static information about the plugin
/// 2. `new()` - Construct the plugin from its configuration
/// 3. `process()` - Called once per reading cycle by the host
#[async_trait]
pub trait OutputPlugin: Send + Sync + Sized {
    /// The configuration type for this plugin.
    /// Must be deserializable from YAML.
    type Config: DeserializeOwned + Send;

    /// Return metadata about this plugin.
    fn metadata() -> PluginMetadata;

    /// Create a new instance of the plugin.
    ///
    /// # Arguments
    /// * `config` - The plugin configuration loaded from YAML
    ///
    /// # Returns
    /// The constructed plugin or an error if initialization fails
    fn new(config: Self::Config) -> Result<Self, PluginError>;

    /// Publish one reading.
    ///
    /// Invoked by the host once per reading cycle; the next cycle starts
    /// only after this call returns. Implementations log failures and
    /// return normally: a lost cycle is acceptable, a crashed host loop
    /// is not.
    async fn process(&mut self, reading: &Reading);
}
