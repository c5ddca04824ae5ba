//! Sunlog plugin SDK.
//!
//! Shared pieces for sunlog output plugins: the normalized [`Reading`]
//! sample, the [`plugin::OutputPlugin`] lifecycle trait, YAML configuration
//! loading, and a stdin-driven runner for standalone plugin binaries.

pub mod plugin;
pub mod reading;

pub use reading::Reading;

/// Convenience re-exports for plugin crates and binaries.
pub mod prelude {
    pub use crate::plugin::{
        load_config, load_config_or_default, run_plugin, setup_logging, OutputPlugin,
        PluginError, PluginMetadata,
    };
    pub use crate::reading::Reading;
    pub use async_trait::async_trait;
    pub use log::{debug, error, info, warn};
}
