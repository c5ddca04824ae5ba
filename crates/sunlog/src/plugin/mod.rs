//! Sunlog Plugin SDK
//!
//! Foundational traits and utilities for building sunlog output plugins.
//! It standardizes the plugin lifecycle, configuration loading, and the
//! stdin-driven reading loop used by standalone plugin binaries.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sunlog::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! struct MyConfig {
//!     endpoint: String,
//! }
//!
//! struct MyPlugin {
//!     config: MyConfig,
//! }
//!
//! #[async_trait]
//! impl OutputPlugin for MyPlugin {
//!     type Config = MyConfig;
//!
//!     fn metadata() -> PluginMetadata {
//!         plugin_metadata!()
//!     }
//!
//!     fn new(config: Self::Config) -> Result<Self, PluginError> {
//!         Ok(Self { config })
//!     }
//!
//!     async fn process(&mut self, reading: &Reading) {
//!         // Publish the reading somewhere...
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     run_plugin::<MyPlugin>().await
//! }
//! ```

mod config;
mod error;
mod runner;
mod traits;

pub use config::{load_config, load_config_or_default, parse_config};
pub use error::PluginError;
pub use runner::{run_plugin, setup_logging, PluginArgs};
pub use traits::{OutputPlugin, PluginMetadata};
