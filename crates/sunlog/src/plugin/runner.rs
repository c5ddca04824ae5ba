//! Plugin runner utilities for standard main() implementations.

use argh::FromArgs;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use super::config::load_config;
use super::traits::OutputPlugin;
use crate::reading::Reading;

/// Standard CLI arguments for sunlog plugins.
#[derive(FromArgs, Debug)]
#[argh(description = "Sunlog output plugin")]
pub struct PluginArgs {
    /// path to YAML configuration file
    #[argh(option, short = 'c', default = "String::from(\"config.yaml\")")]
    pub config: String,
}

/// Initialize logging with env_logger.
///
/// Respects the RUST_LOG environment variable. Defaults to "info" level.
pub fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Run an OutputPlugin with standard CLI handling and lifecycle management.
///
/// This is the recommended way to create a plugin's main() function.
/// It handles:
/// - CLI argument parsing
/// - Logging setup
/// - Configuration loading
/// - Graceful shutdown on Ctrl+C
/// - The reading loop: newline-delimited JSON readings on stdin, one
///   `process()` call per reading, strictly in order
///
/// # Example
///
/// ```rust,ignore
/// use sunlog::prelude::*;
///
/// struct MyPlugin { /* ... */ }
///
/// #[async_trait]
/// impl OutputPlugin for MyPlugin {
///     // ...
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_plugin::<MyPlugin>().await
/// }
/// ```
pub async fn run_plugin<P: OutputPlugin>() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging();

    let args: PluginArgs = argh::from_env();
    let metadata = P::metadata();

    log::info!("Starting {} v{}", metadata.name, metadata.version);
    log::info!("  {}", metadata.description);
    log::info!("Loading config from: {}", args.config);

    let config: P::Config = load_config(&args.config)?;

    // Setup shutdown signal
    let (shutdown_tx, mut shutdown_rx) = watch::channel(());
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        let _ = shutdown_tx.send(());
    })?;

    let mut plugin = P::new(config)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    log::info!("Plugin running. Feed readings on stdin, one JSON object per line.");

    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => break,
            line = lines.next_line() => match line? {
                None => break,
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => match serde_json::from_str::<Reading>(&line) {
                    Ok(reading) => plugin.process(&reading).await,
                    Err(e) => log::warn!("Skipping malformed reading: {}", e),
                },
            },
        }
    }

    log::info!("Plugin stopped");
    Ok(())
}
