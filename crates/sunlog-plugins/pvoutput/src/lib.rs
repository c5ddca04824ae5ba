//! PVOutput status publisher plugin for sunlog.
//!
//! Each inverter reading becomes one Add Status call against the PVOutput
//! monitoring service. The temperature field can come from the inverter's
//! own sensor or from a cached OpenWeatherMap lookup; a voltage field can
//! be forwarded from any reading field named in the configuration.
//!
//! Publish failures are classified, logged, and swallowed: a lost cycle
//! never takes the host's reading loop down with it.

mod config;
mod plugin;
mod status;
mod weather;

pub use config::{Config, OpenWeatherMapConfig, PvOutputConfig};
pub use plugin::PvOutputPlugin;
pub use status::StatusPayload;
pub use weather::{Conditions, WeatherError, WeatherLookup, WeatherSnapshot};
