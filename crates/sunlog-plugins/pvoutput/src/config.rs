//! PVOutput plugin configuration.

use serde::Deserialize;

/// Top-level configuration for the PVOutput plugin.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub pvoutput: PvOutputConfig,

    /// Weather lookup settings. Only needed when `use_temperature` is set
    /// and the inverter's own sensor is not used; a publish cycle that
    /// needs the lookup without this section fails as a config fault.
    #[serde(default)]
    pub openweathermap: Option<OpenWeatherMapConfig>,
}

/// Settings for the PVOutput Add Status service.
#[derive(Debug, Clone, Deserialize)]
pub struct PvOutputConfig {
    /// Add Status endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// PVOutput system id. Publishing is skipped with an error log when
    /// this is missing.
    #[serde(default)]
    pub sys_id: Option<u64>,

    /// PVOutput API key. Publishing is skipped with an error log when
    /// this is missing.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Attach a temperature value (v5) to each status
    #[serde(default)]
    pub use_temperature: bool,

    /// Prefer the inverter's own temperature sensor over the weather lookup
    #[serde(default)]
    pub use_inverter_temperature: bool,

    /// Name of a reading field to forward as voltage (v6)
    #[serde(default)]
    pub publish_voltage: Option<String>,

    /// Request timeout in seconds. Uses the HTTP client default when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    "http://pvoutput.org/service/r2/addstatus.jsp".to_string()
}

/// Settings for the OpenWeatherMap current-weather lookup.
///
/// `lat`, `lon`, and `api_key` have no defaults; a section that omits them
/// fails to deserialize.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenWeatherMapConfig {
    /// API host, or a full base URL including scheme
    #[serde(default = "default_owm_endpoint")]
    pub endpoint: String,

    /// Latitude of the installation
    pub lat: f64,

    /// Longitude of the installation
    pub lon: f64,

    /// Unit system for the reported temperature
    #[serde(default = "default_units")]
    pub units: String,

    /// OpenWeatherMap API key
    pub api_key: String,
}

fn default_owm_endpoint() -> String {
    "api.openweathermap.org".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}
