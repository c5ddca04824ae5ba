//! OpenWeatherMap current-weather lookup with a one-shot cache.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::config::OpenWeatherMapConfig;

/// Errors from the weather lookup.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("weather api returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Ambient conditions block of a current-weather response.
#[derive(Debug, Clone, Deserialize)]
pub struct Conditions {
    /// Ambient temperature in the configured unit system
    pub temp: f64,

    #[serde(flatten)]
    pub rest: HashMap<String, Value>,
}

/// One current-weather response, stored whole.
///
/// Only `main.temp` is consumed today; everything else the API returned is
/// kept alongside it.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherSnapshot {
    pub main: Conditions,

    #[serde(flatten)]
    pub rest: HashMap<String, Value>,
}

/// Current-weather client owning the cache slot.
///
/// The snapshot is fetched at most once per instance and memoized for its
/// whole lifetime; there is no expiry. A failed fetch leaves the slot
/// empty, so the next call retries.
pub struct WeatherLookup {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
    cached: Option<WeatherSnapshot>,
}

impl WeatherLookup {
    pub fn new(client: reqwest::Client, config: OpenWeatherMapConfig) -> Self {
        Self {
            client,
            config,
            cached: None,
        }
    }

    /// Request URL for the current-weather lookup.
    ///
    /// An endpoint value that already carries a scheme is used verbatim;
    /// a bare host gets `https://` prepended.
    fn url(&self) -> String {
        let c = &self.config;
        let base = if c.endpoint.contains("://") {
            c.endpoint.clone()
        } else {
            format!("https://{}", c.endpoint)
        };
        format!(
            "{}/data/2.5/weather?lon={}&lat={}&units={}&APPID={}",
            base, c.lon, c.lat, c.units, c.api_key
        )
    }

    /// Return the cached snapshot, fetching it first if the slot is empty.
    ///
    /// Fetch failures are logged here and returned to the caller, which
    /// runs its own classification.
    pub async fn get(&mut self) -> Result<WeatherSnapshot, WeatherError> {
        if let Some(snapshot) = &self.cached {
            return Ok(snapshot.clone());
        }

        log::debug!("[cache miss] Fetching weather data");
        match self.fetch().await {
            Ok(snapshot) => {
                self.cached = Some(snapshot.clone());
                Ok(snapshot)
            }
            Err(e) => {
                log::error!("Unable to get weather data: {}", e);
                Err(e)
            }
        }
    }

    async fn fetch(&self) -> Result<WeatherSnapshot, WeatherError> {
        let response = self.client.get(self.url()).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(WeatherError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<WeatherSnapshot>().await?)
    }
}
