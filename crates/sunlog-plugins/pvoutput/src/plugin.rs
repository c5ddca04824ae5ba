//! The PVOutput publisher plugin.

use async_trait::async_trait;
use chrono::{Local, TimeZone};
use std::time::Duration;

use sunlog::plugin::{OutputPlugin, PluginError, PluginMetadata};
use sunlog::{plugin_metadata, Reading};

use crate::config::Config;
use crate::status::StatusPayload;
use crate::weather::{WeatherError, WeatherLookup};

/// Failure modes of one publish cycle.
///
/// Every failure between payload assembly and the final POST lands here;
/// `process` maps each kind to a severity, logs it, and swallows it.
#[derive(Debug, thiserror::Error)]
enum PublishError {
    #[error("Timeout error: {0}")]
    Timeout(reqwest::Error),

    #[error("Connection error: {0}")]
    Connection(reqwest::Error),

    #[error("Http error: status {0}")]
    Http(reqwest::StatusCode),

    #[error("Unhandled request error: {0}")]
    Request(reqwest::Error),

    #[error("Weather lookup failed: {0}")]
    Weather(#[from] WeatherError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Reading carries an unrepresentable report time: {0}")]
    Time(i64),
}

impl From<reqwest::Error> for PublishError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PublishError::Timeout(err)
        } else if err.is_connect() {
            PublishError::Connection(err)
        } else {
            PublishError::Request(err)
        }
    }
}

impl PublishError {
    fn log(&self) {
        match self {
            PublishError::Timeout(_)
            | PublishError::Connection(_)
            | PublishError::Http(_)
            | PublishError::Request(_)
            | PublishError::Weather(_) => log::warn!("{}", self),
            PublishError::Config(_) | PublishError::Time(_) => log::error!("{}", self),
        }
    }
}

/// Publishes each reading to the PVOutput Add Status service.
pub struct PvOutputPlugin {
    config: Config,
    client: reqwest::Client,
    weather: Option<WeatherLookup>,
}

#[async_trait]
impl OutputPlugin for PvOutputPlugin {
    type Config = Config;

    fn metadata() -> PluginMetadata {
        plugin_metadata!()
    }

    fn new(config: Config) -> Result<Self, PluginError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.pvoutput.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| PluginError::Init(e.to_string()))?;

        let weather = config
            .openweathermap
            .clone()
            .map(|owm| WeatherLookup::new(client.clone(), owm));

        Ok(Self {
            config,
            client,
            weather,
        })
    }

    async fn process(&mut self, reading: &Reading) {
        log::debug!("Processing reading: {:?}", reading);

        let (sys_id, api_key) = match (
            self.config.pvoutput.sys_id,
            self.config.pvoutput.api_key.clone(),
        ) {
            (Some(sys_id), Some(api_key)) => (sys_id, api_key),
            _ => {
                log::error!("No api_key and/or sys_id found in configuration");
                return;
            }
        };

        if let Err(e) = self.publish(reading, sys_id, &api_key).await {
            e.log();
        }
    }
}

impl PvOutputPlugin {
    async fn publish(
        &mut self,
        reading: &Reading,
        sys_id: u64,
        api_key: &str,
    ) -> Result<(), PublishError> {
        let reported_at = Local
            .timestamp_opt(reading.last_update, 0)
            .single()
            .ok_or(PublishError::Time(reading.last_update))?;

        let mut payload = StatusPayload::new(reading, reported_at);
        self.resolve_temperature(reading, &mut payload).await?;
        self.resolve_voltage(reading, &mut payload);

        log::debug!("Publishing status: {:?}", payload);

        let response = self
            .client
            .post(&self.config.pvoutput.endpoint)
            .header("X-Pvoutput-Apikey", api_key)
            .header("X-Pvoutput-SystemId", sys_id.to_string())
            .header("Content-type", "application/x-www-form-urlencoded")
            .header("Accept", "text/plain")
            .form(&payload.to_params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::Http(status));
        }

        Ok(())
    }

    /// Attach v5 from the inverter's own sensor or the weather lookup.
    async fn resolve_temperature(
        &mut self,
        reading: &Reading,
        payload: &mut StatusPayload,
    ) -> Result<(), PublishError> {
        if !self.config.pvoutput.use_temperature {
            return Ok(());
        }

        if self.config.pvoutput.use_inverter_temperature {
            if let Some(temperature) = reading.inverter_temperature {
                payload.temperature = Some(temperature);
                return Ok(());
            }
        }

        let weather = self.weather.as_mut().ok_or_else(|| {
            PublishError::Config(
                "use_temperature is set but the openweathermap section is missing".to_string(),
            )
        })?;

        let snapshot = weather.get().await?;
        payload.temperature = Some(snapshot.main.temp);
        Ok(())
    }

    /// Attach v6 when the configured voltage field exists in the reading.
    fn resolve_voltage(&self, reading: &Reading, payload: &mut StatusPayload) {
        if let Some(field) = &self.config.pvoutput.publish_voltage {
            if let Some(voltage) = reading.field(field) {
                payload.voltage = Some(voltage);
            }
        }
    }
}
