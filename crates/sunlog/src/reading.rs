//! Normalized inverter telemetry samples.

use serde::Deserialize;
use std::collections::HashMap;

/// One normalized sample of inverter telemetry for a point in time.
///
/// The logger frontend produces one of these per poll cycle and hands it to
/// every configured output plugin. Field names follow the logger's data
/// dictionary; whatever the source device reports beyond the core set lands
/// in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct Reading {
    /// Epoch timestamp (seconds) of the sample
    pub last_update: i64,

    /// Cumulative energy for the current day, in kWh
    pub today_energy: f64,

    /// Instantaneous power, in W
    pub current_power: f64,

    /// Temperature reported by the inverter itself, if it has a sensor
    pub inverter_temperature: Option<f64>,

    /// Any additional named numeric fields from the source device
    #[serde(flatten)]
    pub extra: HashMap<String, f64>,
}

impl Reading {
    /// Look up a field by its data-dictionary name.
    ///
    /// Core fields resolve first, then `extra`. Returns `None` for fields
    /// the sample does not carry.
    pub fn field(&self, name: &str) -> Option<f64> {
        match name {
            "today_energy" => Some(self.today_energy),
            "current_power" => Some(self.current_power),
            "inverter_temperature" => self.inverter_temperature,
            _ => self.extra.get(name).copied(),
        }
    }
}
