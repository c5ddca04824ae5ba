//! PVOutput Add Status payload assembly.

use chrono::{DateTime, TimeZone};

use sunlog::Reading;

/// Field set for one Add Status call.
///
/// See <https://pvoutput.org/help.html#api-addstatus> for field semantics.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusPayload {
    /// Report date, YYYYMMDD, local time (d)
    pub date: String,

    /// Report time, HH:MM, local time (t)
    pub time: String,

    /// Energy generated today, Wh (v1)
    pub energy: f64,

    /// Instantaneous power, W (v2)
    pub power: f64,

    /// Temperature, when configured (v5)
    pub temperature: Option<f64>,

    /// Voltage, when configured and present in the reading (v6)
    pub voltage: Option<f64>,
}

impl StatusPayload {
    /// Assemble the payload from a reading stamped with its report time.
    ///
    /// `reported_at` must already be resolved into the timezone PVOutput
    /// expects; the plugin passes the reading's `last_update` in system
    /// local time.
    pub fn new<Tz: TimeZone>(reading: &Reading, reported_at: DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            date: reported_at.format("%Y%m%d").to_string(),
            time: reported_at.format("%H:%M").to_string(),
            energy: reading.today_energy * 1000.0,
            power: reading.current_power,
            temperature: None,
            voltage: None,
        }
    }

    /// Encode as the form fields of the Add Status request.
    ///
    /// `c1=0` marks v1 as a daily generation figure, not a cumulative
    /// meter read. Unset optional fields are omitted entirely.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("d", self.date.clone()),
            ("t", self.time.clone()),
            ("v1", self.energy.to_string()),
            ("v2", self.power.to_string()),
            ("c1", "0".to_string()),
        ];

        if let Some(temperature) = self.temperature {
            params.push(("v5", temperature.to_string()));
        }
        if let Some(voltage) = self.voltage {
            params.push(("v6", voltage.to_string()));
        }

        params
    }
}
