//! Sensor type registry
//!
//! Maps the `type` string declared on a sensor device to a closed set of
//! sensor kinds, and each kind to the field name its reading carries inside
//! a JSON-encoded publish payload.

use serde::Serialize;

/// Payload key of the temperature reading
pub const TEMPERATURE_JSON_KEY: &str = "temperature";
/// Payload key of the humidity reading
pub const HUMIDITY_JSON_KEY: &str = "humidity";
/// Payload key of the pressure reading
pub const PRESSURE_JSON_KEY: &str = "pressure";
/// Payload key of the illuminance reading
pub const ILLUMINANCE_JSON_KEY: &str = "illuminance";

/// Supported physical sensor kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SensorKind {
    Temperature,
    Humidity,
    Pressure,
    Illuminance,
    /// Temperature and humidity published together in one payload
    TemperatureHumidity,
}

impl SensorKind {
    pub const ALL: [SensorKind; 5] = [
        SensorKind::Temperature,
        SensorKind::Humidity,
        SensorKind::Pressure,
        SensorKind::Illuminance,
        SensorKind::TemperatureHumidity,
    ];

    /// Resolve a declared type name (exact match)
    ///
    /// Unknown names yield `None` and it is up to the caller to reject them.
    pub fn resolve(type_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_name() == type_name)
    }

    /// Type name as written in the configuration
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Humidity => "Humidity",
            Self::Pressure => "Pressure",
            Self::Illuminance => "Illuminance",
            Self::TemperatureHumidity => "TemperatureHumidity",
        }
    }

    /// Canonical JSON payload key for single-reading kinds
    ///
    /// The combined kind spans two readings and has no single key; see
    /// [`SensorKind::json_keys`].
    pub fn json_key(self) -> Option<&'static str> {
        match self {
            Self::Temperature => Some(TEMPERATURE_JSON_KEY),
            Self::Humidity => Some(HUMIDITY_JSON_KEY),
            Self::Pressure => Some(PRESSURE_JSON_KEY),
            Self::Illuminance => Some(ILLUMINANCE_JSON_KEY),
            Self::TemperatureHumidity => None,
        }
    }

    /// Every payload key this kind reads, in mapping order
    pub fn json_keys(self) -> &'static [&'static str] {
        match self {
            Self::Temperature => &[TEMPERATURE_JSON_KEY],
            Self::Humidity => &[HUMIDITY_JSON_KEY],
            Self::Pressure => &[PRESSURE_JSON_KEY],
            Self::Illuminance => &[ILLUMINANCE_JSON_KEY],
            Self::TemperatureHumidity => &[TEMPERATURE_JSON_KEY, HUMIDITY_JSON_KEY],
        }
    }

    /// Whether this kind must be the only device of its scene when JSON-encoded
    pub fn is_combined(self) -> bool {
        matches!(self, Self::TemperatureHumidity)
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}
