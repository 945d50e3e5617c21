//! Device descriptors and the builders that produce them from scene records

use serde::Serialize;

use crate::document::{optional_bool, required_str, Document};
use crate::error::ConfigError;
use crate::sensor::SensorKind;

/// Placeholder reported for a mapped value until the first payload arrives
pub const MAPPED_VALUE_DEFAULT: &str = "0";

/// An actuator-like device (light, relay, plug) driven over two topics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchDevice {
    /// Position within the owning group (not unique across groups)
    pub id: usize,
    pub name: String,
    /// Topic the device publishes its state on
    pub get_topic: String,
    /// Topic the device listens on for commands
    pub set_topic: String,
    /// Payload meaning "on"
    pub on_value: String,
    /// Payload meaning "off"
    pub off_value: String,
}

/// How a sensor publishes its readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataEncoding {
    /// The payload is the reading itself
    #[default]
    Raw,
    /// The payload is a JSON document; readings are extracted by path
    Json,
}

/// Extraction rule for one reading inside a JSON payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappedValue {
    /// Canonical reading key (e.g. "temperature")
    pub key: String,
    /// Path of the reading inside the payload
    pub json_path: String,
    /// Value shown before the first payload is received
    pub default: String,
}

/// A read-only device reporting one or more readings on a single topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorDevice {
    /// Position within the owning group (not unique across groups)
    pub id: usize,
    pub name: String,
    pub get_topic: String,
    pub kind: SensorKind,
    pub encoding: DataEncoding,
    /// Empty for raw sensors, at least one entry for JSON sensors
    pub mapped_values: Vec<MappedValue>,
}

impl SensorDevice {
    /// Look up the extraction rule for a reading key
    pub fn mapped_value(&self, key: &str) -> Option<&MappedValue> {
        self.mapped_values.iter().find(|m| m.key == key)
    }
}

/// Build a switch device from its configuration record
pub fn build_switch_device<D: Document>(
    record: &D,
    index: usize,
    location: &str,
) -> Result<SwitchDevice, ConfigError> {
    Ok(SwitchDevice {
        id: index,
        name: required_str(record, "name", location)?.to_string(),
        get_topic: required_str(record, "getTopic", location)?.to_string(),
        set_topic: required_str(record, "setTopic", location)?.to_string(),
        on_value: required_str(record, "onValue", location)?.to_string(),
        off_value: required_str(record, "offValue", location)?.to_string(),
    })
}

/// Build a sensor device from its configuration record
///
/// `scene_device_count` is the number of devices declared in the owning
/// scene; a JSON-encoded combined sensor must be the only one.
pub fn build_sensor_device<D: Document>(
    record: &D,
    index: usize,
    scene_device_count: usize,
    location: &str,
) -> Result<SensorDevice, ConfigError> {
    let name = required_str(record, "name", location)?;
    let get_topic = required_str(record, "getTopic", location)?;
    let type_name = required_str(record, "type", location)?;

    let kind = SensorKind::resolve(type_name).ok_or_else(|| {
        ConfigError::UnrecognizedSensorType {
            name: type_name.to_string(),
            location: location.to_string(),
        }
    })?;

    let encoding = match optional_bool(record, "jsondata", location)? {
        Some(true) => DataEncoding::Json,
        Some(false) | None => DataEncoding::Raw,
    };

    let mapped_values = match encoding {
        DataEncoding::Raw => Vec::new(),
        DataEncoding::Json => {
            if kind.is_combined() && scene_device_count > 1 {
                return Err(ConfigError::StructuralViolation {
                    location: location.to_string(),
                    reason: format!(
                        "{} JSON sensor must be the only device of its scene, found {} devices",
                        kind, scene_device_count
                    ),
                });
            }
            kind.json_keys()
                .iter()
                .map(|key| -> Result<MappedValue, ConfigError> {
                    Ok(MappedValue {
                        key: key.to_string(),
                        json_path: required_str(record, key, location)?.to_string(),
                        default: MAPPED_VALUE_DEFAULT.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    Ok(SensorDevice {
        id: index,
        name: name.to_string(),
        get_topic: get_topic.to_string(),
        kind,
        encoding,
        mapped_values,
    })
}
