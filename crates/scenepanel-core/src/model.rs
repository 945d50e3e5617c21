//! Root runtime model and its assembler

use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use crate::document::{optional_str, parse_document, required_array, required_str, Document};
use crate::error::ConfigError;
use crate::group::{build_groups, Group, SensorGroup, SwitchGroup};
use crate::storage::Storage;

const DOCUMENT: &str = "document";

/// Access point credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WifiCredentials {
    pub ssid: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// MQTT broker endpoint and login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokerConfig {
    pub address: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Validated runtime model compiled from the controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Model {
    pub wifi: WifiCredentials,
    /// POSIX TZ string, empty when not configured
    pub timezone: String,
    pub broker: BrokerConfig,
    /// Groups in scene order
    pub groups: Vec<Group>,
}

impl Model {
    /// Compile a model from a parsed configuration document
    pub fn assemble<D: Document>(document: &D) -> Result<Self, ConfigError> {
        let wifi = wifi_credentials(document)?;
        let timezone = timezone(document)?;
        let broker = broker_config(document)?;
        let scenes = required_array(document, "scenes", DOCUMENT)?;
        let groups = build_groups(scenes)?;

        debug!(groups = groups.len(), scenes = scenes.len(), "Assembled model");
        Ok(Self {
            wifi,
            timezone,
            broker,
            groups,
        })
    }

    /// Compile a model from configuration text
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let document = parse_document(text)?;
        Self::assemble(&document)
    }

    /// Read the configuration at `path` from `storage` and compile it
    pub fn load<S: Storage>(storage: &S, path: &Path) -> Result<Self, ConfigError> {
        let text = storage.read_to_string(path)?;
        let model = Self::from_json(&text)?;
        info!(
            path = %path.display(),
            groups = model.groups.len(),
            "Loaded configuration"
        );
        Ok(model)
    }

    pub fn switch_groups(&self) -> impl Iterator<Item = &SwitchGroup> {
        self.groups.iter().filter_map(|g| match g {
            Group::Switch(s) => Some(s),
            Group::Sensor(_) => None,
        })
    }

    pub fn sensor_groups(&self) -> impl Iterator<Item = &SensorGroup> {
        self.groups.iter().filter_map(|g| match g {
            Group::Sensor(s) => Some(s),
            Group::Switch(_) => None,
        })
    }

    /// Find a group by its scene id
    pub fn group(&self, id: usize) -> Option<&Group> {
        self.groups.iter().find(|g| g.id() == id)
    }

    /// Every get-topic the broker connection must subscribe to, in scene order
    pub fn subscribe_topics(&self) -> Vec<&str> {
        self.groups.iter().flat_map(Group::topics).collect()
    }
}

fn wifi_credentials<D: Document>(document: &D) -> Result<WifiCredentials, ConfigError> {
    Ok(WifiCredentials {
        ssid: required_str(document, "wifi", DOCUMENT)?.to_string(),
        password: required_str(document, "password", DOCUMENT)?.to_string(),
    })
}

fn timezone<D: Document>(document: &D) -> Result<String, ConfigError> {
    Ok(optional_str(document, "timezone", DOCUMENT)?
        .unwrap_or_default()
        .to_string())
}

fn broker_config<D: Document>(document: &D) -> Result<BrokerConfig, ConfigError> {
    Ok(BrokerConfig {
        address: required_str(document, "mqttbroker", DOCUMENT)?.to_string(),
        username: required_str(document, "mqttusername", DOCUMENT)?.to_string(),
        password: required_str(document, "mqttpasswd", DOCUMENT)?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DataEncoding;
    use crate::group::GroupKind;
    use crate::storage::{MemoryStorage, DEFAULT_CONFIG_PATH};
    use serde_json::{json, Value};

    const KITCHEN: &str = r#"{"wifi":"AP","password":"pw","mqttbroker":"10.0.0.5","mqttusername":"u","mqttpasswd":"p","scenes":[{"type":"Light","name":"Kitchen","icon":"bulb","devices":[{"name":"Lamp","getTopic":"k/get","setTopic":"k/set","onValue":"1","offValue":"0"}]}]}"#;

    fn base_document(scenes: Value) -> Value {
        json!({
            "wifi": "HomeAP",
            "password": "secret",
            "mqttbroker": "192.168.1.10",
            "mqttusername": "panel",
            "mqttpasswd": "hunter2",
            "scenes": scenes
        })
    }

    #[test]
    fn test_kitchen_example() {
        let model = Model::from_json(KITCHEN).unwrap();

        assert_eq!(model.wifi.ssid, "AP");
        assert_eq!(model.wifi.password, "pw");
        assert_eq!(model.broker.address, "10.0.0.5");
        assert_eq!(model.broker.username, "u");
        assert_eq!(model.broker.password, "p");
        assert_eq!(model.timezone, "");
        assert_eq!(model.groups.len(), 1);

        let Group::Switch(kitchen) = &model.groups[0] else {
            panic!("expected switch group");
        };
        assert_eq!(kitchen.id, 0);
        assert_eq!(kitchen.devices.len(), 1);
        let lamp = kitchen.devices.get("k/get").unwrap();
        assert_eq!(lamp.id, 0);
        assert_eq!(lamp.get_topic, "k/get");
        assert_eq!(lamp.set_topic, "k/set");
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let document = parse_document(KITCHEN).unwrap();
        assert_eq!(
            Model::assemble(&document).unwrap(),
            Model::assemble(&document).unwrap()
        );
    }

    #[test]
    fn test_timezone_copied_verbatim() {
        let mut document = base_document(json!([]));
        document["timezone"] = json!("CET-1CEST,M3.5.0,M10.5.0/3");

        let model = Model::assemble(&document).unwrap();
        assert_eq!(model.timezone, "CET-1CEST,M3.5.0,M10.5.0/3");
    }

    #[test]
    fn test_missing_top_level_fields() {
        for field in ["wifi", "password", "mqttbroker", "mqttusername", "mqttpasswd", "scenes"] {
            let mut document = base_document(json!([]));
            document.as_object_mut().unwrap().remove(field);

            let err = Model::assemble(&document).unwrap_err();
            assert!(
                matches!(err, ConfigError::MissingField { field: ref f, ref location } if f == field && location == "document"),
                "field {field}: {err}"
            );
        }
    }

    #[test]
    fn test_group_and_device_ordering() {
        let document = base_document(json!([
            {"type": "Sensor", "name": "Weather", "icon": "cloud", "devices": [
                {"name": "T", "type": "Temperature", "getTopic": "w/t"},
                {"name": "H", "type": "Humidity", "getTopic": "w/h", "jsondata": true, "humidity": "hum"},
                {"name": "L", "type": "Illuminance", "getTopic": "w/l"}
            ]},
            {"type": "Switch", "name": "Plugs", "icon": "plug", "devices": [
                {"name": "A", "getTopic": "p/a", "setTopic": "p/a/set", "onValue": "ON", "offValue": "OFF"}
            ]}
        ]));

        let model = Model::assemble(&document).unwrap();
        assert_eq!(model.groups.len(), 2);
        for (position, group) in model.groups.iter().enumerate() {
            assert_eq!(group.id(), position);
        }

        let weather = model.sensor_groups().next().unwrap();
        for (position, device) in weather.devices.devices().enumerate() {
            assert_eq!(device.id, position);
        }
        let humidity = weather.devices.get("w/h").unwrap();
        assert_eq!(humidity.encoding, DataEncoding::Json);
        assert_eq!(humidity.mapped_values.len(), 1);
        assert_eq!(humidity.mapped_values[0].key, "humidity");

        assert_eq!(model.switch_groups().count(), 1);
        assert_eq!(model.group(1).map(Group::kind), Some(GroupKind::Switch));
        assert_eq!(model.subscribe_topics(), vec!["w/t", "w/h", "w/l", "p/a"]);
    }

    #[test]
    fn test_unknown_scene_leaves_no_group() {
        let document = base_document(json!([
            {"type": "Unknown", "name": "Ghost", "icon": "ghost", "devices": []}
        ]));

        let model = Model::assemble(&document).unwrap();
        assert!(model.groups.is_empty());
    }

    #[test]
    fn test_no_partial_model_on_error() {
        let document = base_document(json!([
            {"type": "Light", "name": "Hall", "icon": "bulb", "devices": []},
            {"type": "Sensor", "name": "Lab", "icon": "flask", "devices": [
                {"name": "X", "type": "NotARealSensor", "getTopic": "lab/x"}
            ]}
        ]));

        assert!(matches!(
            Model::assemble(&document),
            Err(ConfigError::UnrecognizedSensorType { .. })
        ));
    }

    #[test]
    fn test_load_from_storage() {
        let mut storage = MemoryStorage::new();
        storage.insert(DEFAULT_CONFIG_PATH, KITCHEN);

        let model = Model::load(&storage, Path::new(DEFAULT_CONFIG_PATH)).unwrap();
        assert_eq!(model.groups.len(), 1);

        let err = Model::load(&storage, Path::new("/spiffs/missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_rejects_malformed_text() {
        let mut storage = MemoryStorage::new();
        storage.insert(DEFAULT_CONFIG_PATH, "{\"wifi\": ");

        let err = Model::load(&storage, Path::new(DEFAULT_CONFIG_PATH)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_model_serializes_for_inspection() {
        let model = Model::from_json(KITCHEN).unwrap();
        let value = serde_json::to_value(&model).unwrap();

        assert_eq!(value["groups"][0]["kind"], "switch");
        assert_eq!(value["groups"][0]["devices"][0][0], "k/get");
        assert_eq!(value["groups"][0]["devices"][0][1]["on_value"], "1");
    }

    #[test]
    fn test_serialized_model_omits_passwords() {
        let model = Model::from_json(KITCHEN).unwrap();
        let value = serde_json::to_value(&model).unwrap();

        assert_eq!(value["wifi"]["ssid"], "AP");
        assert!(value["wifi"].get("password").is_none());
        assert_eq!(value["broker"]["username"], "u");
        assert!(value["broker"].get("password").is_none());
    }
}
