//! Scene groups and the builder that classifies scenes into them

use serde::Serialize;
use tracing::{debug, warn};

use crate::device::{build_sensor_device, build_switch_device, SensorDevice, SwitchDevice};
use crate::document::{required_array, required_str, Document};
use crate::error::ConfigError;

/// Devices of one group in declaration order, keyed by their get-topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GroupDevices<D> {
    entries: Vec<(String, D)>,
}

impl<D> GroupDevices<D> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a device under `topic`
    pub fn push(&mut self, topic: String, device: D) {
        self.entries.push((topic, device));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate (topic, device) pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &D)> {
        self.entries.iter().map(|(topic, device)| (topic.as_str(), device))
    }

    /// Find the device published on `topic`
    ///
    /// Several devices may share a topic (JSON sensors reading different
    /// paths of one payload); the first one declared is returned.
    pub fn get(&self, topic: &str) -> Option<&D> {
        self.iter().find(|(t, _)| *t == topic).map(|(_, d)| d)
    }

    pub fn contains_topic(&self, topic: &str) -> bool {
        self.get(topic).is_some()
    }

    /// Every device published on `topic`, in declaration order
    pub fn all_on<'a>(&'a self, topic: &'a str) -> impl Iterator<Item = &'a D> + 'a {
        self.iter().filter(move |(t, _)| *t == topic).map(|(_, d)| d)
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(topic, _)| topic.as_str())
    }

    pub fn devices(&self) -> impl Iterator<Item = &D> {
        self.entries.iter().map(|(_, device)| device)
    }
}

impl<D> Default for GroupDevices<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// A scene of switch-like devices ("Light" or "Switch")
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchGroup {
    /// Position of the scene in the configuration
    pub id: usize,
    pub name: String,
    pub icon: String,
    pub devices: GroupDevices<SwitchDevice>,
}

/// A scene of sensor devices
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorGroup {
    /// Position of the scene in the configuration
    pub id: usize,
    pub name: String,
    pub icon: String,
    pub devices: GroupDevices<SensorDevice>,
}

/// Family of devices a scene holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Switch,
    Sensor,
}

impl GroupKind {
    /// Classify a scene `type`; unknown types yield `None`
    pub fn classify(scene_type: &str) -> Option<Self> {
        match scene_type {
            "Light" | "Switch" => Some(Self::Switch),
            "Sensor" => Some(Self::Sensor),
            _ => None,
        }
    }
}

/// A compiled scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Group {
    Switch(SwitchGroup),
    Sensor(SensorGroup),
}

impl Group {
    pub fn id(&self) -> usize {
        match self {
            Self::Switch(g) => g.id,
            Self::Sensor(g) => g.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Switch(g) => &g.name,
            Self::Sensor(g) => &g.name,
        }
    }

    pub fn icon(&self) -> &str {
        match self {
            Self::Switch(g) => &g.icon,
            Self::Sensor(g) => &g.icon,
        }
    }

    pub fn kind(&self) -> GroupKind {
        match self {
            Self::Switch(_) => GroupKind::Switch,
            Self::Sensor(_) => GroupKind::Sensor,
        }
    }

    pub fn device_count(&self) -> usize {
        match self {
            Self::Switch(g) => g.devices.len(),
            Self::Sensor(g) => g.devices.len(),
        }
    }

    /// Get-topics of every device in the group, in declaration order
    pub fn topics(&self) -> Vec<&str> {
        match self {
            Self::Switch(g) => g.devices.topics().collect(),
            Self::Sensor(g) => g.devices.topics().collect(),
        }
    }
}

/// Build groups from the `scenes` array
///
/// Each scene's id is its index in `scenes`. Scenes whose type is neither
/// "Light", "Switch" nor "Sensor" produce no group but still consume an id.
pub fn build_groups<D: Document>(scenes: &[D]) -> Result<Vec<Group>, ConfigError> {
    let mut groups = Vec::with_capacity(scenes.len());

    for (index, scene) in scenes.iter().enumerate() {
        let location = format!("scenes[{}]", index);
        if !scene.is_object() {
            return Err(ConfigError::invalid(&location, "document", "an object"));
        }
        let scene_type = required_str(scene, "type", &location)?;

        let group = match GroupKind::classify(scene_type) {
            Some(GroupKind::Switch) => Group::Switch(build_switch_group(scene, index, &location)?),
            Some(GroupKind::Sensor) => Group::Sensor(build_sensor_group(scene, index, &location)?),
            None => {
                warn!(scene = index, scene_type, "Skipping scene with unknown type");
                continue;
            }
        };

        debug!(
            group = group.id(),
            kind = ?group.kind(),
            name = group.name(),
            devices = group.device_count(),
            "Built group"
        );
        groups.push(group);
    }

    Ok(groups)
}

fn build_switch_group<D: Document>(
    scene: &D,
    id: usize,
    location: &str,
) -> Result<SwitchGroup, ConfigError> {
    let name = required_str(scene, "name", location)?.to_string();
    let icon = required_str(scene, "icon", location)?.to_string();
    let records = required_array(scene, "devices", location)?;

    let devices = collect_devices(
        records,
        location,
        |record, index, device_location| build_switch_device(record, index, device_location),
        |device| &device.get_topic,
    )?;

    Ok(SwitchGroup {
        id,
        name,
        icon,
        devices,
    })
}

fn build_sensor_group<D: Document>(
    scene: &D,
    id: usize,
    location: &str,
) -> Result<SensorGroup, ConfigError> {
    let name = required_str(scene, "name", location)?.to_string();
    let icon = required_str(scene, "icon", location)?.to_string();
    let records = required_array(scene, "devices", location)?;
    let count = records.len();

    let devices = collect_devices(
        records,
        location,
        |record, index, device_location| {
            build_sensor_device(record, index, count, device_location)
        },
        |device| &device.get_topic,
    )?;

    Ok(SensorGroup {
        id,
        name,
        icon,
        devices,
    })
}

/// Build every device record of a scene in declaration order
fn collect_devices<D, T, B, K>(
    records: &[D],
    location: &str,
    mut build: B,
    topic_of: K,
) -> Result<GroupDevices<T>, ConfigError>
where
    D: Document,
    B: FnMut(&D, usize, &str) -> Result<T, ConfigError>,
    K: Fn(&T) -> &String,
{
    let mut devices = GroupDevices::new();

    for (index, record) in records.iter().enumerate() {
        let device_location = format!("{}.devices[{}]", location, index);
        if !record.is_object() {
            return Err(ConfigError::invalid(
                &format!("devices[{}]", index),
                location,
                "an object",
            ));
        }
        let device = build(record, index, &device_location)?;
        let topic = topic_of(&device).clone();

        if devices.contains_topic(&topic) {
            debug!(%topic, location = %device_location, "Topic shared with an earlier device");
        }
        devices.push(topic, device);
    }

    Ok(devices)
}
