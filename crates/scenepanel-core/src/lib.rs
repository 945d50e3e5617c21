//! Scenepanel Core - Configuration compiler for the scene panel controller
//!
//! This crate turns the controller's JSON configuration into a validated,
//! strongly-typed runtime model:
//! - Sensor type registry mapping declared type names to sensor kinds
//! - Device builders for switch-like and sensor devices
//! - Group builder classifying scenes into switch and sensor groups
//! - Model assembler tying WiFi, timezone, broker and scenes together

pub mod device;
pub mod document;
pub mod error;
pub mod group;
pub mod model;
pub mod sensor;
pub mod storage;

pub use device::{DataEncoding, MappedValue, SensorDevice, SwitchDevice};
pub use document::{parse_document, Document};
pub use error::ConfigError;
pub use group::{Group, GroupDevices, GroupKind, SensorGroup, SwitchGroup};
pub use model::{BrokerConfig, Model, WifiCredentials};
pub use sensor::SensorKind;
pub use storage::{FileStorage, MemoryStorage, Storage, DEFAULT_CONFIG_PATH};
