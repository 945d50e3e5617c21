//! Generic read access to a parsed configuration tree
//!
//! Builders only ever look at the tree through [`Document`], so the JSON
//! library stays an implementation detail of [`parse_document`].

use serde_json::Value;

use crate::error::ConfigError;

/// Object/array/scalar lookup on a configuration node
pub trait Document: Sized {
    /// Whether this node is an object (a record with named fields)
    fn is_object(&self) -> bool;

    /// Whether `key` is present on this node, whatever its type
    fn has_field(&self, key: &str) -> bool;

    /// String value of `key`, or `None` if absent or not a string
    fn get_string(&self, key: &str) -> Option<&str>;

    /// Boolean value of `key`, or `None` if absent or not a boolean
    fn get_bool(&self, key: &str) -> Option<bool>;

    /// Child nodes of array `key`, or `None` if absent or not an array
    fn get_array(&self, key: &str) -> Option<&[Self]>;
}

impl Document for Value {
    fn is_object(&self) -> bool {
        Value::is_object(self)
    }

    fn has_field(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    fn get_array(&self, key: &str) -> Option<&[Self]> {
        self.get(key).and_then(Value::as_array).map(Vec::as_slice)
    }
}

/// Parse configuration text into a document tree
///
/// The root must be a JSON object.
pub fn parse_document(text: &str) -> Result<Value, ConfigError> {
    let value: Value = serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
    if !value.is_object() {
        return Err(ConfigError::Parse(
            "configuration root must be a JSON object".to_string(),
        ));
    }
    Ok(value)
}

pub(crate) fn required_str<'a, D: Document>(
    doc: &'a D,
    field: &str,
    location: &str,
) -> Result<&'a str, ConfigError> {
    match doc.get_string(field) {
        Some(value) => Ok(value),
        None if doc.has_field(field) => Err(ConfigError::invalid(field, location, "a string")),
        None => Err(ConfigError::missing(field, location)),
    }
}

pub(crate) fn optional_str<'a, D: Document>(
    doc: &'a D,
    field: &str,
    location: &str,
) -> Result<Option<&'a str>, ConfigError> {
    if !doc.has_field(field) {
        return Ok(None);
    }
    required_str(doc, field, location).map(Some)
}

pub(crate) fn optional_bool<D: Document>(
    doc: &D,
    field: &str,
    location: &str,
) -> Result<Option<bool>, ConfigError> {
    match doc.get_bool(field) {
        Some(value) => Ok(Some(value)),
        None if doc.has_field(field) => Err(ConfigError::invalid(field, location, "a boolean")),
        None => Ok(None),
    }
}

pub(crate) fn required_array<'a, D: Document>(
    doc: &'a D,
    field: &str,
    location: &str,
) -> Result<&'a [D], ConfigError> {
    match doc.get_array(field) {
        Some(items) => Ok(items),
        None if doc.has_field(field) => Err(ConfigError::invalid(field, location, "an array")),
        None => Err(ConfigError::missing(field, location)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_accessors() {
        let doc = json!({
            "name": "Kitchen",
            "jsondata": true,
            "devices": [{"name": "Lamp"}, {"name": "Fan"}]
        });

        assert!(doc.is_object());
        assert!(!json!("x").is_object());
        assert!(doc.has_field("name"));
        assert!(!doc.has_field("icon"));
        assert_eq!(doc.get_string("name"), Some("Kitchen"));
        assert_eq!(doc.get_string("jsondata"), None);
        assert_eq!(doc.get_bool("jsondata"), Some(true));
        assert_eq!(doc.get_array("devices").map(<[Value]>::len), Some(2));
    }

    #[test]
    fn test_required_str_distinguishes_missing_and_wrong_type() {
        let doc = json!({"name": 42});

        let err = required_str(&doc, "name", "scenes[0]").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidField { ref field, .. } if field == "name"));

        let err = required_str(&doc, "icon", "scenes[0]").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { ref field, .. } if field == "icon"));
    }

    #[test]
    fn test_optional_helpers() {
        let doc = json!({"timezone": "CET-1CEST", "jsondata": "yes"});

        assert_eq!(optional_str(&doc, "timezone", "document").unwrap(), Some("CET-1CEST"));
        assert_eq!(optional_str(&doc, "absent", "document").unwrap(), None);
        assert_eq!(optional_bool(&doc, "absent", "document").unwrap(), None);
        assert!(optional_bool(&doc, "jsondata", "document").is_err());
    }

    #[test]
    fn test_parse_document_rejects_non_object_root() {
        assert!(parse_document(r#"{"wifi": "AP"}"#).is_ok());
        assert!(matches!(parse_document("[1, 2]"), Err(ConfigError::Parse(_))));
        assert!(matches!(parse_document("{not json"), Err(ConfigError::Parse(_))));
    }
}
