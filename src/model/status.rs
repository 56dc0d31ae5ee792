use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Status as the backend sends it: a bare string or an object such as
/// `{"name": "Pending", "color": "amber"}`.
///
/// The raw value is kept for badges that want the metadata; `name()` resolves
/// the bare string on demand. Construction rejects any other shape.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusField {
    raw: Value,
}

impl StatusField {
    pub fn from_name(name: impl Into<String>) -> Self {
        Self {
            raw: Value::String(name.into()),
        }
    }

    pub fn from_value(raw: Value) -> Result<Self, String> {
        if status_name(&raw).is_some() {
            Ok(Self { raw })
        } else {
            Err(format!(
                "status must be a string or an object with 'name' or 'status', got {}",
                raw
            ))
        }
    }

    /// The bare status string
    pub fn name(&self) -> &str {
        status_name(&self.raw).unwrap_or_default()
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn is(&self, name: &str) -> bool {
        self.name().eq_ignore_ascii_case(name)
    }
}

fn status_name(raw: &Value) -> Option<&str> {
    match raw {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => ["name", "status"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str)),
        _ => None,
    }
}

impl Serialize for StatusField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StatusField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        StatusField::from_value(raw).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for StatusField {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_and_object_status() {
        let plain: StatusField = serde_json::from_value(json!("Pending")).unwrap();
        assert_eq!(plain.name(), "Pending");

        let named: StatusField =
            serde_json::from_value(json!({"name": "Ready", "color": "green"})).unwrap();
        assert_eq!(named.name(), "Ready");
        assert_eq!(named.raw()["color"], "green");

        let nested: StatusField = serde_json::from_value(json!({"status": "Cancelled"})).unwrap();
        assert!(nested.is("cancelled"));
    }

    #[test]
    fn test_name_takes_priority_over_status_key() {
        let both = StatusField::from_value(json!({"status": "b", "name": "a"})).unwrap();
        assert_eq!(both.name(), "a");
    }

    #[test]
    fn test_unrecognized_status_is_rejected() {
        assert!(serde_json::from_value::<StatusField>(json!(3)).is_err());
        assert!(serde_json::from_value::<StatusField>(json!({"label": "x"})).is_err());
    }

    #[test]
    fn test_serializes_raw_shape() {
        let named = StatusField::from_value(json!({"name": "Ready", "color": "green"})).unwrap();
        assert_eq!(
            serde_json::to_value(&named).unwrap(),
            json!({"name": "Ready", "color": "green"})
        );
    }
}
