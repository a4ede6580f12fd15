//! Device state — typed attribute snapshots, the unit of read, write, and
//! rollback.
//!
//! A [`DeviceState`] is a sparse key/value map with no fixed schema; each
//! device class interprets only the keys it recognises. Snapshots handed out
//! by a device are always independent clones, so holding one never observes
//! later mutations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single typed attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl AttributeValue {
    /// The boolean payload, if this value is a boolean.
    #[must_use]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(value),
            _ => None,
        }
    }

    /// The value as an integer. Floats truncate toward zero.
    #[must_use]
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(value),
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(value) => Some(value as i64),
            Self::Bool(_) => None,
        }
    }

    /// The value as a float. Integers widen losslessly for practical ranges.
    #[must_use]
    pub fn as_f64(self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(value) => Some(value as f64),
            Self::Float(value) => Some(value),
            Self::Bool(_) => None,
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(value) => value.fmt(f),
            Self::Int(value) => value.fmt(f),
            Self::Float(value) => value.fmt(f),
        }
    }
}

/// A sparse snapshot of device attributes.
///
/// Used both as a device's committed state and as the partial update
/// ("fragment") submitted to [`Device::apply_state`](crate::device::Device::apply_state).
/// Keys absent from a fragment leave the corresponding attribute untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceState {
    values: HashMap<String, AttributeValue>,
}

impl DeviceState {
    /// Create an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an attribute by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<AttributeValue> {
        self.values.get(key).copied()
    }

    /// Set an attribute, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder-style [`set`](Self::set), for constructing fragments inline.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Iterate over all attributes (no defined order).
    pub fn iter(&self) -> impl Iterator<Item = (&str, AttributeValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// Number of attributes present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no attributes are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Display for DeviceState {
    /// Renders attributes in sorted key order for stable log output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.values.keys().collect();
        keys.sort();
        f.write_str("{")?;
        for (index, key) in keys.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {}", self.values[*key])?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_untagged_variants_as_plain_json() {
        assert_eq!(
            serde_json::to_string(&AttributeValue::Bool(true)).unwrap(),
            "true"
        );
        assert_eq!(
            serde_json::to_string(&AttributeValue::Int(42)).unwrap(),
            "42"
        );
        assert_eq!(
            serde_json::to_string(&AttributeValue::Float(21.5)).unwrap(),
            "21.5"
        );
    }

    #[test]
    fn should_deserialize_whole_number_as_int_variant() {
        let value: AttributeValue = serde_json::from_str("50").unwrap();
        assert_eq!(value, AttributeValue::Int(50));
    }

    #[test]
    fn should_coerce_int_to_float() {
        assert_eq!(AttributeValue::Int(20).as_f64(), Some(20.0));
    }

    #[test]
    fn should_truncate_float_to_int() {
        assert_eq!(AttributeValue::Float(50.9).as_i64(), Some(50));
    }

    #[test]
    fn should_not_coerce_bool_to_number() {
        assert_eq!(AttributeValue::Bool(true).as_i64(), None);
        assert_eq!(AttributeValue::Bool(true).as_f64(), None);
    }

    #[test]
    fn should_return_none_for_missing_key() {
        let state = DeviceState::new();
        assert_eq!(state.get("power"), None);
    }

    #[test]
    fn should_replace_value_on_repeated_set() {
        let mut state = DeviceState::new();
        state.set("brightness", 20);
        state.set("brightness", 80);
        assert_eq!(state.get("brightness"), Some(AttributeValue::Int(80)));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn should_not_affect_original_when_clone_is_mutated() {
        let state = DeviceState::new().with("power", true);
        let mut copy = state.clone();
        copy.set("power", false);
        assert_eq!(state.get("power"), Some(AttributeValue::Bool(true)));
    }

    #[test]
    fn should_display_attributes_in_sorted_key_order() {
        let state = DeviceState::new()
            .with("power", true)
            .with("brightness", 50);
        assert_eq!(state.to_string(), "{brightness: 50, power: true}");
    }

    #[test]
    fn should_display_empty_state_as_empty_braces() {
        assert_eq!(DeviceState::new().to_string(), "{}");
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let state = DeviceState::new()
            .with("power", false)
            .with("targetTemperature", 20.0);
        let json = serde_json::to_string(&state).unwrap();
        let parsed: DeviceState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
