use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use smol_str::SmolStr;

use crate::constants::ANOMALY_TEXT;

/// Ordered key-to-value mapping produced by a decode.
///
/// Iteration order is insertion order. Re-inserting an existing key keeps
/// the key's original position and replaces the value, so a duplicate key
/// in the input resolves to "first position, last value".
pub type Map = IndexMap<SmolStr, Value>;

/// A decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
    Map(Map),
    /// Placeholder for a leaf whose extent could not be reconciled with
    /// its declared length. Carries the raw scanned region for
    /// diagnostics; serializes as the placeholder text.
    Anomaly(String),
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_anomaly(&self) -> bool {
        matches!(self, Value::Anomaly(_))
    }

    /// Looks up `key` when this value is a map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?.get(key)
    }

    /// Converts into a [`serde_json::Value`], preserving insertion order.
    /// The anomaly placeholder becomes its placeholder text.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Int(value) => serde_json::Value::from(*value),
            Value::Str(value) => serde_json::Value::from(value.as_str()),
            Value::Anomaly(_) => serde_json::Value::from(ANOMALY_TEXT),
            Value::Map(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.to_string(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(value) => serializer.serialize_i64(*value),
            Value::Str(value) => serializer.serialize_str(value),
            Value::Anomaly(_) => serializer.serialize_str(ANOMALY_TEXT),
            Value::Map(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    state.serialize_entry(key.as_str(), value)?;
                }
                state.end()
            }
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

/// Outcome of a decode call that did not hit a fatal format error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
    /// The root mapping. Always a [`Value::Map`].
    pub value: Value,
    /// The input ended while at least one array was still open.
    pub truncated: bool,
    /// One entry per element that needed length recovery, in input order.
    pub notes: Vec<RecoveryNote>,
}

impl Decoded {
    /// No truncation and no recovery notes: the blob decoded as written.
    pub fn is_clean(&self) -> bool {
        !self.truncated && self.notes.is_empty()
    }

    /// Number of leaves that ended up as anomaly placeholders. Forward
    /// resyncs keep their content and do not count.
    pub fn anomaly_count(&self) -> usize {
        self.notes
            .iter()
            .filter(|note| !matches!(note.resync, Resync::Forward { .. }))
            .count()
    }
}

/// Record of one length recovery, carried inside the result so batch
/// callers can keep draining rows and tally the damage per record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoveryNote {
    /// Character offset of the element's tag in the input.
    pub offset: usize,
    /// The correction that was applied.
    pub resync: Resync,
    /// Exact characters consumed while building the element, retained
    /// when [`DecodeOptions::keep_raw`](crate::DecodeOptions) is set.
    pub raw: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Resync {
    /// The terminator sat past the declared extent; the extra characters
    /// scanned on the way to it were kept as content.
    Forward { extra: usize },
    /// The declared extent overshot the terminator; the cursor was
    /// rewound and the leaf replaced by the anomaly placeholder.
    Backward { overshoot: usize },
    /// No terminator within reach of either search.
    Unresolved,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_map_insert_keeps_first_position_last_value() {
        let mut map = Map::new();
        map.insert(SmolStr::new("a"), Value::Int(1));
        map.insert(SmolStr::new("b"), Value::Int(2));
        map.insert(SmolStr::new("a"), Value::Int(3));

        let entries: Vec<_> = map.iter().map(|(k, v)| (k.as_str(), v)).collect();
        assert_eq!(entries, vec![("a", &Value::Int(3)), ("b", &Value::Int(2))]);
    }

    #[rstest::rstest]
    fn test_to_json_preserves_order_and_masks_anomalies() {
        let mut map = Map::new();
        map.insert(SmolStr::new("z"), Value::Int(1));
        map.insert(SmolStr::new("a"), Value::Anomaly("f\";".to_string()));
        let json = Value::Map(map).to_json();

        assert_eq!(
            serde_json::to_string(&json).unwrap(),
            "{\"z\":1,\"a\":\"ERROR PARSING\"}"
        );
    }

    #[rstest::rstest]
    fn test_serialize_matches_to_json() {
        let mut map = Map::new();
        map.insert(SmolStr::new("k"), Value::Str("v".to_string()));
        let value = Value::Map(map);

        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            serde_json::to_string(&value.to_json()).unwrap()
        );
    }
}
