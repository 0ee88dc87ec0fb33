//! Record collections stored either as arrays or as id-keyed maps.
//!
//! Older exports keep transactions in an array, newer ones in an object keyed
//! by id. [`RecordCollection`] captures both and is flattened to an ordered
//! list right away so nothing downstream sees the difference.

use serde_json::{Map, Value};
use statelog_core::resolver::resolve;
use statelog_core::StateLog;
use tracing::{debug, warn};

/// A raw collection of records.
#[derive(Debug, Clone, Copy)]
pub enum RecordCollection<'a> {
    /// JSON array.
    Sequence(&'a [Value]),
    /// JSON object keyed by record id.
    Keyed(&'a Map<String, Value>),
}

impl<'a> RecordCollection<'a> {
    /// Interpret `value` as a collection. Scalars are not collections.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self::Sequence(items)),
            Value::Object(map) => Some(Self::Keyed(map)),
            _ => None,
        }
    }

    /// Records in encounter order. Entries that are not objects are dropped.
    pub fn records(self) -> Vec<&'a Value> {
        match self {
            Self::Sequence(items) => items.iter().filter(|v| v.is_object()).collect(),
            Self::Keyed(map) => map.values().filter(|v| v.is_object()).collect(),
        }
    }

    pub fn len(self) -> usize {
        match self {
            Self::Sequence(items) => items.len(),
            Self::Keyed(map) => map.len(),
        }
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// Records at `value`, or nothing when it is absent or not a collection.
pub fn records_at<'a>(value: Option<&'a Value>, source: &str) -> Vec<&'a Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(v) => match RecordCollection::from_value(v) {
            Some(collection) => {
                let records = collection.records();
                debug!(source, count = records.len(), "probed record collection");
                records
            }
            None => {
                warn!(source, "expected array or object, ignoring");
                Vec::new()
            }
        },
    }
}

/// Object entries at `value`, or nothing when it is absent or not an object.
pub fn entries_at<'a>(value: Option<&'a Value>, source: &str) -> Vec<(&'a String, &'a Value)> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Object(map)) => {
            debug!(source, count = map.len(), "probed keyed map");
            map.iter().collect()
        }
        Some(_) => {
            warn!(source, "expected object, ignoring");
            Vec::new()
        }
    }
}

/// Hostnames of dapps the user visited.
///
/// Stored as a list of hostnames in some exports and as a hostname-keyed map
/// in others.
pub fn extract_visited_hostnames(log: &StateLog) -> Vec<String> {
    match resolve(log.raw(), "visitedDappsByHostname") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::Object(map)) => map.keys().filter(|k| !k.is_empty()).cloned().collect(),
        _ => Vec::new(),
    }
}
