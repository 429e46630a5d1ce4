//! Record mirrored into host history entries

use nav_core::NavigatorSnapshot;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Host-persisted state: caller data plus the navigator snapshot taken
/// when the entry was written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryState {
    /// Data the caller attached to the entry
    pub state: Value,
    pub navigator: NavigatorSnapshot,
}

impl HistoryState {
    /// Recognize a host state value written by this adapter.
    ///
    /// Anything else, including entries written by other code, yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        if !object.contains_key("state") {
            return None;
        }
        let stack = object.get("navigator")?.get("locationsStack")?.as_array()?;
        if !stack.iter().all(is_stack_entry) {
            return None;
        }
        Self::deserialize(value).ok()
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Entry shape written by the navigator: a `modifiers` string array, and
/// either nothing else or a string `view` with optional string `modal` and
/// `popup` and an optional `params` object
fn is_stack_entry(entry: &Value) -> bool {
    let Some(object) = entry.as_object() else {
        return false;
    };
    let modifiers_ok = object
        .get("modifiers")
        .and_then(Value::as_array)
        .is_some_and(|m| m.iter().all(Value::is_string));
    if !modifiers_ok {
        return false;
    }
    if object.len() == 1 {
        return true;
    }

    let optional_string = |key: &str| object.get(key).map_or(true, |v| v.is_string() || v.is_null());
    object.get("view").is_some_and(Value::is_string)
        && optional_string("modal")
        && optional_string("popup")
        && object.get("params").map_or(true, Value::is_object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nav_core::{Location, Modifier};
    use serde_json::json;

    #[test]
    fn test_recognizes_own_state() {
        let value = json!({
            "state": {"scroll": 10},
            "navigator": {
                "locationIndex": 1,
                "locationsStack": [
                    {"modifiers": ["root"]},
                    {"view": "feed", "params": {"tab": "new"}, "modifiers": ["skip"]}
                ]
            }
        });
        let state = HistoryState::from_value(&value).unwrap();
        assert_eq!(state.state, json!({"scroll": 10}));
        assert_eq!(state.navigator.location_index, 1);
        assert_eq!(
            state.navigator.locations_stack[1],
            Location::view("feed").with_param("tab", "new").with_modifier(Modifier::Skip)
        );
        assert_eq!(state.to_value().unwrap(), value);
    }

    #[test]
    fn test_rejects_foreign_state() {
        assert!(HistoryState::from_value(&Value::Null).is_none());
        assert!(HistoryState::from_value(&json!({"key": "abc"})).is_none());
        assert!(HistoryState::from_value(&json!({
            "navigator": {"locationIndex": 0, "locationsStack": [{"modifiers": ["root"]}]}
        }))
        .is_none());
        assert!(HistoryState::from_value(&json!({
            "state": null,
            "navigator": {"locationIndex": -1, "locationsStack": [{"modifiers": ["root"]}]}
        }))
        .is_none());
        assert!(HistoryState::from_value(&json!({
            "state": null,
            "navigator": {"locationIndex": 0, "locationsStack": [{"modifiers": ["root"], "extra": 1}]}
        }))
        .is_none());
        assert!(HistoryState::from_value(&json!({
            "state": null,
            "navigator": {"locationIndex": 0, "locationsStack": [{"modifiers": ["upward"]}]}
        }))
        .is_none());
    }

    #[test]
    fn test_rejects_malformed_entries() {
        let with_entry = |entry: Value| {
            json!({
                "state": null,
                "navigator": {"locationIndex": 0, "locationsStack": [{"modifiers": ["root"]}, entry]}
            })
        };
        let malformed = [
            json!({}),
            json!({"view": "feed"}),
            json!({"modifiers": "skip"}),
            json!({"modifiers": [1]}),
            json!({"modal": "m", "modifiers": []}),
            json!({"view": 3, "modifiers": []}),
            json!({"view": "feed", "params": [], "modifiers": []}),
            json!({"view": "feed", "popup": 1, "modifiers": []}),
            json!("feed"),
        ];
        for entry in malformed {
            assert!(
                HistoryState::from_value(&with_entry(entry.clone())).is_none(),
                "accepted {entry}"
            );
        }

        let accepted = [
            json!({"modifiers": []}),
            json!({"view": "feed", "modifiers": []}),
            json!({"view": "feed", "modal": null, "popup": "p", "params": {}, "modifiers": ["skip"]}),
        ];
        for entry in accepted {
            assert!(
                HistoryState::from_value(&with_entry(entry.clone())).is_some(),
                "rejected {entry}"
            );
        }
    }
}
