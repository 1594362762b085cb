use std::collections::BTreeSet;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// The active state configuration as a tree of state keys.
///
/// A compound state whose active child is a leaf maps to that child's key;
/// otherwise it maps to a nested value. Parallel states map every region.
/// Serializes to the familiar JSON shape, e.g.
/// `{"drag": "idle", "collapse": "normal"}`, keeping declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateValue {
    Leaf(String),
    Map(Vec<(String, StateValue)>),
}

impl StateValue {
    /// Value of the region or child called `key`, if this is a map.
    pub fn get(&self, key: &str) -> Option<&StateValue> {
        match self {
            Self::Leaf(_) => None,
            Self::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
        }
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(key) => Some(key),
            Self::Map(_) => None,
        }
    }

    /// Indented JSON, two spaces per level.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_string())
    }
}

impl Serialize for StateValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(key) => serializer.serialize_str(key),
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(key) => write!(f, "{key}"),
            Self::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Point-in-time view of a running machine.
#[derive(Debug, Clone)]
pub struct Snapshot<C> {
    pub(crate) value: StateValue,
    pub(crate) active: Vec<String>,
    pub(crate) tags: BTreeSet<String>,
    pub(crate) context: C,
}

impl<C> Snapshot<C> {
    pub fn value(&self) -> &StateValue {
        &self.value
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Whether the state at dotted `path` (e.g. `"drag.dragging"`) is active.
    pub fn matches(&self, path: &str) -> bool {
        self.active.iter().any(|active| active == path)
    }
}
