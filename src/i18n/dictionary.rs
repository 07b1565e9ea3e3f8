//! Dictionary tree: the nested string data for one language.
//!
//! A dictionary is an object at the root whose nodes are strings, ordered
//! lists, or nested objects. Lookups use dotted keys (`nav.home`,
//! `faculty.members.0.name`); numeric segments index into lists.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Separator between the segments of a translation key.
pub const KEY_DELIMITER: char = '.';

/// A node of a dictionary tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Field of a record, as a string. Convenience for list-of-record leaves.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.as_map()?.get(name)?.as_str()
    }

    /// Descend one segment. Strings have no children.
    fn child(&self, segment: &str) -> Option<&Value> {
        match self {
            Value::Str(_) => None,
            Value::Map(map) => map.get(segment),
            Value::List(items) => parse_index(segment).and_then(|i| items.get(i)),
        }
    }

    fn collect_paths<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a Value)>) {
        match self {
            Value::Str(_) => {}
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    let path = format!("{}{}{}", prefix, KEY_DELIMITER, i);
                    out.push((path.clone(), item));
                    item.collect_paths(&path, out);
                }
            }
            Value::Map(map) => {
                for (key, child) in map {
                    let path = format!("{}{}{}", prefix, KEY_DELIMITER, key);
                    out.push((path.clone(), child));
                    child.collect_paths(&path, out);
                }
            }
        }
    }
}

/// List indices are plain decimal: no sign, no leading zeros.
fn parse_index(segment: &str) -> Option<usize> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment.len() == 1 || !segment.starts_with('0'));

    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}

/// The full string tree for one language. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    entries: BTreeMap<String, Value>,
}

impl Dictionary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a JSON document. The root must be an object and every leaf a
    /// string; numbers, booleans and nulls are rejected.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-level section by name (e.g. `"nav"`).
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Walk the tree along a dotted key. `None` is a miss: some segment was
    /// absent or the walk hit a string before the key was exhausted.
    pub fn resolve(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split(KEY_DELIMITER);
        let first = segments.next()?;
        let mut node = self.entries.get(first)?;

        for segment in segments {
            node = node.child(segment)?;
        }

        Some(node)
    }

    /// Every node of the tree with its fully-dotted key, in key order.
    /// Intermediate objects and list positions are included.
    pub fn paths(&self) -> Vec<(String, &Value)> {
        let mut out = Vec::new();
        for (key, value) in &self.entries {
            out.push((key.clone(), value));
            value.collect_paths(key, &mut out);
        }
        out
    }

    /// The set of fully-dotted keys.
    pub fn keys(&self) -> BTreeSet<String> {
        self.paths().into_iter().map(|(key, _)| key).collect()
    }
}
