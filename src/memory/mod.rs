//! Memory model for the tracing interpreter
//!
//! - [`value`]: Runtime value representation (Int, Float, Str, Bool)
//! - [`Environment`]: the single, program-wide variable table
//! - [`Variables`]: an immutable copy of the environment taken for a step
//!
//! # Flat scope
//!
//! There is exactly one [`Environment`] per trace. Blocks do not open scopes:
//! a variable assigned inside a loop body or an `if` branch stays visible
//! after the block ends, with its last-written value.
//!
//! # Ordering
//!
//! Variables are kept in first-assignment order. Re-assigning a variable
//! updates it in place. Snapshots therefore list variables in a stable order,
//! which keeps traces byte-identical across runs.

pub mod value;

use rustc_hash::FxHashMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use value::Value;

/// Program-wide variable table
#[derive(Debug, Clone, Default)]
pub struct Environment {
    slots: Vec<(String, Value)>,
    index: FxHashMap<String, usize>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.index.get(name).map(|&slot| &self.slots[slot].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Write a variable, returning the value it replaced
    pub fn set(&mut self, name: &str, value: Value) -> Option<Value> {
        if let Some(&slot) = self.index.get(name) {
            return Some(std::mem::replace(&mut self.slots[slot].1, value));
        }

        self.index.insert(name.to_string(), self.slots.len());
        self.slots.push((name.to_string(), value));
        None
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Copy the current state for an execution step
    pub fn snapshot(&self) -> Variables {
        Variables {
            entries: self.slots.clone(),
        }
    }
}

/// Frozen `name → value` view captured at one step, in first-assignment order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Variables {
    entries: Vec<(String, Value)>,
}

impl Variables {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<const N: usize> From<[(&str, Value); N]> for Variables {
    fn from(entries: [(&str, Value); N]) -> Self {
        Variables {
            entries: entries
                .into_iter()
                .map(|(n, v)| (n.to_string(), v))
                .collect(),
        }
    }
}

/// Serialized as a JSON object, keys in first-assignment order
impl Serialize for Variables {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins_keeps_order() {
        let mut env = Environment::new();
        assert_eq!(env.set("total", Value::Int(0)), None);
        env.set("i", Value::Int(0));
        assert_eq!(env.set("total", Value::Int(3)), Some(Value::Int(0)));

        let snapshot = env.snapshot();
        let names: Vec<&str> = snapshot.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["total", "i"]);
        assert_eq!(env.get("total"), Some(&Value::Int(3)));
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut env = Environment::new();
        env.set("x", Value::Int(1));
        let snap = env.snapshot();
        env.set("x", Value::Int(2));

        assert_eq!(snap.get("x"), Some(&Value::Int(1)));
        assert_eq!(env.get("x"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_variables_serialize_in_order() {
        let vars = Variables::from([
            ("total", Value::Int(3)),
            ("i", Value::Int(2)),
            ("name", Value::Str("a".into())),
        ]);
        assert_eq!(
            serde_json::to_string(&vars).unwrap(),
            r#"{"total":3,"i":2,"name":"a"}"#
        );
    }
}
