//! YAML frontmatter values.
//!
//! Frontmatter is kept as an insertion-ordered `serde_yaml::Mapping` so that
//! arbitrary values (lists, nested maps, numbers) survive a read/merge/write
//! cycle and keys are emitted in the order they were first seen.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Ordered string-keyed frontmatter mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frontmatter(Mapping);

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the lines between the `---` delimiters.
    ///
    /// An empty block (or one holding only `null`) is an empty mapping.
    pub fn parse(yaml: &str) -> Result<Self, String> {
        if yaml.trim().is_empty() {
            return Ok(Self::new());
        }

        let value: Value = serde_yaml::from_str(yaml).map_err(|e| e.to_string())?;
        match value {
            Value::Null => Ok(Self::new()),
            Value::Mapping(mapping) => {
                if let Some(key) = mapping.keys().find(|k| !k.is_string()) {
                    return Err(format!("frontmatter keys must be strings, found {:?}", key));
                }
                Ok(Self(mapping))
            }
            _ => Err("frontmatter must be a YAML mapping".to_string()),
        }
    }

    /// YAML lines for the block body, without the `---` delimiters
    pub fn to_yaml_lines(&self) -> Result<Vec<String>, String> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        let yaml = serde_yaml::to_string(&self.0).map_err(|e| e.to_string())?;
        Ok(yaml.trim_end().lines().map(str::to_string).collect())
    }

    /// Shallow merge: keys in `partial` replace same-named keys in place,
    /// new keys are appended, everything else is kept.
    pub fn merged(&self, partial: &Frontmatter) -> Frontmatter {
        let mut merged = self.clone();
        for (key, value) in partial.0.iter() {
            merged.0.insert(key.clone(), value.clone());
        }
        merged
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
impl Frontmatter {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(Value::String(key.into()), value.into())
    }

    /// Keys in emission order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().filter_map(Value::as_str)
    }
}
