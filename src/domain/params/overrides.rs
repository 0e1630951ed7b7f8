//! Caller-supplied field values that bypass cue extraction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::field::{ParamField, ParamValue};
use crate::domain::AppError;

/// A partial ParameterSet: zero or more schema fields with explicit values.
///
/// Serializes as a nested object mirroring the ParameterSet shape; deserializes from either nested
/// objects or flat dotted keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct ParameterOverrides {
    entries: BTreeMap<ParamField, ParamValue>,
}

impl ParameterOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, field: ParamField) -> Option<ParamValue> {
        self.entries.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamField, ParamValue)> + '_ {
        self.entries.iter().map(|(field, value)| (*field, *value))
    }

    pub fn set(&mut self, field: ParamField, value: ParamValue) {
        self.entries.insert(field, value);
    }

    /// Parse a single `path=value` assignment.
    pub fn parse_assignment(assignment: &str) -> Result<(ParamField, ParamValue), AppError> {
        let (path, raw) = assignment.split_once('=').ok_or_else(|| {
            AppError::config_error(format!(
                "Invalid override '{}': expected <field>=<value>, e.g. camera.fov=35",
                assignment
            ))
        })?;
        let field = ParamField::parse(path)?;
        let value = field.parse_value(raw)?;
        Ok((field, value))
    }

    /// Build from repeated `path=value` assignments; later assignments win.
    pub fn from_assignments<S: AsRef<str>>(assignments: &[S]) -> Result<Self, AppError> {
        let mut overrides = Self::new();
        for assignment in assignments {
            let (field, value) = Self::parse_assignment(assignment.as_ref())?;
            overrides.set(field, value);
        }
        Ok(overrides)
    }

    /// Build from a partial ParameterSet document. `null` leaves mean "not overridden".
    pub fn from_json(document: &Value) -> Result<Self, AppError> {
        let Value::Object(map) = document else {
            return Err(AppError::config_error(
                "Parameter overrides must be a JSON object mirroring the parameter schema",
            ));
        };
        let mut overrides = Self::new();
        collect_leaves("", map, &mut overrides)?;
        Ok(overrides)
    }

    /// Nested JSON object mirroring the ParameterSet shape.
    pub fn to_json(&self) -> Value {
        let mut root = Map::new();
        for (field, value) in self.iter() {
            let (group, leaf) = field.path().split_once('.').unwrap_or((field.path(), ""));
            let entry = root.entry(group.to_string()).or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(group_map) = entry {
                group_map.insert(leaf.to_string(), value.to_json());
            }
        }
        Value::Object(root)
    }

    /// Layer `other` on top of `self`; fields present in both take `other`'s value.
    pub fn merged_with(&self, other: &ParameterOverrides) -> ParameterOverrides {
        let mut merged = self.clone();
        for (field, value) in other.iter() {
            merged.set(field, value);
        }
        merged
    }
}

fn collect_leaves(
    prefix: &str,
    map: &Map<String, Value>,
    overrides: &mut ParameterOverrides,
) -> Result<(), AppError> {
    for (key, value) in map {
        let path = if prefix.is_empty() { key.clone() } else { format!("{}.{}", prefix, key) };
        match value {
            Value::Object(child) => collect_leaves(&path, child, overrides)?,
            Value::Null => {}
            leaf => {
                let field = ParamField::parse(&path)?;
                overrides.set(field, field.value_from_json(leaf)?);
            }
        }
    }
    Ok(())
}

impl TryFrom<Value> for ParameterOverrides {
    type Error = AppError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        ParameterOverrides::from_json(&value)
    }
}

impl From<ParameterOverrides> for Value {
    fn from(overrides: ParameterOverrides) -> Self {
        overrides.to_json()
    }
}
