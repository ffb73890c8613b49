//! The mutable in-progress record behind a create/edit form.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::entity::EntitySchema;
use crate::error::CoreError;
use crate::record::{field_text, Record};

/// Form-bound attribute values, keyed by field name in form order.
///
/// A draft always holds exactly the schema's form fields; every value is a
/// string, and a fresh draft has every value set to `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Draft {
    values: IndexMap<String, String>,
}

impl Draft {
    /// An all-empty draft for `schema`.
    pub fn empty(schema: &EntitySchema) -> Self {
        Self {
            values: schema
                .fields
                .iter()
                .map(|f| (f.name.to_string(), String::new()))
                .collect(),
        }
    }

    /// A draft pre-populated from an existing record.
    pub fn from_record(schema: &EntitySchema, record: &Record) -> Self {
        Self {
            values: schema
                .fields
                .iter()
                .map(|f| (f.name.to_string(), field_text(record, f.name)))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Set exactly one attribute, leaving every other value untouched.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), CoreError> {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(CoreError::Validation(format!("Unknown form field '{name}'"))),
        }
    }

    /// Whether every value is the empty string.
    pub fn is_blank(&self) -> bool {
        self.values.values().all(String::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The create payload: every form field as a JSON string.
    pub fn to_record(&self) -> Record {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect()
    }

    /// Overlay the form values onto `base`, keeping every attribute the form
    /// does not bind (such as the identifier) as it was.
    pub fn merge_into(&self, base: &Record) -> Record {
        let mut merged = base.clone();
        for (k, v) in &self.values {
            merged.insert(k.clone(), Value::String(v.clone()));
        }
        merged
    }
}
