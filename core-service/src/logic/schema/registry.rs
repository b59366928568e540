//! Form Registry - one schema and verdict map per supported disease

use thiserror::Error;

use super::forms;
use super::types::{FormSchema, SchemaError, VerdictMap};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown disease '{0}'")]
pub struct UnknownDisease(pub String);

#[derive(Debug, Clone)]
struct FormEntry {
    schema: FormSchema,
    verdicts: VerdictMap,
}

/// Immutable id → (schema, verdicts) lookup, built once at startup
#[derive(Debug, Clone)]
pub struct FormRegistry {
    entries: Vec<FormEntry>,
}

impl FormRegistry {
    /// Registry from explicit entries; ids must be unique
    pub fn new(entries: Vec<(FormSchema, VerdictMap)>) -> Result<Self, SchemaError> {
        let mut out: Vec<FormEntry> = Vec::with_capacity(entries.len());
        for (schema, verdicts) in entries {
            if out.iter().any(|e| e.schema.id() == schema.id()) {
                return Err(SchemaError::DuplicateSchema(schema.id().to_string()));
            }
            out.push(FormEntry { schema, verdicts });
        }
        Ok(Self { entries: out })
    }

    /// Diabetes, heart, Parkinson's and breast cancer forms
    pub fn builtin() -> Result<Self, SchemaError> {
        Self::new(forms::all()?)
    }

    pub fn get(&self, id: &str) -> Result<(&FormSchema, &VerdictMap), UnknownDisease> {
        self.entries
            .iter()
            .find(|e| e.schema.id() == id)
            .map(|e| (&e.schema, &e.verdicts))
            .ok_or_else(|| UnknownDisease(id.to_string()))
    }

    pub fn schema(&self, id: &str) -> Result<&FormSchema, UnknownDisease> {
        self.get(id).map(|(schema, _)| schema)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_ok()
    }

    /// Ids in registration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.schema.id())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FormSchema, &VerdictMap)> {
        self.entries.iter().map(|e| (&e.schema, &e.verdicts))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
