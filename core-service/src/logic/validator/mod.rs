//! Validator - raw form strings → feature vector
//!
//! Checks every field before returning, so a single submission reports all
//! missing and malformed fields at once.

mod parse;


use std::collections::{BTreeMap, BTreeSet};
use serde::Serialize;
use thiserror::Error;

use crate::logic::features::FeatureVector;
use crate::logic::schema::FormSchema;

pub use parse::parse_field;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// Every missing and malformed field of one submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error(
    "{} missing field(s) {:?}, {} invalid field(s) {:?}",
    .missing.len(),
    .missing,
    .invalid.len(),
    .invalid.keys()
)]
pub struct ValidationError {
    /// Indices of empty / whitespace-only fields
    pub missing: BTreeSet<usize>,
    /// Index → value as submitted, for fields that failed to parse
    pub invalid: BTreeMap<usize, String>,
}

impl ValidationError {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.missing.len() + self.invalid.len()
    }

    /// One batched warning naming every bad field
    pub fn describe(&self, schema: &FormSchema) -> String {
        let name = |i: usize| schema.field(i).map(|f| f.name.as_str()).unwrap_or("?");
        let mut parts = Vec::with_capacity(2);

        if !self.missing.is_empty() {
            let names: Vec<&str> = self.missing.iter().map(|&i| name(i)).collect();
            parts.push(format!("Please fill in: {}", names.join(", ")));
        }
        if !self.invalid.is_empty() {
            let names: Vec<String> = self
                .invalid
                .iter()
                .map(|(&i, raw)| format!("{} ('{}')", name(i), raw))
                .collect();
            parts.push(format!("Please enter valid numeric values for: {}", names.join(", ")));
        }

        parts.join(". ")
    }
}

// ============================================================================
// VALIDATE
// ============================================================================

/// Validate raw form inputs against a schema.
///
/// # Panics
///
/// If `raw.len() != schema.len()`. Keeping form fields aligned with the
/// schema is the caller's job.
pub fn validate<S: AsRef<str>>(
    schema: &FormSchema,
    raw: &[S],
) -> Result<FeatureVector, ValidationError> {
    assert_eq!(
        raw.len(),
        schema.len(),
        "form '{}' submitted {} values for {} fields",
        schema.id(),
        raw.len(),
        schema.len()
    );

    let mut values = Vec::with_capacity(raw.len());
    let mut errors = ValidationError::default();

    for (index, (field, value)) in schema.fields().iter().zip(raw).enumerate() {
        let value = value.as_ref();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            errors.missing.insert(index);
            continue;
        }

        match parse_field(field.kind, trimmed) {
            Some(parsed) => values.push(parsed),
            None => {
                errors.invalid.insert(index, value.to_string());
            }
        }
    }

    if errors.is_empty() {
        Ok(FeatureVector::new(values))
    } else {
        Err(errors)
    }
}
