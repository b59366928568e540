//! Schema Types - Form fields, labels and verdict messages

use std::collections::HashSet;

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// SCHEMA VERSION
// ============================================================================

/// Layout version mixed into every schema fingerprint.
/// MUST be incremented when the fingerprint encoding changes.
pub const SCHEMA_LAYOUT_VERSION: u8 = 1;

// ============================================================================
// FIELDS
// ============================================================================

/// Numeric type a form field parses into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Base-10 integer, no fractional part or exponent
    Integer,
    /// Floating point: sign, decimal point and exponent accepted
    Real,
}

impl FieldKind {
    fn tag(self) -> u8 {
        match self {
            FieldKind::Integer => b'i',
            FieldKind::Real => b'r',
        }
    }
}

/// One input field of a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    /// Placeholder hint, cosmetic only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl FieldSpec {
    pub fn integer(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: FieldKind::Integer, example: None }
    }

    pub fn real(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: FieldKind::Real, example: None }
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }
}

// ============================================================================
// FORM SCHEMA
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema id must not be empty")]
    EmptyId,
    #[error("schema '{0}' has no fields")]
    NoFields(String),
    #[error("schema '{schema}': field {index} has an empty name")]
    EmptyFieldName { schema: String, index: usize },
    #[error("schema '{schema}': duplicate field name '{name}'")]
    DuplicateField { schema: String, name: String },
    #[error("duplicate schema id '{0}'")]
    DuplicateSchema(String),
}

/// Ordered field list for one disease form.
///
/// Field order is the feature order the classifier was trained on.
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSchema {
    id: String,
    title: String,
    subtitle: Option<String>,
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        fields: Vec<FieldSpec>,
    ) -> Result<Self, SchemaError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(SchemaError::EmptyId);
        }
        if fields.is_empty() {
            return Err(SchemaError::NoFields(id));
        }

        let mut seen = HashSet::with_capacity(fields.len());
        for (index, field) in fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(SchemaError::EmptyFieldName { schema: id, index });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField { schema: id, name: field.name.clone() });
            }
        }

        Ok(Self { id, title: title.into(), subtitle: None, fields })
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false for a constructed schema
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&FieldSpec> {
        self.fields.get(index)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Get field index by name (O(n) but forms are small)
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// CRC32 over id, layout version and every (name, kind) in order.
    /// Used by clients to detect a stale rendered layout.
    pub fn fingerprint(&self) -> u32 {
        let mut hasher = Hasher::new();
        hasher.update(&[SCHEMA_LAYOUT_VERSION]);
        hasher.update(self.id.as_bytes());
        hasher.update(&[0]);

        for field in &self.fields {
            hasher.update(field.name.as_bytes());
            hasher.update(&[0, field.kind.tag(), 0]);
        }

        hasher.finalize()
    }
}

// ============================================================================
// LABELS & VERDICTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("classifier returned label {0}, expected 0 or 1")]
pub struct InvalidLabel(pub i64);

/// Binary class output of a classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "i64")]
pub enum Label {
    /// 0: negative / benign
    Negative,
    /// 1: positive / malignant
    Positive,
}

impl Label {
    pub fn as_u8(self) -> u8 {
        match self {
            Label::Negative => 0,
            Label::Positive => 1,
        }
    }

    pub fn is_positive(self) -> bool {
        self == Label::Positive
    }
}

impl TryFrom<i64> for Label {
    type Error = InvalidLabel;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::Negative),
            1 => Ok(Label::Positive),
            other => Err(InvalidLabel(other)),
        }
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> Self {
        label.as_u8()
    }
}

/// Per-disease label → message mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictMap {
    pub negative: String,
    pub positive: String,
}

impl VerdictMap {
    pub fn new(negative: impl Into<String>, positive: impl Into<String>) -> Self {
        Self { negative: negative.into(), positive: positive.into() }
    }

    pub fn message(&self, label: Label) -> &str {
        match label {
            Label::Negative => &self.negative,
            Label::Positive => &self.positive,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
