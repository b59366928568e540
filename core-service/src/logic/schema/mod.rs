//! Schema Module - Form layouts per disease
//!
//! Declares the ordered, typed field list of every form and the message
//! each class label maps to.

pub mod types;
pub mod forms;
pub mod registry;

// Re-export common types
pub use types::{FieldKind, FieldSpec, FormSchema, InvalidLabel, Label, SchemaError, VerdictMap};
pub use registry::{FormRegistry, UnknownDisease};
