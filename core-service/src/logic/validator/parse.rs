//! Per-kind numeric parsing of a single trimmed field

use crate::logic::schema::FieldKind;

/// Parse a trimmed, non-empty value per field kind.
///
/// Integer: base-10 `i64`, optional sign, nothing else.
/// Real: standard float syntax; non-finite results are rejected.
pub fn parse_field(kind: FieldKind, trimmed: &str) -> Option<f64> {
    match kind {
        FieldKind::Integer => trimmed.parse::<i64>().ok().map(|v| v as f64),
        FieldKind::Real => trimmed.parse::<f64>().ok().filter(|v| v.is_finite()),
    }
}
