//! Number formatting for the layout document.
//!
//! The editor writes integral lengths as JSON integers (`58`, not `58.0`).
//! Writing `f64` fields back the same way keeps a load/save cycle from
//! rewriting every coordinate in the document.

use serde::Serializer;

/// Largest integer an `f64` represents exactly
const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

pub fn serialize_option<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serialize(v, serializer),
        None => serializer.serialize_none(),
    }
}
