//! Single-field projections for `select`.
//!
//! A select does not return one combined row per record. For each requested
//! field, in request order, it emits `{field: value}` for every row carrying
//! that field, in row order. A row holding `null` for the field still counts.

use crate::types::Record;

/// Flatten `rows` into per-field, per-row projections.
pub fn project_fields<S: AsRef<str>>(rows: &[Record], field_names: &[S]) -> Vec<Record> {
    let mut result = Vec::new();
    for name in field_names {
        let name = name.as_ref();
        for row in rows {
            if let Some(value) = row.get(name) {
                let mut projected = Record::new();
                projected.insert(name.to_string(), value.clone());
                result.push(projected);
            }
        }
    }
    result
}
