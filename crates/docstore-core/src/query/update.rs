//! Field assignment for `update`.

use crate::types::{FieldDefinition, Record};

/// Declared fields that the assignment set names.
pub fn updatable_fields<'a>(
    fields: &'a [FieldDefinition],
    assignments: &Record,
) -> Vec<&'a FieldDefinition> {
    fields
        .iter()
        .filter(|f| assignments.contains_key(&f.name))
        .collect()
}

/// Overwrite every key present both on the row and in `assignments`.
///
/// Keys the row does not already carry are not added. Returns the number of
/// keys overwritten.
pub fn apply_assignments(row: &mut Record, assignments: &Record) -> usize {
    let mut written = 0;
    for (key, value) in assignments {
        if let Some(slot) = row.get_mut(key) {
            *slot = value.clone();
            written += 1;
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn rec(v: Value) -> Record {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn test_overwrites_existing_keys_only() {
        let mut row = rec(json!({"a": 1, "b": 2}));
        let written = apply_assignments(&mut row, &rec(json!({"b": 99, "c": 5})));
        assert_eq!(written, 1);
        assert_eq!(Value::Object(row), json!({"a": 1, "b": 99}));
    }

    #[test]
    fn test_key_order_unchanged() {
        let mut row = rec(json!({"a": 1, "b": 2, "c": 3}));
        apply_assignments(&mut row, &rec(json!({"c": 0, "a": 0})));
        let keys: Vec<&str> = row.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_updatable_fields_filters_declared() {
        let fields = vec![FieldDefinition::new("a"), FieldDefinition::new("b")];
        let picked = updatable_fields(&fields, &rec(json!({"b": 1, "zzz": 2})));
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].name, "b");

        assert!(updatable_fields(&fields, &rec(json!({"zzz": 2}))).is_empty());
    }
}
