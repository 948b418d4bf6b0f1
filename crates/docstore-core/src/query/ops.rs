//! Row operations: insert, select, scan, update, delete.
//!
//! Like the catalog operations these work on a loaded document and never
//! touch the provider.

use crate::catalog::ops::{get_table, get_table_mut};
use crate::catalog::validate::validate_record;
use crate::error::{Error, ValidationError};
use crate::types::{DatabaseDocument, Record};

use super::condition::{matches_all, matches_first};
use super::projection::project_fields;
use super::update::{apply_assignments, updatable_fields};

/// Append a record after checking it supplies exactly the declared fields.
pub fn insert(doc: &mut DatabaseDocument, table: &str, record: Record) -> Result<Record, Error> {
    let table = get_table_mut(doc, table)?;
    validate_record(table, &record)?;
    table.rows.push(record.clone());
    Ok(record)
}

/// Per-field, per-row projections of the table's rows.
pub fn select<S: AsRef<str>>(
    doc: &DatabaseDocument,
    table: &str,
    field_names: &[S],
) -> Result<Vec<Record>, Error> {
    let table = get_table(doc, table)?;
    Ok(project_fields(&table.rows, field_names))
}

/// All rows of the table, in storage order.
pub fn scan(doc: &DatabaseDocument, table: &str) -> Result<Vec<Record>, Error> {
    Ok(get_table(doc, table)?.rows.clone())
}

/// Overwrite assigned keys on every row matching `condition` key by key.
///
/// Fails when no declared field is named in `assignments`. Returns the number
/// of matching rows.
pub fn update(
    doc: &mut DatabaseDocument,
    table: &str,
    condition: &Record,
    assignments: &Record,
) -> Result<usize, Error> {
    let table = get_table_mut(doc, table)?;
    if updatable_fields(&table.fields, assignments).is_empty() {
        return Err(ValidationError::NoUpdatableFields(table.name.clone()).into());
    }

    let mut matched = 0;
    for row in &mut table.rows {
        if matches_all(row, condition) {
            apply_assignments(row, assignments);
            matched += 1;
        }
    }
    Ok(matched)
}

/// Remove every row for which some condition key equals the row's value.
///
/// Returns the number of rows removed.
pub fn delete(doc: &mut DatabaseDocument, table: &str, condition: &Record) -> Result<usize, Error> {
    let table = get_table_mut(doc, table)?;
    let before = table.rows.len();
    table.rows.retain(|row| !matches_first(row, condition));
    Ok(before - table.rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ops::{create_field, create_table};
    use crate::error::ErrorKind;
    use crate::types::FieldDefinition;
    use serde_json::{Value, json};

    fn rec(v: Value) -> Record {
        v.as_object().unwrap().clone()
    }

    /// Table `t` with fields `a`, `b`.
    fn setup() -> DatabaseDocument {
        let mut doc = DatabaseDocument::default();
        create_table(&mut doc, "t").unwrap();
        create_field(&mut doc, "t", FieldDefinition::new("a")).unwrap();
        create_field(&mut doc, "t", FieldDefinition::new("b")).unwrap();
        doc
    }

    fn rows_of(doc: &DatabaseDocument) -> Vec<Value> {
        scan(doc, "t").unwrap().into_iter().map(Value::Object).collect()
    }

    #[test]
    fn test_insert_returns_record_verbatim() {
        let mut doc = setup();
        let inserted = insert(&mut doc, "t", rec(json!({"b": "x", "a": 1}))).unwrap();
        assert_eq!(Value::Object(inserted), json!({"b": "x", "a": 1}));
        assert_eq!(rows_of(&doc), vec![json!({"b": "x", "a": 1})]);
    }

    #[test]
    fn test_insert_partial_rejected_without_mutation() {
        let mut doc = setup();
        let err = insert(&mut doc, "t", rec(json!({"a": 1}))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(rows_of(&doc).is_empty());
    }

    #[test]
    fn test_insert_missing_table() {
        let mut doc = setup();
        let err = insert(&mut doc, "nope", rec(json!({"a": 1}))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_select_flattens() {
        let mut doc = setup();
        insert(&mut doc, "t", rec(json!({"a": 1, "b": 2}))).unwrap();
        insert(&mut doc, "t", rec(json!({"a": 3, "b": 4}))).unwrap();

        let result: Vec<Value> = select(&doc, "t", &["a"])
            .unwrap()
            .into_iter()
            .map(Value::Object)
            .collect();
        assert_eq!(result, vec![json!({"a": 1}), json!({"a": 3})]);
    }

    #[test]
    fn test_select_leaves_fields_untouched() {
        let mut doc = setup();
        insert(&mut doc, "t", rec(json!({"a": 1, "b": 2}))).unwrap();
        let before = doc.clone();
        select(&doc, "t", &["a"]).unwrap();
        assert_eq!(doc, before);
    }

    #[test]
    fn test_update_matching_row() {
        let mut doc = setup();
        insert(&mut doc, "t", rec(json!({"a": 1, "b": 2}))).unwrap();
        insert(&mut doc, "t", rec(json!({"a": 5, "b": 2}))).unwrap();

        let matched = update(&mut doc, "t", &rec(json!({"a": 1})), &rec(json!({"b": 99}))).unwrap();
        assert_eq!(matched, 1);
        assert_eq!(
            rows_of(&doc),
            vec![json!({"a": 1, "b": 99}), json!({"a": 5, "b": 2})]
        );
    }

    #[test]
    fn test_update_multi_key_condition_requires_all() {
        let mut doc = setup();
        insert(&mut doc, "t", rec(json!({"a": 1, "b": 2}))).unwrap();
        insert(&mut doc, "t", rec(json!({"a": 1, "b": 3}))).unwrap();

        let matched = update(
            &mut doc,
            "t",
            &rec(json!({"a": 1, "b": 3})),
            &rec(json!({"b": 0})),
        )
        .unwrap();
        assert_eq!(matched, 1);
        assert_eq!(
            rows_of(&doc),
            vec![json!({"a": 1, "b": 2}), json!({"a": 1, "b": 0})]
        );
    }

    #[test]
    fn test_update_requires_declared_field() {
        let mut doc = setup();
        insert(&mut doc, "t", rec(json!({"a": 1, "b": 2}))).unwrap();
        let err = update(&mut doc, "t", &rec(json!({"a": 1})), &rec(json!({"zzz": 1}))).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::NoUpdatableFields(_))
        ));
        // Field definitions are not narrowed by the check.
        assert_eq!(get_table(&doc, "t").unwrap().fields.len(), 2);
    }

    #[test]
    fn test_update_does_not_add_keys() {
        let mut doc = setup();
        get_table_mut(&mut doc, "t")
            .unwrap()
            .rows
            .push(rec(json!({"a": 1})));
        update(&mut doc, "t", &rec(json!({"a": 1})), &rec(json!({"b": 7}))).unwrap();
        assert_eq!(rows_of(&doc), vec![json!({"a": 1})]);
    }

    #[test]
    fn test_delete_by_value() {
        let mut doc = setup();
        insert(&mut doc, "t", rec(json!({"a": 1, "b": 2}))).unwrap();
        insert(&mut doc, "t", rec(json!({"a": 2, "b": 2}))).unwrap();
        insert(&mut doc, "t", rec(json!({"a": 1, "b": 3}))).unwrap();

        let removed = delete(&mut doc, "t", &rec(json!({"a": 1}))).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(rows_of(&doc), vec![json!({"a": 2, "b": 2})]);
    }

    #[test]
    fn test_delete_any_condition_key_removes() {
        let mut doc = setup();
        insert(&mut doc, "t", rec(json!({"a": 1, "b": 2}))).unwrap();
        insert(&mut doc, "t", rec(json!({"a": 2, "b": 9}))).unwrap();
        insert(&mut doc, "t", rec(json!({"a": 3, "b": 3}))).unwrap();

        let removed = delete(&mut doc, "t", &rec(json!({"a": 1, "b": 9}))).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(rows_of(&doc), vec![json!({"a": 3, "b": 3})]);
    }

    #[test]
    fn test_delete_no_match_keeps_rows() {
        let mut doc = setup();
        insert(&mut doc, "t", rec(json!({"a": 1, "b": 2}))).unwrap();
        let removed = delete(&mut doc, "t", &rec(json!({"a": "1"}))).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(rows_of(&doc).len(), 1);
    }

    #[test]
    fn test_delete_large_ids_removes_exact_row() {
        let mut doc = setup();
        insert(&mut doc, "t", rec(json!({"a": 9_007_199_254_740_992_u64, "b": 1}))).unwrap();
        insert(&mut doc, "t", rec(json!({"a": 9_007_199_254_740_993_u64, "b": 2}))).unwrap();

        let removed = delete(&mut doc, "t", &rec(json!({"a": 9_007_199_254_740_993_u64}))).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(
            rows_of(&doc),
            vec![json!({"a": 9_007_199_254_740_992_u64, "b": 1})]
        );

        let matched = update(
            &mut doc,
            "t",
            &rec(json!({"a": 9_007_199_254_740_993_u64})),
            &rec(json!({"b": 7})),
        )
        .unwrap();
        assert_eq!(matched, 0);
    }
}
