//! Name-equality predicates and the insert-time record check.

use crate::error::{ArgumentError, Error, ValidationError};
use crate::types::{FieldDefinition, Record, TableDocument};

/// Whether any table is named `name`.
pub fn is_table_exists(tables: &[TableDocument], name: &str) -> bool {
    tables.iter().any(|t| t.name == name)
}

/// Whether any field definition is named `name`.
pub fn is_field_exists(fields: &[FieldDefinition], name: &str) -> bool {
    fields.iter().any(|f| f.name == name)
}

/// Check a record against a table's declared fields.
///
/// Every key must name a declared field, and every declared field must be
/// supplied. Values are not checked against the declared type.
pub fn validate_record(table: &TableDocument, record: &Record) -> Result<(), Error> {
    if record.is_empty() {
        return Err(ArgumentError::Empty("fields").into());
    }
    if table.fields.is_empty() {
        return Err(ValidationError::NoFieldsDeclared(table.name.clone()).into());
    }

    let mut matched = 0;
    for key in record.keys() {
        if !is_field_exists(&table.fields, key) {
            return Err(ValidationError::UnknownField {
                table: table.name.clone(),
                field: key.clone(),
            }
            .into());
        }
        matched += 1;
    }

    if matched != table.fields.len() {
        return Err(ValidationError::IncompleteRecord {
            table: table.name.clone(),
            expected: table.fields.len(),
            actual: matched,
        }
        .into());
    }

    Ok(())
}
