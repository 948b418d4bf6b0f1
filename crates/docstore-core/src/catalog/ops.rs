//! Catalog operations: create, drop, get, and list tables and fields.
//!
//! Every function works on an already-loaded [`DatabaseDocument`]; loading
//! and persisting the document is the caller's job.

use serde_json::Value;

use crate::error::{Error, SchemaError};
use crate::types::{DatabaseDocument, FieldDefinition, TableDocument};

use super::validate::{is_field_exists, is_table_exists};

/// Append a new empty table.
///
/// Returns `TableAlreadyExists` if a table of that name is present.
pub fn create_table<'a>(
    doc: &'a mut DatabaseDocument,
    name: &str,
) -> Result<&'a TableDocument, Error> {
    if is_table_exists(&doc.tables, name) {
        return Err(SchemaError::TableAlreadyExists(name.to_string()).into());
    }
    doc.tables.push(TableDocument::new(name));
    Ok(&doc.tables[doc.tables.len() - 1])
}

/// Remove a table together with its fields and rows.
pub fn drop_table(doc: &mut DatabaseDocument, name: &str) -> Result<TableDocument, Error> {
    let pos = doc
        .tables
        .iter()
        .position(|t| t.name == name)
        .ok_or_else(|| SchemaError::TableNotFound(name.to_string()))?;
    Ok(doc.tables.remove(pos))
}

/// Look up a table by name.
pub fn get_table<'a>(doc: &'a DatabaseDocument, name: &str) -> Result<&'a TableDocument, Error> {
    doc.tables
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| SchemaError::TableNotFound(name.to_string()).into())
}

/// Look up a table by name for mutation.
pub fn get_table_mut<'a>(
    doc: &'a mut DatabaseDocument,
    name: &str,
) -> Result<&'a mut TableDocument, Error> {
    doc.tables
        .iter_mut()
        .find(|t| t.name == name)
        .ok_or_else(|| SchemaError::TableNotFound(name.to_string()).into())
}

/// Table names in declaration order.
pub fn list_tables(doc: &DatabaseDocument) -> Vec<String> {
    doc.tables.iter().map(|t| t.name.clone()).collect()
}

/// Append a field definition to a table.
///
/// Existing rows are left as they are; they simply lack the new key until an
/// update or a fresh insert supplies it.
pub fn create_field(
    doc: &mut DatabaseDocument,
    table_name: &str,
    mut field: FieldDefinition,
) -> Result<FieldDefinition, Error> {
    let table = get_table_mut(doc, table_name)?;
    if is_field_exists(&table.fields, &field.name) {
        return Err(SchemaError::FieldAlreadyExists {
            table: table_name.to_string(),
            field: field.name,
        }
        .into());
    }
    if field.default == Some(Value::Null) {
        field.default = None;
    }
    table.fields.push(field.clone());
    Ok(field)
}

/// Remove a field definition and strip its key from every row of the table.
///
/// An undeclared field is not an error: rows are still purged of the key.
/// Returns the number of rows that carried the key.
pub fn drop_field(
    doc: &mut DatabaseDocument,
    table_name: &str,
    field_name: &str,
) -> Result<usize, Error> {
    let table = get_table_mut(doc, table_name)?;
    table.fields.retain(|f| f.name != field_name);

    let mut purged = 0;
    for row in &mut table.rows {
        if row.shift_remove(field_name).is_some() {
            purged += 1;
        }
    }
    Ok(purged)
}
