//! Core types: the database document and the tables, fields, and records it owns.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row: a flat mapping of field name to value. Key order is preserved.
pub type Record = Map<String, Value>;

/// The root aggregate persisted under a database name.
///
/// Table names are unique within a document; the catalog operations are the
/// only code that appends tables, and they check for duplicates first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseDocument {
    pub tables: Vec<TableDocument>,
}

/// A named table: its declared fields and its rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDocument {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default)]
    pub rows: Vec<Record>,
}

impl TableDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            rows: Vec::new(),
        }
    }
}

/// Declared column metadata.
///
/// `field_type`, `nullable`, and `primary_key` are descriptive only: nothing
/// checks inserted values against them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    /// `None` and `Some(Value::Null)` both mean "no default" and both
    /// serialize as `null`, which decodes back as `None`. The catalog stores
    /// `None`.
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub primary_key: bool,
}

fn default_nullable() -> bool {
    true
}

impl FieldDefinition {
    /// A nullable, non-key field with no type and no default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: String::new(),
            nullable: true,
            default: None,
            primary_key: false,
        }
    }
}
