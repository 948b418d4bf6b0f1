use serde_json::Value;

use crate::error::Error;
use crate::types::FieldDefinition;

use super::database::Database;

// ---------------------------------------------------------------------------
// FieldBuilder
// ---------------------------------------------------------------------------

/// Builder for declaring a new field on a table.
///
/// Unset options keep their defaults: nullable, empty type, no default value,
/// not a primary key. None of these options is enforced on inserted values.
pub struct FieldBuilder<'a> {
    db: &'a Database,
    table: String,
    field: FieldDefinition,
}

impl<'a> FieldBuilder<'a> {
    pub(crate) fn new(db: &'a Database, table: String, name: String) -> Self {
        Self {
            db,
            table,
            field: FieldDefinition::new(name),
        }
    }

    /// Set the descriptive type label (e.g. `"string"`, `"number"`).
    pub fn field_type(mut self, field_type: &str) -> Self {
        self.field.field_type = field_type.to_string();
        self
    }

    /// Mark the field nullable or not.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.field.nullable = nullable;
        self
    }

    /// Set the default value. `null` and the empty string mean "no default".
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.field.default = match value.into() {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            other => Some(other),
        };
        self
    }

    /// Flag the field as the table's primary key.
    pub fn primary_key(mut self, primary_key: bool) -> Self {
        self.field.primary_key = primary_key;
        self
    }

    /// Execute the field creation, returning the stored definition.
    pub fn execute(self) -> Result<FieldDefinition, Error> {
        self.db.add_field(&self.table, self.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ArgumentError, ErrorKind};
    use serde_json::json;

    fn setup() -> Database {
        let db = Database::in_memory("shop").unwrap();
        db.create_database().unwrap();
        db.create_table("users").unwrap();
        db
    }

    #[test]
    fn test_defaults() {
        let db = setup();
        let field = db.create_field("users", "nick").execute().unwrap();
        assert_eq!(field, FieldDefinition::new("nick"));
        assert!(field.nullable);
        assert!(!field.primary_key);
        assert_eq!(field.default, None);
    }

    #[test]
    fn test_all_options() {
        let db = setup();
        let field = db
            .create_field("users", "id")
            .field_type("number")
            .nullable(false)
            .default_value(0)
            .primary_key(true)
            .execute()
            .unwrap();
        assert_eq!(field.field_type, "number");
        assert!(!field.nullable);
        assert_eq!(field.default, Some(json!(0)));
        assert!(field.primary_key);

        assert_eq!(db.describe_table("users").unwrap(), vec![field]);
    }

    #[test]
    fn test_empty_string_default_is_none() {
        let db = setup();
        let field = db
            .create_field("users", "bio")
            .default_value("")
            .execute()
            .unwrap();
        assert_eq!(field.default, None);
    }

    #[test]
    fn test_blank_names_rejected() {
        let db = setup();
        let err = db.create_field("users", "").execute().unwrap_err();
        assert!(matches!(err, Error::Argument(ArgumentError::BlankFieldName)));
        let err = db.create_field(" ", "id").execute().unwrap_err();
        assert!(matches!(err, Error::Argument(ArgumentError::BlankTableName)));
    }

    #[test]
    fn test_duplicate_and_missing_table() {
        let db = setup();
        db.create_field("users", "id").execute().unwrap();
        let err = db.create_field("users", "id").execute().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        let err = db.create_field("orders", "id").execute().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
