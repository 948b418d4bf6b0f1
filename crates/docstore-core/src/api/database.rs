use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::catalog;
use crate::error::{ArgumentError, Error, SchemaError};
use crate::query;
use crate::storage::codec::{decode_document, encode_document};
use crate::storage::{MemoryProvider, PersistenceProvider};
use crate::types::{DatabaseDocument, FieldDefinition, Record};

use super::builders::FieldBuilder;

struct DatabaseInner {
    name: String,
    provider: Arc<dyn PersistenceProvider>,
}

/// A handle on one named database inside a persistence provider.
///
/// The handle holds no document state. Every operation loads the whole
/// document, checks it, mutates a private copy, and writes the whole document
/// back; read-only operations skip the write. Two handles over the same
/// provider and name do not coordinate: the later write wins.
///
/// `Database` is cheaply clonable (`Arc`-based) and `Send + Sync`.
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    /// Bind `name` to `provider`. Fails if the name is blank.
    pub fn new(name: &str, provider: Arc<dyn PersistenceProvider>) -> Result<Self, Error> {
        if name.trim().is_empty() {
            return Err(ArgumentError::BlankDatabaseName.into());
        }
        Ok(Self {
            inner: Arc::new(DatabaseInner {
                name: name.to_string(),
                provider,
            }),
        })
    }

    /// Bind `name` to a fresh, private [`MemoryProvider`].
    pub fn in_memory(name: &str) -> Result<Self, Error> {
        Self::new(name, Arc::new(MemoryProvider::new()))
    }

    /// The database name, which is also its storage key.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    // -----------------------------------------------------------------------
    // Database lifecycle
    // -----------------------------------------------------------------------

    /// Persist an empty document. Fails if a database already exists.
    pub fn create_database(&self) -> Result<(), Error> {
        if self.load()?.is_some() {
            return Err(SchemaError::DatabaseAlreadyExists(self.name().to_string()).into());
        }
        self.persist(&DatabaseDocument::default())?;
        debug!(database = self.name(), "database created");
        Ok(())
    }

    /// Remove the stored document. Fails if no database exists.
    pub fn drop_database(&self) -> Result<(), Error> {
        self.load_existing()?;
        self.inner.provider.remove(self.name())?;
        debug!(database = self.name(), "database dropped");
        Ok(())
    }

    /// Whether a well-formed document is stored under this name.
    pub fn database_exists(&self) -> Result<bool, Error> {
        Ok(self.load()?.is_some())
    }

    // -----------------------------------------------------------------------
    // Tables
    // -----------------------------------------------------------------------

    /// Whether a table named `name` exists.
    pub fn table_exists(&self, name: &str) -> Result<bool, Error> {
        require_table_name(name)?;
        self.read(|doc| Ok(catalog::is_table_exists(&doc.tables, name)))
    }

    /// Create an empty table.
    pub fn create_table(&self, name: &str) -> Result<(), Error> {
        require_table_name(name)?;
        self.transact(|doc| catalog::ops::create_table(doc, name).map(|_| ()))?;
        debug!(database = self.name(), table = name, "table created");
        Ok(())
    }

    /// Drop a table with all its fields and rows.
    pub fn drop_table(&self, name: &str) -> Result<(), Error> {
        require_table_name(name)?;
        self.transact(|doc| catalog::ops::drop_table(doc, name).map(|_| ()))?;
        debug!(database = self.name(), table = name, "table dropped");
        Ok(())
    }

    /// List all table names in declaration order.
    pub fn list_tables(&self) -> Result<Vec<String>, Error> {
        self.read(|doc| Ok(catalog::ops::list_tables(doc)))
    }

    /// The field definitions declared on a table.
    pub fn describe_table(&self, name: &str) -> Result<Vec<FieldDefinition>, Error> {
        require_table_name(name)?;
        self.read(|doc| Ok(catalog::ops::get_table(doc, name)?.fields.clone()))
    }

    // -----------------------------------------------------------------------
    // Fields
    // -----------------------------------------------------------------------

    /// Declare a field. Options default to nullable, no type, no default,
    /// not a primary key.
    pub fn create_field(&self, table: &str, name: &str) -> FieldBuilder<'_> {
        FieldBuilder::new(self, table.to_string(), name.to_string())
    }

    /// Remove a field definition and strip the key from every row.
    pub fn drop_field(&self, table: &str, name: &str) -> Result<(), Error> {
        require_table_name(table)?;
        let purged = self.transact(|doc| catalog::ops::drop_field(doc, table, name))?;
        debug!(
            database = self.name(),
            table,
            field = name,
            purged,
            "field dropped"
        );
        Ok(())
    }

    pub(crate) fn add_field(
        &self,
        table: &str,
        field: FieldDefinition,
    ) -> Result<FieldDefinition, Error> {
        require_table_name(table)?;
        if field.name.trim().is_empty() {
            return Err(ArgumentError::BlankFieldName.into());
        }
        let created = self.transact(|doc| catalog::ops::create_field(doc, table, field))?;
        debug!(database = self.name(), table, field = %created.name, "field created");
        Ok(created)
    }

    // -----------------------------------------------------------------------
    // Rows
    // -----------------------------------------------------------------------

    /// Insert a record supplying every declared field and nothing else.
    ///
    /// Returns the stored record.
    pub fn insert(&self, table: &str, fields: Value) -> Result<Record, Error> {
        require_table_name(table)?;
        let record = object_arg(fields, "fields")?;
        if record.is_empty() {
            return Err(ArgumentError::Empty("fields").into());
        }
        let stored = self.transact(|doc| query::ops::insert(doc, table, record))?;
        debug!(database = self.name(), table, "record inserted");
        Ok(stored)
    }

    /// One `{field: value}` entry per requested field per row carrying it.
    pub fn select<S: AsRef<str>>(
        &self,
        table: &str,
        field_names: &[S],
    ) -> Result<Vec<Record>, Error> {
        require_table_name(table)?;
        self.read(|doc| query::ops::select(doc, table, field_names))
    }

    /// Every row of the table.
    pub fn scan(&self, table: &str) -> Result<Vec<Record>, Error> {
        require_table_name(table)?;
        self.read(|doc| query::ops::scan(doc, table))
    }

    /// Overwrite `fields` on rows whose values equal every key of `condition`.
    ///
    /// Returns the number of matching rows, not a success flag. Zero means
    /// nothing matched.
    pub fn update(&self, table: &str, condition: Value, fields: Value) -> Result<usize, Error> {
        require_table_name(table)?;
        let condition = object_arg(condition, "condition")?;
        let assignments = object_arg(fields, "fields")?;
        let matched =
            self.transact(|doc| query::ops::update(doc, table, &condition, &assignments))?;
        debug!(database = self.name(), table, matched, "records updated");
        Ok(matched)
    }

    /// Remove rows where any key of `condition` equals the row's value.
    ///
    /// Returns the number of rows removed, not a success flag. Zero means
    /// nothing matched.
    pub fn delete(&self, table: &str, condition: Value) -> Result<usize, Error> {
        require_table_name(table)?;
        let condition = object_arg(condition, "condition")?;
        let removed = self.transact(|doc| query::ops::delete(doc, table, &condition))?;
        debug!(database = self.name(), table, removed, "records deleted");
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Load / persist cycle
    // -----------------------------------------------------------------------

    /// Load, mutate, and persist the document. Nothing is written if `f` fails.
    pub(crate) fn transact<T, F>(&self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut DatabaseDocument) -> Result<T, Error>,
    {
        let mut doc = self.load_existing()?;
        let result = f(&mut doc)?;
        self.persist(&doc)?;
        Ok(result)
    }

    /// Load the document and run a read-only closure against it.
    pub(crate) fn read<T, F>(&self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&DatabaseDocument) -> Result<T, Error>,
    {
        let doc = self.load_existing()?;
        f(&doc)
    }

    fn load(&self) -> Result<Option<DatabaseDocument>, Error> {
        let blob = self.inner.provider.get(self.name())?;
        Ok(decode_document(self.name(), blob.as_deref()))
    }

    fn load_existing(&self) -> Result<DatabaseDocument, Error> {
        self.load()?
            .ok_or_else(|| SchemaError::DatabaseNotFound(self.name().to_string()).into())
    }

    fn persist(&self, doc: &DatabaseDocument) -> Result<(), Error> {
        let blob = encode_document(doc)?;
        self.inner.provider.set(self.name(), &blob)?;
        Ok(())
    }
}

fn require_table_name(name: &str) -> Result<(), Error> {
    if name.trim().is_empty() {
        return Err(ArgumentError::BlankTableName.into());
    }
    Ok(())
}

fn object_arg(value: Value, what: &'static str) -> Result<Record, Error> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ArgumentError::NotAnObject(what).into()),
    }
}
