//! Error types for all docstore operations.

use std::io;
use thiserror::Error;

/// Top-level error type for docstore operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Coarse classification of an [`Error`], independent of the variant detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing, blank, or mistyped input.
    Argument,
    /// Database or table absent.
    NotFound,
    /// Database, table, or field already exists.
    Conflict,
    /// Record or update field set rejected against the table's fields.
    Validation,
    /// The persistence provider failed.
    Persistence,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Argument(_) => ErrorKind::Argument,
            Error::Schema(e) => match e {
                SchemaError::DatabaseNotFound(_) | SchemaError::TableNotFound(_) => {
                    ErrorKind::NotFound
                }
                SchemaError::DatabaseAlreadyExists(_)
                | SchemaError::TableAlreadyExists(_)
                | SchemaError::FieldAlreadyExists { .. } => ErrorKind::Conflict,
            },
            Error::Validation(_) => ErrorKind::Validation,
            Error::Storage(_) => ErrorKind::Persistence,
        }
    }
}

#[derive(Debug, Error)]
pub enum ArgumentError {
    #[error("database name is missing")]
    BlankDatabaseName,

    #[error("table name is missing")]
    BlankTableName,

    #[error("field name is missing")]
    BlankFieldName,

    #[error("{0} must be a JSON object")]
    NotAnObject(&'static str),

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("no database was found with the name '{0}'")]
    DatabaseNotFound(String),

    #[error("database already exists: {0}")]
    DatabaseAlreadyExists(String),

    #[error("no table was found with the name '{0}'")]
    TableNotFound(String),

    #[error("table already exists: {0}")]
    TableAlreadyExists(String),

    #[error("field '{field}' already exists in table '{table}'")]
    FieldAlreadyExists { table: String, field: String },
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("table '{0}' has no fields declared")]
    NoFieldsDeclared(String),

    #[error("table '{table}' has no field named '{field}'")]
    UnknownField { table: String, field: String },

    #[error("table '{table}' declares {expected} fields, record supplies {actual}")]
    IncompleteRecord {
        table: String,
        expected: usize,
        actual: usize,
    },

    #[error("none of the fields to set are declared in table '{0}'")]
    NoUpdatableFields(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("storage key is locked: {0}")]
    Locked(String),

    #[error("provider failure: {0}")]
    Provider(String),
}

pub type Result<T> = std::result::Result<T, Error>;
