//! # docstore
//!
//! An embedded, schema-flexible record store persisted as one JSON document.
//!
//! A database is a single document holding tables; each table declares
//! fields and holds rows as flat JSON objects. Every operation loads the
//! whole document from a [`PersistenceProvider`](storage::PersistenceProvider),
//! applies the change in memory, and writes the whole document back.
//!
//! ## Quick Start
//!
//! ```
//! use docstore_core::api::Database;
//! use serde_json::json;
//!
//! let db = Database::in_memory("shop").unwrap();
//! db.create_database().unwrap();
//! db.create_table("users").unwrap();
//! db.create_field("users", "id").field_type("number").primary_key(true).execute().unwrap();
//! db.create_field("users", "name").field_type("string").execute().unwrap();
//!
//! db.insert("users", json!({"id": 1, "name": "Alice"})).unwrap();
//!
//! let names = db.select("users", &["name"]).unwrap();
//! assert_eq!(names[0]["name"], "Alice");
//!
//! db.update("users", json!({"id": 1}), json!({"name": "Alicia"})).unwrap();
//! db.delete("users", json!({"id": 1})).unwrap();
//! assert!(db.scan("users").unwrap().is_empty());
//! ```

pub mod api;
pub mod catalog;
pub mod error;
pub mod query;
pub mod storage;
pub mod types;
