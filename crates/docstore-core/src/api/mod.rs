//! Public API: the database handle and its builders.

pub mod builders;
pub mod database;

pub use builders::FieldBuilder;
pub use database::Database;
