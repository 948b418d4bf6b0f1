//! Table catalog: table and field definitions, and the existence checks that
//! guard them.

pub mod ops;
pub mod validate;

pub use validate::{is_field_exists, is_table_exists};
