//! Row-level query engine: conditions, projections, assignments, and the
//! insert/select/update/delete operations built on them.

pub mod condition;
pub mod ops;
pub mod projection;
pub mod update;
