//! Customer record scanner: load a customer CSV into an in-memory table,
//! check the required fields for missing values, and answer a small set of
//! read-only queries (earliest/latest check-in, sorted names, sorted jobs).

pub mod load;
pub mod query;
pub mod shell;
pub mod table;
pub mod validate;
