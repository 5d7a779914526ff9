//! Service layer for the tabular upload API.
//! - `tabular`: CSV parsing and per-column type inference.
//! - `storage`: the dataset store trait and its in-memory implementation.
//! - `datasets`: upload / list / retrieve operations used by the HTTP handlers.

pub mod errors;
pub mod tabular;
pub mod storage;
pub mod datasets;
