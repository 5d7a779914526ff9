//! Storage abstractions for the service layer.
//!
//! Datasets live for the process lifetime only; there is no file or database backend.

pub mod dataset_store;

pub use dataset_store::{DatasetStore, MemoryDatasetStore};
