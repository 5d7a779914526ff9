//! Dataset upload/list/retrieve operations.

pub mod domain;
pub mod service;

pub use domain::{DataFormat, DataLookup, Dataset, UploadSummary, NOT_FOUND_MESSAGE};
pub use service::DatasetService;
