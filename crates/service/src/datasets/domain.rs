use std::sync::Arc;

use serde::Serialize;

use crate::errors::ServiceError;
use crate::tabular::Table;

/// Message returned when a requested filename was never uploaded.
pub const NOT_FOUND_MESSAGE: &str = "Arquivo não encontrado";

/// One uploaded file: the bytes exactly as received plus their parsed table.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    filename: String,
    raw: Vec<u8>,
    table: Table,
}

impl Dataset {
    pub fn parse(filename: impl Into<String>, raw: Vec<u8>) -> Result<Self, ServiceError> {
        let table = Table::from_csv_bytes(&raw)?;
        Ok(Self { filename: filename.into(), raw, table })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn table(&self) -> &Table {
        &self.table
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UploadSummary {
    pub message: String,
    pub rows: usize,
}

impl UploadSummary {
    pub fn new(filename: &str, rows: usize) -> Self {
        Self { message: format!("Arquivo {filename} carregado com sucesso!"), rows }
    }
}

/// Representation requested from `GET /api/data/{filename}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataFormat {
    #[default]
    Json,
    Csv,
}

impl DataFormat {
    /// Only the exact value `csv` selects raw CSV; anything else, or nothing, is JSON.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Outcome of a data lookup. A missing file is a normal result, not an error.
#[derive(Debug, Clone)]
pub enum DataLookup {
    Csv(Arc<Dataset>),
    Json(Arc<Dataset>),
    NotFound(&'static str),
}
