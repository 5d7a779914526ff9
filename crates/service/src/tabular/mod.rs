//! CSV → typed table conversion.
//!
//! The first CSV line supplies the column headers; every later line is a record.
//! Cell types are inferred per column, see [`infer`].

pub mod infer;

use std::collections::{HashMap, HashSet};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde_json::{Map, Value};

use crate::errors::ServiceError;
use infer::{infer_column, ColumnType};

/// One parsed row: column header → typed cell, in header order.
pub type Record = Map<String, Value>;

const UTF8_BOM: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    /// Decode `raw` as UTF-8 and parse it as CSV with a header line.
    pub fn from_csv_bytes(raw: &[u8]) -> Result<Self, ServiceError> {
        let text = std::str::from_utf8(raw)?;
        Self::from_csv_str(text)
    }

    pub fn from_csv_str(text: &str) -> Result<Self, ServiceError> {
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut rows = reader.records();
        let header_row = match rows.next() {
            Some(row) => row?,
            None => return Err(ServiceError::parse("no columns to parse from file")),
        };
        let headers = unique_headers(&header_row);

        let mut cells: Vec<StringRecord> = Vec::new();
        for row in rows {
            let row = row?;
            if is_blank(&row) {
                continue;
            }
            if row.len() > headers.len() {
                let line = row.position().map(|p| p.line()).unwrap_or_default();
                return Err(ServiceError::Parse(format!(
                    "expected {} fields in line {}, saw {}",
                    headers.len(),
                    line,
                    row.len()
                )));
            }
            cells.push(row);
        }

        let column_types: Vec<ColumnType> = (0..headers.len())
            .map(|idx| infer_column(cells.iter().map(|row| row.get(idx))))
            .collect();

        let records = cells
            .iter()
            .map(|row| {
                headers
                    .iter()
                    .zip(&column_types)
                    .enumerate()
                    .map(|(idx, (name, ty))| (name.clone(), ty.convert(row.get(idx))))
                    .collect::<Record>()
            })
            .collect();

        Ok(Self { headers, records })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Write the table back out as CSV. Nulls become empty fields.
    ///
    /// The output is row/column-equivalent to the parsed input, not byte-identical.
    pub fn to_csv(&self) -> Result<String, ServiceError> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for record in &self.records {
            writer.write_record(self.headers.iter().map(|h| cell_text(record.get(h))))?;
        }
        let bytes = writer.into_inner().map_err(|e| ServiceError::Write(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ServiceError::Write(e.to_string()))
    }
}

/// A line holding nothing but whitespace is not a record.
fn is_blank(row: &StringRecord) -> bool {
    row.iter().all(|field| field.trim().is_empty())
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Blank headers become `Unnamed: {idx}`; repeated names get `.1`, `.2`, ... suffixes.
fn unique_headers(row: &StringRecord) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(row.len());

    for (idx, raw) in row.iter().enumerate() {
        let name = if raw.is_empty() { format!("Unnamed: {idx}") } else { raw.to_string() };
        if used.insert(name.clone()) {
            out.push(name);
            continue;
        }
        let counter = counters.entry(name.clone()).or_insert(1);
        let renamed = loop {
            let candidate = format!("{name}.{counter}");
            *counter += 1;
            if !used.contains(&candidate) {
                break candidate;
            }
        };
        used.insert(renamed.clone());
        out.push(renamed);
    }
    out
}
