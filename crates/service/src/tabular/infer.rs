//! Per-column type inference for parsed CSV cells.
//!
//! A column's type is decided from its non-empty cells only:
//! all `i64` → [`ColumnType::Integer`], else all finite `f64` → [`ColumnType::Float`],
//! else all `true`/`false` (any case) → [`ColumnType::Boolean`], else [`ColumnType::String`].
//! Empty cells become `null` whatever the column type.

use serde_json::{Number, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// No non-empty cell was seen.
    Empty,
    Integer,
    Float,
    Boolean,
    String,
}

#[derive(Debug, Clone, Copy)]
struct Candidates {
    seen: bool,
    integer: bool,
    float: bool,
    boolean: bool,
}

impl Candidates {
    fn new() -> Self {
        Self { seen: false, integer: true, float: true, boolean: true }
    }

    fn observe(&mut self, cell: &str) {
        self.seen = true;
        let trimmed = cell.trim();
        if self.integer && trimmed.parse::<i64>().is_err() {
            self.integer = false;
        }
        if self.float && parse_finite(trimmed).is_none() {
            self.float = false;
        }
        if self.boolean && parse_bool(trimmed).is_none() {
            self.boolean = false;
        }
    }

    fn resolve(self) -> ColumnType {
        if !self.seen {
            ColumnType::Empty
        } else if self.integer {
            ColumnType::Integer
        } else if self.float {
            ColumnType::Float
        } else if self.boolean {
            ColumnType::Boolean
        } else {
            ColumnType::String
        }
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Infer the type of one column. `None` cells are padding for short rows.
pub fn infer_column<'a, I>(cells: I) -> ColumnType
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut candidates = Candidates::new();
    for cell in cells.into_iter().flatten() {
        if !cell.is_empty() {
            candidates.observe(cell);
        }
    }
    candidates.resolve()
}

impl ColumnType {
    /// Convert a raw cell into its JSON value under this column type.
    pub fn convert(self, cell: Option<&str>) -> Value {
        let raw = match cell {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Value::Null,
        };
        let trimmed = raw.trim();
        match self {
            ColumnType::Empty => Value::Null,
            ColumnType::Integer => trimmed.parse::<i64>().map(Value::from).unwrap_or(Value::Null),
            ColumnType::Float => parse_finite(trimmed)
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ColumnType::Boolean => parse_bool(trimmed).map(Value::Bool).unwrap_or(Value::Null),
            ColumnType::String => Value::String(raw.to_string()),
        }
    }
}
