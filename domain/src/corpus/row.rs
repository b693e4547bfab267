//! Spreadsheet rows as exported from the workbook

use crate::core::error::DomainError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of a sheet: column header -> cell value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetRow(pub IndexMap<String, Value>);

/// A named sheet and its rows in file order
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<SheetRow>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<SheetRow>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

/// Position of a row, for error reporting
#[derive(Debug, Clone, Copy)]
pub(crate) struct RowRef<'a> {
    pub sheet: &'a str,
    pub index: usize,
}

impl RowRef<'_> {
    fn missing(&self, column: &str) -> DomainError {
        DomainError::MissingColumn {
            sheet: self.sheet.to_string(),
            row: self.index + 1,
            column: column.to_string(),
        }
    }

    /// Question id of the row: 1-based row number
    pub fn id(&self) -> Result<u32, DomainError> {
        self.index
            .checked_add(1)
            .and_then(|row| u32::try_from(row).ok())
            .ok_or_else(|| DomainError::RowIdOverflow {
                sheet: self.sheet.to_string(),
                row: self.index,
            })
    }

    fn empty(&self, column: &str) -> DomainError {
        DomainError::EmptyCell {
            sheet: self.sheet.to_string(),
            row: self.index + 1,
            column: column.to_string(),
        }
    }

    fn invalid(&self, column: &str, expected: &'static str) -> DomainError {
        DomainError::InvalidCell {
            sheet: self.sheet.to_string(),
            row: self.index + 1,
            column: column.to_string(),
            expected,
        }
    }
}

impl SheetRow {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub(crate) fn value(&self, at: RowRef<'_>, column: &str) -> Result<&Value, DomainError> {
        self.get(column).ok_or_else(|| at.missing(column))
    }

    /// Cell as option/source text; numbers are rendered as written
    pub(crate) fn text(&self, at: RowRef<'_>, column: &str) -> Result<String, DomainError> {
        match self.value(at, column)? {
            Value::String(s) => Ok(s.trim().to_string()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Null => Err(at.empty(column)),
            _ => Err(at.invalid(column, "text")),
        }
    }

    /// Cell of a correctness column; an empty cell is false
    pub(crate) fn judge(&self, at: RowRef<'_>, column: &str) -> Result<bool, DomainError> {
        match self.value(at, column)? {
            Value::Null => Ok(false),
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => Ok(n.as_f64().is_some_and(|v| v != 0.0)),
            Value::String(s) => parse_judge(s).ok_or_else(|| at.invalid(column, "a judgement")),
            _ => Err(at.invalid(column, "a judgement")),
        }
    }
}

fn parse_judge(s: &str) -> Option<bool> {
    match s.trim() {
        "1" | "对" | "正确" | "是" | "√" | "✓" => Some(true),
        "0" | "错" | "错误" | "否" | "×" | "✗" | "" => Some(false),
        other if other.eq_ignore_ascii_case("true") => Some(true),
        other if other.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}
