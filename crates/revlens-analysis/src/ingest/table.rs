//! Untyped tabular input as handed over by the I/O shell.

use std::io::Read;

use revlens_core::errors::ValidationError;
use serde_json::Value;

const UTF8_BOM: char = '\u{feff}';

/// Header row plus string cells. `None` marks a missing cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    /// Read a UTF-8 CSV document with a header row.
    ///
    /// A leading byte-order mark is ignored, header names are trimmed, and
    /// empty cells become `None`. Short rows are padded with `None`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ValidationError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()
            .map_err(malformed)?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let h = if i == 0 { h.trim_start_matches(UTF8_BOM) } else { h };
                h.trim().to_string()
            })
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record.map_err(malformed)?;
            let mut row: Vec<Option<String>> = record
                .iter()
                .take(headers.len())
                .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                .collect();
            row.resize(headers.len(), None);
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Build from a JSON array of flat objects, the shape an HTTP shell
    /// typically receives. Columns are taken in first-seen key order.
    pub fn from_json_records(value: &Value) -> Result<Self, ValidationError> {
        let records = value.as_array().ok_or_else(|| ValidationError::MalformedTable {
            message: "expected a JSON array of records".to_string(),
        })?;

        let mut headers: Vec<String> = Vec::new();
        for record in records {
            let object = record.as_object().ok_or_else(|| ValidationError::MalformedTable {
                message: "every record must be a JSON object".to_string(),
            })?;
            for key in object.keys() {
                if !headers.iter().any(|h| h == key) {
                    headers.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .filter_map(Value::as_object)
            .map(|object| {
                headers
                    .iter()
                    .map(|h| object.get(h).and_then(json_cell))
                    .collect()
            })
            .collect();

        Ok(Self { headers, rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

fn json_cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn malformed(e: csv::Error) -> ValidationError {
    ValidationError::MalformedTable {
        message: e.to_string(),
    }
}
