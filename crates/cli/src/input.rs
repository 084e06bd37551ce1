//! Record input: file-backed [`RecordSource`] implementations.

use std::fs;
use std::path::PathBuf;

use trellis_core::{Record, Value};
use trellis_engine::{LoadError, RecordSource};

/// Input file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Json,
    Csv,
}

/// Reads the full record batch from one file.
pub struct FileSource {
    pub path: PathBuf,
    pub format: Format,
}

impl RecordSource for FileSource {
    fn fetch(&self) -> Result<Vec<Record>, LoadError> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| LoadError::Source(format!("{}: {e}", self.path.display())))?;
        match self.format {
            Format::Json => records_from_json(&text),
            Format::Csv => records_from_csv(&text),
        }
    }
}

/// Parse a JSON record batch: either a top-level array of objects or an
/// object with a `data` array member (the service payload shape).
fn records_from_json(text: &str) -> Result<Vec<Record>, LoadError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| LoadError::Source(e.to_string()))?;

    let rows = match &value {
        serde_json::Value::Array(rows) => rows.as_slice(),
        serde_json::Value::Object(obj) => match obj.get("data").and_then(|d| d.as_array()) {
            Some(rows) => rows.as_slice(),
            None => {
                return Err(LoadError::Source(
                    "expected a JSON array or an object with a 'data' array".to_string(),
                ))
            }
        },
        _ => {
            return Err(LoadError::Source(
                "expected a JSON array or an object with a 'data' array".to_string(),
            ))
        }
    };

    // malformed rows are skipped, not fatal
    Ok(rows.iter().filter_map(Record::from_json).collect())
}

/// Parse a CSV record batch. The header row names the fields; cell text is
/// coerced to numbers and booleans where it parses cleanly.
fn records_from_csv(text: &str) -> Result<Vec<Record>, LoadError> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| LoadError::Source(e.to_string()))?
        .clone();

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(|e| LoadError::Source(e.to_string()))?;
        let mut record = Record::new(index as i64);
        for (header, cell) in headers.iter().zip(row.iter()) {
            let value = coerce_cell(cell);
            if header == "id" {
                if let Value::Number(n) = value {
                    record.id = n as i64;
                }
            }
            record.insert(header, value);
        }
        records.push(record);
    }
    Ok(records)
}

fn coerce_cell(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = cell.parse::<f64>() {
        return Value::Number(n);
    }
    match cell {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::Text(cell.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array_and_service_payload() {
        let array = r#"[{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]"#;
        let records = records_from_json(array).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, 2);

        let payload = r#"{"data": [{"id": 9, "name": "Z"}]}"#;
        let records = records_from_json(payload).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 9);

        assert!(records_from_json("42").is_err());
    }

    #[test]
    fn test_json_skips_malformed_rows() {
        let mixed = r#"[{"id": 1}, "stray", {"id": 2}]"#;
        let records = records_from_json(mixed).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_csv_coercion() {
        let text = "id,name,balance,verified,note\n7,Ana,120.5,true,\n8,Bo,90,false,ok\n";
        let records = records_from_csv(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 7);
        assert_eq!(records[0].value_of("balance"), Value::Number(120.5));
        assert_eq!(records[0].value_of("verified"), Value::Bool(true));
        assert_eq!(records[0].value_of("note"), Value::Null);
        assert_eq!(records[1].value_of("note"), Value::Text("ok".to_string()));
    }
}
