//! Shared builders for engine tests.

use trellis_core::{ColumnSpec, DataType, Record, Value};

/// Build a record with explicit field values.
pub fn record(id: i64, fields: &[(&str, Value)]) -> Record {
    let mut record = Record::new(id);
    record.insert("id", Value::Number(id as f64));
    for (name, value) in fields {
        record.insert(*name, value.clone());
    }
    record
}

/// Records with ids 0..n carrying one numeric field (`None` = null).
pub fn number_records(field: &str, values: &[Option<f64>]) -> Vec<Record> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let value = v.map(Value::Number).unwrap_or(Value::Null);
            record(i as i64, &[(field, value)])
        })
        .collect()
}

/// A five-column test catalog: the protected identity and name columns
/// plus country, date and balance.
pub fn test_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("id", "Id", DataType::Number)
            .with_width(70)
            .fixed_left()
            .protected(),
        ColumnSpec::new("name", "Name", DataType::Text)
            .with_width(150)
            .protected(),
        ColumnSpec::new("country", "Country", DataType::Text).with_width(150),
        ColumnSpec::new("date", "Date", DataType::Date).with_width(150),
        ColumnSpec::new("balance", "Balance", DataType::Number).with_width(100),
    ]
}

/// A small customer-shaped data set for grouping tests.
pub fn customer_records() -> Vec<Record> {
    let row = |id: i64, country: &str, status: &str, balance: f64| {
        record(
            id,
            &[
                ("country", Value::Text(country.to_string())),
                ("status", Value::Text(status.to_string())),
                ("balance", Value::Number(balance)),
            ],
        )
    };
    vec![
        row(1, "Germany", "new", 70663.0),
        row(2, "Peru", "negotiation", 50041.0),
        row(3, "Germany", "qualified", 13089.0),
        row(4, "Peru", "new", 34521.0),
        row(5, "Chile", "new", 8820.0),
        row(6, "Germany", "new", 92533.0),
    ]
}
