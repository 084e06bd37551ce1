use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Data type declared by a column descriptor. Drives comparison and key
/// derivation; `Select` columns hold plain text constrained by the UI.
///
/// Serialized names match the descriptor catalog format
/// (`string`, `number`, `date`, `boolean`, `select`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    #[serde(rename = "string")]
    Text,
    Number,
    Date,
    #[serde(rename = "boolean")]
    Bool,
    Select,
}

/// A single field value carried by a record.
///
/// `Object` keeps the raw JSON members so nested lookups
/// (e.g. `representative.name`) and name-based group keys work without
/// flattening on load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    Object(serde_json::Map<String, serde_json::Value>),
}

impl Value {
    /// Convert a raw JSON value into a field value. Dates arrive as text
    /// and are re-typed later, once the column catalog is known.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => Value::Text(s.clone()),
            serde_json::Value::Object(map) => Value::Object(map.clone()),
            // Arrays have no column semantics; keep their serialized form.
            serde_json::Value::Array(_) => Value::Text(value.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// String coercion used for group keys and fallback comparison.
    /// Mirrors display coercion except that null is handled by callers.
    pub fn text_key(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Text(s) => s.clone(),
            Value::Number(n) => format_number(*n),
            Value::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::Object(map) => object_key(map),
        }
    }

    /// Human-readable form for headless output. Null renders as "N/A".
    pub fn display(&self) -> String {
        match self {
            Value::Null => "N/A".to_string(),
            other => other.text_key(),
        }
    }
}

/// Format a number the way the grid displays it: integers without a
/// trailing fraction, everything else in plain decimal form.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Key for an object-valued field: its `name` member when present,
/// otherwise the canonical JSON serialization.
fn object_key(map: &serde_json::Map<String, serde_json::Value>) -> String {
    match map.get("name").and_then(|v| v.as_str()) {
        Some(name) => name.to_string(),
        None => serde_json::Value::Object(map.clone()).to_string(),
    }
}

/// Parse a date from its loaded text form: ISO `%Y-%m-%d`, falling back
/// to the date part of an RFC 3339 timestamp.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_primitives() {
        assert_eq!(Value::from_json(&serde_json::Value::Null), Value::Null);
        assert_eq!(Value::from_json(&serde_json::json!(true)), Value::Bool(true));
        assert_eq!(Value::from_json(&serde_json::json!(42)), Value::Number(42.0));
        assert_eq!(
            Value::from_json(&serde_json::json!("hello")),
            Value::Text("hello".to_string())
        );
    }

    #[test]
    fn test_number_text_key_trims_integer_fraction() {
        assert_eq!(Value::Number(42.0).text_key(), "42");
        assert_eq!(Value::Number(42.5).text_key(), "42.5");
    }

    #[test]
    fn test_object_key_prefers_name_member() {
        let obj = serde_json::json!({"name": "Amy Elsner", "image": "amyelsner.png"});
        let value = Value::from_json(&obj);
        assert_eq!(value.text_key(), "Amy Elsner");

        let anon = serde_json::json!({"code": 7});
        let value = Value::from_json(&anon);
        assert_eq!(value.text_key(), "{\"code\":7}");
    }

    #[test]
    fn test_display_null_placeholder() {
        assert_eq!(Value::Null.display(), "N/A");
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(
            parse_date("2015-09-13"),
            NaiveDate::from_ymd_opt(2015, 9, 13)
        );
        assert_eq!(
            parse_date("2015-09-13T08:30:00Z"),
            NaiveDate::from_ymd_opt(2015, 9, 13)
        );
        assert_eq!(parse_date("not a date"), None);
    }
}
