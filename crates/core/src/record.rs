use std::collections::HashMap;

use crate::value::Value;

static NULL_VALUE: Value = Value::Null;

/// A single normalized row of grid data: an identity, a selection flag,
/// and a mapping from field name to value.
///
/// Records are owned by the grid facade. They are created on load and
/// mutated only through selection operations; everything else treats them
/// as read-only input.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: i64,
    pub selected: bool,
    fields: HashMap<String, Value>,
}

impl Record {
    pub fn new(id: i64) -> Self {
        Record {
            id,
            selected: false,
            fields: HashMap::new(),
        }
    }

    /// Build a record from one JSON object. Returns `None` for non-object
    /// values (malformed rows are skipped, not fatal).
    ///
    /// The `id` member becomes the record identity (0 when absent) and the
    /// `selected` member seeds the selection flag; every other member is
    /// converted into a field value. `id` is also kept as a regular field
    /// so the identity column can display it.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let obj = value.as_object()?;

        let id = obj.get("id").and_then(|v| v.as_i64()).unwrap_or(0);
        let selected = obj
            .get("selected")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        let mut fields = HashMap::with_capacity(obj.len());
        for (name, member) in obj {
            if name == "selected" {
                continue;
            }
            fields.insert(name.clone(), Value::from_json(member));
        }

        Some(Record {
            id,
            selected,
            fields,
        })
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.fields.get_mut(field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Value of a field, `Null` when absent. Dotted paths (`a.b`) traverse
    /// object-valued fields.
    pub fn value_of(&self, field: &str) -> Value {
        if let Some((head, rest)) = field.split_once('.') {
            return match self.fields.get(head) {
                Some(Value::Object(map)) => lookup_path(map, rest),
                _ => Value::Null,
            };
        }
        self.fields.get(field).cloned().unwrap_or(Value::Null)
    }

    /// Borrowing lookup for plain (non-dotted) field names.
    pub fn value_ref(&self, field: &str) -> &Value {
        self.fields.get(field).unwrap_or(&NULL_VALUE)
    }
}

// Walk one segment at a time; any miss or non-object yields Null.
fn lookup_path(map: &serde_json::Map<String, serde_json::Value>, path: &str) -> Value {
    let mut segments = path.split('.');
    let first = match segments.next() {
        Some(s) => s,
        None => return Value::Null,
    };
    let mut current = match map.get(first) {
        Some(v) => v,
        None => return Value::Null,
    };
    for segment in segments {
        match current.get(segment) {
            Some(next) => current = next,
            None => return Value::Null,
        }
    }
    Value::from_json(current)
}
