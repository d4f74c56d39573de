// src/models/server.rs
use serde::Serialize;
use serde_json::Value;

/// One page of the upstream listing. `data` stays a raw value so an absent or
/// non-array payload can still be represented and filtered to nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub data: Value,
    pub next_page_cursor: Option<Value>,
    pub previous_page_cursor: Option<Value>,
}

impl Page {
    pub fn from_value(mut raw: Value) -> Self {
        let (data, next, previous) = match raw.as_object_mut() {
            Some(obj) => (
                obj.get_mut("data").map(Value::take).unwrap_or(Value::Null),
                obj.get_mut("nextPageCursor").map(Value::take),
                obj.get_mut("previousPageCursor").map(Value::take),
            ),
            None => (Value::Null, None, None),
        };

        Self {
            data,
            next_page_cursor: next.filter(is_truthy),
            previous_page_cursor: previous.filter(is_truthy),
        }
    }
}

/// Body of a successful `/servers` response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredPage {
    pub data: Vec<Value>,
    pub next_page_cursor: Option<Value>,
    pub previous_page_cursor: Option<Value>,
}

/// JavaScript truthiness for a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
