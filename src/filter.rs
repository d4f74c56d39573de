// src/filter.rs
use serde_json::Value;
use crate::models::server::is_truthy;

/// Largest `maxPlayers` a kept server may advertise.
pub const MAX_SERVER_CAPACITY: f64 = 8.0;

/// Keeps the records of one upstream page that have at most `max_playing` players,
/// a capacity of at most eight and a string `id`. Anything that is not an array
/// filters to nothing. Input order is preserved.
pub fn filter_servers(data: &Value, max_playing: i64) -> Vec<Value> {
    let records = match data.as_array() {
        Some(records) => records,
        None => return Vec::new(),
    };

    records
        .iter()
        .filter(|record| is_eligible(record, max_playing))
        .cloned()
        .collect()
}

pub fn is_eligible(record: &Value, max_playing: i64) -> bool {
    // Falsy fields collapse to 0 before conversion, so a missing `playing` counts as empty.
    let playing = to_number(&or_zero(record.get("playing")));
    let max_players = to_number(&or_zero(record.get("maxPlayers")));

    playing.is_finite()
        && max_players.is_finite()
        && playing < (max_playing as f64) + 1.0
        && max_players <= MAX_SERVER_CAPACITY
        && record.get("id").map_or(false, Value::is_string)
}

fn or_zero(field: Option<&Value>) -> Value {
    match field {
        Some(v) if is_truthy(v) => v.clone(),
        _ => Value::from(0),
    }
}

/// Numeric conversion with JavaScript `Number()` semantics; NaN when not convertible.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => if *b { 1.0 } else { 0.0 },
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => string_to_number(s),
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [Value::Null] => 0.0,
            [single @ (Value::Number(_) | Value::String(_) | Value::Array(_))] => to_number(single),
            // `[true]` and `[{}]` stringify to non-numeric text.
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

fn string_to_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u128::from_str_radix(&s[2..], radix).map_or(f64::NAN, |v| v as f64);
    }

    let decimal_chars = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal_chars {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}
