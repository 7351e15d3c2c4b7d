use super::{MessageValue, Value};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Number, json};

impl MessageValue {
    /// Renders the message as proto3-style JSON, keeping the schema's field names.
    ///
    /// Map fields become JSON objects keyed by the entry key, bytes are base64
    /// encoded and enums are written by symbol name.
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = Map::new();
        for (name, value) in self.fields() {
            object.insert(name.to_string(), value_to_json(value));
        }
        serde_json::Value::Object(object)
    }
}

impl Value {
    pub fn to_json(&self) -> serde_json::Value {
        value_to_json(self)
    }
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Bool(b) => json!(b),
        Value::Int32(n) => json!(n),
        Value::Uint32(n) => json!(n),
        // 64-bit integers are strings so JavaScript readers keep every digit.
        Value::Int64(n) => json!(n.to_string()),
        Value::Uint64(n) => json!(n.to_string()),
        // Widened through its shortest decimal form, so 0.1f32 stays 0.1.
        Value::Float(n) => float_to_json(n.to_string().parse().unwrap_or(f64::from(*n))),
        Value::Double(n) => float_to_json(*n),
        Value::String(s) => json!(s),
        Value::Bytes(bytes) => json!(STANDARD.encode(bytes)),
        Value::Enum { name, .. } => json!(name),
        Value::Message(m) => m.to_json(),
        Value::List(items) if is_map(items) => {
            let mut object = Map::new();
            for entry in items.iter().filter_map(Value::as_message) {
                let key = match entry.get("key") {
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => super::TextFormatter::format_value(other),
                    None => String::new(),
                };
                let value = entry
                    .get("value")
                    .map(value_to_json)
                    .unwrap_or(serde_json::Value::Null);
                object.insert(key, value);
            }
            serde_json::Value::Object(object)
        }
        Value::List(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
    }
}

fn float_to_json(n: f64) -> serde_json::Value {
    match Number::from_f64(n) {
        Some(number) => serde_json::Value::Number(number),
        None if n.is_nan() => json!("NaN"),
        None if n > 0.0 => json!("Infinity"),
        None => json!("-Infinity"),
    }
}

fn is_map(items: &[Value]) -> bool {
    !items.is_empty()
        && items
            .iter()
            .all(|item| item.as_message().is_some_and(MessageValue::is_map_entry))
}
