use super::{MessageValue, Value};
use itertools::Itertools;

/// Renders collected values in compact protobuf text format:
/// `person:<name:"eriri"> tags:"a" tags:"b" type:PHILOSOPHY`.
pub struct TextFormatter;

impl TextFormatter {
    pub fn format_message(message: &MessageValue) -> String {
        message
            .fields()
            .flat_map(|(name, value)| match value {
                // Repeated and map fields repeat their key once per entry.
                Value::List(items) => items
                    .iter()
                    .map(|item| format!("{}:{}", name, Self::format_value(item)))
                    .collect::<Vec<_>>(),
                other => vec![format!("{}:{}", name, Self::format_value(other))],
            })
            .join(" ")
    }

    pub fn format_value(value: &Value) -> String {
        match value {
            Value::Bool(b) => b.to_string(),
            Value::Int32(n) => n.to_string(),
            Value::Int64(n) => n.to_string(),
            Value::Uint32(n) => n.to_string(),
            Value::Uint64(n) => n.to_string(),
            Value::Float(n) => Self::format_float(f64::from(*n), n.to_string()),
            Value::Double(n) => Self::format_float(*n, n.to_string()),
            Value::String(s) => Self::quote(s.as_bytes()),
            Value::Bytes(bytes) => Self::quote(bytes),
            Value::Enum { name, .. } => name.clone(),
            Value::Message(m) => format!("<{}>", Self::format_message(m)),
            Value::List(items) => format!("[{}]", items.iter().map(Self::format_value).join(", ")),
        }
    }

    /// `finite` is the shortest rendering in the field's own width.
    fn format_float(n: f64, finite: String) -> String {
        if n.is_nan() {
            "nan".to_string()
        } else if n.is_infinite() {
            let sign = if n > 0.0 { "" } else { "-" };
            format!("{}inf", sign)
        } else {
            finite
        }
    }

    /// Quotes a string or byte sequence with C-style escapes; bytes outside
    /// printable ASCII are written as three-digit octal escapes.
    fn quote(bytes: &[u8]) -> String {
        let mut out = String::with_capacity(bytes.len() + 2);
        out.push('"');
        for &b in bytes {
            match b {
                b'"' => out.push_str("\\\""),
                b'\\' => out.push_str("\\\\"),
                b'\n' => out.push_str("\\n"),
                b'\r' => out.push_str("\\r"),
                b'\t' => out.push_str("\\t"),
                0x20..=0x7e => out.push(b as char),
                _ => out.push_str(&format!("\\{:03o}", b)),
            }
        }
        out.push('"');
        out
    }
}
