use std::fmt;

pub mod json;
pub mod text;

pub use text::TextFormatter;

/// A single value collected for a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    /// `int32`, `sint32` and `sfixed32`.
    Int32(i32),
    /// `int64`, `sint64` and `sfixed64`.
    Int64(i64),
    /// `uint32` and `fixed32`.
    Uint32(u32),
    /// `uint64` and `fixed64`.
    Uint64(u64),
    Float(f32),
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
    Enum { name: String, number: i32 },
    Message(MessageValue),
    /// The entries of a repeated or map field, in input order.
    List(Vec<Value>),
}

impl Value {
    pub fn as_message(&self) -> Option<&MessageValue> {
        match self {
            Value::Message(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&TextFormatter::format_value(self))
    }
}

/// The structured value of one message: field name to value, in the order the
/// fields were entered. Fields the operator skipped are simply absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessageValue {
    type_name: String,
    map_entry: bool,
    fields: Vec<(String, Value)>,
}

impl MessageValue {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            map_entry: false,
            fields: Vec::new(),
        }
    }

    /// Builds one `key`/`value` record of a map field.
    pub fn map_entry(type_name: impl Into<String>, key: Value, value: Option<Value>) -> Self {
        let mut entry = Self {
            type_name: type_name.into(),
            map_entry: true,
            fields: vec![("key".to_string(), key)],
        };
        if let Some(value) = value {
            entry.fields.push(("value".to_string(), value));
        }
        entry
    }

    /// Fully-qualified name of the message type this value was built for.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is_map_entry(&self) -> bool {
        self.map_entry
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == field).map(|(_, v)| v)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Sets a field, replacing any earlier value for the same name.
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        let field = field.into();
        match self.fields.iter_mut().find(|(n, _)| *n == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for MessageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&TextFormatter::format_message(self))
    }
}
