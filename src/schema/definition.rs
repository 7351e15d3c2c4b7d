use crate::error::SchemaError;
use serde::{Deserialize, Serialize};

/// A serializable description of a schema, the on-disk format accepted by the CLI.
///
/// Type names inside a definition may be given relative to `package`
/// (`"Book"`, `"E.M1Entry"`) or fully qualified (`"library.Book"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDefinition {
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub messages: Vec<MessageDefinition>,
    #[serde(default)]
    pub enums: Vec<EnumDefinition>,
}

/// One message type. Field order is prompt order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageDefinition {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    /// Names of the oneof groups; fields refer to them by index.
    #[serde(default)]
    pub oneofs: Vec<String>,
    /// Marks the synthetic `key`/`value` wrapper generated for a map field.
    #[serde(default, alias = "mapEntry")]
    pub map_entry: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default)]
    pub number: u32,
    /// A scalar name (`"string"`, `"int32"`, ...) or an enum/message reference.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub repeated: bool,
    #[serde(default, alias = "oneofIndex")]
    pub oneof_index: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnumDefinition {
    pub name: String,
    pub values: Vec<EnumValueDefinition>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnumValueDefinition {
    pub name: String,
    #[serde(default)]
    pub number: i32,
}

impl SchemaDefinition {
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(json).map_err(|e| SchemaError::JsonParseError(e.to_string()))
    }

    /// Load a definition from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SchemaError::JsonParseError(format!("Could not read file '{}': {}", path, e))
        })?;
        Self::from_json(&content)
    }
}
