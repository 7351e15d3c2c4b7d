use std::fmt;

/// Scalar wire types a field can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,
}

impl ScalarType {
    /// Looks up a scalar type by its schema-language name (`"int32"`, `"string"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let scalar = match name {
            "double" => ScalarType::Double,
            "float" => ScalarType::Float,
            "int32" => ScalarType::Int32,
            "int64" => ScalarType::Int64,
            "uint32" => ScalarType::Uint32,
            "uint64" => ScalarType::Uint64,
            "sint32" => ScalarType::Sint32,
            "sint64" => ScalarType::Sint64,
            "fixed32" => ScalarType::Fixed32,
            "fixed64" => ScalarType::Fixed64,
            "sfixed32" => ScalarType::Sfixed32,
            "sfixed64" => ScalarType::Sfixed64,
            "bool" => ScalarType::Bool,
            "string" => ScalarType::String,
            "bytes" => ScalarType::Bytes,
            _ => return None,
        };
        Some(scalar)
    }

    /// The descriptor type name shown in prompts, e.g. `TYPE_STRING`.
    pub fn descriptor_name(&self) -> &'static str {
        match self {
            ScalarType::Double => "TYPE_DOUBLE",
            ScalarType::Float => "TYPE_FLOAT",
            ScalarType::Int32 => "TYPE_INT32",
            ScalarType::Int64 => "TYPE_INT64",
            ScalarType::Uint32 => "TYPE_UINT32",
            ScalarType::Uint64 => "TYPE_UINT64",
            ScalarType::Sint32 => "TYPE_SINT32",
            ScalarType::Sint64 => "TYPE_SINT64",
            ScalarType::Fixed32 => "TYPE_FIXED32",
            ScalarType::Fixed64 => "TYPE_FIXED64",
            ScalarType::Sfixed32 => "TYPE_SFIXED32",
            ScalarType::Sfixed64 => "TYPE_SFIXED64",
            ScalarType::Bool => "TYPE_BOOL",
            ScalarType::String => "TYPE_STRING",
            ScalarType::Bytes => "TYPE_BYTES",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor_name())
    }
}

/// What a field holds. Enum and message kinds carry the fully-qualified name
/// of the referenced type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar(ScalarType),
    Enum(String),
    Message(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Label {
    #[default]
    Singular,
    Repeated,
}

/// Immutable view of one schema field.
///
/// Fields are only handed out by a resolved [`Schema`](super::Schema), so every
/// enum/message reference they carry points at a known type and `map_entry`
/// already reflects the referenced message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) number: u32,
    pub(crate) kind: FieldKind,
    pub(crate) label: Label,
    pub(crate) oneof_index: Option<usize>,
    pub(crate) map_entry: bool,
    pub(crate) owner: String,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn is_repeated(&self) -> bool {
        self.label == Label::Repeated
    }

    pub fn oneof_index(&self) -> Option<usize> {
        self.oneof_index
    }

    /// True when the field's message type is a synthetic map entry wrapper,
    /// i.e. the field is a `map<K, V>`.
    pub fn is_map(&self) -> bool {
        self.map_entry
    }

    /// Fully-qualified name of the owning message.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Stable identity of the field, `package.Message.field`.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.owner, self.name)
    }

    pub fn message_type(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Message(name) => Some(name),
            _ => None,
        }
    }

    pub fn enum_type(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Enum(name) => Some(name),
            _ => None,
        }
    }

    /// The descriptor type name used by prompt prefixes.
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            FieldKind::Scalar(scalar) => scalar.descriptor_name(),
            FieldKind::Enum(_) => "TYPE_ENUM",
            FieldKind::Message(_) => "TYPE_MESSAGE",
        }
    }
}
