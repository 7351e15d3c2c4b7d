use super::definition::{EnumDefinition, FieldDefinition, MessageDefinition, SchemaDefinition};
use super::field::{Field, FieldKind, Label, ScalarType};
use crate::error::SchemaError;
use ahash::{AHashMap, AHashSet};

/// A set of mutually exclusive fields of one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneofDescriptor {
    name: String,
    full_name: String,
    members: Vec<String>,
}

impl OneofDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Member field names in declaration order.
    pub fn members(&self) -> &[String] {
        &self.members
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub number: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    full_name: String,
    values: Vec<EnumValue>,
}

impl EnumDescriptor {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn values(&self) -> &[EnumValue] {
        &self.values
    }

    pub fn symbols(&self) -> Vec<String> {
        self.values.iter().map(|v| v.name.clone()).collect()
    }

    /// Case-sensitive lookup of a declared symbol.
    pub fn value(&self, symbol: &str) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.name == symbol)
    }
}

/// An ordered set of fields; declaration order is prompt order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDescriptor {
    full_name: String,
    fields: Vec<Field>,
    oneofs: Vec<OneofDescriptor>,
    map_entry: bool,
}

impl MessageDescriptor {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The last segment of the fully-qualified name (`example.E.M1Entry` -> `M1Entry`).
    pub fn name(&self) -> &str {
        short_name(&self.full_name)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn oneofs(&self) -> &[OneofDescriptor] {
        &self.oneofs
    }

    pub fn oneof(&self, index: usize) -> Option<&OneofDescriptor> {
        self.oneofs.get(index)
    }

    pub fn is_map_entry(&self) -> bool {
        self.map_entry
    }

    /// The `key` field of a map entry wrapper.
    pub fn map_key(&self) -> Option<&Field> {
        self.map_entry.then(|| self.field("key")).flatten()
    }

    /// The `value` field of a map entry wrapper.
    pub fn map_value(&self) -> Option<&Field> {
        self.map_entry.then(|| self.field("value")).flatten()
    }
}

/// A resolved, read-only schema: every type reference points at a known type.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    package: String,
    messages: AHashMap<String, MessageDescriptor>,
    message_order: Vec<String>,
    enums: AHashMap<String, EnumDescriptor>,
}

impl Schema {
    pub fn from_definition(definition: SchemaDefinition) -> Result<Self, SchemaError> {
        SchemaResolver::new(&definition.package).resolve(&definition)
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Looks up a message by fully-qualified name, or by name relative to the package.
    pub fn message(&self, name: &str) -> Option<&MessageDescriptor> {
        let name = name.trim_start_matches('.');
        self.messages
            .get(name)
            .or_else(|| self.messages.get(&qualify(&self.package, name)))
    }

    pub fn enum_type(&self, name: &str) -> Option<&EnumDescriptor> {
        let name = name.trim_start_matches('.');
        self.enums
            .get(name)
            .or_else(|| self.enums.get(&qualify(&self.package, name)))
    }

    /// All messages in declaration order.
    pub fn messages(&self) -> impl Iterator<Item = &MessageDescriptor> {
        self.message_order
            .iter()
            .filter_map(|name| self.messages.get(name))
    }
}

pub(crate) fn short_name(full_name: &str) -> &str {
    full_name.rsplit('.').next().unwrap_or(full_name)
}

fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", package, name)
    }
}

/// Turns a definition into a `Schema`, resolving names against the package and
/// the scope of the owning message.
struct SchemaResolver<'a> {
    package: &'a str,
    message_names: AHashSet<String>,
    enum_names: AHashSet<String>,
}

impl<'a> SchemaResolver<'a> {
    fn new(package: &'a str) -> Self {
        Self {
            package,
            message_names: AHashSet::new(),
            enum_names: AHashSet::new(),
        }
    }

    fn resolve(mut self, definition: &SchemaDefinition) -> Result<Schema, SchemaError> {
        for message in &definition.messages {
            let full_name = qualify(self.package, &message.name);
            if self.enum_names.contains(&full_name) || !self.message_names.insert(full_name.clone()) {
                return Err(SchemaError::DuplicateType(full_name));
            }
        }
        for enum_def in &definition.enums {
            let full_name = qualify(self.package, &enum_def.name);
            if self.message_names.contains(&full_name) || !self.enum_names.insert(full_name.clone()) {
                return Err(SchemaError::DuplicateType(full_name));
            }
        }

        let mut messages = AHashMap::new();
        let mut message_order = Vec::with_capacity(definition.messages.len());
        for message in &definition.messages {
            let descriptor = self.build_message(message)?;
            message_order.push(descriptor.full_name.clone());
            messages.insert(descriptor.full_name.clone(), descriptor);
        }

        let mut enums = AHashMap::new();
        for enum_def in &definition.enums {
            let descriptor = self.build_enum(enum_def)?;
            enums.insert(descriptor.full_name.clone(), descriptor);
        }

        link_map_entries(&mut messages)?;

        Ok(Schema {
            package: self.package.to_string(),
            messages,
            message_order,
            enums,
        })
    }

    fn build_message(&self, message: &MessageDefinition) -> Result<MessageDescriptor, SchemaError> {
        let full_name = qualify(self.package, &message.name);
        let mut seen = AHashSet::new();
        let mut fields = Vec::with_capacity(message.fields.len());

        for def in &message.fields {
            if !seen.insert(def.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    message: full_name.clone(),
                    field: def.name.clone(),
                });
            }
            if let Some(index) = def.oneof_index {
                if index >= message.oneofs.len() {
                    return Err(SchemaError::OneofOutOfRange {
                        field: format!("{}.{}", full_name, def.name),
                        index,
                        declared: message.oneofs.len(),
                    });
                }
            }
            fields.push(Field {
                name: def.name.clone(),
                number: def.number,
                kind: self.resolve_kind(&full_name, def)?,
                label: if def.repeated {
                    Label::Repeated
                } else {
                    Label::Singular
                },
                oneof_index: def.oneof_index,
                map_entry: false,
                owner: full_name.clone(),
            });
        }

        let oneofs = message
            .oneofs
            .iter()
            .enumerate()
            .map(|(index, name)| OneofDescriptor {
                name: name.clone(),
                full_name: format!("{}.{}", full_name, name),
                members: fields
                    .iter()
                    .filter(|f| f.oneof_index == Some(index))
                    .map(|f| f.name.clone())
                    .collect(),
            })
            .collect();

        Ok(MessageDescriptor {
            full_name,
            fields,
            oneofs,
            map_entry: message.map_entry,
        })
    }

    fn build_enum(&self, enum_def: &EnumDefinition) -> Result<EnumDescriptor, SchemaError> {
        let full_name = qualify(self.package, &enum_def.name);
        if enum_def.values.is_empty() {
            return Err(SchemaError::EmptyEnum(full_name));
        }
        Ok(EnumDescriptor {
            full_name,
            values: enum_def
                .values
                .iter()
                .map(|v| EnumValue {
                    name: v.name.clone(),
                    number: v.number,
                })
                .collect(),
        })
    }

    fn resolve_kind(&self, owner: &str, def: &FieldDefinition) -> Result<FieldKind, SchemaError> {
        if let Some(scalar) = ScalarType::from_name(&def.type_name) {
            return Ok(FieldKind::Scalar(scalar));
        }

        let reference = def.type_name.trim_start_matches('.');
        // Innermost scope first: Owner.Type, then package.Type, then the name as given.
        let candidates = [
            format!("{}.{}", owner, reference),
            qualify(self.package, reference),
            reference.to_string(),
        ];
        for candidate in candidates {
            if self.message_names.contains(&candidate) {
                return Ok(FieldKind::Message(candidate));
            }
            if self.enum_names.contains(&candidate) {
                return Ok(FieldKind::Enum(candidate));
            }
        }

        Err(SchemaError::UnknownType {
            field: format!("{}.{}", owner, def.name),
            type_name: def.type_name.clone(),
        })
    }
}

/// Validates map entry wrappers and flags the fields that point at them.
fn link_map_entries(messages: &mut AHashMap<String, MessageDescriptor>) -> Result<(), SchemaError> {
    let mut entries = AHashSet::new();
    for message in messages.values().filter(|m| m.map_entry) {
        let malformed = |reason: &str| SchemaError::InvalidMapEntry {
            message: message.full_name.clone(),
            reason: reason.to_string(),
        };
        if message.fields.len() != 2 {
            return Err(malformed("a map entry must declare exactly `key` and `value`"));
        }
        let key = message
            .field("key")
            .ok_or_else(|| malformed("missing `key` field"))?;
        let value = message
            .field("value")
            .ok_or_else(|| malformed("missing `value` field"))?;
        match key.kind {
            FieldKind::Scalar(ScalarType::Double | ScalarType::Float | ScalarType::Bytes) => {
                return Err(malformed("`key` must be an integral, bool or string scalar"));
            }
            FieldKind::Scalar(_) => {}
            _ => return Err(malformed("`key` must be a scalar")),
        }
        if key.is_repeated() || value.is_repeated() {
            return Err(malformed("`key` and `value` cannot be repeated"));
        }
        entries.insert(message.full_name.clone());
    }

    for message in messages.values_mut() {
        for field in &mut message.fields {
            let Some(target) = field.message_type() else {
                continue;
            };
            if entries.contains(target) {
                if !field.is_repeated() {
                    return Err(SchemaError::InvalidMapEntry {
                        message: target.to_string(),
                        reason: format!("map field '{}' must be repeated", field.full_name()),
                    });
                }
                field.map_entry = true;
            }
        }
    }
    Ok(())
}
