use super::definition::SchemaDefinition;
use super::descriptor::Schema;
use crate::error::SchemaError;

/// A trait for schema sources that can be resolved into a toikake [`Schema`].
///
/// This is the extension point for plugging in other descriptor formats: parse
/// your format into your own structs, then translate them here. The
/// translation usually goes through [`SchemaDefinition`], which already knows
/// how to resolve type references and detect map entries.
///
/// # Example
///
/// ```rust,no_run
/// use toikake::prelude::*;
/// use toikake::schema::{FieldDefinition, MessageDefinition};
/// use std::result::Result;
///
/// struct Columns {
///     table: String,
///     columns: Vec<String>,
/// }
///
/// impl IntoSchema for Columns {
///     fn into_schema(self) -> Result<Schema, SchemaError> {
///         SchemaDefinition {
///             package: "db".to_string(),
///             messages: vec![MessageDefinition {
///                 name: self.table,
///                 fields: self
///                     .columns
///                     .into_iter()
///                     .map(|name| FieldDefinition {
///                         name,
///                         type_name: "string".to_string(),
///                         ..Default::default()
///                     })
///                     .collect(),
///                 ..Default::default()
///             }],
///             enums: vec![],
///         }
///         .into_schema()
///     }
/// }
/// ```
pub trait IntoSchema {
    /// Consumes the source and resolves it into a validated schema.
    fn into_schema(self) -> Result<Schema, SchemaError>;
}

impl IntoSchema for SchemaDefinition {
    fn into_schema(self) -> Result<Schema, SchemaError> {
        Schema::from_definition(self)
    }
}

impl IntoSchema for Schema {
    fn into_schema(self) -> Result<Schema, SchemaError> {
        Ok(self)
    }
}
