//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the toikake crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use toikake::prelude::*;
//!
//! # fn run_example<P: Prompt>(prompt: P) -> Result<()> {
//! let schema = SchemaDefinition::from_file("path/to/schema.json")?.into_schema()?;
//! let mut inputter = Inputter::new(&schema, prompt);
//! let request = inputter.input_by_name("library.BorrowRequest")?;
//!
//! println!("{}", request);
//! println!("{}", request.to_json());
//! # Ok(())
//! # }
//! ```

// Input engine
pub use crate::inputter::{Inputter, InputterBuilder, InputterConfig};
pub use crate::prompt::Prompt;
pub use crate::reader::BytesEncoding;

// Schema model
pub use crate::schema::{
    Field, FieldKind, IntoSchema, Label, MessageDescriptor, ScalarType, Schema, SchemaDefinition,
};

// Values and formatting
pub use crate::value::{MessageValue, TextFormatter, Value};

// Prompt helpers
pub use crate::cycle::CycleDetector;
pub use crate::prefix::PrefixFormatter;

// Error types
pub use crate::error::{InputError, InputErrorKind, PromptError, SchemaError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
