//! # Toikake - Schema-Driven Request Builder
//!
//! **Toikake** builds structured request messages by asking an operator for
//! one field at a time. It walks a message schema in declaration order, picks
//! the right way to read each field (free text for scalars, a selection for
//! enums and oneof groups, a loop for repeated and map fields, recursion for
//! nested messages) and assembles the answers into a [`value::MessageValue`].
//!
//! ## Core Workflow
//!
//! 1.  **Load a Schema**: Parse a JSON [`schema::SchemaDefinition`], or implement
//!     [`schema::IntoSchema`] for your own descriptor format.
//! 2.  **Provide a Prompt**: Implement the [`prompt::Prompt`] trait for your
//!     terminal front end (or a scripted source in tests).
//! 3.  **Build an Inputter**: Use [`inputter::Inputter::builder`] to set the prompt
//!     template and bytes encoding.
//! 4.  **Input**: Call `input` once per request. Each call starts a fresh session.
//!
//! Recursive message types are detected up front by the [`cycle::CycleDetector`];
//! before entering such a field the operator is asked whether to descend or stop,
//! so a self-referencing schema never loops forever.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use toikake::prelude::*;
//!
//! struct Stdin;
//!
//! impl Prompt for Stdin {
//!     fn read_line(&mut self, prompt: &str) -> std::result::Result<String, PromptError> {
//!         println!("{}", prompt);
//!         let mut line = String::new();
//!         match std::io::stdin().read_line(&mut line) {
//!             Ok(0) => Err(PromptError::Cancelled),
//!             Ok(_) => Ok(line.trim_end_matches(['\r', '\n']).to_string()),
//!             Err(e) => Err(PromptError::Io(e.to_string())),
//!         }
//!     }
//!
//!     fn read_selection(
//!         &mut self,
//!         prompt: &str,
//!         choices: &[String],
//!     ) -> std::result::Result<String, PromptError> {
//!         self.read_line(&format!("{} [{}]", prompt, choices.join("/")))
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let schema = SchemaDefinition::from_json(
//!         r#"{
//!             "package": "helloworld",
//!             "messages": [
//!                 { "name": "HelloRequest", "fields": [
//!                     { "name": "name", "number": 1, "type": "string" },
//!                     { "name": "message", "number": 2, "type": "string" }
//!                 ]}
//!             ]
//!         }"#,
//!     )?
//!     .into_schema()?;
//!
//!     let mut inputter = Inputter::builder(&schema, Stdin)
//!         .with_prefix_format("{ancestor}{name} ({type})")
//!         .build();
//!
//!     let request = inputter.input_by_name("HelloRequest")?;
//!     println!("{}", request);
//!     Ok(())
//! }
//! ```

pub mod cycle;
pub mod error;
pub mod inputter;
pub mod prefix;
pub mod prelude;
pub mod prompt;
pub mod reader;
pub mod schema;
pub mod value;
