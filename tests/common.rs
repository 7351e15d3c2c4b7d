//! Common test utilities: a scripted prompt and schema fixtures.
use std::collections::VecDeque;
use std::result::Result;
use toikake::prelude::*;

/// A [`Prompt`] that answers from two fixed queues and records every prompt text.
///
/// Lines and selections are kept apart so a test reads like the operator's
/// session: what was typed, and what was picked. An exhausted queue behaves
/// like Ctrl-D.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    lines: VecDeque<String>,
    selections: VecDeque<String>,
    pub prompts: Vec<String>,
    pub choices: Vec<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedPrompt {
    pub fn new(lines: &[&str], selections: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            selections: selections.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn lines(lines: &[&str]) -> Self {
        Self::new(lines, &[])
    }

    /// True when every scripted answer was consumed.
    pub fn is_drained(&self) -> bool {
        self.lines.is_empty() && self.selections.is_empty()
    }

    pub fn push_lines(&mut self, lines: &[&str]) {
        self.lines.extend(lines.iter().map(|s| s.to_string()));
    }

    pub fn push_selections(&mut self, selections: &[&str]) {
        self.selections
            .extend(selections.iter().map(|s| s.to_string()));
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.prompts.push(prompt.to_string());
        self.lines.pop_front().ok_or(PromptError::Cancelled)
    }

    fn read_selection(&mut self, prompt: &str, choices: &[String]) -> Result<String, PromptError> {
        self.prompts.push(prompt.to_string());
        self.choices.push(choices.to_vec());
        self.selections.pop_front().ok_or(PromptError::Cancelled)
    }
}

/// Parses and resolves a fixture, panicking on invalid fixtures.
#[allow(dead_code)]
pub fn schema(json: &str) -> Schema {
    SchemaDefinition::from_json(json)
        .and_then(IntoSchema::into_schema)
        .expect("fixture schema should resolve")
}

/// Runs one input call for `message` against a scripted prompt.
#[allow(dead_code)]
pub fn run(
    schema: &Schema,
    message: &str,
    prompt: &mut ScriptedPrompt,
) -> Result<MessageValue, InputError> {
    Inputter::new(schema, prompt).input_by_name(message)
}

/// Looks up a field by message and field name.
#[allow(dead_code)]
pub fn field<'s>(schema: &'s Schema, message: &str, name: &str) -> &'s Field {
    schema
        .message(message)
        .and_then(|m| m.field(name))
        .unwrap_or_else(|| panic!("no field {}.{}", message, name))
}

#[allow(dead_code)]
pub const HELLOWORLD_SCHEMA_JSON: &str = r#"{
    "package": "helloworld",
    "messages": [
        { "name": "HelloRequest", "fields": [
            { "name": "name", "number": 1, "type": "string" },
            { "name": "message", "number": 2, "type": "string" }
        ]}
    ]
}"#;

/// Nested messages, an enum and a oneof group.
#[allow(dead_code)]
pub const LIBRARY_SCHEMA_JSON: &str = r#"{
    "package": "library",
    "messages": [
        { "name": "Person", "fields": [
            { "name": "name", "number": 1, "type": "string" }
        ]},
        { "name": "Book", "fields": [
            { "name": "title", "number": 1, "type": "string" },
            { "name": "author", "number": 2, "type": "string" }
        ]},
        { "name": "Dvd", "fields": [
            { "name": "title", "number": 1, "type": "string" }
        ]},
        { "name": "RegisterRequest", "fields": [
            { "name": "person", "number": 1, "type": "Person" },
            { "name": "book", "number": 2, "type": "Book" }
        ]},
        { "name": "ClassifyRequest", "fields": [
            { "name": "type", "number": 1, "type": "Genre" }
        ]},
        { "name": "BorrowRequest", "oneofs": ["item"], "fields": [
            { "name": "book", "number": 1, "type": "Book", "oneof_index": 0 },
            { "name": "dvd", "number": 2, "type": "Dvd", "oneof_index": 0 },
            { "name": "days", "number": 3, "type": "uint32" }
        ]}
    ],
    "enums": [
        { "name": "Genre", "values": [
            { "name": "FICTION", "number": 0 },
            { "name": "PHILOSOPHY", "number": 1 },
            { "name": "SCIENCE", "number": 2 }
        ]}
    ]
}"#;

/// Repeated scalars, enums and messages.
#[allow(dead_code)]
pub const REPEATED_SCHEMA_JSON: &str = r#"{
    "package": "shelf",
    "messages": [
        { "name": "Book", "fields": [
            { "name": "title", "number": 1, "type": "string" }
        ]},
        { "name": "TagRequest", "fields": [
            { "name": "tags", "number": 1, "type": "string", "repeated": true }
        ]},
        { "name": "ColorRequest", "fields": [
            { "name": "colors", "number": 1, "type": "Color", "repeated": true }
        ]},
        { "name": "ShelfRequest", "fields": [
            { "name": "books", "number": 1, "type": "Book", "repeated": true },
            { "name": "label", "number": 2, "type": "string" }
        ]},
        { "name": "Scalars", "fields": [
            { "name": "count", "number": 1, "type": "int32" },
            { "name": "ok", "number": 2, "type": "bool" },
            { "name": "ratio", "number": 3, "type": "double" },
            { "name": "blob", "number": 4, "type": "bytes" }
        ]},
        { "name": "Measurement", "fields": [
            { "name": "f", "number": 1, "type": "float" },
            { "name": "d", "number": 2, "type": "double" },
            { "name": "total", "number": 3, "type": "int64" }
        ]}
    ],
    "enums": [
        { "name": "Color", "values": [
            { "name": "RED", "number": 0 },
            { "name": "GREEN", "number": 1 }
        ]}
    ]
}"#;

/// Map fields with scalar and message values.
#[allow(dead_code)]
pub const MAP_SCHEMA_JSON: &str = r#"{
    "package": "maps",
    "messages": [
        { "name": "SimpleMapRequest", "fields": [
            { "name": "foo", "number": 1, "type": "SimpleMapRequest.FooEntry", "repeated": true }
        ]},
        { "name": "SimpleMapRequest.FooEntry", "map_entry": true, "fields": [
            { "name": "key", "number": 1, "type": "string" },
            { "name": "value", "number": 2, "type": "string" }
        ]},
        { "name": "Val", "fields": [
            { "name": "fuga", "number": 1, "type": "string" },
            { "name": "piyo", "number": 2, "type": "int32" }
        ]},
        { "name": "MessageMapRequest", "fields": [
            { "name": "foo", "number": 1, "type": "MessageMapRequest.FooEntry", "repeated": true }
        ]},
        { "name": "MessageMapRequest.FooEntry", "map_entry": true, "fields": [
            { "name": "key", "number": 1, "type": "string" },
            { "name": "value", "number": 2, "type": "Val" }
        ]}
    ]
}"#;

/// Every shape of recursion: self references, two- and three-type loops,
/// loops through repeated fields, map entries and nested types, plus acyclic
/// messages for contrast.
#[allow(dead_code)]
pub const CIRCULATED_SCHEMA_JSON: &str = r#"{
    "package": "example",
    "messages": [
        { "name": "A", "fields": [ { "name": "b", "number": 1, "type": "B" } ] },
        { "name": "B", "fields": [ { "name": "a", "number": 1, "type": "A" } ] },
        { "name": "Foo", "fields": [ { "name": "self", "number": 1, "type": "Self" } ] },
        { "name": "Self", "fields": [ { "name": "self", "number": 1, "type": "Self" } ] },
        { "name": "Hoge", "fields": [ { "name": "fuga", "number": 1, "type": "Fuga" } ] },
        { "name": "Fuga", "fields": [ { "name": "piyo", "number": 1, "type": "Piyo" } ] },
        { "name": "Piyo", "fields": [ { "name": "hoge", "number": 1, "type": "Hoge" } ] },
        { "name": "C", "fields": [ { "name": "list", "number": 1, "type": "ListC" } ] },
        { "name": "ListC", "fields": [
            { "name": "items", "number": 1, "type": "C", "repeated": true }
        ]},
        { "name": "D", "fields": [
            { "name": "m", "number": 1, "type": "D.MEntry", "repeated": true }
        ]},
        { "name": "D.MEntry", "map_entry": true, "fields": [
            { "name": "key", "number": 1, "type": "string" },
            { "name": "value", "number": 2, "type": "C" }
        ]},
        { "name": "E", "fields": [
            { "name": "m1", "number": 1, "type": "M1Entry", "repeated": true },
            { "name": "m2", "number": 2, "type": "M" }
        ]},
        { "name": "E.M", "fields": [ { "name": "f", "number": 1, "type": "F" } ] },
        { "name": "E.M1Entry", "map_entry": true, "fields": [
            { "name": "key", "number": 1, "type": "string" },
            { "name": "value", "number": 2, "type": "F" }
        ]},
        { "name": "F", "fields": [ { "name": "e", "number": 1, "type": "E" } ] },
        { "name": "FooRequest", "fields": [
            { "name": "filters", "number": 1, "type": "Filters" },
            { "name": "page", "number": 2, "type": "int32" },
            { "name": "limit", "number": 3, "type": "int32" }
        ]},
        { "name": "Filters", "fields": [
            { "name": "name", "number": 1, "type": "string" },
            { "name": "and", "number": 2, "type": "Filters", "repeated": true },
            { "name": "or", "number": 3, "type": "Filters", "repeated": true }
        ]},
        { "name": "G", "fields": [
            { "name": "h", "number": 1, "type": "H" },
            { "name": "h2", "number": 2, "type": "H" }
        ]},
        { "name": "H", "fields": [ { "name": "name", "number": 1, "type": "string" } ] },
        { "name": "I", "fields": [ { "name": "g", "number": 1, "type": "G" } ] }
    ]
}"#;
