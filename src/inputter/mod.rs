use crate::error::{InputError, InputErrorKind};
use crate::prefix::{DEFAULT_PREFIX_FORMAT, PrefixFormatter};
use crate::prompt::Prompt;
use crate::reader::{self, BytesEncoding, CycleDecision};
use crate::schema::{Field, FieldKind, MessageDescriptor, Schema};
use crate::value::{MessageValue, Value};
use ahash::AHashMap;
use tracing::{debug, info, trace};

mod session;

use session::Session;

/// Settings that persist across input calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputterConfig {
    /// Prompt template with `{ancestor}`, `{name}` and `{type}` placeholders.
    pub prefix_format: String,
    pub bytes_encoding: BytesEncoding,
}

impl Default for InputterConfig {
    fn default() -> Self {
        Self {
            prefix_format: DEFAULT_PREFIX_FORMAT.to_string(),
            bytes_encoding: BytesEncoding::default(),
        }
    }
}

/// Collects message values field by field from a [`Prompt`].
///
/// One `Inputter` can serve any number of requests; every [`input`](Self::input)
/// call runs in a fresh session, so oneof choices and cycle decisions from an
/// earlier request never carry over.
pub struct Inputter<'s, P: Prompt> {
    schema: &'s Schema,
    prompt: P,
    config: InputterConfig,
}

pub struct InputterBuilder<'s, P: Prompt> {
    schema: &'s Schema,
    prompt: P,
    config: InputterConfig,
}

impl<'s, P: Prompt> InputterBuilder<'s, P> {
    pub fn new(schema: &'s Schema, prompt: P) -> Self {
        Self {
            schema,
            prompt,
            config: InputterConfig::default(),
        }
    }

    pub fn with_prefix_format(mut self, prefix_format: &str) -> Self {
        self.config.prefix_format = prefix_format.to_string();
        self
    }

    pub fn with_bytes_encoding(mut self, encoding: BytesEncoding) -> Self {
        self.config.bytes_encoding = encoding;
        self
    }

    pub fn with_config(mut self, config: InputterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Inputter<'s, P> {
        Inputter {
            schema: self.schema,
            prompt: self.prompt,
            config: self.config,
        }
    }
}

impl<'s, P: Prompt> Inputter<'s, P> {
    pub fn builder(schema: &'s Schema, prompt: P) -> InputterBuilder<'s, P> {
        InputterBuilder::new(schema, prompt)
    }

    pub fn new(schema: &'s Schema, prompt: P) -> Self {
        InputterBuilder::new(schema, prompt).build()
    }

    pub fn config(&self) -> &InputterConfig {
        &self.config
    }

    pub fn prompt_mut(&mut self) -> &mut P {
        &mut self.prompt
    }

    pub fn into_prompt(self) -> P {
        self.prompt
    }

    /// Walks `message` in declaration order and returns the collected value.
    ///
    /// The first invalid answer, unknown symbol or cancelled prompt aborts the
    /// whole call; no partial value is returned.
    pub fn input(&mut self, message: &MessageDescriptor) -> Result<MessageValue, InputError> {
        info!(message = message.full_name(), "collecting message");
        let mut session = Session::new(self.schema);
        let value = self.input_message(&mut session, message)?;
        info!(
            message = message.full_name(),
            fields = value.len(),
            "message collected"
        );
        Ok(value)
    }

    /// Like [`input`](Self::input), looking the message up by name.
    pub fn input_by_name(&mut self, message: &str) -> Result<MessageValue, InputError> {
        let schema = self.schema;
        let descriptor = schema.message(message).ok_or_else(|| {
            InputError::new(
                "",
                InputErrorKind::SchemaInconsistency(format!("unknown message type '{}'", message)),
            )
        })?;
        self.input(descriptor)
    }

    fn input_message(
        &mut self,
        session: &mut Session<'s>,
        message: &MessageDescriptor,
    ) -> Result<MessageValue, InputError> {
        let mut value = MessageValue::new(message.full_name());
        // oneof index -> chosen member, local to this message instance.
        let mut selected: AHashMap<usize, String> = AHashMap::new();

        for field in message.fields() {
            if let Some(index) = field.oneof_index() {
                if !selected.contains_key(&index) {
                    let chosen = self.select_oneof(session, message, index)?;
                    selected.insert(index, chosen);
                }
                if selected.get(&index).is_some_and(|chosen| chosen != field.name()) {
                    trace!(field = field.name(), "skipping unselected oneof member");
                    continue;
                }
            }

            session.push_field(field.name());
            self.input_field(session, field, &mut value)?;
            session.pop_field();
        }
        Ok(value)
    }

    fn input_field(
        &mut self,
        session: &mut Session<'s>,
        field: &Field,
        out: &mut MessageValue,
    ) -> Result<(), InputError> {
        match field.kind() {
            FieldKind::Message(type_name) if field.is_map() => {
                self.input_map(session, field, type_name, out)
            }
            FieldKind::Message(type_name) if field.is_repeated() => {
                self.input_repeated_message(session, field, type_name, out)
            }
            FieldKind::Message(type_name) => {
                self.input_singular_message(session, field, type_name, out)
            }
            _ if field.is_repeated() => self.input_repeated_leaf(session, field, out),
            _ => {
                let label = self.label(session, field);
                match (self.read_leaf(session, field, &label)?, field.enum_type()) {
                    (Some(value), _) => out.set(field.name(), value),
                    // Blank enum answers name no symbol; blank scalars leave the field unset.
                    (None, Some(enum_name)) => {
                        return Err(session.fail(InputErrorKind::InvalidEnumValue {
                            enum_name: enum_name.to_string(),
                            input: String::new(),
                        }));
                    }
                    (None, None) => trace!(field = field.name(), "left unset"),
                }
                Ok(())
            }
        }
    }

    fn input_singular_message(
        &mut self,
        session: &mut Session<'s>,
        field: &Field,
        type_name: &str,
        out: &mut MessageValue,
    ) -> Result<(), InputError> {
        if session.detector.is_circulated(field) {
            let label = self.label(session, field);
            if self.confirm_descend(session, field, &label)? == CycleDecision::Stop {
                return Ok(());
            }
        }
        let nested = self.input_nested(session, type_name, false)?;
        out.set(field.name(), Value::Message(nested));
        Ok(())
    }

    fn input_repeated_leaf(
        &mut self,
        session: &mut Session<'s>,
        field: &Field,
        out: &mut MessageValue,
    ) -> Result<(), InputError> {
        let mut items = Vec::new();
        loop {
            session.push_index(items.len());
            let label = self.label(session, field);
            let Some(item) = self.read_leaf(session, field, &label)? else {
                session.pop_field();
                break;
            };
            items.push(item);
            let more = self.add_more(session, &label)?;
            session.pop_field();
            if !more {
                break;
            }
        }
        debug!(field = field.name(), entries = items.len(), "repeated field collected");
        if !items.is_empty() {
            out.set(field.name(), Value::List(items));
        }
        Ok(())
    }

    fn input_repeated_message(
        &mut self,
        session: &mut Session<'s>,
        field: &Field,
        type_name: &str,
        out: &mut MessageValue,
    ) -> Result<(), InputError> {
        let circulated = session.detector.is_circulated(field);
        let mut items = Vec::new();
        loop {
            session.push_index(items.len());
            let label = self.label(session, field);
            if circulated && self.confirm_descend(session, field, &label)? == CycleDecision::Stop {
                session.pop_field();
                break;
            }
            let entry = self.input_nested(session, type_name, true)?;
            // An entry with every field left blank is not kept.
            if entry.is_empty() {
                trace!(field = field.name(), "dropping empty entry");
            } else {
                items.push(Value::Message(entry));
            }
            let more = self.add_more(session, &label)?;
            session.pop_field();
            if !more {
                break;
            }
        }
        debug!(field = field.name(), entries = items.len(), "repeated field collected");
        if !items.is_empty() {
            out.set(field.name(), Value::List(items));
        }
        Ok(())
    }

    /// Maps are collected as repeated `key`/`value` entries. A blank key ends the map.
    fn input_map(
        &mut self,
        session: &mut Session<'s>,
        field: &Field,
        entry_type: &str,
        out: &mut MessageValue,
    ) -> Result<(), InputError> {
        let entry = self.resolve_message(session, entry_type)?;
        let (Some(key_field), Some(value_field)) = (entry.map_key(), entry.map_value()) else {
            return Err(session.fail(InputErrorKind::SchemaInconsistency(format!(
                "'{}' is not a map entry",
                entry.full_name()
            ))));
        };

        let circulated = session.detector.is_circulated(field);
        let mut items = Vec::new();
        loop {
            session.push_index(items.len());
            let label = self.label(session, field);
            if circulated && self.confirm_descend(session, field, &label)? == CycleDecision::Stop {
                session.pop_field();
                break;
            }

            session.enter(entry.name(), true);
            session.push_field(key_field.name());
            let key_label = self.label(session, key_field);
            let key = self.read_leaf(session, key_field, &key_label)?;
            session.pop_field();
            let Some(key) = key else {
                session.leave();
                session.pop_field();
                break;
            };

            session.push_field(value_field.name());
            let value = match value_field.kind() {
                FieldKind::Message(value_type) => {
                    let nested = self.input_nested(session, value_type, true)?;
                    Some(Value::Message(nested))
                }
                _ => {
                    let value_label = self.label(session, value_field);
                    self.read_leaf(session, value_field, &value_label)?
                }
            };
            session.pop_field();
            session.leave();

            items.push(Value::Message(MessageValue::map_entry(
                entry.full_name(),
                key,
                value,
            )));
            let more = self.add_more(session, &label)?;
            session.pop_field();
            if !more {
                break;
            }
        }
        debug!(field = field.name(), entries = items.len(), "map collected");
        if !items.is_empty() {
            out.set(field.name(), Value::List(items));
        }
        Ok(())
    }

    /// Enters a nested message type and collects it.
    fn input_nested(
        &mut self,
        session: &mut Session<'s>,
        type_name: &str,
        repeated: bool,
    ) -> Result<MessageValue, InputError> {
        let message = self.resolve_message(session, type_name)?;
        session.enter(message.name(), repeated);
        trace!(message = message.full_name(), depth = session.depth(), "entering message");
        let result = self.input_message(session, message);
        session.leave();
        result
    }

    fn resolve_message(
        &self,
        session: &Session<'s>,
        type_name: &str,
    ) -> Result<&'s MessageDescriptor, InputError> {
        self.schema.message(type_name).ok_or_else(|| {
            session.fail(InputErrorKind::SchemaInconsistency(format!(
                "unknown message type '{}'",
                type_name
            )))
        })
    }

    /// Reads a scalar or enum value; `None` means the operator left it blank.
    fn read_leaf(
        &mut self,
        session: &Session<'s>,
        field: &Field,
        label: &str,
    ) -> Result<Option<Value>, InputError> {
        let result = match field.kind() {
            FieldKind::Scalar(scalar) => {
                reader::read_scalar(&mut self.prompt, label, *scalar, self.config.bytes_encoding)
            }
            FieldKind::Enum(enum_name) => match self.schema.enum_type(enum_name) {
                Some(enum_type) => reader::read_enum(&mut self.prompt, label, enum_type),
                None => Err(InputErrorKind::SchemaInconsistency(format!(
                    "unknown enum type '{}'",
                    enum_name
                ))),
            },
            FieldKind::Message(type_name) => Err(InputErrorKind::SchemaInconsistency(format!(
                "field '{}' of message type '{}' read as a leaf",
                field.full_name(),
                type_name
            ))),
        };
        result.map_err(|kind| session.fail(kind))
    }

    fn select_oneof(
        &mut self,
        session: &mut Session<'s>,
        message: &MessageDescriptor,
        index: usize,
    ) -> Result<String, InputError> {
        let Some(oneof) = message.oneof(index) else {
            return Err(session.fail(InputErrorKind::SchemaInconsistency(format!(
                "'{}' has no oneof #{}",
                message.full_name(),
                index
            ))));
        };
        session.push_field(oneof.name());
        let label = PrefixFormatter::format_parts(
            &self.config.prefix_format,
            oneof.name(),
            "oneof",
            &session.ancestor_names(),
            session.ancestor_has_repeated(),
        );
        let chosen = reader::read_oneof(&mut self.prompt, &label, oneof)
            .map_err(|kind| session.fail(kind))?;
        session.pop_field();
        debug!(oneof = oneof.full_name(), chosen = %chosen, "oneof member selected");
        Ok(chosen)
    }

    fn confirm_descend(
        &mut self,
        session: &Session<'s>,
        field: &Field,
        label: &str,
    ) -> Result<CycleDecision, InputError> {
        let cycle = session
            .detector
            .circulated_path(&field.full_name())
            .unwrap_or_default();
        let decision = reader::read_cycle_decision(&mut self.prompt, label, cycle)
            .map_err(|kind| session.fail(kind))?;
        debug!(field = %field.full_name(), ?decision, "circulated field");
        Ok(decision)
    }

    fn add_more(&mut self, session: &Session<'s>, label: &str) -> Result<bool, InputError> {
        reader::read_add_more(&mut self.prompt, label).map_err(|kind| session.fail(kind))
    }

    fn label(&self, session: &Session<'s>, field: &Field) -> String {
        PrefixFormatter::format_prompt(
            &self.config.prefix_format,
            field,
            &session.ancestor_names(),
            session.ancestor_has_repeated(),
        )
    }
}
