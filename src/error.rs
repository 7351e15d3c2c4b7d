use thiserror::Error;

/// Errors raised while building a [`Schema`](crate::schema::Schema) from a definition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Failed to parse schema JSON: {0}")]
    JsonParseError(String),

    #[error("Type '{0}' is defined more than once")]
    DuplicateType(String),

    #[error("Message '{message}' declares field '{field}' more than once")]
    DuplicateField { message: String, field: String },

    #[error("Field '{field}' refers to unknown type '{type_name}'")]
    UnknownType { field: String, type_name: String },

    #[error("Field '{field}' refers to oneof #{index}, but its message declares only {declared}")]
    OneofOutOfRange {
        field: String,
        index: usize,
        declared: usize,
    },

    #[error("Map entry '{message}' is malformed: {reason}")]
    InvalidMapEntry { message: String, reason: String },

    #[error("Enum '{0}' declares no values")]
    EmptyEnum(String),
}

/// Errors reported by a [`Prompt`](crate::prompt::Prompt) implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    /// The operator aborted the prompt or the input stream was closed.
    #[error("prompt was cancelled")]
    Cancelled,

    #[error("prompt I/O failed: {0}")]
    Io(String),
}

/// The reason an input session stopped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputErrorKind {
    #[error("'{input}' is not a valid {scalar} value: {reason}")]
    InvalidScalarValue {
        scalar: &'static str,
        input: String,
        reason: String,
    },

    #[error("'{input}' is not a symbol of enum {enum_name}")]
    InvalidEnumValue { enum_name: String, input: String },

    #[error("'{input}' is not a member of oneof {oneof} (expected one of: {expected})")]
    InvalidOneofSelection {
        oneof: String,
        input: String,
        expected: String,
    },

    #[error("'{input}' is not an allowed answer (expected one of: {expected})")]
    InvalidChoice { input: String, expected: String },

    #[error("input was cancelled")]
    PromptCancelled,

    #[error("prompt failed: {0}")]
    PromptFailed(String),

    #[error("schema inconsistency: {0}")]
    SchemaInconsistency(String),
}

impl From<PromptError> for InputErrorKind {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Cancelled => InputErrorKind::PromptCancelled,
            PromptError::Io(reason) => InputErrorKind::PromptFailed(reason),
        }
    }
}

/// A failed [`Inputter::input`](crate::inputter::Inputter::input) call, tagged with
/// the dotted path of the field being read when it failed (e.g. `filters.and[1].name`).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("failed to input field '{path}': {kind}")]
pub struct InputError {
    pub path: String,
    pub kind: InputErrorKind,
}

impl InputError {
    pub fn new(path: impl Into<String>, kind: InputErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn kind(&self) -> &InputErrorKind {
        &self.kind
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, InputErrorKind::PromptCancelled)
    }
}
