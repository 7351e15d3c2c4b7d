use crate::cycle::CycleDetector;
use crate::error::{InputError, InputErrorKind};
use crate::schema::Schema;

/// A message type currently being assembled.
#[derive(Debug, Clone)]
struct Ancestor {
    name: String,
    /// Entered from a repeated or map field.
    repeated: bool,
}

/// State owned by one top-level input call: the live ancestor path, the
/// field path used to tag errors, and the cycle memo.
///
/// Dropped when the call returns, so nothing leaks into the next request.
pub(crate) struct Session<'s> {
    pub(crate) detector: CycleDetector<'s>,
    ancestors: Vec<Ancestor>,
    field_path: Vec<String>,
}

impl<'s> Session<'s> {
    pub(crate) fn new(schema: &'s Schema) -> Self {
        Self {
            detector: CycleDetector::new(schema),
            ancestors: Vec::new(),
            field_path: Vec::new(),
        }
    }

    pub(crate) fn enter(&mut self, message_name: &str, repeated: bool) {
        self.ancestors.push(Ancestor {
            name: message_name.to_string(),
            repeated,
        });
    }

    pub(crate) fn leave(&mut self) {
        self.ancestors.pop();
    }

    pub(crate) fn ancestor_names(&self) -> Vec<&str> {
        self.ancestors.iter().map(|a| a.name.as_str()).collect()
    }

    pub(crate) fn ancestor_has_repeated(&self) -> bool {
        self.ancestors.iter().any(|a| a.repeated)
    }

    pub(crate) fn depth(&self) -> usize {
        self.ancestors.len()
    }

    pub(crate) fn push_field(&mut self, name: &str) {
        self.field_path.push(name.to_string());
    }

    /// Marks the entry of the repeated field on top of the field path.
    pub(crate) fn push_index(&mut self, index: usize) {
        self.field_path.push(format!("[{}]", index));
    }

    pub(crate) fn pop_field(&mut self) {
        self.field_path.pop();
    }

    /// Dotted field path, e.g. `filters.and[1].name`.
    pub(crate) fn path(&self) -> String {
        let mut path = String::new();
        for segment in &self.field_path {
            if !path.is_empty() && !segment.starts_with('[') {
                path.push('.');
            }
            path.push_str(segment);
        }
        path
    }

    pub(crate) fn fail(&self, kind: InputErrorKind) -> InputError {
        InputError::new(self.path(), kind)
    }
}
