pub mod fields;
pub mod slug;

use async_graphql::SimpleObject;

/// A validation failure tagged with the input field it concerns.
///
/// Nested fields use `parent:child` tags, e.g. `values:name`.
#[derive(Clone, Debug, PartialEq, Eq, SimpleObject)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Re-tag this error under a parent field.
    pub fn nested(self, parent: &str) -> Self {
        Self {
            field: format!("{parent}:{}", self.field),
            message: self.message,
        }
    }
}
