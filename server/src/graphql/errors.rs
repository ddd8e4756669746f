use async_graphql::{Error, ErrorExtensions};

use crate::error::MutationError;

pub fn bad_user_input(message: impl Into<String>) -> Error {
    Error::new(message.into()).extend_with(|_, e| e.set("code", "BAD_USER_INPUT"))
}

pub fn internal_error(err: impl std::fmt::Display) -> Error {
    Error::new(err.to_string()).extend_with(|_, e| e.set("code", "INTERNAL_SERVER_ERROR"))
}

impl ErrorExtensions for MutationError {
    fn extend(&self) -> Error {
        match self {
            MutationError::PermissionDenied => Error::new(self.to_string())
                .extend_with(|_, e| e.set("code", "PERMISSION_DENIED")),
            MutationError::NotFound { id } => {
                let id = id.clone();
                Error::new(self.to_string()).extend_with(move |_, e| {
                    e.set("code", "NOT_FOUND");
                    e.set("id", id.as_str());
                })
            }
            MutationError::Validation(_) => bad_user_input(self.to_string()),
            MutationError::Database(err) => {
                tracing::error!(error = %err, "database failure during mutation");
                internal_error(err)
            }
        }
    }
}
