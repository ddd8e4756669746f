use thiserror::Error;

use crate::validation::FieldError;

pub type MutationResult<T> = Result<T, MutationError>;

/// Failure modes of an attribute mutation.
///
/// Validation errors are accumulated across every check before being
/// returned; the other variants end the request as soon as they occur.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("You do not have permission to perform this action")]
    PermissionDenied,

    #[error("Couldn't resolve to a node: {id}")]
    NotFound { id: String },

    #[error("input rejected with {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl MutationError {
    pub fn not_found(id: impl Into<String>) -> Self {
        MutationError::NotFound { id: id.into() }
    }

    /// Label used for the `outcome` dimension of mutation metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            MutationError::PermissionDenied => "denied",
            MutationError::NotFound { .. } => "not_found",
            MutationError::Validation(_) => "invalid",
            MutationError::Database(_) => "error",
        }
    }
}

/// Turn a collected error list into a result.
pub fn ensure_valid(errors: Vec<FieldError>) -> MutationResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(MutationError::Validation(errors))
    }
}

/// Map a unique-constraint violation raised at write time onto a field error.
///
/// `to_field_error` receives the violated column as named by SQLite
/// (`name`, `slug`) and picks the field and message to report. Columns it
/// does not recognise, and every other database error, stay `Database`.
pub fn unique_violation(
    err: sqlx::Error,
    to_field_error: impl Fn(&str) -> Option<FieldError>,
) -> MutationError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            if let Some(error) = violated_column(db_err.message()).and_then(to_field_error) {
                return MutationError::Validation(vec![error]);
            }
        }
    }
    MutationError::Database(err)
}

/// Last column of an SQLite `UNIQUE constraint failed: t.a, t.b` message.
fn violated_column(message: &str) -> Option<&str> {
    let (_, columns) = message.split_once("constraint failed:")?;
    let last = columns.rsplit(',').next()?.trim();
    last.rsplit('.').next().filter(|column| !column.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_valid_passes_empty_list() {
        assert!(ensure_valid(Vec::new()).is_ok());
    }

    #[test]
    fn ensure_valid_keeps_every_error() {
        let errors = vec![
            FieldError::new("name", "first"),
            FieldError::new("slug", "second"),
        ];
        match ensure_valid(errors.clone()) {
            Err(MutationError::Validation(got)) => assert_eq!(got, errors),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn non_constraint_errors_stay_database_errors() {
        let err = unique_violation(sqlx::Error::RowNotFound, |_| {
            Some(FieldError::new("slug", "taken"))
        });
        assert!(matches!(err, MutationError::Database(_)));
        assert_eq!(err.outcome(), "error");
    }

    #[test]
    fn violated_column_is_the_last_one_listed() {
        assert_eq!(
            violated_column("UNIQUE constraint failed: attribute_values.attribute, attribute_values.slug"),
            Some("slug")
        );
        assert_eq!(
            violated_column("UNIQUE constraint failed: attributes.slug"),
            Some("slug")
        );
        assert_eq!(violated_column("database is locked"), None);
    }
}
