//! Error types for sqlfrag

use std::fmt;

use thiserror::Error;

use crate::entity::FieldKind;

/// Result type alias for sqlfrag operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors returned by the fragment builders
#[derive(Debug, Error)]
pub enum QueryError {
    /// Every field was transient or ignored, so there is nothing to select
    #[error("No projectable columns on entity '{entity}'")]
    NoColumns { entity: &'static str },

    /// The entity has no table name but a projection was requested
    #[error("Entity '{entity}' does not declare a table name")]
    MissingTable { entity: &'static str },

    /// The entity's field descriptor table is malformed
    #[error("Invalid entity schema: {0}")]
    InvalidSchema(String),

    /// Some fields could not be rendered; the rest of the fragment was built
    #[error("{} field(s) could not be rendered: {}", .0.len(), FieldErrors(.0))]
    Partial(Vec<FieldError>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QueryError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid schema error
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Self::InvalidSchema(message.into())
    }

    /// Check if this is a partial-build error
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial(_))
    }

    /// Field diagnostics carried by a partial-build error
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Partial(errors) => errors,
            _ => &[],
        }
    }
}

/// A single field that was skipped while building predicates.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("field '{field}': {kind}")]
pub struct FieldError {
    /// Property name of the field that failed
    pub field: &'static str,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: &'static str, kind: FieldErrorKind) -> Self {
        Self { field, kind }
    }
}

/// Why a field was skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldErrorKind {
    /// A `between`/`in_list` tag names a field the entity does not have
    UnknownField(&'static str),
    /// A companion value had the wrong type
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// A textual range bound could not be parsed as a date
    InvalidDate(String),
    /// The value cannot be rendered as a single literal
    UnsupportedValue(FieldKind),
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField(name) => write!(f, "references unknown field '{name}'"),
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected {expected} value, found {found}")
            }
            Self::InvalidDate(raw) => write!(f, "'{raw}' is not a valid date"),
            Self::UnsupportedValue(kind) => {
                write!(f, "{kind:?} values cannot be compared with '='")
            }
        }
    }
}

struct FieldErrors<'a>(&'a [FieldError]);

impl fmt::Display for FieldErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_error_lists_fields() {
        let err = QueryError::Partial(vec![
            FieldError::new("createTime", FieldErrorKind::UnknownField("minCreateTime")),
            FieldError::new("id", FieldErrorKind::InvalidDate("soon".into())),
        ]);
        assert_eq!(
            err.to_string(),
            "2 field(s) could not be rendered: field 'createTime': references unknown field \
             'minCreateTime'; field 'id': 'soon' is not a valid date"
        );
        assert!(err.is_partial());
        assert_eq!(err.field_errors().len(), 2);
    }

    #[test]
    fn non_partial_has_no_field_errors() {
        let err = QueryError::config("bad driver");
        assert!(!err.is_partial());
        assert!(err.field_errors().is_empty());
        assert_eq!(err.to_string(), "Configuration error: bad driver");
    }
}
