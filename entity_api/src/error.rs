//! Error types for entity API
use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;

use sea_orm::error::{DbErr, SqlErr};

/// Errors while executing operations related to entities.
/// The intent is to categorize errors into two major types:
///  * Errors related to data. Ex DbError::RecordNotFound
///  * Errors related to interactions with the database itself. Ex DbError::Conn
#[derive(Debug, PartialEq)]
pub struct Error {
    // Underlying error emitted from seaORM internals
    pub source: Option<DbErr>,
    // Enum representing which category of error
    pub error_kind: EntityApiErrorKind,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum EntityApiErrorKind {
    // Record not found
    RecordNotFound,
    // Record not updated
    RecordNotUpdated,
    // A field of the submitted record is missing or malformed
    ValidationError { field: String, message: String },
    // The write would break a uniqueness or referential constraint
    Conflict(String),
    // Errors related to interactions with the database itself. Ex DbError::Conn
    SystemError,
}

impl Error {
    pub(crate) fn not_found() -> Self {
        Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        }
    }

    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind: EntityApiErrorKind::ValidationError {
                field: field.to_string(),
                message: message.into(),
            },
        }
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind: EntityApiErrorKind::Conflict(message.into()),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Entity API Error: {:?}", self)
    }
}

impl StdError for Error {}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        // Constraint violations surface from the database driver when two writers
        // race past the application-level checks.
        let error_kind = match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                EntityApiErrorKind::Conflict(detail)
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                EntityApiErrorKind::Conflict(detail)
            }
            _ => match &err {
                DbErr::RecordNotFound(_) => EntityApiErrorKind::RecordNotFound,
                DbErr::RecordNotUpdated => EntityApiErrorKind::RecordNotUpdated,
                _ => EntityApiErrorKind::SystemError,
            },
        };

        Error {
            source: Some(err),
            error_kind,
        }
    }
}
