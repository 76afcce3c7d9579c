use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use domain::error::{
    DomainErrorKind, EntityErrorKind, Error as DomainError, InternalErrorKind,
};

use log::*;

pub type Result<T> = core::result::Result<T, Error>;

/// A domain error on its way out to the client. `resource` names what a
/// not-found response refers to, e.g. "Product category".
#[derive(Debug)]
pub struct Error {
    source: DomainError,
    resource: Option<&'static str>,
}

impl Error {
    /// A request parameter that the domain layer never saw was rejected.
    pub(crate) fn invalid_param(field: &str, message: impl Into<String>) -> Self {
        Self {
            source: DomainError {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                    EntityErrorKind::Invalid {
                        field: field.to_string(),
                        message: message.into(),
                    },
                )),
            },
            resource: None,
        }
    }

    fn status_and_body(&self) -> (StatusCode, serde_json::Value) {
        match self.source.entity_error_kind() {
            EntityErrorKind::NotFound => (
                StatusCode::NOT_FOUND,
                json!({
                    "status_code": StatusCode::NOT_FOUND.as_u16(),
                    "message": format!("{} not found", self.resource.unwrap_or("Resource")),
                }),
            ),
            EntityErrorKind::Invalid { field, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "status_code": StatusCode::UNPROCESSABLE_ENTITY.as_u16(),
                    "message": message,
                    "field": field,
                }),
            ),
            EntityErrorKind::Conflict(message) => (
                StatusCode::CONFLICT,
                json!({
                    "status_code": StatusCode::CONFLICT.as_u16(),
                    "message": message,
                }),
            ),
            EntityErrorKind::DbTransaction => {
                error!("Storage error: {:?}", self.source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "status_code": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                        "message": "Internal server error",
                    }),
                )
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.source)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html#associatedconstant.UNPROCESSABLE_ENTITY
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self {
            source: err.into(),
            resource: None,
        }
    }
}

/// Names the resource a failed call was about, for the not-found message.
pub(crate) trait WithResource<T> {
    fn with_resource(self, resource: &'static str) -> Result<T>;
}

impl<T, E> WithResource<T> for core::result::Result<T, E>
where
    E: Into<DomainError>,
{
    fn with_resource(self, resource: &'static str) -> Result<T> {
        self.map_err(|err| Error {
            source: err.into(),
            resource: Some(resource),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain_error(kind: EntityErrorKind) -> DomainError {
        DomainError {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(kind)),
        }
    }

    #[test]
    fn not_found_names_the_resource() {
        let result: core::result::Result<(), DomainError> =
            Err(domain_error(EntityErrorKind::NotFound));
        let error = result.with_resource("Product category").unwrap_err();

        let (status, body) = error.status_and_body();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"status_code": 404, "message": "Product category not found"})
        );
    }

    #[test]
    fn invalid_carries_the_field() {
        let (status, body) = Error::invalid_param("limit", "limit must be between 1 and 100")
            .status_and_body();

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["field"], "limit");
        assert_eq!(body["status_code"], 422);
    }

    #[test]
    fn conflict_and_storage_failures_map_to_409_and_500() {
        let conflict = Error::from(domain_error(EntityErrorKind::Conflict("in use".into())));
        assert_eq!(conflict.status_and_body().0, StatusCode::CONFLICT);

        let storage = Error::from(domain_error(EntityErrorKind::DbTransaction));
        let (status, body) = storage.status_and_body();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
    }
}
