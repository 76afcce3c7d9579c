//! Request extractors that reject with the crate's structured error body
//! instead of axum's plain-text rejections.

use crate::Error;
use axum::extract::path::ErrorKind;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, RawPathParams, Request};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// JSON request body or response. A body that fails to deserialize names the
/// offending field.
#[derive(Debug)]
pub(crate) struct Json<T>(pub(crate) T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<serde_json::Value>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                Error::invalid_param("body", rejection.body_text())
            })?;

        serde_path_to_error::deserialize(value)
            .map(Json)
            .map_err(|err| {
                let message = err.inner().to_string();
                let field = match message
                    .strip_prefix("missing field `")
                    .and_then(|rest| rest.strip_suffix('`'))
                {
                    Some(missing) => missing.to_string(),
                    None => match err.path().to_string() {
                        path if path == "." => "body".to_string(),
                        path => path,
                    },
                };
                Error::invalid_param(&field, message)
            })
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Query string parameters.
#[derive(Debug)]
pub(crate) struct Query<T>(pub(crate) T);

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        axum::extract::Query::<T>::from_request_parts(parts, state)
            .await
            .map(|axum::extract::Query(value)| Query(value))
            .map_err(|rejection| Error::invalid_param("query", rejection.body_text()))
    }
}

/// Path parameters. A value that fails to parse is reported under its route
/// parameter name, e.g. `id`.
#[derive(Debug)]
pub(crate) struct Path<T>(pub(crate) T);

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Path(value)),
            Err(rejection) => {
                let field = path_field(&rejection, parts, state).await;
                Err(Error::invalid_param(&field, rejection.body_text()))
            }
        }
    }
}

async fn path_field<S: Send + Sync>(
    rejection: &PathRejection,
    parts: &mut Parts,
    state: &S,
) -> String {
    if let PathRejection::FailedToDeserializePathParams(err) = rejection {
        if let ErrorKind::ParseErrorAtKey { key, .. } = err.kind() {
            return key.clone();
        }
    }

    // A single primitive parameter carries no key in the error.
    match RawPathParams::from_request_parts(parts, state).await {
        Ok(params) => {
            let mut keys = params.iter().map(|(key, _)| key.to_string());
            match (keys.next(), keys.next()) {
                (Some(key), None) => key,
                _ => "path".to_string(),
            }
        }
        Err(_) => "path".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::Router;
    use serde::Deserialize;
    use serde_json::Value;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize)]
    struct Item {
        name: String,
        price: f64,
    }

    async fn echo(Json(item): Json<Item>) -> Json<String> {
        Json(format!("{}:{}", item.name, item.price))
    }

    async fn by_id(Path(id): Path<i32>) -> Json<i32> {
        Json(id)
    }

    fn app() -> Router {
        Router::new()
            .route("/items", post(echo))
            .route("/items/{id}", get(by_id))
    }

    async fn send(request: axum::http::Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(body: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method("POST")
            .uri("/items")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn mistyped_field_is_named() {
        let (status, body) = send(post_json(r#"{"name":"Kettle","price":"abc"}"#)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status_code"], 422);
        assert_eq!(body["field"], "price");
    }

    #[tokio::test]
    async fn missing_field_is_named() {
        let (status, body) = send(post_json(r#"{"price":3.0}"#)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["field"], "name");
    }

    #[tokio::test]
    async fn malformed_json_is_structured() {
        let (status, body) = send(post_json("{not json")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["field"], "body");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn unparsable_path_parameter_is_named() {
        let request = axum::http::Request::builder()
            .uri("/items/abc")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["field"], "id");
    }

    #[tokio::test]
    async fn well_formed_body_passes_through() {
        let (status, body) = send(post_json(r#"{"name":"Kettle","price":2.5}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Kettle:2.5");
    }
}
