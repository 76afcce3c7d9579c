use serde::Serialize;

pub(crate) mod category_controller;
pub(crate) mod health_check_controller;
pub(crate) mod product_controller;

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status_code: u16, data: T) -> Self {
        Self {
            status_code,
            data: Some(data),
        }
    }
}

/// Body returned after a successful delete.
#[derive(Debug, Serialize)]
struct DeleteResponse<I: Serialize> {
    id: I,
    message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_serialize_api_response_with_some() {
        let response = ApiResponse::new(StatusCode::OK.into(), 23);
        let serialized = serde_json::to_string(&response).unwrap();

        // Serializing and then deserializing because the string output from serde_json::to_string is
        // non-deterministic as far as the order of the JSON keys. This ensures the test won't be flaky
        let deserialized_value: serde_json::Value = serde_json::from_str(&serialized).unwrap();
        let deserialized_expected_value: serde_json::Value =
            json!({"data": 23, "status_code": 200});
        assert_eq!(deserialized_value, deserialized_expected_value);
    }

    #[tokio::test]
    async fn test_serialize_delete_response() {
        let response = DeleteResponse {
            id: 4,
            message: "Product deleted",
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"id": 4, "message": "Product deleted"}));
    }
}
