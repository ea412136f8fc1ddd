/**
 * Error Conversion
 *
 * Turns backend errors into JSON responses and maps Axum extractor
 * rejections into the same shape, so that a client always receives:
 *
 * ```json
 * { "success": false, "statusCode": 403, "message": "You are not allowed to delete this post" }
 * ```
 */

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = json!({
            "success": false,
            "statusCode": status.as_u16(),
            "message": self.message(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request: {}", rejection.body_text());
        Self::handler(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<PathRejection> for BackendError {
    fn from(rejection: PathRejection) -> Self {
        tracing::warn!("Rejected request: {}", rejection.body_text());
        Self::handler(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!("Rejected request: {}", rejection.body_text());
        Self::handler(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = BackendError::forbidden("You are not allowed to create a post").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["statusCode"], 403);
        assert_eq!(body["message"], "You are not allowed to create a post");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = BackendError::internal("bcrypt exploded").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
    }
}
