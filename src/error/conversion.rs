/**
 * Error Conversion
 *
 * Implements `IntoResponse` for `ApiError` so handlers and middleware
 * can return it directly. The conversion is also the single choke point
 * where every error path gets logged server-side with its real cause,
 * while the response body stays minimal.
 *
 * # Response Format
 *
 * ```json
 * { "error": "Email already exists" }
 * ```
 *
 * Validation errors additionally carry field-level details:
 *
 * ```json
 * { "error": "Validation failed", "details": [{ "field": "email", "message": "..." }] }
 * ```
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.client_message();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = ?self, "request failed with internal error");
        } else {
            tracing::warn!(error = ?self, status = status.as_u16(), "request rejected");
        }

        let body = match &self {
            ApiError::Validation { details } => serde_json::json!({
                "error": message,
                "details": details,
            }),
            _ => serde_json::json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}
