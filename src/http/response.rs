//! Gateway-originated response envelopes.
//!
//! Proxied responses are relayed verbatim; only responses the gateway itself
//! produces (errors, health) use the JSON envelope defined here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Envelope for gateway-originated error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    /// ISO-8601 timestamp of when the error was produced.
    pub timestamp: String,
}

impl ErrorBody {
    pub fn new(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Build a gateway error response with the standard envelope.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_message_and_timestamp() {
        let body = ErrorBody::new("No matching route found");
        assert!(!body.success);
        assert_eq!(body.message, "No matching route found");
        // RFC 3339 is the ISO-8601 profile chrono emits.
        assert!(chrono::DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
    }

    #[test]
    fn error_response_sets_status() {
        let response = error_response(StatusCode::NOT_FOUND, "No matching route found");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
