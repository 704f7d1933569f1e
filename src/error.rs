//! Gateway-level error taxonomy.
//!
//! Every failure the pipeline can produce maps to exactly one variant here,
//! and every variant maps to exactly one status/message pair. Handlers
//! return these instead of raw status codes so the JSON envelope is applied
//! uniformly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::auth::AuthError;
use crate::http::response::error_response;

/// Top-level failure taxonomy for gateway-originated responses.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Credential verification failed (401 family, except misconfiguration).
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// No table entry and not public.
    #[error("No matching route found")]
    RouteNotFound,

    /// The mapped backend could not be reached.
    #[error("{service} service is unavailable")]
    BackendUnavailable { service: String },

    /// Per-request upstream deadline expired before a response arrived.
    #[error("Request timed out")]
    Timeout,

    /// Source IP exceeded its fixed-window quota.
    #[error("Too many requests, please try again later")]
    RateLimited,

    /// Last-resort bucket for anything unclassified.
    #[error("Internal server error")]
    Internal,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Auth(AuthError::ServerMisconfigured) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::BackendUnavailable { .. } => StatusCode::BAD_GATEWAY,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message surfaced to the caller. Operator faults get a generic message;
    /// the actionable detail goes to the log at the failure site.
    fn public_message(&self) -> String {
        match self {
            Self::Auth(AuthError::ServerMisconfigured) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        error_response(self.status(), &self.public_message())
    }
}
