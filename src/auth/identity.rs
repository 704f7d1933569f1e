//! Verified caller identity and downstream propagation.
//!
//! Downstream services trust the `x-user-*` headers as the gateway-verified
//! identity; they never re-verify credentials. That trust only holds while
//! backends are reachable exclusively through the gateway, so the gateway
//! also strips these headers off every inbound request before forwarding.

use axum::http::{header::HeaderName, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::Value;

pub const X_USER_ID: HeaderName = HeaderName::from_static("x-user-id");
pub const X_USER_EMAIL: HeaderName = HeaderName::from_static("x-user-email");
pub const X_USER_TYPE: HeaderName = HeaderName::from_static("x-user-type");
pub const X_USER_DATA: HeaderName = HeaderName::from_static("x-user-data");

/// Token claims. Only the nested `user` object is interpreted; everything
/// else the issuer put in the token is ignored.
#[derive(Debug, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub user: Value,
}

/// Identity extracted from a successfully verified token.
///
/// Lives for a single request; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedIdentity {
    pub id: String,
    pub email: String,
    pub user_type: String,
    /// The claims' user object, verbatim, for the serialized copy header.
    pub claims: Value,
}

fn str_claim(user: &Value, key: &str) -> String {
    user.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

impl VerifiedIdentity {
    /// Extract identity fields from decoded claims. Missing fields default
    /// to empty strings; absence is never a failure.
    pub fn from_claims(claims: Claims) -> Self {
        let user = claims.user;
        Self {
            id: str_claim(&user, "id"),
            email: str_claim(&user, "email"),
            user_type: str_claim(&user, "userType"),
            claims: user,
        }
    }

    /// Inject the identity into outbound request headers.
    ///
    /// If the serialized claims blob cannot be carried as a header value,
    /// only `x-user-data` is omitted; the request still proceeds.
    pub fn apply(&self, headers: &mut HeaderMap) {
        if let Ok(v) = HeaderValue::from_str(&self.id) {
            headers.insert(X_USER_ID, v);
        }
        if let Ok(v) = HeaderValue::from_str(&self.email) {
            headers.insert(X_USER_EMAIL, v);
        }
        if let Ok(v) = HeaderValue::from_str(&self.user_type) {
            headers.insert(X_USER_TYPE, v);
        }
        match serde_json::to_string(&self.claims) {
            Ok(blob) => {
                if let Ok(v) = HeaderValue::from_str(&blob) {
                    headers.insert(X_USER_DATA, v);
                } else {
                    tracing::debug!("claims blob not header-safe; omitting x-user-data");
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize claims; omitting x-user-data");
            }
        }
    }
}

/// Remove any caller-supplied identity headers.
///
/// These headers are only ever set by the gateway itself; anything arriving
/// from outside is a spoofing attempt and must not cross the trust boundary.
pub fn strip_identity_headers(headers: &mut HeaderMap) {
    headers.remove(X_USER_ID);
    headers.remove(X_USER_EMAIL);
    headers.remove(X_USER_TYPE);
    headers.remove(X_USER_DATA);
}
