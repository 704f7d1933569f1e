//! Bearer token verification.
//!
//! # Responsibilities
//! - Parse the `Authorization` header (exact `Bearer <token>` form)
//! - Verify the token signature and expiry against the shared secret
//! - Map every failure to one of the enumerated [`AuthError`] kinds
//!
//! # Design Decisions
//! - Verification is pure and synchronous: no I/O, no retries
//! - A missing secret is an operator fault, kept distinct from client
//!   failures so it can surface as a 500 rather than a 401
//! - Claims absence never fails verification; identity fields default
//!   to empty strings

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};

use crate::auth::identity::{Claims, VerifiedIdentity};

/// Enumerated verification failures, matched exhaustively by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization` header on a protected route.
    #[error("Authentication required")]
    MissingCredential,

    /// Header present but not exactly `Bearer <token>`.
    #[error("Invalid authorization header format")]
    MalformedHeader,

    /// The shared secret is empty or unset. Operator error, not client error.
    #[error("authentication secret is not configured")]
    ServerMisconfigured,

    /// Signature verification failed because the token expired.
    #[error("Token has expired")]
    Expired,

    /// Any other verification failure: bad signature, malformed token,
    /// wrong algorithm.
    #[error("Invalid token")]
    Invalid,
}

impl AuthError {
    /// Stable label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::MalformedHeader => "malformed_header",
            Self::ServerMisconfigured => "server_misconfigured",
            Self::Expired => "expired",
            Self::Invalid => "invalid",
        }
    }
}

/// Verifies bearer credentials against the shared HS256 secret.
pub struct TokenVerifier {
    /// Absent when the secret was empty at startup.
    decoding_key: Option<DecodingKey>,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier from the shared secret. An empty secret produces a
    /// verifier that fails every call with [`AuthError::ServerMisconfigured`].
    pub fn new(secret: &str) -> Self {
        let decoding_key = if secret.is_empty() {
            None
        } else {
            Some(DecodingKey::from_secret(secret.as_bytes()))
        };
        Self {
            decoding_key,
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Verify an `Authorization` header value and extract the caller identity.
    pub fn verify(&self, authorization: Option<&str>) -> Result<VerifiedIdentity, AuthError> {
        let header = authorization.ok_or(AuthError::MissingCredential)?;

        let parts: Vec<&str> = header.split(' ').collect();
        if parts.len() != 2 || parts[0] != "Bearer" {
            return Err(AuthError::MalformedHeader);
        }
        let token = parts[1];

        let key = self
            .decoding_key
            .as_ref()
            .ok_or(AuthError::ServerMisconfigured)?;

        let data = decode::<Claims>(token, key, &self.validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::Invalid,
        })?;

        Ok(VerifiedIdentity::from_claims(data.claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &str = "test-secret";

    fn mint(secret: &str, exp_offset: i64) -> String {
        let exp = chrono::Utc::now().timestamp() + exp_offset;
        let claims = json!({
            "exp": exp,
            "user": {"id": "u1", "email": "a@b.com", "userType": "buyer"},
        });
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn missing_header_is_missing_credential() {
        let verifier = TokenVerifier::new(SECRET);
        assert_eq!(verifier.verify(None), Err(AuthError::MissingCredential));
    }

    #[test]
    fn wrong_scheme_is_malformed() {
        let verifier = TokenVerifier::new(SECRET);
        assert_eq!(
            verifier.verify(Some("Basic xyz")),
            Err(AuthError::MalformedHeader)
        );
    }

    #[test]
    fn extra_parts_are_malformed() {
        let verifier = TokenVerifier::new(SECRET);
        assert_eq!(
            verifier.verify(Some("Bearer a b")),
            Err(AuthError::MalformedHeader)
        );
        assert_eq!(
            verifier.verify(Some("Bearer")),
            Err(AuthError::MalformedHeader)
        );
    }

    #[test]
    fn empty_secret_is_server_misconfigured() {
        let verifier = TokenVerifier::new("");
        let token = mint(SECRET, 3600);
        assert_eq!(
            verifier.verify(Some(&format!("Bearer {token}"))),
            Err(AuthError::ServerMisconfigured)
        );
    }

    #[test]
    fn expired_token_is_expired() {
        let verifier = TokenVerifier::new(SECRET);
        let token = mint(SECRET, -3600);
        assert_eq!(
            verifier.verify(Some(&format!("Bearer {token}"))),
            Err(AuthError::Expired)
        );
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let verifier = TokenVerifier::new(SECRET);
        let token = mint("other-secret", 3600);
        assert_eq!(
            verifier.verify(Some(&format!("Bearer {token}"))),
            Err(AuthError::Invalid)
        );
    }

    #[test]
    fn garbage_token_is_invalid() {
        let verifier = TokenVerifier::new(SECRET);
        assert_eq!(
            verifier.verify(Some("Bearer not.a.jwt")),
            Err(AuthError::Invalid)
        );
    }

    #[test]
    fn valid_token_yields_identity() {
        let verifier = TokenVerifier::new(SECRET);
        let token = mint(SECRET, 3600);
        let identity = verifier
            .verify(Some(&format!("Bearer {token}")))
            .expect("token should verify");
        assert_eq!(identity.id, "u1");
        assert_eq!(identity.email, "a@b.com");
        assert_eq!(identity.user_type, "buyer");
    }

    #[test]
    fn missing_identity_fields_default_to_empty() {
        let verifier = TokenVerifier::new(SECRET);
        let exp = chrono::Utc::now().timestamp() + 3600;
        let claims = json!({"exp": exp, "user": {"id": "u2"}});
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        let identity = verifier
            .verify(Some(&format!("Bearer {token}")))
            .expect("token should verify");
        assert_eq!(identity.id, "u2");
        assert_eq!(identity.email, "");
        assert_eq!(identity.user_type, "");
    }
}
