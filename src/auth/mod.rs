//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! Authorization header
//!     → verifier.rs (parse Bearer form, verify HS256 signature + expiry)
//!     → identity.rs (extract nested user claims → VerifiedIdentity)
//!     → x-user-* headers on the forwarded request
//! ```
//!
//! # Design Decisions
//! - Failures are a typed enum, matched exhaustively by the pipeline;
//!   no error ever crosses the verifier boundary as a panic
//! - Token issuance lives elsewhere; the gateway only verifies
//! - Identity headers are gateway-set only; inbound copies are stripped

pub mod identity;
pub mod verifier;

pub use identity::{strip_identity_headers, VerifiedIdentity};
pub use verifier::{AuthError, TokenVerifier};
