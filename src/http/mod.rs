//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, admission pipeline)
//!     → request.rs (request ID as early as possible)
//!     → [auth verifies + injects identity on protected routes]
//!     → [routing table picks the backend]
//!     → forwarded via pooled hyper client, relayed verbatim
//!     → response.rs (gateway-originated error envelopes only)
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
