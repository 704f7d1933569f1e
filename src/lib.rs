//! API gateway library.
//!
//! A single network-facing process that authenticates inbound HTTP requests
//! and forwards them, unmodified in body, to the backend service that owns
//! the path's mount prefix.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                  API GATEWAY                      │
//!   Client Request   │  ┌──────────┐   ┌──────────┐   ┌──────────────┐  │
//!   ─────────────────┼─▶│ security │──▶│   auth   │──▶│   routing    │  │
//!                    │  │rate limit│   │ verifier │   │classifier+tbl│  │
//!                    │  └──────────┘   └──────────┘   └──────┬───────┘  │
//!                    │                                       │          │
//!   Client Response  │  ┌──────────┐   ┌──────────┐   ┌──────▼───────┐  │
//!   ◀────────────────┼──│ envelope │◀──│  relay   │◀──│ pooled hyper │◀─┼── Backend
//!                    │  │ (errors) │   │ verbatim │   │    client    │  │
//!                    │  └──────────┘   └──────────┘   └──────────────┘  │
//!                    │                                                  │
//!                    │  config · observability · lifecycle              │
//!                    └──────────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
