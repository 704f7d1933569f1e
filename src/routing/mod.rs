//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → classifier.rs (public or protected?)
//!     → table.rs (mount prefix → backend target, first match wins)
//!     → Return: RouteTarget or explicit no-match (404)
//!
//! Compilation (at startup):
//!     AuthConfig.public_routes → RouteClassifier
//!     ServiceConfig[]          → RouteTable (pre-parsed scheme/authority)
//!     → Frozen, shared via Arc
//! ```
//!
//! # Design Decisions
//! - Everything compiled at startup, immutable at runtime
//! - No regex in the hot path (prefix matching only)
//! - Deterministic: same path always resolves the same target

pub mod classifier;
pub mod table;

pub use classifier::RouteClassifier;
pub use table::{RouteTable, RouteTableError, RouteTarget};
