//! Process lifecycle.
//!
//! Startup is linear (load config → compile routes → bind → serve);
//! shutdown fans out through a broadcast channel so the serve loop can
//! drain gracefully.

pub mod shutdown;

pub use shutdown::Shutdown;
