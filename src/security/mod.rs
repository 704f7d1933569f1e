//! Admission control applied before the pipeline.
//!
//! # Design Decisions
//! - Fixed-window quota per source IP; window size and max count come from
//!   configuration and never change at runtime
//! - Rejections use the standard error envelope (429) and are counted

pub mod rate_limit;

pub use rate_limit::RateLimiterState;
