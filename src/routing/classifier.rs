//! Public/protected route classification.
//!
//! # Responsibilities
//! - Parse configured public route patterns
//! - Decide per path whether authentication is required
//!
//! # Design Decisions
//! - Pure OR over an immutable ordered pattern list; no ordering tie-break
//! - Prefix matching only, no regex, to guarantee O(n) classification
//! - Unmatched paths default to protected
//! - Every public entry authorizes its whole subtree, including entries
//!   written without a wildcard. This broadening is deliberate and load-
//!   bearing for callers like `/api/authz/login/oauth`; do not "fix" it
//!   without auditing the public set.

/// A single public route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// Entry written as a plain path. Still matches its subtree.
    Exact(String),
    /// Entry written with a trailing `/*`.
    Subtree(String),
}

impl RoutePattern {
    /// Parse a configured pattern string.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_suffix("/*") {
            Some(base) => Self::Subtree(base.to_string()),
            None => Self::Exact(raw.to_string()),
        }
    }

    /// Whether this pattern authorizes the given path.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(base) | Self::Subtree(base) => path.starts_with(base.as_str()),
        }
    }
}

/// Classifies request paths as public or protected.
///
/// Built once at startup from configuration; immutable for the process
/// lifetime, so it is shared without locks.
#[derive(Debug)]
pub struct RouteClassifier {
    patterns: Vec<RoutePattern>,
}

impl RouteClassifier {
    pub fn new(patterns: &[String]) -> Self {
        Self {
            patterns: patterns.iter().map(|p| RoutePattern::parse(p)).collect(),
        }
    }

    /// True if any public pattern matches. Never fails.
    pub fn is_public(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }
}
