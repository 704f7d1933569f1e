//! Mount-prefix route table.
//!
//! # Responsibilities
//! - Compile the configured services into forwarding targets at startup
//! - Resolve an inbound path to the backend that owns its mount prefix
//!
//! # Design Decisions
//! - Targets pre-parse their origin into scheme + authority so the hot
//!   path never re-parses URLs
//! - First match wins, evaluated in config order; validation guarantees
//!   prefixes are disjoint so order cannot change semantics
//! - Explicit None on no match rather than a silent default backend

use std::str::FromStr;

use axum::http::uri::{Authority, Scheme};
use url::Url;

use crate::config::ServiceConfig;

/// A compiled forwarding target.
#[derive(Debug, Clone)]
pub struct RouteTarget {
    /// Service identifier for logs, metrics and error messages.
    pub name: String,
    /// Path prefix the service is mounted under.
    pub mount_prefix: String,
    /// Origin scheme (http or https).
    pub scheme: Scheme,
    /// Origin host:port.
    pub authority: Authority,
}

/// Error compiling a service entry into a target.
#[derive(Debug, thiserror::Error)]
pub enum RouteTableError {
    #[error("service {name}: invalid origin URL: {source}")]
    InvalidOrigin {
        name: String,
        #[source]
        source: url::ParseError,
    },

    #[error("service {name}: origin has no usable authority")]
    MissingAuthority { name: String },
}

/// Immutable prefix → backend table, built once at startup.
#[derive(Debug)]
pub struct RouteTable {
    targets: Vec<RouteTarget>,
}

impl RouteTable {
    /// Compile the configured services, preserving their order.
    pub fn from_config(services: &[ServiceConfig]) -> Result<Self, RouteTableError> {
        let mut targets = Vec::with_capacity(services.len());
        for service in services {
            let url = Url::parse(&service.origin).map_err(|source| {
                RouteTableError::InvalidOrigin {
                    name: service.name.clone(),
                    source,
                }
            })?;

            let authority_str = match (url.host_str(), url.port()) {
                (Some(host), Some(port)) => format!("{host}:{port}"),
                (Some(host), None) => host.to_string(),
                (None, _) => {
                    return Err(RouteTableError::MissingAuthority {
                        name: service.name.clone(),
                    })
                }
            };
            let authority = Authority::from_str(&authority_str).map_err(|_| {
                RouteTableError::MissingAuthority {
                    name: service.name.clone(),
                }
            })?;
            let scheme = if url.scheme() == "https" {
                Scheme::HTTPS
            } else {
                Scheme::HTTP
            };

            targets.push(RouteTarget {
                name: service.name.clone(),
                mount_prefix: service.mount_prefix.clone(),
                scheme,
                authority,
            });
        }
        Ok(Self { targets })
    }

    /// First target whose mount prefix is a prefix of the path.
    pub fn resolve(&self, path: &str) -> Option<&RouteTarget> {
        self.targets
            .iter()
            .find(|t| path.starts_with(t.mount_prefix.as_str()))
    }

    /// All compiled targets, in match order. Used by the health endpoint.
    pub fn targets(&self) -> &[RouteTarget] {
        &self.targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::from_config(&[
            ServiceConfig {
                name: "auth".into(),
                mount_prefix: "/api/authz".into(),
                origin: "http://auth:3001".into(),
            },
            ServiceConfig {
                name: "inventory".into(),
                mount_prefix: "/api/inventory".into(),
                origin: "https://inventory.internal".into(),
            },
        ])
        .unwrap()
    }

    #[test]
    fn resolves_by_mount_prefix() {
        let table = table();
        let target = table.resolve("/api/authz/login").unwrap();
        assert_eq!(target.name, "auth");
        assert_eq!(target.authority.as_str(), "auth:3001");
        assert_eq!(target.scheme, Scheme::HTTP);
    }

    #[test]
    fn default_port_origin_keeps_bare_host() {
        let table = table();
        let target = table.resolve("/api/inventory/items").unwrap();
        assert_eq!(target.authority.as_str(), "inventory.internal");
        assert_eq!(target.scheme, Scheme::HTTPS);
    }

    #[test]
    fn unmatched_path_resolves_to_none() {
        assert!(table().resolve("/api/unknown").is_none());
        assert!(table().resolve("/").is_none());
    }

    #[test]
    fn rejects_origin_without_host() {
        let err = RouteTable::from_config(&[ServiceConfig {
            name: "bad".into(),
            mount_prefix: "/x".into(),
            origin: "data:text/plain,hello".into(),
        }]);
        assert!(err.is_err());
    }
}
