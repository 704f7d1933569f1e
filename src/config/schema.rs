//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits; every section has defaults so a minimal
//! environment still yields a runnable config.

use serde::{Deserialize, Serialize};

/// Root configuration for the API gateway.
///
/// Constructed once at process start and never mutated; shared via `Arc`
/// to all subsystems.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, body limits).
    pub listener: ListenerConfig,

    /// Authentication settings (shared secret, public route set).
    pub auth: AuthConfig,

    /// Backend service definitions, in match order.
    pub services: Vec<ServiceConfig>,

    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_size: 2 * 1024 * 1024,
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared HS256 signing secret used to verify bearer tokens.
    ///
    /// May be empty: startup proceeds with a warning, and every protected
    /// request then fails with a 500-class misconfiguration error.
    pub jwt_secret: String,

    /// Ordered public route patterns. A trailing `/*` marks an explicit
    /// subtree; plain entries authorize their subtree as well.
    pub public_routes: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            public_routes: vec![
                "/health".to_string(),
                "/api/authz/login".to_string(),
                "/api/authz/register".to_string(),
                "/api/authz/refresh".to_string(),
            ],
        }
    }
}

/// A single backend service exposed under a mount prefix.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service identifier for logging/metrics and error messages.
    pub name: String,

    /// Path prefix under which the service is exposed (e.g., "/api/authz").
    pub mount_prefix: String,

    /// Backend origin base URL (scheme + host + port).
    pub origin: String,
}

fn default_services() -> Vec<ServiceConfig> {
    vec![
        ServiceConfig {
            name: "auth".to_string(),
            mount_prefix: "/api/authz".to_string(),
            origin: "http://localhost:3001".to_string(),
        },
        ServiceConfig {
            name: "iam".to_string(),
            mount_prefix: "/api/iam".to_string(),
            origin: "http://localhost:3002".to_string(),
        },
        ServiceConfig {
            name: "inventory".to_string(),
            mount_prefix: "/api/inventory".to_string(),
            origin: "http://localhost:3003".to_string(),
        },
    ]
}

/// Rate limiting configuration (fixed window, per source IP).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting.
    pub enabled: bool,

    /// Window length in milliseconds.
    pub window_ms: u64,

    /// Maximum requests per source IP within one window.
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_ms: 60_000,
            max_requests: 100,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-request upstream deadline in seconds. Covers connection
    /// acquisition as well as the response.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Config with the default three-service route table.
    ///
    /// `Default::default()` leaves `services` empty (serde semantics for a
    /// `Vec` field); environment loading starts from this constructor.
    pub fn with_default_services() -> Self {
        Self {
            services: default_services(),
            ..Self::default()
        }
    }
}
