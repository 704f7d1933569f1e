//! Configuration loading from the environment.
//!
//! The gateway reads its configuration once at startup and never reloads it.
//! Every variable is optional; unset variables keep the schema defaults.

use std::env;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Var { var: &'static str, reason: String },

    #[error("validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_var<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Var { var, reason: e.to_string() }),
        Err(_) => Ok(None),
    }
}

impl GatewayConfig {
    /// Build a validated configuration from environment variables.
    ///
    /// Recognized variables:
    /// `GATEWAY_BIND_ADDRESS`, `JWT_SECRET`, `PUBLIC_ROUTES` (comma-separated),
    /// `AUTH_SERVICE_URL`, `IAM_SERVICE_URL`, `INVENTORY_SERVICE_URL`,
    /// `RATE_LIMIT_ENABLED`, `RATE_LIMIT_WINDOW_MS`, `RATE_LIMIT_MAX_REQUESTS`,
    /// `REQUEST_TIMEOUT_SECS`, `MAX_BODY_SIZE`, `LOG_LEVEL`,
    /// `METRICS_ENABLED`, `METRICS_ADDRESS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = GatewayConfig::with_default_services();

        if let Ok(addr) = env::var("GATEWAY_BIND_ADDRESS") {
            config.listener.bind_address = addr;
        }
        if let Some(size) = parse_var::<usize>("MAX_BODY_SIZE")? {
            config.listener.max_body_size = size;
        }

        if let Ok(secret) = env::var("JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        if let Ok(routes) = env::var("PUBLIC_ROUTES") {
            config.auth.public_routes = routes
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        let origin_vars: &[(&str, &str)] = &[
            ("auth", "AUTH_SERVICE_URL"),
            ("iam", "IAM_SERVICE_URL"),
            ("inventory", "INVENTORY_SERVICE_URL"),
        ];
        for (name, var) in origin_vars {
            if let Ok(origin) = env::var(var) {
                if let Some(service) = config.services.iter_mut().find(|s| s.name == *name) {
                    service.origin = origin;
                }
            }
        }

        if let Some(enabled) = parse_var::<bool>("RATE_LIMIT_ENABLED")? {
            config.rate_limit.enabled = enabled;
        }
        if let Some(window) = parse_var::<u64>("RATE_LIMIT_WINDOW_MS")? {
            config.rate_limit.window_ms = window;
        }
        if let Some(max) = parse_var::<u32>("RATE_LIMIT_MAX_REQUESTS")? {
            config.rate_limit.max_requests = max;
        }

        if let Some(secs) = parse_var::<u64>("REQUEST_TIMEOUT_SECS")? {
            config.timeouts.request_secs = secs;
        }

        if let Ok(level) = env::var("LOG_LEVEL") {
            config.observability.log_level = level;
        }
        if let Some(enabled) = parse_var::<bool>("METRICS_ENABLED")? {
            config.observability.metrics_enabled = enabled;
        }
        if let Ok(addr) = env::var("METRICS_ADDRESS") {
            config.observability.metrics_address = addr;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;

        if config.auth.jwt_secret.is_empty() {
            tracing::warn!(
                "JWT_SECRET is not set; protected routes will fail with a server error"
            );
        }

        Ok(config)
    }
}
