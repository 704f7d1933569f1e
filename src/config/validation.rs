//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check origins parse as absolute http/https URLs
//! - Check mount prefixes are rooted and disjoint at the first segment
//! - Validate value ranges (window > 0, max > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system
//! - An empty JWT secret is deliberately NOT a validation error: it must
//!   surface per-request as a server misconfiguration, not at startup

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a loaded configuration, collecting every error.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.services.is_empty() {
        errors.push(ValidationError::new("services", "at least one backend service is required"));
    }

    for service in &config.services {
        let field = format!("services.{}", service.name);
        match Url::parse(&service.origin) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => {
                errors.push(ValidationError::new(
                    field.clone(),
                    format!("unsupported origin scheme '{}'", url.scheme()),
                ));
            }
            Err(e) => {
                errors.push(ValidationError::new(
                    field.clone(),
                    format!("invalid origin URL: {e}"),
                ));
            }
        }
        if !service.mount_prefix.starts_with('/') {
            errors.push(ValidationError::new(field, "mount prefix must start with '/'"));
        }
    }

    // Mount prefixes must be disjoint: no prefix may shadow another, so
    // match order can never change which backend a request reaches.
    for (i, a) in config.services.iter().enumerate() {
        for b in config.services.iter().skip(i + 1) {
            if a.mount_prefix == b.mount_prefix {
                errors.push(ValidationError::new(
                    "services",
                    format!("duplicate mount prefix '{}'", a.mount_prefix),
                ));
            } else if a.mount_prefix.starts_with(&b.mount_prefix)
                || b.mount_prefix.starts_with(&a.mount_prefix)
            {
                errors.push(ValidationError::new(
                    "services",
                    format!(
                        "mount prefix '{}' shadows '{}'",
                        a.mount_prefix, b.mount_prefix
                    ),
                ));
            }
        }
    }

    if config.rate_limit.window_ms == 0 {
        errors.push(ValidationError::new("rate_limit.window_ms", "must be greater than zero"));
    }
    if config.rate_limit.max_requests == 0 {
        errors.push(ValidationError::new("rate_limit.max_requests", "must be greater than zero"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than zero"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ServiceConfig;

    fn base_config() -> GatewayConfig {
        GatewayConfig::with_default_services()
    }

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&base_config()).is_ok());
    }

    #[test]
    fn rejects_bad_origin_url() {
        let mut config = base_config();
        config.services[0].origin = "not a url".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "services.auth"));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let mut config = base_config();
        config.services[0].origin = "ftp://host:21".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_unrooted_prefix() {
        let mut config = base_config();
        config.services[0].mount_prefix = "api/authz".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_zero_rate_window() {
        let mut config = base_config();
        config.rate_limit.window_ms = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "rate_limit.window_ms");
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = base_config();
        config.rate_limit.window_ms = 0;
        config.rate_limit.max_requests = 0;
        config.timeouts.request_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn rejects_shadowed_prefix() {
        let mut config = base_config();
        config.services.push(ServiceConfig {
            name: "authz-admin".to_string(),
            mount_prefix: "/api/authz/admin".to_string(),
            origin: "http://localhost:3009".to_string(),
        });
        // "/api/authz" shadows "/api/authz/admin"
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_duplicate_prefix() {
        let mut config = base_config();
        let dup = config.services[0].clone();
        config.services.push(dup);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn empty_secret_is_not_a_validation_error() {
        let config = base_config();
        assert!(config.auth.jwt_secret.is_empty());
        assert!(validate_config(&config).is_ok());
    }
}
