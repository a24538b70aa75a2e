//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check every catalog URL is usable as a redirect target
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::http::response::validate_destination;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
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

pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("{:?} is not a socket address", config.listener.bind_address),
        ));
    }

    if config.database.path.as_os_str().is_empty() {
        errors.push(ValidationError::new("database.path", "must not be empty"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    let catalog = &config.catalog;
    if catalog.area_marker.is_empty() {
        errors.push(ValidationError::new("catalog.area_marker", "must not be empty"));
    }
    check_url(&mut errors, "catalog.area_fallback_url", &catalog.area_fallback_url);
    check_url(&mut errors, "catalog.generic_url", &catalog.generic_url);

    let mut labels = HashSet::new();
    for (i, carrier) in catalog.carriers.iter().enumerate() {
        let field = format!("catalog.carriers[{}]", i);
        if !labels.insert(carrier.label.as_str()) {
            errors.push(ValidationError::new(
                format!("{}.label", field),
                format!("duplicate carrier label {:?}", carrier.label),
            ));
        }
        if carrier.substring.is_empty() {
            errors.push(ValidationError::new(format!("{}.substring", field), "must not be empty"));
        }
        check_url(&mut errors, &format!("{}.url", field), &carrier.url);
    }

    let observability = &config.observability;
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("{:?} is not a socket address", observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, url: &str) {
    if let Err(e) = validate_destination(url) {
        errors.push(ValidationError::new(field, e.to_string()));
    }
}
