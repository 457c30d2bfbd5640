//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the node endpoint and listen addresses
//! - Catch faucet parameters the ledger would reject outright
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProvisionerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::ProvisionerConfig;
use crate::ledger::types::Endpoint;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &ProvisionerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = Endpoint::parse(&config.ledger.node_endpoint) {
        errors.push(ValidationError::new("ledger.node_endpoint", e.to_string()));
    }

    if config.ledger.connect_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "ledger.connect_timeout_secs",
            "must be greater than zero",
        ));
    }

    if config.accounts.faucet.token_symbol.trim().is_empty() {
        errors.push(ValidationError::new(
            "accounts.faucet.token_symbol",
            "must not be empty",
        ));
    }

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "server.bind_address",
            format!("'{}' is not a socket address", config.server.bind_address),
        ));
    }

    let observability = &config.observability;
    if !LOG_LEVELS.contains(&observability.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", observability.log_level),
        ));
    }

    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
