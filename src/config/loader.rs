//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProvisionerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `ledger.node_endpoint`.
pub const NODE_ENDPOINT_ENV_VAR: &str = "LEDGER_NODE_ENDPOINT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// `LEDGER_NODE_ENDPOINT`, when set, replaces the endpoint from the file.
pub fn load_config(path: &Path) -> Result<ProvisionerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content, std::env::var(NODE_ENDPOINT_ENV_VAR).ok())
}

/// Build the configuration used when no file is given: defaults plus env override.
pub fn default_config() -> Result<ProvisionerConfig, ConfigError> {
    parse_config("", std::env::var(NODE_ENDPOINT_ENV_VAR).ok())
}

/// Parse, apply the endpoint override, and validate.
pub fn parse_config(
    content: &str,
    endpoint_override: Option<String>,
) -> Result<ProvisionerConfig, ConfigError> {
    let mut config: ProvisionerConfig = toml::from_str(content).map_err(ConfigError::Parse)?;

    if let Some(endpoint) = endpoint_override.filter(|e| !e.trim().is_empty()) {
        tracing::debug!(node_endpoint = %endpoint, "Node endpoint overridden from environment");
        config.ledger.node_endpoint = endpoint;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
