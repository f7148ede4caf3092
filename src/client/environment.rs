// ABOUTME: Validation of environment variable entries for the container client.
// ABOUTME: Rejects names and values the operating system cannot pass to a child process.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidConfiguration {
    #[error("environment variable name cannot be empty")]
    EmptyKey,

    #[error("environment variable name cannot contain '=': {0}")]
    KeyContainsEquals(String),

    #[error("environment variable name contains a NUL byte: {0:?}")]
    KeyContainsNul(String),

    #[error("value of environment variable {0} contains a NUL byte")]
    ValueContainsNul(String),
}

/// Check one environment entry.
pub fn validate_entry(key: &str, value: &str) -> Result<(), InvalidConfiguration> {
    if key.is_empty() {
        return Err(InvalidConfiguration::EmptyKey);
    }

    if key.contains('\0') {
        return Err(InvalidConfiguration::KeyContainsNul(key.to_string()));
    }

    if key.contains('=') {
        return Err(InvalidConfiguration::KeyContainsEquals(key.to_string()));
    }

    if value.contains('\0') {
        return Err(InvalidConfiguration::ValueContainsNul(key.to_string()));
    }

    Ok(())
}
