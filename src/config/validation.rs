//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (windows > 0, bcrypt cost in range)
//! - Check addresses parse before the listener binds
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: IntakeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::IntakeConfig;

// bcrypt rejects costs outside this range.
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// A single semantic configuration problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidMetricsAddress(String),
    ZeroRateLimitWindow,
    ZeroRateLimitCeiling,
    BcryptCostOutOfRange(u32),
    EmptyDataFile,
    ZeroRequestTimeout,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "listener.bind_address '{}' is not a valid socket address", addr)
            }
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(f, "observability.metrics_address '{}' is not a valid socket address", addr)
            }
            ValidationError::ZeroRateLimitWindow => {
                write!(f, "rate_limit.window_secs must be greater than zero")
            }
            ValidationError::ZeroRateLimitCeiling => {
                write!(f, "rate_limit.max_requests must be greater than zero")
            }
            ValidationError::BcryptCostOutOfRange(cost) => {
                write!(
                    f,
                    "hashing.cost {} is outside the valid bcrypt range {}..={}",
                    cost, MIN_BCRYPT_COST, MAX_BCRYPT_COST
                )
            }
            ValidationError::EmptyDataFile => {
                write!(f, "storage.data_file must not be empty")
            }
            ValidationError::ZeroRequestTimeout => {
                write!(f, "timeouts.request_secs must be greater than zero")
            }
        }
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &IntakeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.rate_limit.window_secs == 0 {
        errors.push(ValidationError::ZeroRateLimitWindow);
    }
    if config.rate_limit.max_requests == 0 {
        errors.push(ValidationError::ZeroRateLimitCeiling);
    }

    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&config.hashing.cost) {
        errors.push(ValidationError::BcryptCostOutOfRange(config.hashing.cost));
    }

    if config.storage.data_file.is_empty() {
        errors.push(ValidationError::EmptyDataFile);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
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

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&IntakeConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = IntakeConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.rate_limit.window_secs = 0;
        config.hashing.cost = 50;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroRateLimitWindow));
        assert!(errors.contains(&ValidationError::BcryptCostOutOfRange(50)));
    }
}
