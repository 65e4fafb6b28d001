//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, buffer sizes > 0)
//! - Check bind addresses parse as socket addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: NetLabConfig → Result<(), Vec<ValidationError>>
//! - Runs before any socket is bound

use std::net::SocketAddr;

use super::schema::NetLabConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A bind address did not parse as `ip:port`.
    InvalidBindAddress { service: &'static str, value: String },
    /// A timeout was configured as zero.
    ZeroTimeout { service: &'static str, field: &'static str },
    /// A receive buffer was configured with zero capacity.
    ZeroBufferSize { service: &'static str },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress { service, value } => {
                write!(f, "{}: bind address {:?} is not a valid socket address", service, value)
            }
            ValidationError::ZeroTimeout { service, field } => {
                write!(f, "{}: {} must be greater than zero", service, field)
            }
            ValidationError::ZeroBufferSize { service } => {
                write!(f, "{}: buffer size must be greater than zero", service)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a full configuration, collecting every problem found.
pub fn validate(config: &NetLabConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.echo.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            service: "echo",
            value: config.echo.bind_address.clone(),
        });
    }
    if config.echo.receive_timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout { service: "echo", field: "receive_timeout_ms" });
    }
    if config.echo.send_timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout { service: "echo", field: "send_timeout_ms" });
    }
    if config.echo.drain_timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout { service: "echo", field: "drain_timeout_ms" });
    }
    if config.echo.buffer_size == 0 {
        errors.push(ValidationError::ZeroBufferSize { service: "echo" });
    }

    if config.datagram.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            service: "datagram",
            value: config.datagram.bind_address.clone(),
        });
    }
    if config.datagram.buffer_size == 0 {
        errors.push(ValidationError::ZeroBufferSize { service: "datagram" });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
