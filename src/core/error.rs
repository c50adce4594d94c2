//! Typed error handling for the station console
//!
//! Every user action can fail in one of a few well-known ways. The variants
//! here let callers match on the failure kind instead of inspecting strings.
//!
//! # Error Categories
//!
//! - [`TransportError`]: a REST call failed (network, non-success status, bad body)
//! - [`ValidationError`]: a form failed its schema before anything was sent
//! - [`ConfigError`]: the YAML configuration could not be loaded
//! - [`ReportError`]: a rendered report could not be written
//!
//! # Example
//!
//! ```rust,ignore
//! match screen.submit().await {
//!     Err(ConsoleError::Validation(errors)) => {
//!         for violation in errors.violations() {
//!             println!("{}: {}", violation.field, violation.message);
//!         }
//!     }
//!     Err(ConsoleError::Transport(e)) => eprintln!("server said no: {e}"),
//!     _ => {}
//! }
//! ```

use crate::core::service::Operation;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the console
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// A resource endpoint could not be reached or rejected the call
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The form failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Report output errors
    #[error(transparent)]
    Report(#[from] ReportError),

    /// The action does not make sense in the current session state
    #[error("Invalid action: {0}")]
    InvalidState(String),
}

impl ConsoleError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ConsoleError::Transport(e) => e.error_code(),
            ConsoleError::Validation(_) => "VALIDATION_ERROR",
            ConsoleError::Config(_) => "CONFIG_ERROR",
            ConsoleError::Report(_) => "REPORT_ERROR",
            ConsoleError::InvalidState(_) => "INVALID_STATE",
        }
    }

    /// Whether retrying the same action could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, ConsoleError::Transport(_))
    }
}

// =============================================================================
// Transport Errors
// =============================================================================

/// Errors raised by a resource client
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// The server could not be reached (connection refused, timeout, ...)
    #[error("Failed to {operation} {resource}: {message}")]
    Network {
        resource: &'static str,
        operation: Operation,
        message: String,
    },

    /// The server answered with a non-success status
    #[error("Failed to {operation} {resource}: server responded with status {status}")]
    Status {
        resource: &'static str,
        operation: Operation,
        status: u16,
        body: String,
    },

    /// The server answered but the body was not what we expected
    #[error("Failed to decode {resource} response to {operation}: {message}")]
    Decode {
        resource: &'static str,
        operation: Operation,
        message: String,
    },
}

impl TransportError {
    pub fn error_code(&self) -> &'static str {
        match self {
            TransportError::Network { .. } => "TRANSPORT_NETWORK",
            TransportError::Status { .. } => "TRANSPORT_STATUS",
            TransportError::Decode { .. } => "TRANSPORT_DECODE",
        }
    }

    /// The operation that failed
    pub fn operation(&self) -> Operation {
        match self {
            TransportError::Network { operation, .. }
            | TransportError::Status { operation, .. }
            | TransportError::Decode { operation, .. } => *operation,
        }
    }

    /// HTTP status, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every field that failed validation, in form order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Shorthand for a single-field failure
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![FieldViolation::new(field, message)])
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Names of the offending fields
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }

    /// Whether the given field has at least one violation
    pub fn has(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();
        write!(f, "Validation errors: {}", msgs.join(", "))
    }
}

impl std::error::Error for ValidationError {}

// =============================================================================
// Configuration Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    Parse { message: String },

    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

// =============================================================================
// Report Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
