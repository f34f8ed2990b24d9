use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish between different
/// types of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors) or rejected input
    InvalidArguments = 2,
    /// Application error (datastore, codec, configuration, I/O, etc.)
    ApplicationError = 3,
    /// The requested layer, ancestry or notification does not exist
    NotFound = 4,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Picks the exit code matching the error kind of a failed request.
    pub fn for_service_error(error: &ServiceError) -> Self {
        match error {
            ServiceError::InvalidArgument(_) => ExitCode::InvalidArguments,
            ServiceError::NotFound(_) => ExitCode::NotFound,
            ServiceError::Internal(_) => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
            ExitCode::NotFound => write!(f, "Not Found (4)"),
        }
    }
}

/// Error surface of every inbound port.
///
/// Callers receive exactly one kind plus a message per request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Malformed or missing input, or an unprocessable layer
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested layer, ancestry or notification does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Any datastore, codec or processing failure not otherwise classified
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ServiceError::InvalidArgument(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ServiceError::Internal(message.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ServiceError::InvalidArgument(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, ServiceError::Internal(_))
    }
}
