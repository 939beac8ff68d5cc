//! Error taxonomy for registration, binding and dispatch.
//!
//! # Design Decisions
//! - Binder failures are never defaulted: a malformed body or an
//!   unparseable route/query value always surfaces to the caller
//! - `NotBound` is not an error; only the dispatcher's optionality rule
//!   turns it into `BadRequest`
//! - Handler failures are opaque to this crate; hosts classify them

use axum::http::Method;
use thiserror::Error;

use crate::binding::BindingPolicy;

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while registering or dispatching endpoints.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad registration. Fatal at startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request body is not valid JSON for the target shape.
    #[error("failed to deserialize {shape} from request body: {source}")]
    Deserialization {
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A route or query value does not parse into the target type.
    #[error("cannot convert `{field}` for {shape}: {message}")]
    Conversion {
        shape: &'static str,
        field: String,
        message: String,
    },

    /// The binding policy has no implementation.
    #[error("binding policy `{0}` is not supported")]
    NotSupported(BindingPolicy),

    /// A required request value was absent from its origin.
    #[error("required {shape} could not be bound from {origin}")]
    BadRequest {
        shape: &'static str,
        origin: BindingPolicy,
    },

    /// The handler itself failed.
    #[error(transparent)]
    Handler(#[from] HandlerError),

    /// The handler result could not be encoded.
    #[error("failed to serialize response: {0}")]
    Serialization(#[source] serde_json::Error),

    /// No endpoint is registered for the pattern and verb.
    #[error("no endpoint registered for {method} {pattern}")]
    NotFound { pattern: String, method: Method },

    /// The dispatch was abandoned because the process is shutting down.
    #[error("request cancelled by shutdown")]
    Cancelled,
}

/// Coarse classification a host maps onto its own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller sent something unusable.
    Client,
    /// Nothing is registered for the request.
    NotFound,
    /// The server is going away.
    Unavailable,
    /// Everything else.
    Server,
}

impl Error {
    /// Classify the error for transport mapping.
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::Deserialization { .. } | Error::Conversion { .. } | Error::BadRequest { .. } => {
                ErrorClass::Client
            }
            Error::NotFound { .. } => ErrorClass::NotFound,
            Error::Cancelled => ErrorClass::Unavailable,
            Error::Configuration(_)
            | Error::NotSupported(_)
            | Error::Handler(_)
            | Error::Serialization(_) => ErrorClass::Server,
        }
    }

    /// Stable machine-readable name, used for metric labels and error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Configuration(_) => "configuration",
            Error::Deserialization { .. } => "deserialization",
            Error::Conversion { .. } => "conversion",
            Error::NotSupported(_) => "not_supported",
            Error::BadRequest { .. } => "bad_request",
            Error::Handler(_) => "handler",
            Error::Serialization(_) => "serialization",
            Error::NotFound { .. } => "not_found",
            Error::Cancelled => "cancelled",
        }
    }
}

/// Opaque failure raised by business logic.
#[derive(Debug, Error)]
#[error("handler failed: {message}")]
pub struct HandlerError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl HandlerError {
    /// Create a handler error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error.
    pub fn from_source(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_classified() {
        let err = Error::BadRequest {
            shape: "ListRequest",
            origin: BindingPolicy::QueryString,
        };
        assert_eq!(err.class(), ErrorClass::Client);
        assert_eq!(err.kind(), "bad_request");

        let err = Error::Conversion {
            shape: "u64",
            field: "id".into(),
            message: "invalid digit".into(),
        };
        assert_eq!(err.class(), ErrorClass::Client);
    }

    #[test]
    fn test_handler_error_is_opaque_server_error() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err: Error = HandlerError::from_source(io).into();
        assert_eq!(err.class(), ErrorClass::Server);
        assert_eq!(err.to_string(), "handler failed: disk gone");
    }

    #[test]
    fn test_not_supported_is_server_side() {
        let err = Error::NotSupported(BindingPolicy::Form);
        assert_eq!(err.class(), ErrorClass::Server);
        assert_eq!(err.to_string(), "binding policy `form` is not supported");
    }
}
