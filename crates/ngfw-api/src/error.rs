//! Remote API error types
//!
//! Error definitions with not-found/transport classification.

use thiserror::Error;

/// Error that can occur while talking to the management API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The remote object does not exist.
    ///
    /// Callers that can recover from absence (read, delete) check for this
    /// variant with [`ApiError::is_not_found`] instead of matching directly.
    #[error("object not found: {identifier}")]
    ObjectNotFound { identifier: String },

    /// The API rejected the request.
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a usable response.
    ///
    /// Transport retries and timeouts are the client's responsibility; this
    /// layer surfaces the failure unmodified.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A response could not be decoded into the expected record.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },
}

impl ApiError {
    /// Check whether this error means the remote object is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::ObjectNotFound { .. })
    }

    /// Check if this error is transient and a later pass may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }

    // Convenience constructors

    /// Create a not-found error for the given identifier.
    pub fn not_found(identifier: impl Into<String>) -> Self {
        ApiError::ObjectNotFound {
            identifier: identifier.into(),
        }
    }

    /// Create an API rejection error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ApiError::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        ApiError::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create a transport error with an underlying cause.
    pub fn transport_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ApiError::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid-response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        ApiError::InvalidResponse {
            message: message.into(),
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
