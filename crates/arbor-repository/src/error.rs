//! Error primitives for repository operations.

use serde_json::Value;
use thiserror::Error;

/// Result alias for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors produced by repository operations.
///
/// Constant messages; context travels in the variant fields.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The network call itself failed before a response was obtained.
    #[error("repository transport failure")]
    Transport {
        /// Operation that was being performed.
        operation: &'static str,
        /// Underlying transport error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The server answered with a non-ok status.
    #[error("repository request rejected")]
    ErrorResponse {
        /// Operation that was being performed.
        operation: &'static str,
        /// HTTP status code of the rejection.
        status: u16,
        /// Response body, when one was returned.
        body: Option<Value>,
    },
    /// The response body did not match the expected envelope.
    #[error("repository response parse failure")]
    Parse {
        /// Operation that was being performed.
        operation: &'static str,
        /// Underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },
}

impl RepositoryError {
    /// Build a transport failure from any underlying error.
    ///
    /// Intended for [`Fetcher`](crate::fetch::Fetcher) implementations.
    #[must_use]
    pub fn transport(
        operation: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Transport {
            operation,
            source: source.into(),
        }
    }

    /// Operation the error was raised for.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Transport { operation, .. }
            | Self::ErrorResponse { operation, .. }
            | Self::Parse { operation, .. } => *operation,
        }
    }
}
