//! Transport seam between the repository client and the wire.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{RepositoryError, RepositoryResult};

/// Method of a repository request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMethod {
    /// Create a new item.
    Post,
    /// Partially update an item.
    Patch,
    /// Replace an item's fields.
    Put,
}

impl FetchMethod {
    /// Wire name of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
        }
    }
}

/// A single request handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// Request method.
    pub method: FetchMethod,
    /// Server-relative path, including any OData action segment.
    pub path: String,
    /// JSON body, when the operation carries one.
    pub body: Option<Value>,
}

/// Raw response surfaced by the transport.
///
/// Mirrors the collaborator contract of the server client: an `ok` flag plus
/// a body that may or may not be present or parseable.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    /// Whether the status code was in the success range.
    pub ok: bool,
    /// HTTP status code.
    pub status: u16,
    /// Response body, when one could be read.
    pub body: Option<Value>,
}

impl FetchResponse {
    /// An ok response wrapping `body`.
    #[must_use]
    pub const fn success(body: Value) -> Self {
        Self {
            ok: true,
            status: 200,
            body: Some(body),
        }
    }

    /// A rejection with `status` and no body.
    #[must_use]
    pub const fn rejected(status: u16) -> Self {
        Self {
            ok: false,
            status,
            body: None,
        }
    }

    /// Deserialize the body into the expected envelope.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Parse`] when the body is missing or does
    /// not match `T`.
    pub fn json<T: DeserializeOwned>(&self, operation: &'static str) -> RepositoryResult<T> {
        let body = self.body.clone().unwrap_or(Value::Null);
        serde_json::from_value(body).map_err(|source| RepositoryError::Parse { operation, source })
    }
}

/// Asynchronous transport used to reach the content repository.
///
/// Production implementations wrap an HTTP client; tests substitute scripted
/// responses. The repository never retries and never inspects transport
/// internals beyond the returned [`FetchResponse`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Execute one request and surface the raw response.
    ///
    /// # Errors
    ///
    /// Implementations return [`RepositoryError::Transport`] when the call
    /// cannot produce a response at all.
    async fn fetch(&self, request: FetchRequest) -> RepositoryResult<FetchResponse>;
}
