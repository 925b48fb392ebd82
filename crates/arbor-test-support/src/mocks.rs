//! Scripted fetchers and the payload recorder.

use std::sync::{Arc, Mutex, PoisonError};

use arbor_repository::{
    FetchRequest, FetchResponse, Fetcher, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;

/// Fetcher returning clones of one configured response for every request.
#[derive(Debug, Clone)]
pub struct StaticFetcher {
    response: FetchResponse,
}

impl StaticFetcher {
    /// Answer every request with `response`.
    #[must_use]
    pub const fn new(response: FetchResponse) -> Self {
        Self { response }
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, _request: FetchRequest) -> RepositoryResult<FetchResponse> {
        Ok(self.response.clone())
    }
}

/// Fetcher whose calls always fail at the transport layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingFetcher;

#[async_trait]
impl Fetcher for FailingFetcher {
    async fn fetch(&self, _request: FetchRequest) -> RepositoryResult<FetchResponse> {
        Err(RepositoryError::transport("fetch", "connection refused"))
    }
}

/// Collects published payloads for assertions.
pub struct Recorder<T> {
    items: Arc<Mutex<Vec<T>>>,
}

impl<T> Recorder<T> {
    /// New, empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of recorded payloads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Recorder<T> {
    /// Snapshot of the recorded payloads, in publish order.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.lock().clone()
    }
}

impl<T: Clone + Send + Sync + 'static> Recorder<T> {
    /// Handler that appends each published payload to this recorder.
    #[must_use]
    pub fn handler(&self) -> impl Fn(&T) + Send + Sync + 'static {
        let items = Arc::clone(&self.items);
        move |payload: &T| {
            items
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(payload.clone());
        }
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}
