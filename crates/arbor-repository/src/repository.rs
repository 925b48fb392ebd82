//! Operation entry points and observer fan-out.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arbor_content::{BatchBody, Content, ContentArg, ContentRef, ODataBatch, ODataSingle};
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{RepositoryError, RepositoryResult};
use crate::fetch::{FetchMethod, FetchRequest, FetchResponse, Fetcher};
use crate::request::{
    ObserverKey, OperationKind, OperationObserver, OperationOutcome, OperationRequest,
};

/// Options for creating one content item under a parent path.
#[derive(Debug, Clone)]
pub struct PostOptions {
    /// Path of the container the item is created under.
    pub parent_path: String,
    /// Content type name to instantiate, when not inferred by the server.
    pub content_type: Option<String>,
    /// Field values of the new item.
    pub content: Content,
}

/// Options for partially updating one content item.
#[derive(Debug, Clone)]
pub struct PatchOptions {
    /// Id or path of the item to update.
    pub id_or_path: ContentRef,
    /// Fields to change.
    pub content: Content,
}

/// Options for fully replacing one content item's fields.
#[derive(Debug, Clone)]
pub struct PutOptions {
    /// Id or path of the item to replace.
    pub id_or_path: ContentRef,
    /// Replacement field values.
    pub content: Content,
}

/// Options for copying one or more items to a new parent.
#[derive(Debug, Clone)]
pub struct CopyOptions {
    /// Id(s) or path(s) of the items to copy.
    pub id_or_path: ContentArg,
    /// Path of the destination container.
    pub target_path: String,
}

/// Options for moving one or more items to a new parent.
#[derive(Debug, Clone)]
pub struct MoveOptions {
    /// Id(s) or path(s) of the items to move.
    pub id_or_path: ContentArg,
    /// Path of the destination container.
    pub target_path: String,
}

/// Options for deleting one or more items.
#[derive(Debug, Clone)]
pub struct DeleteOptions {
    /// Id(s) or path(s) of the items to delete.
    pub id_or_path: ContentArg,
    /// Bypass the trash and delete permanently.
    pub permanent: bool,
}

/// Client for one content-repository service.
///
/// Owns the transport and an observer registry. Every operation notifies the
/// attached observers after its network call settles and before it returns,
/// then propagates the result to the caller unchanged — the observer side
/// channel never replaces normal error propagation.
pub struct Repository {
    fetcher: Arc<dyn Fetcher>,
    observers: Mutex<ObserverRegistry>,
}

struct ObserverRegistry {
    entries: Vec<(ObserverKey, Arc<dyn OperationObserver>)>,
    next_key: u64,
}

impl Repository {
    /// Build a repository client over the given transport.
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            observers: Mutex::new(ObserverRegistry {
                entries: Vec::new(),
                next_key: 1,
            }),
        }
    }

    /// Register a settlement observer; returns a key for detachment.
    pub fn attach_observer(&self, observer: Arc<dyn OperationObserver>) -> ObserverKey {
        let mut registry = self.lock_observers();
        let key = ObserverKey(registry.next_key);
        registry.next_key = registry.next_key.saturating_add(1);
        registry.entries.push((key, observer));
        key
    }

    /// Remove a previously attached observer. Detaching twice is a no-op.
    pub fn detach_observer(&self, key: ObserverKey) {
        self.lock_observers()
            .entries
            .retain(|(existing, _)| *existing != key);
    }

    /// Detach every observer. Operations issued afterwards settle silently.
    pub fn dispose(&self) {
        self.lock_observers().entries.clear();
    }

    /// Create a new content item under `options.parent_path`.
    ///
    /// # Errors
    ///
    /// Propagates transport, rejection, and parse failures. Observers are
    /// notified of the settled outcome either way.
    pub async fn post(&self, options: PostOptions) -> RepositoryResult<Content> {
        let request = OperationRequest {
            kind: OperationKind::Create,
            target: ContentArg::One(ContentRef::Path(options.parent_path.clone())),
            content: Some(options.content.clone()),
            target_path: None,
            permanent: false,
        };
        let body = create_body(&options)?;
        let fetch = FetchRequest {
            method: FetchMethod::Post,
            path: entity_path(&ContentRef::Path(options.parent_path)),
            body: Some(body),
        };
        self.run_single(request, fetch).await
    }

    /// Partially update one content item.
    ///
    /// # Errors
    ///
    /// Propagates transport, rejection, and parse failures. Observers are
    /// notified of the settled outcome either way.
    pub async fn patch(&self, options: PatchOptions) -> RepositoryResult<Content> {
        self.modify(OperationKind::Patch, FetchMethod::Patch, options.id_or_path, options.content)
            .await
    }

    /// Replace one content item's fields.
    ///
    /// # Errors
    ///
    /// Propagates transport, rejection, and parse failures. Observers are
    /// notified of the settled outcome either way.
    pub async fn put(&self, options: PutOptions) -> RepositoryResult<Content> {
        self.modify(OperationKind::Put, FetchMethod::Put, options.id_or_path, options.content)
            .await
    }

    /// Copy one or more items into `options.target_path`.
    ///
    /// # Errors
    ///
    /// Propagates transport, rejection, and parse failures. Per-item
    /// application failures are reported inside the returned [`BatchBody`],
    /// not as an `Err`.
    pub async fn copy(&self, options: CopyOptions) -> RepositoryResult<BatchBody> {
        let request = OperationRequest {
            kind: OperationKind::Copy,
            target: options.id_or_path.clone(),
            content: None,
            target_path: Some(options.target_path.clone()),
            permanent: false,
        };
        let fetch = FetchRequest {
            method: FetchMethod::Post,
            path: batch_action_path("CopyBatch"),
            body: Some(json!({
                "targetPath": options.target_path,
                "paths": reference_values(&options.id_or_path),
            })),
        };
        self.run_batch(request, fetch).await
    }

    /// Move one or more items into `options.target_path`.
    ///
    /// # Errors
    ///
    /// Propagates transport, rejection, and parse failures. Per-item
    /// application failures are reported inside the returned [`BatchBody`],
    /// not as an `Err`.
    pub async fn move_to(&self, options: MoveOptions) -> RepositoryResult<BatchBody> {
        let request = OperationRequest {
            kind: OperationKind::Move,
            target: options.id_or_path.clone(),
            content: None,
            target_path: Some(options.target_path.clone()),
            permanent: false,
        };
        let fetch = FetchRequest {
            method: FetchMethod::Post,
            path: batch_action_path("MoveBatch"),
            body: Some(json!({
                "targetPath": options.target_path,
                "paths": reference_values(&options.id_or_path),
            })),
        };
        self.run_batch(request, fetch).await
    }

    /// Delete one or more items, permanently or into the trash.
    ///
    /// # Errors
    ///
    /// Propagates transport, rejection, and parse failures. Per-item
    /// application failures are reported inside the returned [`BatchBody`],
    /// not as an `Err`.
    pub async fn delete(&self, options: DeleteOptions) -> RepositoryResult<BatchBody> {
        let request = OperationRequest {
            kind: OperationKind::Delete,
            target: options.id_or_path.clone(),
            content: None,
            target_path: None,
            permanent: options.permanent,
        };
        let fetch = FetchRequest {
            method: FetchMethod::Post,
            path: batch_action_path("DeleteBatch"),
            body: Some(json!({
                "permanent": options.permanent,
                "paths": reference_values(&options.id_or_path),
            })),
        };
        self.run_batch(request, fetch).await
    }

    async fn modify(
        &self,
        kind: OperationKind,
        method: FetchMethod,
        id_or_path: ContentRef,
        content: Content,
    ) -> RepositoryResult<Content> {
        let request = OperationRequest {
            kind,
            target: ContentArg::One(id_or_path.clone()),
            content: Some(content.clone()),
            target_path: None,
            permanent: false,
        };
        let body = content_value(kind.as_str(), &content)?;
        let fetch = FetchRequest {
            method,
            path: entity_path(&id_or_path),
            body: Some(body),
        };
        self.run_single(request, fetch).await
    }

    async fn run_single(
        &self,
        request: OperationRequest,
        fetch: FetchRequest,
    ) -> RepositoryResult<Content> {
        let operation = request.kind.as_str();
        let result = self
            .execute(operation, fetch)
            .await
            .and_then(|response| response.json::<ODataSingle>(operation))
            .map(|envelope| envelope.d);
        self.settle(&request, &OperationOutcome::Single(&result));
        result
    }

    async fn run_batch(
        &self,
        request: OperationRequest,
        fetch: FetchRequest,
    ) -> RepositoryResult<BatchBody> {
        let operation = request.kind.as_str();
        let result = self
            .execute(operation, fetch)
            .await
            .and_then(|response| response.json::<ODataBatch>(operation))
            .map(|envelope| envelope.d);
        self.settle(&request, &OperationOutcome::Batch(&result));
        result
    }

    async fn execute(
        &self,
        operation: &'static str,
        fetch: FetchRequest,
    ) -> RepositoryResult<FetchResponse> {
        let response = self.fetcher.fetch(fetch).await?;
        if response.ok {
            Ok(response)
        } else {
            Err(RepositoryError::ErrorResponse {
                operation,
                status: response.status,
                body: response.body,
            })
        }
    }

    fn settle(&self, request: &OperationRequest, outcome: &OperationOutcome<'_>) {
        let ok = match outcome {
            OperationOutcome::Single(result) => result.is_ok(),
            OperationOutcome::Batch(result) => result.is_ok(),
        };
        debug!(
            operation = request.kind.as_str(),
            ok, "operation settled; notifying observers"
        );
        let observers: Vec<Arc<dyn OperationObserver>> = self
            .lock_observers()
            .entries
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer.operation_settled(request, outcome);
        }
    }

    fn lock_observers(&self) -> MutexGuard<'_, ObserverRegistry> {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn entity_path(reference: &ContentRef) -> String {
    match reference {
        ContentRef::Id(id) => format!("/OData.svc/content({id})"),
        ContentRef::Path(path) => format!("/OData.svc/('{path}')"),
    }
}

fn batch_action_path(action: &str) -> String {
    format!("/OData.svc/('Root')/{action}")
}

fn reference_values(references: &ContentArg) -> Vec<Value> {
    references
        .iter()
        .map(|reference| match reference {
            ContentRef::Id(id) => json!(id),
            ContentRef::Path(path) => json!(path),
        })
        .collect()
}

fn content_value(operation: &'static str, content: &Content) -> RepositoryResult<Value> {
    serde_json::to_value(content).map_err(|source| RepositoryError::Parse { operation, source })
}

fn create_body(options: &PostOptions) -> RepositoryResult<Value> {
    let mut body = content_value("create", &options.content)?;
    if let (Value::Object(map), Some(content_type)) = (&mut body, &options.content_type) {
        map.insert("__ContentType".to_owned(), json!(content_type));
    }
    Ok(body)
}
