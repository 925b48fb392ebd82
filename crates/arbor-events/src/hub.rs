//! The event hub: one dispatcher bound to one repository.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arbor_repository::{
    ObserverKey, OperationObserver, OperationOutcome, OperationRequest, Repository,
};
use tracing::debug;

use crate::channel::Channel;
use crate::interpret::interpret;
use crate::payloads::{
    CopyFailed, Copied, CreateFailed, Created, DeleteFailed, Deleted, ModificationFailed, Modified,
    MoveFailed, Moved, RepositoryEvent,
};

/// The ten channels owned by one hub, shared with the observer registered on
/// the repository so events from in-flight operations reach subscribers even
/// while the hub handle itself is not involved.
struct HubChannels {
    disposed: Arc<AtomicBool>,
    created: Channel<Created>,
    create_failed: Channel<CreateFailed>,
    modified: Channel<Modified>,
    modification_failed: Channel<ModificationFailed>,
    copied: Channel<Copied>,
    copy_failed: Channel<CopyFailed>,
    moved: Channel<Moved>,
    move_failed: Channel<MoveFailed>,
    deleted: Channel<Deleted>,
    delete_failed: Channel<DeleteFailed>,
}

impl HubChannels {
    fn new() -> Self {
        let disposed = Arc::new(AtomicBool::new(false));
        Self {
            created: Channel::new("onContentCreated", Arc::clone(&disposed)),
            create_failed: Channel::new("onContentCreateFailed", Arc::clone(&disposed)),
            modified: Channel::new("onContentModified", Arc::clone(&disposed)),
            modification_failed: Channel::new("onContentModificationFailed", Arc::clone(&disposed)),
            copied: Channel::new("onContentCopied", Arc::clone(&disposed)),
            copy_failed: Channel::new("onContentCopyFailed", Arc::clone(&disposed)),
            moved: Channel::new("onContentMoved", Arc::clone(&disposed)),
            move_failed: Channel::new("onContentMoveFailed", Arc::clone(&disposed)),
            deleted: Channel::new("onContentDeleted", Arc::clone(&disposed)),
            delete_failed: Channel::new("onContentDeleteFailed", Arc::clone(&disposed)),
            disposed,
        }
    }

    fn dispatch(&self, event: RepositoryEvent) {
        debug!(event = event.kind(), "dispatching repository event");
        match event {
            RepositoryEvent::ContentCreated(payload) => self.created.publish(&payload),
            RepositoryEvent::ContentCreateFailed(payload) => self.create_failed.publish(&payload),
            RepositoryEvent::ContentModified(payload) => self.modified.publish(&payload),
            RepositoryEvent::ContentModificationFailed(payload) => {
                self.modification_failed.publish(&payload);
            }
            RepositoryEvent::ContentCopied(payload) => self.copied.publish(&payload),
            RepositoryEvent::ContentCopyFailed(payload) => self.copy_failed.publish(&payload),
            RepositoryEvent::ContentMoved(payload) => self.moved.publish(&payload),
            RepositoryEvent::ContentMoveFailed(payload) => self.move_failed.publish(&payload),
            RepositoryEvent::ContentDeleted(payload) => self.deleted.publish(&payload),
            RepositoryEvent::ContentDeleteFailed(payload) => self.delete_failed.publish(&payload),
        }
    }

    /// One-way transition; all ten channels stop accepting subscribes and
    /// publishes together.
    fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.created.clear();
        self.create_failed.clear();
        self.modified.clear();
        self.modification_failed.clear();
        self.copied.clear();
        self.copy_failed.clear();
        self.moved.clear();
        self.move_failed.clear();
        self.deleted.clear();
        self.delete_failed.clear();
    }
}

impl OperationObserver for HubChannels {
    fn operation_settled(&self, request: &OperationRequest, outcome: &OperationOutcome<'_>) {
        for event in interpret(request, outcome) {
            self.dispatch(event);
        }
    }
}

/// Event hub republishing repository operation outcomes as typed events.
///
/// Construct one hub per [`Repository`]; their lifetimes are bound together.
/// The hub registers itself as a settlement observer, so every operation
/// issued on the repository publishes its derived events before the
/// operation returns to its caller. Dropping the hub disposes it.
pub struct EventHub {
    channels: Arc<HubChannels>,
    repository: Arc<Repository>,
    observer_key: ObserverKey,
}

impl EventHub {
    /// Attach a new hub to `repository`.
    #[must_use]
    pub fn new(repository: Arc<Repository>) -> Self {
        let channels = Arc::new(HubChannels::new());
        let observer: Arc<dyn OperationObserver> = Arc::clone(&channels) as Arc<dyn OperationObserver>;
        let observer_key = repository.attach_observer(observer);
        Self {
            channels,
            repository,
            observer_key,
        }
    }

    /// Fires once per successfully created item.
    #[must_use]
    pub fn on_content_created(&self) -> &Channel<Created> {
        &self.channels.created
    }

    /// Fires once per failed creation, carrying the submitted item.
    #[must_use]
    pub fn on_content_create_failed(&self) -> &Channel<CreateFailed> {
        &self.channels.create_failed
    }

    /// Fires once per successfully modified item (patch or put).
    #[must_use]
    pub fn on_content_modified(&self) -> &Channel<Modified> {
        &self.channels.modified
    }

    /// Fires once per failed modification, carrying the submitted item.
    #[must_use]
    pub fn on_content_modification_failed(&self) -> &Channel<ModificationFailed> {
        &self.channels.modification_failed
    }

    /// Fires once per item a copy operation resolved.
    #[must_use]
    pub fn on_content_copied(&self) -> &Channel<Copied> {
        &self.channels.copied
    }

    /// Fires once per item a copy operation failed on; identity-only when the
    /// network call failed outright.
    #[must_use]
    pub fn on_content_copy_failed(&self) -> &Channel<CopyFailed> {
        &self.channels.copy_failed
    }

    /// Fires once per item a move operation resolved.
    #[must_use]
    pub fn on_content_moved(&self) -> &Channel<Moved> {
        &self.channels.moved
    }

    /// Fires once per item a move operation failed on; identity-only when the
    /// network call failed outright.
    #[must_use]
    pub fn on_content_move_failed(&self) -> &Channel<MoveFailed> {
        &self.channels.move_failed
    }

    /// Fires once per deleted item, carrying its snapshot as `contentData`.
    #[must_use]
    pub fn on_content_deleted(&self) -> &Channel<Deleted> {
        &self.channels.deleted
    }

    /// Fires once per item a delete operation failed on; identity-only when
    /// the network call failed outright.
    #[must_use]
    pub fn on_content_delete_failed(&self) -> &Channel<DeleteFailed> {
        &self.channels.delete_failed
    }

    /// Tear down all channels and detach from the repository.
    ///
    /// Idempotent. After disposal every channel ignores subscribes and
    /// publishes, so residual in-flight operations settle silently instead of
    /// crashing the disposal sequence.
    pub fn dispose(&self) {
        self.repository.detach_observer(self.observer_key);
        self.channels.dispose();
    }
}

impl Drop for EventHub {
    fn drop(&mut self) {
        self.dispose();
    }
}
