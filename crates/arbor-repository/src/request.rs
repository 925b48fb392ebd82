//! Operation descriptors shared with settlement observers.

use arbor_content::{BatchBody, Content, ContentArg};

use crate::error::RepositoryResult;

/// The operation family a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Single-item creation (`post`).
    Create,
    /// Single-item partial update (`patch`).
    Patch,
    /// Single-item full update (`put`).
    Put,
    /// Batch-capable copy.
    Copy,
    /// Batch-capable move.
    Move,
    /// Batch-capable delete.
    Delete,
}

impl OperationKind {
    /// Stable discriminator used in logs and error context.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Patch => "patch",
            Self::Put => "put",
            Self::Copy => "copy",
            Self::Move => "move",
            Self::Delete => "delete",
        }
    }
}

/// One issued operation: kind, identifier reference(s), and request payload.
///
/// Ephemeral — built per call and discarded once its outcome is dispatched.
#[derive(Debug, Clone)]
pub struct OperationRequest {
    /// Operation family.
    pub kind: OperationKind,
    /// Identifier reference(s) the request addressed.
    pub target: ContentArg,
    /// Content payload submitted with the request, when the family carries
    /// one. This is what failure events for single-item operations report,
    /// since the server may never have resolved a body.
    pub content: Option<Content>,
    /// Destination path for copy and move requests.
    pub target_path: Option<String>,
    /// Whether a delete bypasses the trash.
    pub permanent: bool,
}

/// Settled result of one operation's network call.
///
/// Borrows the operation's own result so observers see exactly what the
/// caller receives, without requiring errors to be cloneable.
#[derive(Debug, Clone, Copy)]
pub enum OperationOutcome<'a> {
    /// Outcome of a single-response operation (create, patch, put).
    Single(&'a RepositoryResult<Content>),
    /// Outcome of a batch-capable operation (copy, move, delete).
    Batch(&'a RepositoryResult<BatchBody>),
}

/// Observer notified synchronously after each operation settles.
///
/// Notification happens after the outcome is known and before the operation
/// returns to its caller, so per-operation ordering is preserved. Observers
/// must not block.
pub trait OperationObserver: Send + Sync {
    /// React to one settled operation.
    fn operation_settled(&self, request: &OperationRequest, outcome: &OperationOutcome<'_>);
}

/// Handle returned by [`Repository::attach_observer`], used for detachment.
///
/// [`Repository::attach_observer`]: crate::repository::Repository::attach_observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverKey(pub(crate) u64);
