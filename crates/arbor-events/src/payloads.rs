//! Typed payloads delivered to event subscribers.
//!
//! Each payload carries exactly one item's worth of information: a batch
//! response of N failures produces N separately dispatched failure payloads,
//! never one aggregate.

use arbor_content::Content;
use serde::{Deserialize, Serialize};

/// A content item was created on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Created {
    /// The server-resolved item.
    pub content: Content,
}

/// A creation attempt failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFailed {
    /// The item as submitted in the request; the server may never have
    /// resolved one.
    pub content: Content,
}

/// A content item was modified (patch or put).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modified {
    /// The server-resolved item.
    pub content: Content,
}

/// A modification attempt failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModificationFailed {
    /// The item as submitted in the request.
    pub content: Content,
}

/// One item was copied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Copied {
    /// The copied item as resolved by the server.
    pub content: Content,
}

/// One item failed to copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyFailed {
    /// The offending item; identity-only (`Id` or `Path`) when the network
    /// call failed before the server reported anything.
    pub content: Content,
}

/// One item was moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moved {
    /// The moved item as resolved by the server.
    pub content: Content,
}

/// One item failed to move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveFailed {
    /// The offending item; identity-only when the network call failed
    /// outright.
    pub content: Content,
}

/// One item was deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deleted {
    /// Snapshot of the item that was deleted.
    #[serde(rename = "contentData")]
    pub content_data: Content,
    /// Whether the delete bypassed the trash.
    pub permanently: bool,
}

/// One item failed to delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteFailed {
    /// The offending item; identity-only when the network call failed
    /// outright.
    pub content: Content,
}

/// One classified outcome derived from a settled operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RepositoryEvent {
    /// Successful single-item creation.
    ContentCreated(Created),
    /// Failed single-item creation.
    ContentCreateFailed(CreateFailed),
    /// Successful single-item modification.
    ContentModified(Modified),
    /// Failed single-item modification.
    ContentModificationFailed(ModificationFailed),
    /// One successfully copied item.
    ContentCopied(Copied),
    /// One item that failed to copy.
    ContentCopyFailed(CopyFailed),
    /// One successfully moved item.
    ContentMoved(Moved),
    /// One item that failed to move.
    ContentMoveFailed(MoveFailed),
    /// One successfully deleted item.
    ContentDeleted(Deleted),
    /// One item that failed to delete.
    ContentDeleteFailed(DeleteFailed),
}

impl RepositoryEvent {
    /// Machine-friendly discriminator for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ContentCreated(_) => "content_created",
            Self::ContentCreateFailed(_) => "content_create_failed",
            Self::ContentModified(_) => "content_modified",
            Self::ContentModificationFailed(_) => "content_modification_failed",
            Self::ContentCopied(_) => "content_copied",
            Self::ContentCopyFailed(_) => "content_copy_failed",
            Self::ContentMoved(_) => "content_moved",
            Self::ContentMoveFailed(_) => "content_move_failed",
            Self::ContentDeleted(_) => "content_deleted",
            Self::ContentDeleteFailed(_) => "content_delete_failed",
        }
    }
}
