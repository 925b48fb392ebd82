//! Classification of settled operations into subscriber events.
//!
//! The rules, per operation family:
//!
//! - create / patch / put: a resolved body yields one success event carrying
//!   the server's item; any failure yields one failure event carrying the
//!   item submitted in the request.
//! - copy / move / delete: every entry of the batch body's `results` yields
//!   one success event and every entry of `errors` one failure event. When
//!   the network call fails before a batch body exists, one failure event is
//!   synthesized per identifier in the original reference, carrying an
//!   identity-only record (`Id` for numeric identifiers, `Path` for paths).

use arbor_content::{BatchBody, Content};
use arbor_repository::{
    OperationKind, OperationOutcome, OperationRequest, RepositoryResult,
};
use tracing::debug;

use crate::payloads::{
    CopyFailed, Copied, CreateFailed, Created, DeleteFailed, Deleted, ModificationFailed, Modified,
    MoveFailed, Moved, RepositoryEvent,
};

/// Classify one settled operation into zero or more events, in dispatch order.
///
/// Never fails: entries that cannot be resolved to an item are skipped so
/// well-formed siblings still dispatch, and a mismatched outcome shape yields
/// nothing.
#[must_use]
pub fn interpret(request: &OperationRequest, outcome: &OperationOutcome<'_>) -> Vec<RepositoryEvent> {
    match (request.kind, outcome) {
        (OperationKind::Create, OperationOutcome::Single(result)) => single_events(
            request,
            result,
            |content| RepositoryEvent::ContentCreated(Created { content }),
            |content| RepositoryEvent::ContentCreateFailed(CreateFailed { content }),
        ),
        (OperationKind::Patch | OperationKind::Put, OperationOutcome::Single(result)) => {
            single_events(
                request,
                result,
                |content| RepositoryEvent::ContentModified(Modified { content }),
                |content| RepositoryEvent::ContentModificationFailed(ModificationFailed { content }),
            )
        }
        (
            OperationKind::Copy | OperationKind::Move | OperationKind::Delete,
            OperationOutcome::Batch(result),
        ) => batch_events(request, result),
        _ => {
            debug!(
                operation = request.kind.as_str(),
                "outcome shape does not match the operation family; skipping"
            );
            Vec::new()
        }
    }
}

fn single_events(
    request: &OperationRequest,
    result: &RepositoryResult<Content>,
    on_success: impl FnOnce(Content) -> RepositoryEvent,
    on_failure: impl FnOnce(Content) -> RepositoryEvent,
) -> Vec<RepositoryEvent> {
    match result {
        Ok(content) => vec![on_success(content.clone())],
        Err(_) => match &request.content {
            Some(content) => vec![on_failure(content.clone())],
            None => {
                debug!(
                    operation = request.kind.as_str(),
                    "failed request carried no content; skipping failure event"
                );
                Vec::new()
            }
        },
    }
}

fn batch_events(
    request: &OperationRequest,
    result: &RepositoryResult<BatchBody>,
) -> Vec<RepositoryEvent> {
    let success = |content: Content| match request.kind {
        OperationKind::Copy => Some(RepositoryEvent::ContentCopied(Copied { content })),
        OperationKind::Move => Some(RepositoryEvent::ContentMoved(Moved { content })),
        OperationKind::Delete => Some(RepositoryEvent::ContentDeleted(Deleted {
            content_data: content,
            permanently: request.permanent,
        })),
        _ => None,
    };
    let failure = |content: Content| match request.kind {
        OperationKind::Copy => Some(RepositoryEvent::ContentCopyFailed(CopyFailed { content })),
        OperationKind::Move => Some(RepositoryEvent::ContentMoveFailed(MoveFailed { content })),
        OperationKind::Delete => {
            Some(RepositoryEvent::ContentDeleteFailed(DeleteFailed { content }))
        }
        _ => None,
    };

    match result {
        Ok(body) => {
            let mut events = Vec::with_capacity(body.results.len() + body.errors.len());
            events.extend(body.results.iter().filter_map(|item| success(item.clone())));
            for entry in &body.errors {
                match &entry.content {
                    Some(content) => events.extend(failure(content.clone())),
                    None => debug!(
                        operation = request.kind.as_str(),
                        "batch error entry carries no content; skipping"
                    ),
                }
            }
            events
        }
        // The server never reported per-item results; reconstruct a
        // best-effort identity per submitted reference.
        Err(_) => request
            .target
            .iter()
            .filter_map(|reference| failure(reference.to_content()))
            .collect(),
    }
}
