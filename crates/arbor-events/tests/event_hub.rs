//! End-to-end suite for the event hub layered over the repository client.
//!
//! Each test issues a real operation against a scripted transport and asserts
//! the events observed by subscribers once the call settles.

use std::sync::Arc;

use arbor_content::{Content, ContentArg, ContentRef};
use arbor_events::{Deleted, EventHub};
use arbor_repository::{
    CopyOptions, DeleteOptions, FetchResponse, MoveOptions, PatchOptions, PostOptions, PutOptions,
    Repository, RepositoryError,
};
use arbor_test_support::{FailingFetcher, Recorder, StaticFetcher, batch_body, mock_content, single_body};
use serde_json::json;

fn repository_with(response: FetchResponse) -> Arc<Repository> {
    Arc::new(Repository::new(Arc::new(StaticFetcher::new(response))))
}

fn failing_repository() -> Arc<Repository> {
    Arc::new(Repository::new(Arc::new(FailingFetcher)))
}

fn post_options() -> PostOptions {
    PostOptions {
        parent_path: "Root/Example".to_owned(),
        content_type: Some("User".to_owned()),
        content: mock_content(),
    }
}

#[tokio::test]
async fn content_created_fires_after_post() -> anyhow::Result<()> {
    let repository = repository_with(FetchResponse::success(single_body(&mock_content())));
    let hub = EventHub::new(Arc::clone(&repository));
    let created = Recorder::new();
    let failed = Recorder::new();
    hub.on_content_created().subscribe(created.handler());
    hub.on_content_create_failed().subscribe(failed.handler());

    repository.post(post_options()).await?;

    let events = created.items();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].content, mock_content());
    assert!(failed.is_empty());
    Ok(())
}

#[tokio::test]
async fn create_failed_fires_with_the_submitted_content() {
    let repository = repository_with(FetchResponse::rejected(500));
    let hub = EventHub::new(Arc::clone(&repository));
    let created = Recorder::new();
    let failed = Recorder::new();
    hub.on_content_created().subscribe(created.handler());
    hub.on_content_create_failed().subscribe(failed.handler());

    let result = repository.post(post_options()).await;

    assert!(result.is_err());
    assert!(created.is_empty());
    let events = failed.items();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].content, mock_content());
}

#[tokio::test]
async fn content_modified_fires_after_patch() -> anyhow::Result<()> {
    let repository = repository_with(FetchResponse::success(single_body(&mock_content())));
    let hub = EventHub::new(Arc::clone(&repository));
    let modified = Recorder::new();
    hub.on_content_modified().subscribe(modified.handler());

    repository
        .patch(PatchOptions {
            id_or_path: ContentRef::from(123),
            content: mock_content(),
        })
        .await?;

    assert_eq!(modified.items()[0].content, mock_content());
    assert_eq!(modified.len(), 1);
    Ok(())
}

#[tokio::test]
async fn modification_failed_fires_after_patch_rejection() {
    let repository = repository_with(FetchResponse::rejected(409));
    let hub = EventHub::new(Arc::clone(&repository));
    let failed = Recorder::new();
    hub.on_content_modification_failed().subscribe(failed.handler());

    let result = repository
        .patch(PatchOptions {
            id_or_path: ContentRef::from(123),
            content: mock_content(),
        })
        .await;

    assert!(result.is_err());
    assert_eq!(failed.items()[0].content, mock_content());
}

#[tokio::test]
async fn content_modified_fires_after_put() -> anyhow::Result<()> {
    let repository = repository_with(FetchResponse::success(single_body(&mock_content())));
    let hub = EventHub::new(Arc::clone(&repository));
    let modified = Recorder::new();
    hub.on_content_modified().subscribe(modified.handler());

    repository
        .put(PutOptions {
            id_or_path: ContentRef::from(123),
            content: mock_content(),
        })
        .await?;

    assert_eq!(modified.len(), 1);
    Ok(())
}

#[tokio::test]
async fn modification_failed_fires_after_put_rejection() {
    let repository = repository_with(FetchResponse::rejected(500));
    let hub = EventHub::new(Arc::clone(&repository));
    let failed = Recorder::new();
    hub.on_content_modification_failed().subscribe(failed.handler());

    let result = repository
        .put(PutOptions {
            id_or_path: ContentRef::from(123),
            content: mock_content(),
        })
        .await;

    assert!(result.is_err());
    assert_eq!(failed.len(), 1);
}

#[tokio::test]
async fn content_copied_fires_once_per_resolved_item() -> anyhow::Result<()> {
    let repository =
        repository_with(FetchResponse::success(batch_body(&[mock_content()], &[])));
    let hub = EventHub::new(Arc::clone(&repository));
    let copied = Recorder::new();
    hub.on_content_copied().subscribe(copied.handler());

    repository
        .copy(CopyOptions {
            id_or_path: ContentArg::from(123),
            target_path: "Root/Example/Target/Path".to_owned(),
        })
        .await?;

    let events = copied.items();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].content, mock_content());
    Ok(())
}

#[tokio::test]
async fn copy_failed_fires_for_each_error_entry() -> anyhow::Result<()> {
    let repository = repository_with(FetchResponse::success(batch_body(
        &[],
        &[(json!("locked"), mock_content())],
    )));
    let hub = EventHub::new(Arc::clone(&repository));
    let copied = Recorder::new();
    let failed = Recorder::new();
    hub.on_content_copied().subscribe(copied.handler());
    hub.on_content_copy_failed().subscribe(failed.handler());

    repository
        .copy(CopyOptions {
            id_or_path: ContentArg::from(123),
            target_path: "Root/Example/Target/Path".to_owned(),
        })
        .await?;

    assert!(copied.is_empty());
    assert_eq!(failed.items()[0].content, mock_content());
    Ok(())
}

#[tokio::test]
async fn copy_failed_synthesizes_an_id_when_the_batch_call_is_rejected() {
    let repository = repository_with(FetchResponse::rejected(502));
    let hub = EventHub::new(Arc::clone(&repository));
    let failed = Recorder::new();
    hub.on_content_copy_failed().subscribe(failed.handler());

    let result = repository
        .copy(CopyOptions {
            id_or_path: ContentArg::from(321),
            target_path: "Root/Example/Target".to_owned(),
        })
        .await;

    assert!(result.is_err());
    let events = failed.items();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].content, Content::from_id(321));
}

#[tokio::test]
async fn copy_failed_synthesizes_a_path_for_each_entry_of_a_path_sequence() {
    let repository = repository_with(FetchResponse::rejected(502));
    let hub = EventHub::new(Arc::clone(&repository));
    let failed = Recorder::new();
    hub.on_content_copy_failed().subscribe(failed.handler());

    let result = repository
        .copy(CopyOptions {
            id_or_path: ContentArg::from(vec![
                ContentRef::from("Root/Example/Path1"),
                ContentRef::from("Root/Example/Path2"),
            ]),
            target_path: "Root/Example/Target".to_owned(),
        })
        .await;

    assert!(result.is_err());
    let events = failed.items();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].content, Content::from_path("Root/Example/Path1"));
    assert_eq!(events[1].content, Content::from_path("Root/Example/Path2"));
}

#[tokio::test]
async fn content_deleted_fires_with_content_data_and_the_permanent_flag() -> anyhow::Result<()> {
    let repository =
        repository_with(FetchResponse::success(batch_body(&[mock_content()], &[])));
    let hub = EventHub::new(Arc::clone(&repository));
    let deleted: Recorder<Deleted> = Recorder::new();
    hub.on_content_deleted().subscribe(deleted.handler());

    repository
        .delete(DeleteOptions {
            id_or_path: ContentArg::from(123),
            permanent: true,
        })
        .await?;

    let events = deleted.items();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].content_data, mock_content());
    assert!(events[0].permanently);
    Ok(())
}

#[tokio::test]
async fn delete_failed_fires_for_an_error_entry_and_deleted_stays_silent() -> anyhow::Result<()> {
    let repository = repository_with(FetchResponse::success(batch_body(
        &[],
        &[(json!("locked"), mock_content())],
    )));
    let hub = EventHub::new(Arc::clone(&repository));
    let deleted = Recorder::new();
    let failed = Recorder::new();
    hub.on_content_deleted().subscribe(deleted.handler());
    hub.on_content_delete_failed().subscribe(failed.handler());

    repository
        .delete(DeleteOptions {
            id_or_path: ContentArg::from(123),
            permanent: false,
        })
        .await?;

    assert!(deleted.is_empty());
    assert_eq!(failed.items()[0].content, mock_content());
    Ok(())
}

#[tokio::test]
async fn delete_failed_synthesizes_an_id_when_the_batch_call_is_rejected() {
    let repository = repository_with(FetchResponse::rejected(500));
    let hub = EventHub::new(Arc::clone(&repository));
    let failed = Recorder::new();
    hub.on_content_delete_failed().subscribe(failed.handler());

    let result = repository
        .delete(DeleteOptions {
            id_or_path: ContentArg::from(123),
            permanent: false,
        })
        .await;

    assert!(result.is_err());
    assert_eq!(failed.items()[0].content, Content::from_id(123));
}

#[tokio::test]
async fn delete_failed_synthesizes_a_path_when_the_transport_fails() {
    let repository = failing_repository();
    let hub = EventHub::new(Arc::clone(&repository));
    let failed = Recorder::new();
    hub.on_content_delete_failed().subscribe(failed.handler());

    let result = repository
        .delete(DeleteOptions {
            id_or_path: ContentArg::from("Root/Example/Path1"),
            permanent: false,
        })
        .await;

    assert!(matches!(result, Err(RepositoryError::Transport { .. })));
    assert_eq!(
        failed.items()[0].content,
        Content::from_path("Root/Example/Path1")
    );
}

#[tokio::test]
async fn content_moved_fires_after_move() -> anyhow::Result<()> {
    let repository =
        repository_with(FetchResponse::success(batch_body(&[mock_content()], &[])));
    let hub = EventHub::new(Arc::clone(&repository));
    let moved = Recorder::new();
    hub.on_content_moved().subscribe(moved.handler());

    repository
        .move_to(MoveOptions {
            id_or_path: ContentArg::from(123),
            target_path: "Root/Example/TargetPath".to_owned(),
        })
        .await?;

    assert_eq!(moved.items()[0].content, mock_content());
    Ok(())
}

#[tokio::test]
async fn move_failed_fires_for_an_error_entry() -> anyhow::Result<()> {
    let repository = repository_with(FetchResponse::success(batch_body(
        &[],
        &[(json!("locked"), mock_content())],
    )));
    let hub = EventHub::new(Arc::clone(&repository));
    let failed = Recorder::new();
    hub.on_content_move_failed().subscribe(failed.handler());

    repository
        .move_to(MoveOptions {
            id_or_path: ContentArg::from(123),
            target_path: "Root/Example".to_owned(),
        })
        .await?;

    assert_eq!(failed.items()[0].content, mock_content());
    Ok(())
}

#[tokio::test]
async fn move_failed_synthesizes_a_path_when_the_transport_fails() {
    let repository = failing_repository();
    let hub = EventHub::new(Arc::clone(&repository));
    let failed = Recorder::new();
    hub.on_content_move_failed().subscribe(failed.handler());

    let result = repository
        .move_to(MoveOptions {
            id_or_path: ContentArg::from(vec![ContentRef::from("Root/Example/Path1")]),
            target_path: "Root/Example/Target".to_owned(),
        })
        .await;

    assert!(result.is_err());
    let events = failed.items();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].content, Content::from_path("Root/Example/Path1"));
}

#[tokio::test]
async fn partial_batch_fans_out_both_successes_and_failures() -> anyhow::Result<()> {
    let repository = repository_with(FetchResponse::success(batch_body(
        &[Content::from_id(1), Content::from_id(2)],
        &[(json!("locked"), Content::from_id(3))],
    )));
    let hub = EventHub::new(Arc::clone(&repository));
    let moved = Recorder::new();
    let failed = Recorder::new();
    hub.on_content_moved().subscribe(moved.handler());
    hub.on_content_move_failed().subscribe(failed.handler());

    repository
        .move_to(MoveOptions {
            id_or_path: ContentArg::from(vec![
                ContentRef::from(1),
                ContentRef::from(2),
                ContentRef::from(3),
            ]),
            target_path: "Root/Target".to_owned(),
        })
        .await?;

    assert_eq!(moved.len(), 2);
    assert_eq!(failed.len(), 1);
    assert_eq!(failed.items()[0].content, Content::from_id(3));
    Ok(())
}

#[tokio::test]
async fn zero_item_batch_emits_nothing() -> anyhow::Result<()> {
    let repository = repository_with(FetchResponse::success(batch_body(&[], &[])));
    let hub = EventHub::new(Arc::clone(&repository));
    let copied = Recorder::new();
    let failed = Recorder::new();
    hub.on_content_copied().subscribe(copied.handler());
    hub.on_content_copy_failed().subscribe(failed.handler());

    repository
        .copy(CopyOptions {
            id_or_path: ContentArg::Many(Vec::new()),
            target_path: "Root/Target".to_owned(),
        })
        .await?;

    assert!(copied.is_empty());
    assert!(failed.is_empty());
    Ok(())
}

#[tokio::test]
async fn duplicate_handlers_both_fire_on_one_publish() -> anyhow::Result<()> {
    let repository = repository_with(FetchResponse::success(single_body(&mock_content())));
    let hub = EventHub::new(Arc::clone(&repository));
    let first = Recorder::new();
    let second = Recorder::new();
    hub.on_content_created().subscribe(first.handler());
    hub.on_content_created().subscribe(second.handler());

    repository.post(post_options()).await?;

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    Ok(())
}

#[tokio::test]
async fn unsubscribed_handler_stops_receiving() -> anyhow::Result<()> {
    let repository = repository_with(FetchResponse::success(single_body(&mock_content())));
    let hub = EventHub::new(Arc::clone(&repository));
    let recorder = Recorder::new();
    let key = hub.on_content_created().subscribe(recorder.handler());

    repository.post(post_options()).await?;
    hub.on_content_created().unsubscribe(key);
    hub.on_content_created().unsubscribe(key);
    repository.post(post_options()).await?;

    assert_eq!(recorder.len(), 1);
    Ok(())
}

#[tokio::test]
async fn disposed_hub_neither_throws_nor_delivers() -> anyhow::Result<()> {
    let repository =
        repository_with(FetchResponse::success(batch_body(&[mock_content()], &[])));
    let hub = EventHub::new(Arc::clone(&repository));
    let deleted = Recorder::new();
    hub.on_content_deleted().subscribe(deleted.handler());

    hub.dispose();
    hub.dispose();

    // The operation itself still settles normally for its caller.
    let body = repository
        .delete(DeleteOptions {
            id_or_path: ContentArg::from(123),
            permanent: false,
        })
        .await?;
    assert_eq!(body.results.len(), 1);
    assert!(deleted.is_empty());
    Ok(())
}

#[tokio::test]
async fn subscribing_after_dispose_is_a_silent_no_op() -> anyhow::Result<()> {
    let repository = repository_with(FetchResponse::success(single_body(&mock_content())));
    let hub = EventHub::new(Arc::clone(&repository));
    hub.dispose();

    let recorder = Recorder::new();
    hub.on_content_created().subscribe(recorder.handler());
    repository.post(post_options()).await?;

    assert!(recorder.is_empty());
    Ok(())
}

#[tokio::test]
async fn dropping_the_hub_detaches_it_from_the_repository() -> anyhow::Result<()> {
    let repository = repository_with(FetchResponse::success(single_body(&mock_content())));
    let hub = EventHub::new(Arc::clone(&repository));
    let recorder = Recorder::new();
    hub.on_content_created().subscribe(recorder.handler());
    drop(hub);

    repository.post(post_options()).await?;
    assert!(recorder.is_empty());
    Ok(())
}

#[tokio::test]
async fn failure_events_supplement_rather_than_replace_error_propagation() {
    let repository = failing_repository();
    let hub = EventHub::new(Arc::clone(&repository));
    let failed = Recorder::new();
    hub.on_content_move_failed().subscribe(failed.handler());

    let result = repository
        .move_to(MoveOptions {
            id_or_path: ContentArg::from(123),
            target_path: "Root/Example".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(RepositoryError::Transport { .. })));
    assert_eq!(failed.items()[0].content, Content::from_id(123));
}
