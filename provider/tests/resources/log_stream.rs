use assert_matches::assert_matches;
use serde_json::json;
use stratus_api::{error::ErrorCode, logs::CloudWatchLogs};
use stratus_lite::{Backend, Operation};
use stratus_provider::{
    PlanAction, Refreshed, Resource, ResourceError,
    resources::log_stream::{LogStreamModel, find_log_stream_by_two_part_key},
};

use super::common::*;

async fn create_stream(backend: &Backend, name: &str) {
    backend
        .create_log_stream(&log_group_name(), &log_stream_name(name))
        .await
        .unwrap();
}

#[tokio::test]
async fn create_then_read_returns_service_values() {
    let (backend, provider) = create_provider();
    let handler = provider.log_stream();

    let change = handler
        .plan(
            None,
            &json!({ "log_group_name": LOG_GROUP_NAME, "name": "i-0abc" }),
        )
        .unwrap();
    assert_eq!(change.action, PlanAction::Create);

    let created = handler.create(change.planned).await.unwrap();
    let remote = backend
        .log_stream(&log_group_name(), &log_stream_name("i-0abc"))
        .unwrap();
    assert_eq!(created.id, Some(log_stream_name("i-0abc")));
    assert_eq!(created.arn, remote.arn);

    let read = handler.read(&created).await.unwrap();
    assert_eq!(read, Refreshed::Present(created));
}

#[tokio::test]
async fn create_in_missing_group_fails() {
    let (_backend, provider) = create_provider();
    let handler = provider.log_stream();

    let planned = LogStreamModel::new("/missing".parse().unwrap(), log_stream_name("i-0abc"));
    let err = handler.create(planned).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "creating CloudWatch Logs Log Stream (i-0abc): ResourceNotFoundException: The specified \
         log group does not exist: /missing"
    );
}

#[tokio::test]
async fn read_after_out_of_band_delete_drops_state() {
    let (backend, provider) = create_provider();
    let handler = provider.log_stream();

    let planned = LogStreamModel::new(log_group_name(), log_stream_name("i-0abc"));
    let created = handler.create(planned).await.unwrap();
    assert!(backend.remove_log_stream(&log_group_name(), &log_stream_name("i-0abc")));

    assert_matches!(handler.read(&created).await, Ok(Refreshed::Gone));
}

#[tokio::test]
async fn read_with_missing_group_drops_state() {
    let (_backend, provider) = create_provider();
    let handler = provider.log_stream();

    let state = LogStreamModel::new("/missing".parse().unwrap(), log_stream_name("i-0abc"));
    assert_matches!(handler.read(&state).await, Ok(Refreshed::Gone));
}

#[tokio::test]
async fn delete_is_idempotent() {
    let (backend, provider) = create_provider();
    let handler = provider.log_stream();

    let planned = LogStreamModel::new(log_group_name(), log_stream_name("i-0abc"));
    let created = handler.create(planned).await.unwrap();

    handler.delete(&created).await.unwrap();
    handler.delete(&created).await.unwrap();
    assert!(
        backend
            .log_stream(&log_group_name(), &log_stream_name("i-0abc"))
            .is_none()
    );
    assert_eq!(backend.calls(Operation::DeleteLogStream), 2);
}

#[tokio::test]
async fn read_stops_paging_at_exact_match() {
    let (backend, provider) = create_provider_with(Backend::default().with_page_size(2));
    let handler = provider.log_stream();
    for name in ["app", "app-1", "app-2", "app-3", "app-4", "app-5"] {
        create_stream(&backend, name).await;
    }

    // Six streams share the prefix, three pages' worth.
    let state = LogStreamModel::new(log_group_name(), log_stream_name("app"));
    assert_matches!(handler.read(&state).await, Ok(Refreshed::Present(_)));
    assert_eq!(backend.calls(Operation::DescribeLogStreams), 1);
}

#[tokio::test]
async fn finder_requires_exact_name() {
    let (backend, _provider) = create_provider_with(Backend::default().with_page_size(1));
    for name in ["app-1", "app-2"] {
        create_stream(&backend, name).await;
    }

    let err = find_log_stream_by_two_part_key(&backend, &log_group_name(), &log_stream_name("app"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    // Every page of prefix matches was inspected before giving up.
    assert_eq!(backend.calls(Operation::DescribeLogStreams), 2);

    let found =
        find_log_stream_by_two_part_key(&backend, &log_group_name(), &log_stream_name("app-2"))
            .await
            .unwrap();
    assert_eq!(found.log_stream_name, "app-2");
}

#[tokio::test]
async fn read_surfaces_service_errors() {
    let (backend, provider) = create_provider();
    let handler = provider.log_stream();
    backend.inject_fault(
        Operation::DescribeLogStreams,
        ErrorCode::ServiceUnavailableException,
        1,
    );

    let state = LogStreamModel::new(log_group_name(), log_stream_name("i-0abc"));
    assert_matches!(
        handler.read(&state).await,
        Err(ResourceError::Remote { source, .. }) if source.is(ErrorCode::ServiceUnavailableException)
    );
}

#[tokio::test]
async fn import_then_read_populates_state() {
    let (backend, provider) = create_provider();
    let handler = provider.log_stream();
    create_stream(&backend, "i-0abc").await;

    let key = handler.import(&format!("{LOG_GROUP_NAME}:i-0abc")).unwrap();
    assert_eq!(key.log_group_name, log_group_name());
    assert_eq!(key.name, log_stream_name("i-0abc"));

    let Refreshed::Present(imported) = handler.read_by_key(&key).await.unwrap() else {
        panic!("imported stream should exist");
    };
    assert_eq!(imported.id, Some(log_stream_name("i-0abc")));
    assert!(imported.arn.is_some());
}
