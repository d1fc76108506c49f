use std::time::Duration;

use assert_matches::assert_matches;
use serde_json::json;
use stratus_api::error::ErrorCode;
use stratus_lite::Operation;
use stratus_provider::{PlanAction, Refreshed, Resource, ResourceError};

use super::common::*;

#[tokio::test]
async fn create_then_read_returns_service_values() {
    let (backend, provider) = create_provider();
    let handler = provider.user_pool_client();

    let config = json!({
        "user_pool_id": USER_POOL_ID,
        "name": "web",
        "generate_secret": true,
        "callback_urls": ["https://example.com/callback"],
        "allowed_oauth_flows": ["code"],
        "allowed_oauth_scopes": ["openid", "email"],
        "allowed_oauth_flows_user_pool_client": true,
        "token_validity_units": [{ "access_token": "minutes" }],
    });
    let change = handler.plan(None, &config).unwrap();
    assert_eq!(change.action, PlanAction::Create);

    let created = handler.create(change.planned).await.unwrap();
    let key = created.key().unwrap();
    let remote = backend
        .user_pool_client(&key.user_pool_id, &key.client_id)
        .unwrap();

    assert_eq!(key.client_id.to_string(), remote.client_id);
    assert_eq!(created.refresh_token_validity, Some(remote.refresh_token_validity));
    assert_eq!(created.access_token_validity, remote.access_token_validity);
    assert_eq!(
        created.client_secret.as_ref().map(|s| s.expose().to_owned()),
        remote.client_secret
    );
    assert_eq!(created.enable_token_revocation, Some(true));
    assert_eq!(created.prevent_user_existence_errors.as_deref(), Some("LEGACY"));
    let units = created.token_validity_units.as_ref().unwrap();
    assert_eq!(units.access_token.as_deref(), Some("minutes"));
    assert_eq!(units.refresh_token.as_deref(), Some("days"));

    let read = handler.read(&created).await.unwrap();
    assert_eq!(read, Refreshed::Present(created));
}

#[tokio::test]
async fn read_after_out_of_band_delete_drops_state() {
    let (backend, provider) = create_provider();
    let handler = provider.user_pool_client();

    let planned = handler
        .plan(None, &json!({ "user_pool_id": USER_POOL_ID, "name": "web" }))
        .unwrap()
        .planned;
    let created = handler.create(planned).await.unwrap();
    let key = created.key().unwrap();
    assert!(backend.remove_user_pool_client(&key.user_pool_id, &key.client_id));

    assert_matches!(handler.read(&created).await, Ok(Refreshed::Gone));
}

#[tokio::test]
async fn delete_is_idempotent() {
    let (backend, provider) = create_provider();
    let handler = provider.user_pool_client();

    let planned = handler
        .plan(None, &json!({ "user_pool_id": USER_POOL_ID, "name": "web" }))
        .unwrap()
        .planned;
    let created = handler.create(planned).await.unwrap();

    handler.delete(&created).await.unwrap();
    handler.delete(&created).await.unwrap();
    assert_eq!(backend.calls(Operation::DeleteUserPoolClient), 2);
}

#[tokio::test]
async fn delete_surfaces_other_errors() {
    let (backend, provider) = create_provider();
    let handler = provider.user_pool_client();

    let planned = handler
        .plan(None, &json!({ "user_pool_id": USER_POOL_ID, "name": "web" }))
        .unwrap()
        .planned;
    let created = handler.create(planned).await.unwrap();
    backend.inject_fault(
        Operation::DeleteUserPoolClient,
        ErrorCode::InternalErrorException,
        1,
    );

    let err = handler.delete(&created).await.unwrap_err();
    assert!(
        err.to_string()
            .starts_with("deleting Cognito User Pool Client"),
        "{err}"
    );
}

#[tokio::test]
async fn import_then_read_populates_state() {
    let (_backend, provider) = create_provider();
    let handler = provider.user_pool_client();

    let planned = handler
        .plan(
            None,
            &json!({ "user_pool_id": USER_POOL_ID, "name": "web", "generate_secret": true }),
        )
        .unwrap()
        .planned;
    let created = handler.create(planned).await.unwrap();
    let id = format!("{USER_POOL_ID}/{}", created.id.as_ref().unwrap());

    let key = handler.import(&id).unwrap();
    assert_eq!(key.user_pool_id, created.user_pool_id);
    assert_eq!(Some(&key.client_id), created.id.as_ref());

    let Refreshed::Present(imported) = handler.read_by_key(&key).await.unwrap() else {
        panic!("imported client should exist");
    };
    assert_eq!(imported.name, created.name);
    assert_eq!(imported.client_secret, created.client_secret);
    // Only known at create time.
    assert_eq!(imported.generate_secret, None);
}

#[tokio::test]
async fn update_changes_settings_in_place() {
    let (backend, provider) = create_provider();
    let handler = provider.user_pool_client();

    let planned = handler
        .plan(None, &json!({ "user_pool_id": USER_POOL_ID, "name": "web" }))
        .unwrap()
        .planned;
    let created = handler.create(planned).await.unwrap();

    let config = json!({
        "user_pool_id": USER_POOL_ID,
        "name": "web-v2",
        "refresh_token_validity": 7,
    });
    let change = handler.plan(Some(&created), &config).unwrap();
    assert_eq!(change.action, PlanAction::Update);

    let updated = handler.update(&created, change.planned).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name.as_ref(), "web-v2");
    assert_eq!(updated.refresh_token_validity, Some(7));

    let key = updated.key().unwrap();
    let remote = backend
        .user_pool_client(&key.user_pool_id, &key.client_id)
        .unwrap();
    assert_eq!(remote.client_name, "web-v2");
}

#[tokio::test]
async fn update_keeps_service_assigned_analytics_role() {
    let (backend, provider) = create_provider();
    let handler = provider.user_pool_client();

    let analytics = json!([{
        "application_arn": "arn:aws:mobiletargeting:us-east-1:123456789012:apps/abc",
    }]);
    let planned = handler
        .plan(
            None,
            &json!({
                "user_pool_id": USER_POOL_ID,
                "name": "web",
                "analytics_configuration": analytics,
            }),
        )
        .unwrap()
        .planned;
    let created = handler.create(planned).await.unwrap();
    let role_arn = created
        .analytics_configuration
        .as_ref()
        .and_then(|a| a.role_arn.clone())
        .expect("service reports the role it publishes with");

    let change = handler
        .plan(
            Some(&created),
            &json!({
                "user_pool_id": USER_POOL_ID,
                "name": "web-v2",
                "analytics_configuration": analytics,
            }),
        )
        .unwrap();
    assert_eq!(change.action, PlanAction::Update);
    assert_eq!(
        change.planned.analytics_configuration.as_ref().unwrap().role_arn,
        Some(role_arn.clone())
    );

    let updated = handler.update(&created, change.planned).await.unwrap();
    assert_eq!(updated.name.as_ref(), "web-v2");
    let updated_analytics = updated.analytics_configuration.as_ref().unwrap();
    assert_eq!(updated_analytics.role_arn, Some(role_arn));
    assert_eq!(
        updated_analytics.application_arn,
        created.analytics_configuration.as_ref().unwrap().application_arn
    );

    let key = updated.key().unwrap();
    let remote = backend
        .user_pool_client(&key.user_pool_id, &key.client_id)
        .unwrap();
    assert_eq!(remote.client_name, "web-v2");
    assert_eq!(handler.read(&updated).await.unwrap(), Refreshed::Present(updated));
}

#[tokio::test(start_paused = true)]
async fn update_retries_until_conflict_clears() {
    let (backend, provider) = create_provider();
    let handler = provider.user_pool_client();

    let planned = handler
        .plan(None, &json!({ "user_pool_id": USER_POOL_ID, "name": "web" }))
        .unwrap()
        .planned;
    let created = handler.create(planned).await.unwrap();
    backend.inject_fault(
        Operation::UpdateUserPoolClient,
        ErrorCode::ConcurrentModificationException,
        3,
    );

    let planned = handler
        .plan(
            Some(&created),
            &json!({ "user_pool_id": USER_POOL_ID, "name": "web-v2" }),
        )
        .unwrap()
        .planned;
    let updated = handler.update(&created, planned).await.unwrap();
    assert_eq!(updated.name.as_ref(), "web-v2");
    assert_eq!(backend.calls(Operation::UpdateUserPoolClient), 4);
}

#[tokio::test(start_paused = true)]
async fn update_gives_up_when_conflict_persists() {
    let (backend, provider) = create_provider();
    let provider = provider.with_update_timeout(Duration::from_secs(30));
    let handler = provider.user_pool_client();

    let planned = handler
        .plan(None, &json!({ "user_pool_id": USER_POOL_ID, "name": "web" }))
        .unwrap()
        .planned;
    let created = handler.create(planned).await.unwrap();
    backend.inject_fault(
        Operation::UpdateUserPoolClient,
        ErrorCode::ConcurrentModificationException,
        1_000,
    );

    let planned = handler
        .plan(
            Some(&created),
            &json!({ "user_pool_id": USER_POOL_ID, "name": "web-v2" }),
        )
        .unwrap()
        .planned;
    let err = handler.update(&created, planned).await.unwrap_err();
    assert_matches!(
        &err,
        ResourceError::Remote { source, .. } if source.is(ErrorCode::ConcurrentModificationException)
    );
    assert!(backend.calls(Operation::UpdateUserPoolClient) > 1);
}

#[tokio::test]
async fn update_does_not_retry_other_errors() {
    let (backend, provider) = create_provider();
    let handler = provider.user_pool_client();

    let planned = handler
        .plan(None, &json!({ "user_pool_id": USER_POOL_ID, "name": "web" }))
        .unwrap()
        .planned;
    let created = handler.create(planned).await.unwrap();
    backend.inject_fault(
        Operation::UpdateUserPoolClient,
        ErrorCode::InvalidParameterException,
        1,
    );

    let err = handler.update(&created, created.clone()).await.unwrap_err();
    assert!(!err.is_not_found());
    assert_eq!(backend.calls(Operation::UpdateUserPoolClient), 1);
}

#[tokio::test]
async fn create_rejects_invalid_plan_before_calling_service() {
    let (backend, provider) = create_provider();
    let handler = provider.user_pool_client();

    let mut planned = handler
        .plan(None, &json!({ "user_pool_id": USER_POOL_ID, "name": "web" }))
        .unwrap()
        .planned;
    planned.refresh_token_validity = Some(-1);

    assert_matches!(
        handler.create(planned).await,
        Err(ResourceError::Validation(_))
    );
    assert_eq!(backend.calls(Operation::CreateUserPoolClient), 0);
}
