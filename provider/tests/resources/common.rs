use std::sync::Arc;

use stratus_common::types::{
    log_stream::{LogGroupName, LogStreamName},
    user_pool::UserPoolId,
};
use stratus_lite::Backend;
use stratus_provider::Provider;

pub const USER_POOL_ID: &str = "us-east-1_aBcDeFgHi";
pub const LOG_GROUP_NAME: &str = "/stratus/test";

pub fn user_pool_id() -> UserPoolId {
    USER_POOL_ID.parse().unwrap()
}

pub fn log_group_name() -> LogGroupName {
    LOG_GROUP_NAME.parse().unwrap()
}

pub fn log_stream_name(name: &str) -> LogStreamName {
    name.parse().unwrap()
}

/// A simulated service with one user pool and one log group, and a provider
/// connected to it.
pub fn create_provider() -> (Backend, Provider) {
    create_provider_with(Backend::default())
}

pub fn create_provider_with(backend: Backend) -> (Backend, Provider) {
    backend.create_user_pool(user_pool_id());
    backend.create_log_group(log_group_name());
    let provider = Provider::with_clients(Arc::new(backend.clone()), Arc::new(backend.clone()));
    (backend, provider)
}
