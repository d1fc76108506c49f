//! Clients backed by the AWS SDK.

mod cognito;
mod logs;

use std::{error::Error, fmt::Debug};

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_cognitoidentityprovider::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
pub use cognito::AwsCognito;
pub use logs::AwsLogs;
use stratus_api::error::{ErrorCode, ServiceError};
use tracing::debug;

use crate::provider::ProviderConfig;

/// Resolve credentials and region the way the AWS CLI does, with overrides
/// from `config`.
pub async fn load_sdk_config(config: &ProviderConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(profile) = &config.profile {
        loader = loader.profile_name(profile);
    }
    if let Some(endpoint_url) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint_url);
    }
    let sdk_config = loader.load().await;
    debug!(region = ?sdk_config.region(), "loaded AWS configuration");
    sdk_config
}

pub(crate) fn service_error<E, R>(err: SdkError<E, R>) -> ServiceError
where
    E: ProvideErrorMetadata + Error + 'static,
    R: Debug,
{
    match err.code() {
        Some(code) => ServiceError::from_raw(Some(code), err.message()),
        // Failures that never reached the service carry no code.
        None => ServiceError::new(ErrorCode::Other, DisplayErrorContext(&err).to_string()),
    }
}
