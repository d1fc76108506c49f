use std::{sync::Arc, time::Duration};

use stratus_api::{cognito::CognitoIdentityProvider, logs::CloudWatchLogs};

use crate::{
    aws::{AwsCognito, AwsLogs, load_sdk_config},
    resources::{
        log_stream::LogStream,
        user_pool_client::{DEFAULT_UPDATE_TIMEOUT, UserPoolClient},
    },
};

/// Connection settings. Unset fields fall back to the AWS SDK's default
/// resolution chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
    pub update_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            region: None,
            profile: None,
            endpoint_url: None,
            update_timeout: DEFAULT_UPDATE_TIMEOUT,
        }
    }
}

/// Connected service clients, shared by every resource handler.
#[derive(Clone)]
pub struct Provider {
    cognito: Arc<dyn CognitoIdentityProvider>,
    logs: Arc<dyn CloudWatchLogs>,
    update_timeout: Duration,
}

impl Provider {
    pub async fn connect(config: &ProviderConfig) -> Self {
        let sdk_config = load_sdk_config(config).await;
        Self {
            cognito: Arc::new(AwsCognito::new(&sdk_config)),
            logs: Arc::new(AwsLogs::new(&sdk_config)),
            update_timeout: config.update_timeout,
        }
    }

    pub fn with_clients(
        cognito: Arc<dyn CognitoIdentityProvider>,
        logs: Arc<dyn CloudWatchLogs>,
    ) -> Self {
        Self {
            cognito,
            logs,
            update_timeout: DEFAULT_UPDATE_TIMEOUT,
        }
    }

    pub fn with_update_timeout(self, update_timeout: Duration) -> Self {
        Self {
            update_timeout,
            ..self
        }
    }

    pub fn user_pool_client(&self) -> UserPoolClient {
        UserPoolClient::new(self.cognito.clone()).with_update_timeout(self.update_timeout)
    }

    pub fn log_stream(&self) -> LogStream {
        LogStream::new(self.logs.clone())
    }
}
