use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stratus_common::types::user_pool::{ClientId, ClientName, UserPoolId};
use time::OffsetDateTime;

use crate::error::ServiceError;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalyticsConfigurationType {
    /// Amazon Pinpoint project ARN.
    pub application_arn: Option<String>,
    /// Amazon Pinpoint project ID.
    pub application_id: Option<String>,
    /// External ID used to assume `role_arn`.
    pub external_id: Option<String>,
    /// Role that allows Cognito to publish events to Pinpoint.
    pub role_arn: Option<String>,
    /// Whether user data is included in the published events.
    #[serde(default)]
    pub user_data_shared: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TokenValidityUnitsType {
    pub access_token: Option<String>,
    pub id_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl TokenValidityUnitsType {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.id_token.is_none() && self.refresh_token.is_none()
    }
}

/// An app client as described by the service.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserPoolClientType {
    pub user_pool_id: String,
    pub client_name: String,
    pub client_id: String,
    pub client_secret: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub creation_date: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_modified_date: Option<OffsetDateTime>,
    pub refresh_token_validity: i32,
    pub access_token_validity: Option<i32>,
    pub id_token_validity: Option<i32>,
    pub auth_session_validity: Option<i32>,
    pub token_validity_units: Option<TokenValidityUnitsType>,
    #[serde(default)]
    pub read_attributes: Vec<String>,
    #[serde(default)]
    pub write_attributes: Vec<String>,
    #[serde(default)]
    pub explicit_auth_flows: Vec<String>,
    #[serde(default)]
    pub supported_identity_providers: Vec<String>,
    #[serde(default, rename = "CallbackURLs")]
    pub callback_urls: Vec<String>,
    #[serde(default, rename = "LogoutURLs")]
    pub logout_urls: Vec<String>,
    #[serde(rename = "DefaultRedirectURI")]
    pub default_redirect_uri: Option<String>,
    #[serde(default, rename = "AllowedOAuthFlows")]
    pub allowed_oauth_flows: Vec<String>,
    #[serde(default, rename = "AllowedOAuthScopes")]
    pub allowed_oauth_scopes: Vec<String>,
    #[serde(default, rename = "AllowedOAuthFlowsUserPoolClient")]
    pub allowed_oauth_flows_user_pool_client: bool,
    pub analytics_configuration: Option<AnalyticsConfigurationType>,
    pub prevent_user_existence_errors: Option<String>,
    pub enable_token_revocation: Option<bool>,
    pub enable_propagate_additional_user_context_data: Option<bool>,
}

/// Settings shared by the create and update requests. Unset fields are not
/// sent, leaving the service to apply its defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserPoolClientSettings {
    pub refresh_token_validity: Option<i32>,
    pub access_token_validity: Option<i32>,
    pub id_token_validity: Option<i32>,
    pub auth_session_validity: Option<i32>,
    pub token_validity_units: Option<TokenValidityUnitsType>,
    pub read_attributes: Option<Vec<String>>,
    pub write_attributes: Option<Vec<String>>,
    pub explicit_auth_flows: Option<Vec<String>>,
    pub supported_identity_providers: Option<Vec<String>>,
    #[serde(rename = "CallbackURLs")]
    pub callback_urls: Option<Vec<String>>,
    #[serde(rename = "LogoutURLs")]
    pub logout_urls: Option<Vec<String>>,
    #[serde(rename = "DefaultRedirectURI")]
    pub default_redirect_uri: Option<String>,
    #[serde(rename = "AllowedOAuthFlows")]
    pub allowed_oauth_flows: Option<Vec<String>>,
    #[serde(rename = "AllowedOAuthScopes")]
    pub allowed_oauth_scopes: Option<Vec<String>>,
    #[serde(rename = "AllowedOAuthFlowsUserPoolClient")]
    pub allowed_oauth_flows_user_pool_client: Option<bool>,
    pub analytics_configuration: Option<AnalyticsConfigurationType>,
    pub prevent_user_existence_errors: Option<String>,
    pub enable_token_revocation: Option<bool>,
    pub enable_propagate_additional_user_context_data: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateUserPoolClientInput {
    pub user_pool_id: UserPoolId,
    pub client_name: ClientName,
    #[serde(default)]
    pub generate_secret: bool,
    #[serde(flatten)]
    pub settings: UserPoolClientSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateUserPoolClientInput {
    pub user_pool_id: UserPoolId,
    pub client_id: ClientId,
    pub client_name: ClientName,
    #[serde(flatten)]
    pub settings: UserPoolClientSettings,
}

/// The subset of the Cognito Identity Provider API used for app clients.
#[async_trait]
pub trait CognitoIdentityProvider: Send + Sync {
    async fn create_user_pool_client(
        &self,
        input: CreateUserPoolClientInput,
    ) -> Result<UserPoolClientType, ServiceError>;

    /// `Ok(None)` when the service answers without a client.
    async fn describe_user_pool_client(
        &self,
        user_pool_id: &UserPoolId,
        client_id: &ClientId,
    ) -> Result<Option<UserPoolClientType>, ServiceError>;

    async fn update_user_pool_client(
        &self,
        input: UpdateUserPoolClientInput,
    ) -> Result<UserPoolClientType, ServiceError>;

    async fn delete_user_pool_client(
        &self,
        user_pool_id: &UserPoolId,
        client_id: &ClientId,
    ) -> Result<(), ServiceError>;
}
