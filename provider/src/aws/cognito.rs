use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_cognitoidentityprovider::{
    Client,
    primitives::DateTime,
    types::{
        AnalyticsConfigurationType, ExplicitAuthFlowsType, OAuthFlowType,
        PreventUserExistenceErrorTypes, TimeUnitsType, TokenValidityUnitsType, UserPoolClientType,
    },
};
use stratus_api::{
    cognito::{
        self, CognitoIdentityProvider, CreateUserPoolClientInput, UpdateUserPoolClientInput,
        UserPoolClientSettings,
    },
    error::{ErrorCode, ServiceError},
};
use stratus_common::types::user_pool::{ClientId, UserPoolId};
use time::OffsetDateTime;

use super::service_error;

/// [`CognitoIdentityProvider`] over the Cognito Identity Provider SDK client.
#[derive(Debug, Clone)]
pub struct AwsCognito {
    client: Client,
}

impl AwsCognito {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

fn empty_response(operation: &str) -> ServiceError {
    ServiceError::new(
        ErrorCode::Other,
        format!("{operation} returned no user pool client"),
    )
}

fn strings<T: AsRef<str>>(values: &[T]) -> Vec<String> {
    values.iter().map(|v| v.as_ref().to_owned()).collect()
}

fn parse_all<T: for<'a> From<&'a str>>(values: Option<Vec<String>>) -> Option<Vec<T>> {
    values.map(|values| values.iter().map(|v| T::from(v.as_str())).collect())
}

fn date(value: Option<&DateTime>) -> Option<OffsetDateTime> {
    value.and_then(|d| OffsetDateTime::from_unix_timestamp(d.secs()).ok())
}

fn units_to_sdk(units: cognito::TokenValidityUnitsType) -> TokenValidityUnitsType {
    let unit = |u: Option<String>| u.map(|u| TimeUnitsType::from(u.as_str()));
    TokenValidityUnitsType::builder()
        .set_access_token(unit(units.access_token))
        .set_id_token(unit(units.id_token))
        .set_refresh_token(unit(units.refresh_token))
        .build()
}

fn units_from_sdk(units: &TokenValidityUnitsType) -> cognito::TokenValidityUnitsType {
    let unit = |u: Option<&TimeUnitsType>| u.map(|u| u.as_str().to_owned());
    cognito::TokenValidityUnitsType {
        access_token: unit(units.access_token()),
        id_token: unit(units.id_token()),
        refresh_token: unit(units.refresh_token()),
    }
}

fn analytics_to_sdk(analytics: cognito::AnalyticsConfigurationType) -> AnalyticsConfigurationType {
    AnalyticsConfigurationType::builder()
        .set_application_arn(analytics.application_arn)
        .set_application_id(analytics.application_id)
        .set_external_id(analytics.external_id)
        .set_role_arn(analytics.role_arn)
        .user_data_shared(analytics.user_data_shared)
        .build()
}

fn analytics_from_sdk(analytics: &AnalyticsConfigurationType) -> cognito::AnalyticsConfigurationType {
    cognito::AnalyticsConfigurationType {
        application_arn: analytics.application_arn().map(str::to_owned),
        application_id: analytics.application_id().map(str::to_owned),
        external_id: analytics.external_id().map(str::to_owned),
        role_arn: analytics.role_arn().map(str::to_owned),
        user_data_shared: analytics.user_data_shared(),
    }
}

fn client_from_sdk(client: &UserPoolClientType) -> cognito::UserPoolClientType {
    cognito::UserPoolClientType {
        user_pool_id: client.user_pool_id().unwrap_or_default().to_owned(),
        client_name: client.client_name().unwrap_or_default().to_owned(),
        client_id: client.client_id().unwrap_or_default().to_owned(),
        client_secret: client.client_secret().map(str::to_owned),
        creation_date: date(client.creation_date()),
        last_modified_date: date(client.last_modified_date()),
        refresh_token_validity: client.refresh_token_validity(),
        access_token_validity: client.access_token_validity(),
        id_token_validity: client.id_token_validity(),
        auth_session_validity: client.auth_session_validity(),
        token_validity_units: client.token_validity_units().map(units_from_sdk),
        read_attributes: strings(client.read_attributes()),
        write_attributes: strings(client.write_attributes()),
        explicit_auth_flows: client
            .explicit_auth_flows()
            .iter()
            .map(|f| f.as_str().to_owned())
            .collect(),
        supported_identity_providers: strings(client.supported_identity_providers()),
        callback_urls: strings(client.callback_urls()),
        logout_urls: strings(client.logout_urls()),
        default_redirect_uri: client.default_redirect_uri().map(str::to_owned),
        allowed_oauth_flows: client
            .allowed_o_auth_flows()
            .iter()
            .map(|f| f.as_str().to_owned())
            .collect(),
        allowed_oauth_scopes: strings(client.allowed_o_auth_scopes()),
        allowed_oauth_flows_user_pool_client: client
            .allowed_o_auth_flows_user_pool_client()
            .unwrap_or(false),
        analytics_configuration: client.analytics_configuration().map(analytics_from_sdk),
        prevent_user_existence_errors: client
            .prevent_user_existence_errors()
            .map(|p| p.as_str().to_owned()),
        enable_token_revocation: client.enable_token_revocation(),
        enable_propagate_additional_user_context_data: client
            .enable_propagate_additional_user_context_data(),
    }
}

/// Applies the shared settings to either request builder; both expose the
/// same setters.
macro_rules! apply_settings {
    ($builder:expr, $settings:expr) => {{
        let settings: UserPoolClientSettings = $settings;
        $builder
            .set_refresh_token_validity(settings.refresh_token_validity)
            .set_access_token_validity(settings.access_token_validity)
            .set_id_token_validity(settings.id_token_validity)
            .set_auth_session_validity(settings.auth_session_validity)
            .set_token_validity_units(settings.token_validity_units.map(units_to_sdk))
            .set_read_attributes(settings.read_attributes)
            .set_write_attributes(settings.write_attributes)
            .set_explicit_auth_flows(parse_all::<ExplicitAuthFlowsType>(
                settings.explicit_auth_flows,
            ))
            .set_supported_identity_providers(settings.supported_identity_providers)
            .set_callback_urls(settings.callback_urls)
            .set_logout_urls(settings.logout_urls)
            .set_default_redirect_uri(settings.default_redirect_uri)
            .set_allowed_o_auth_flows(parse_all::<OAuthFlowType>(settings.allowed_oauth_flows))
            .set_allowed_o_auth_scopes(settings.allowed_oauth_scopes)
            .set_allowed_o_auth_flows_user_pool_client(
                settings.allowed_oauth_flows_user_pool_client,
            )
            .set_analytics_configuration(settings.analytics_configuration.map(analytics_to_sdk))
            .set_prevent_user_existence_errors(
                settings
                    .prevent_user_existence_errors
                    .map(|p| PreventUserExistenceErrorTypes::from(p.as_str())),
            )
            .set_enable_token_revocation(settings.enable_token_revocation)
            .set_enable_propagate_additional_user_context_data(
                settings.enable_propagate_additional_user_context_data,
            )
    }};
}

#[async_trait]
impl CognitoIdentityProvider for AwsCognito {
    async fn create_user_pool_client(
        &self,
        input: CreateUserPoolClientInput,
    ) -> Result<cognito::UserPoolClientType, ServiceError> {
        let request = self
            .client
            .create_user_pool_client()
            .user_pool_id(input.user_pool_id)
            .client_name(input.client_name)
            .generate_secret(input.generate_secret);
        let output = apply_settings!(request, input.settings)
            .send()
            .await
            .map_err(service_error)?;
        output
            .user_pool_client()
            .map(client_from_sdk)
            .ok_or_else(|| empty_response("CreateUserPoolClient"))
    }

    async fn describe_user_pool_client(
        &self,
        user_pool_id: &UserPoolId,
        client_id: &ClientId,
    ) -> Result<Option<cognito::UserPoolClientType>, ServiceError> {
        let output = self
            .client
            .describe_user_pool_client()
            .user_pool_id(user_pool_id.to_string())
            .client_id(client_id.to_string())
            .send()
            .await
            .map_err(service_error)?;
        Ok(output.user_pool_client().map(client_from_sdk))
    }

    async fn update_user_pool_client(
        &self,
        input: UpdateUserPoolClientInput,
    ) -> Result<cognito::UserPoolClientType, ServiceError> {
        let request = self
            .client
            .update_user_pool_client()
            .user_pool_id(input.user_pool_id)
            .client_id(input.client_id)
            .client_name(input.client_name);
        let output = apply_settings!(request, input.settings)
            .send()
            .await
            .map_err(service_error)?;
        output
            .user_pool_client()
            .map(client_from_sdk)
            .ok_or_else(|| empty_response("UpdateUserPoolClient"))
    }

    async fn delete_user_pool_client(
        &self,
        user_pool_id: &UserPoolId,
        client_id: &ClientId,
    ) -> Result<(), ServiceError> {
        self.client
            .delete_user_pool_client()
            .user_pool_id(user_pool_id.to_string())
            .client_id(client_id.to_string())
            .send()
            .await
            .map_err(service_error)?;
        Ok(())
    }
}
