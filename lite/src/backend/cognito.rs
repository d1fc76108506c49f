use async_trait::async_trait;
use stratus_api::{
    cognito::{
        AnalyticsConfigurationType, CognitoIdentityProvider, CreateUserPoolClientInput,
        UpdateUserPoolClientInput, UserPoolClientSettings, UserPoolClientType,
    },
    error::ServiceError,
};
use stratus_common::types::{
    arn::Arn,
    user_pool::{
        ClientId, ClientName, ExplicitAuthFlowsType, PreventUserExistenceErrorTypes, UserPoolId,
    },
};
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use super::{
    Backend,
    error::{
        InvalidParameterError, UserPoolClientError, UserPoolClientNotFoundError,
        UserPoolNotFoundError,
    },
    faults::Operation,
};

const DEFAULT_REFRESH_TOKEN_VALIDITY: i32 = 30;
const DEFAULT_ACCESS_TOKEN_VALIDITY: i32 = 60;
const DEFAULT_ID_TOKEN_VALIDITY: i32 = 60;
const DEFAULT_AUTH_SESSION_VALIDITY: i32 = 3;

const SERVICE_ROLE_PATH: &str = "cognito-idp.amazonaws.com/AWSServiceRoleForAmazonCognitoIdp";

const DEFAULT_EXPLICIT_AUTH_FLOWS: [ExplicitAuthFlowsType; 3] = [
    ExplicitAuthFlowsType::AllowRefreshTokenAuth,
    ExplicitAuthFlowsType::AllowCustomAuth,
    ExplicitAuthFlowsType::AllowUserSrpAuth,
];

fn new_client_id() -> ClientId {
    Uuid::new_v4().simple().to_string()[..26]
        .parse()
        .expect("hex digits form a valid client id")
}

fn new_client_secret() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

fn check_settings(settings: &UserPoolClientSettings) -> Result<(), InvalidParameterError> {
    let flows = settings.allowed_oauth_flows.as_deref().unwrap_or_default();
    if settings.allowed_oauth_flows_user_pool_client == Some(true) && flows.is_empty() {
        return Err(InvalidParameterError(
            "AllowedOAuthFlows and AllowedOAuthScopes are required if user pool client is \
             allowed to use OAuth flows."
                .to_owned(),
        ));
    }
    if let Some(uri) = &settings.default_redirect_uri {
        let callbacks = settings.callback_urls.as_deref().unwrap_or_default();
        if !callbacks.contains(uri) {
            return Err(InvalidParameterError(
                "DefaultRedirectURI must be one of the CallbackURLs".to_owned(),
            ));
        }
    }
    Ok(())
}

/// A Pinpoint application given by ARN is reached through the Cognito
/// service-linked role, which the service reports back as the role ARN.
fn with_service_role(mut analytics: AnalyticsConfigurationType) -> AnalyticsConfigurationType {
    if analytics.role_arn.is_none()
        && let Some(app) = analytics
            .application_arn
            .as_deref()
            .and_then(|arn| arn.parse::<Arn>().ok())
    {
        analytics.role_arn = Some(format!(
            "arn:{}:iam::{}:role/aws-service-role/{SERVICE_ROLE_PATH}",
            app.partition(),
            app.account_id()
        ));
    }
    analytics
}

/// Fill a client from request settings the way the service does: anything
/// not sent is reset to its default.
fn apply_settings(client: &mut UserPoolClientType, name: ClientName, settings: UserPoolClientSettings) {
    let now = OffsetDateTime::now_utc();
    client.client_name = name.into();
    client.last_modified_date = Some(now);
    client.refresh_token_validity = settings
        .refresh_token_validity
        .unwrap_or(DEFAULT_REFRESH_TOKEN_VALIDITY);
    client.access_token_validity = Some(
        settings
            .access_token_validity
            .unwrap_or(DEFAULT_ACCESS_TOKEN_VALIDITY),
    );
    client.id_token_validity = Some(settings.id_token_validity.unwrap_or(DEFAULT_ID_TOKEN_VALIDITY));
    client.auth_session_validity = Some(
        settings
            .auth_session_validity
            .unwrap_or(DEFAULT_AUTH_SESSION_VALIDITY),
    );
    client.token_validity_units = settings.token_validity_units.filter(|u| !u.is_empty());
    client.read_attributes = settings.read_attributes.unwrap_or_default();
    client.write_attributes = settings.write_attributes.unwrap_or_default();
    client.explicit_auth_flows = settings.explicit_auth_flows.unwrap_or_else(|| {
        DEFAULT_EXPLICIT_AUTH_FLOWS
            .iter()
            .map(ToString::to_string)
            .collect()
    });
    client.supported_identity_providers = settings.supported_identity_providers.unwrap_or_default();
    client.callback_urls = settings.callback_urls.unwrap_or_default();
    client.logout_urls = settings.logout_urls.unwrap_or_default();
    client.default_redirect_uri = settings.default_redirect_uri;
    client.allowed_oauth_flows = settings.allowed_oauth_flows.unwrap_or_default();
    client.allowed_oauth_scopes = settings.allowed_oauth_scopes.unwrap_or_default();
    client.allowed_oauth_flows_user_pool_client = settings
        .allowed_oauth_flows_user_pool_client
        .unwrap_or(false);
    client.analytics_configuration = settings.analytics_configuration.map(with_service_role);
    client.prevent_user_existence_errors = Some(
        settings
            .prevent_user_existence_errors
            .unwrap_or_else(|| PreventUserExistenceErrorTypes::Legacy.to_string()),
    );
    client.enable_token_revocation = Some(settings.enable_token_revocation.unwrap_or(true));
    client.enable_propagate_additional_user_context_data = Some(
        settings
            .enable_propagate_additional_user_context_data
            .unwrap_or(false),
    );
}

impl Backend {
    fn create_client(
        &self,
        input: CreateUserPoolClientInput,
    ) -> Result<UserPoolClientType, UserPoolClientError> {
        let mut state = self
            .enter(Operation::CreateUserPoolClient)
            .map_err(UserPoolClientError::Injected)?;
        let pool = state
            .user_pools
            .get_mut(&input.user_pool_id)
            .ok_or_else(|| UserPoolNotFoundError {
                user_pool_id: input.user_pool_id.clone(),
            })?;
        check_settings(&input.settings)?;

        let client_id = new_client_id();
        let mut client = UserPoolClientType {
            user_pool_id: input.user_pool_id.to_string(),
            client_id: client_id.to_string(),
            client_secret: input.generate_secret.then(new_client_secret),
            creation_date: Some(OffsetDateTime::now_utc()),
            ..Default::default()
        };
        apply_settings(&mut client, input.client_name, input.settings);
        debug!(%client_id, user_pool_id = %input.user_pool_id, "created user pool client");
        pool.clients.insert(client_id, client.clone());
        Ok(client)
    }

    fn describe_client(
        &self,
        user_pool_id: &UserPoolId,
        client_id: &ClientId,
    ) -> Result<UserPoolClientType, UserPoolClientError> {
        let state = self
            .enter(Operation::DescribeUserPoolClient)
            .map_err(UserPoolClientError::Injected)?;
        let pool = state
            .user_pools
            .get(user_pool_id)
            .ok_or_else(|| UserPoolNotFoundError {
                user_pool_id: user_pool_id.clone(),
            })?;
        let client = pool
            .clients
            .get(client_id)
            .ok_or_else(|| UserPoolClientNotFoundError {
                client_id: client_id.clone(),
            })?;
        Ok(client.clone())
    }

    fn update_client(
        &self,
        input: UpdateUserPoolClientInput,
    ) -> Result<UserPoolClientType, UserPoolClientError> {
        let mut state = self
            .enter(Operation::UpdateUserPoolClient)
            .map_err(UserPoolClientError::Injected)?;
        let pool = state
            .user_pools
            .get_mut(&input.user_pool_id)
            .ok_or_else(|| UserPoolNotFoundError {
                user_pool_id: input.user_pool_id.clone(),
            })?;
        let client = pool
            .clients
            .get_mut(&input.client_id)
            .ok_or_else(|| UserPoolClientNotFoundError {
                client_id: input.client_id.clone(),
            })?;
        check_settings(&input.settings)?;

        apply_settings(client, input.client_name, input.settings);
        debug!(client_id = %input.client_id, "updated user pool client");
        Ok(client.clone())
    }

    fn delete_client(
        &self,
        user_pool_id: &UserPoolId,
        client_id: &ClientId,
    ) -> Result<(), UserPoolClientError> {
        let mut state = self
            .enter(Operation::DeleteUserPoolClient)
            .map_err(UserPoolClientError::Injected)?;
        let pool = state
            .user_pools
            .get_mut(user_pool_id)
            .ok_or_else(|| UserPoolNotFoundError {
                user_pool_id: user_pool_id.clone(),
            })?;
        pool.clients
            .remove(client_id)
            .ok_or_else(|| UserPoolClientNotFoundError {
                client_id: client_id.clone(),
            })?;
        debug!(%client_id, "deleted user pool client");
        Ok(())
    }
}

#[async_trait]
impl CognitoIdentityProvider for Backend {
    async fn create_user_pool_client(
        &self,
        input: CreateUserPoolClientInput,
    ) -> Result<UserPoolClientType, ServiceError> {
        Ok(self.create_client(input)?)
    }

    async fn describe_user_pool_client(
        &self,
        user_pool_id: &UserPoolId,
        client_id: &ClientId,
    ) -> Result<Option<UserPoolClientType>, ServiceError> {
        Ok(Some(self.describe_client(user_pool_id, client_id)?))
    }

    async fn update_user_pool_client(
        &self,
        input: UpdateUserPoolClientInput,
    ) -> Result<UserPoolClientType, ServiceError> {
        Ok(self.update_client(input)?)
    }

    async fn delete_user_pool_client(
        &self,
        user_pool_id: &UserPoolId,
        client_id: &ClientId,
    ) -> Result<(), ServiceError> {
        Ok(self.delete_client(user_pool_id, client_id)?)
    }
}

#[cfg(test)]
mod tests {
    use stratus_api::error::ErrorCode;

    use super::*;

    fn pool_id() -> UserPoolId {
        "us-east-1_pool".parse().unwrap()
    }

    fn backend() -> Backend {
        let backend = Backend::default();
        backend.create_user_pool(pool_id());
        backend
    }

    fn create_input(settings: UserPoolClientSettings) -> CreateUserPoolClientInput {
        CreateUserPoolClientInput {
            user_pool_id: pool_id(),
            client_name: "web".parse().unwrap(),
            generate_secret: false,
            settings,
        }
    }

    #[tokio::test]
    async fn create_applies_service_defaults() {
        let backend = backend();
        let client = backend
            .create_user_pool_client(create_input(UserPoolClientSettings::default()))
            .await
            .unwrap();

        assert_eq!(client.refresh_token_validity, 30);
        assert_eq!(client.access_token_validity, Some(60));
        assert_eq!(client.auth_session_validity, Some(3));
        assert_eq!(client.enable_token_revocation, Some(true));
        assert_eq!(client.prevent_user_existence_errors.as_deref(), Some("LEGACY"));
        assert_eq!(
            client.explicit_auth_flows,
            vec![
                "ALLOW_REFRESH_TOKEN_AUTH",
                "ALLOW_CUSTOM_AUTH",
                "ALLOW_USER_SRP_AUTH"
            ]
        );
        assert!(client.client_secret.is_none());
        assert!(client.client_id.parse::<ClientId>().is_ok());
    }

    #[tokio::test]
    async fn generated_secret_is_kept_across_updates() {
        let backend = backend();
        let created = backend
            .create_user_pool_client(CreateUserPoolClientInput {
                generate_secret: true,
                ..create_input(UserPoolClientSettings::default())
            })
            .await
            .unwrap();
        assert!(created.client_secret.is_some());

        let updated = backend
            .update_user_pool_client(UpdateUserPoolClientInput {
                user_pool_id: pool_id(),
                client_id: created.client_id.parse().unwrap(),
                client_name: "renamed".parse().unwrap(),
                settings: UserPoolClientSettings {
                    refresh_token_validity: Some(7),
                    ..Default::default()
                },
            })
            .await
            .unwrap();
        assert_eq!(updated.client_name, "renamed");
        assert_eq!(updated.refresh_token_validity, 7);
        assert_eq!(updated.client_secret, created.client_secret);
        assert_eq!(updated.creation_date, created.creation_date);
    }

    #[tokio::test]
    async fn application_arn_reports_service_linked_role() {
        let backend = backend();
        let analytics = |role_arn: Option<&str>| UserPoolClientSettings {
            analytics_configuration: Some(AnalyticsConfigurationType {
                application_arn: Some(
                    "arn:aws:mobiletargeting:us-east-1:123456789012:apps/abc".to_owned(),
                ),
                role_arn: role_arn.map(str::to_owned),
                ..Default::default()
            }),
            ..Default::default()
        };

        let client = backend
            .create_user_pool_client(create_input(analytics(None)))
            .await
            .unwrap();
        assert_eq!(
            client.analytics_configuration.unwrap().role_arn.as_deref(),
            Some(
                "arn:aws:iam::123456789012:role/aws-service-role/\
                 cognito-idp.amazonaws.com/AWSServiceRoleForAmazonCognitoIdp"
            )
        );

        let own_role = "arn:aws:iam::123456789012:role/pinpoint";
        let client = backend
            .create_user_pool_client(create_input(analytics(Some(own_role))))
            .await
            .unwrap();
        assert_eq!(
            client.analytics_configuration.unwrap().role_arn.as_deref(),
            Some(own_role)
        );
    }

    #[tokio::test]
    async fn oauth_client_requires_flows() {
        let backend = backend();
        let err = backend
            .create_user_pool_client(create_input(UserPoolClientSettings {
                allowed_oauth_flows_user_pool_client: Some(true),
                ..Default::default()
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParameterException);
    }

    #[tokio::test]
    async fn missing_pool_and_client_are_not_found() {
        let backend = Backend::default();
        let err = backend
            .create_user_pool_client(create_input(UserPoolClientSettings::default()))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let backend = self::backend();
        let err = backend
            .delete_user_pool_client(&pool_id(), &"1example23456789".parse().unwrap())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(backend.calls(Operation::DeleteUserPoolClient), 1);
    }
}
