mod model;
mod schema;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
pub use model::{
    AnalyticsConfiguration, ClientSecret, StringSet, TokenValidityUnits, UserPoolClientKey,
    UserPoolClientModel,
};
pub use schema::user_pool_client_schema;
use stratus_api::{
    cognito::{
        CognitoIdentityProvider, CreateUserPoolClientInput, UpdateUserPoolClientInput,
        UserPoolClientType,
    },
    error::ErrorCode,
};
use stratus_common::types::{
    ValidationError,
    resources::TwoPartId,
    user_pool::{ClientId, UserPoolId},
};
use tracing::{debug, instrument, warn};

use super::{Refreshed, Resource};
use crate::{
    error::{Operation, ResourceError, ValidationErrors},
    retry::retry_when_error_code,
    schema::ResourceSchema,
};

const RESOURCE_NAME: &str = "Cognito User Pool Client";

pub const DEFAULT_UPDATE_TIMEOUT: Duration = Duration::from_secs(2 * 60);

#[derive(Clone)]
pub struct UserPoolClient {
    client: Arc<dyn CognitoIdentityProvider>,
    update_timeout: Duration,
}

impl UserPoolClient {
    pub fn new(client: Arc<dyn CognitoIdentityProvider>) -> Self {
        Self {
            client,
            update_timeout: DEFAULT_UPDATE_TIMEOUT,
        }
    }

    /// How long an update keeps retrying while the client is being modified
    /// concurrently.
    pub fn with_update_timeout(self, update_timeout: Duration) -> Self {
        Self {
            update_timeout,
            ..self
        }
    }

    fn key_of(state: &UserPoolClientModel) -> Result<UserPoolClientKey, ResourceError> {
        state.key().ok_or(ResourceError::MissingIdentifier {
            resource: RESOURCE_NAME,
            field: "id",
        })
    }

    fn unexpected(id: impl ToString) -> impl FnOnce(ValidationError) -> ResourceError {
        let id = id.to_string();
        move |source| ResourceError::UnexpectedResponse {
            resource: RESOURCE_NAME,
            id,
            source,
        }
    }

    async fn describe(
        &self,
        key: &UserPoolClientKey,
    ) -> Result<Option<UserPoolClientType>, ResourceError> {
        match self
            .client
            .describe_user_pool_client(&key.user_pool_id, &key.client_id)
            .await
        {
            Ok(Some(client)) => Ok(Some(client)),
            Ok(None) => {
                warn!(id = %key.client_id, "{RESOURCE_NAME} returned empty, removing from state");
                Ok(None)
            }
            Err(e) if e.is_not_found() => {
                warn!(id = %key.client_id, "{RESOURCE_NAME} not found, removing from state");
                Ok(None)
            }
            Err(source) => Err(ResourceError::remote(
                Operation::Reading,
                RESOURCE_NAME,
                &key.client_id,
                source,
            )),
        }
    }
}

#[async_trait]
impl Resource for UserPoolClient {
    type Model = UserPoolClientModel;
    type Key = UserPoolClientKey;

    const TYPE_NAME: &'static str = "aws_cognito_user_pool_client";

    fn schema(&self) -> ResourceSchema {
        user_pool_client_schema(Self::TYPE_NAME)
    }

    #[instrument(skip_all, fields(name = %planned.name), err)]
    async fn create(&self, planned: UserPoolClientModel) -> Result<UserPoolClientModel, ResourceError> {
        self.validate_planned(&planned)?;

        let input = CreateUserPoolClientInput {
            user_pool_id: planned.user_pool_id.clone(),
            client_name: planned.name.clone(),
            generate_secret: planned.generate_secret.unwrap_or(false),
            settings: planned.settings(),
        };
        let name = planned.name.clone();
        let created = self
            .client
            .create_user_pool_client(input)
            .await
            .map_err(|source| {
                ResourceError::remote(Operation::Creating, RESOURCE_NAME, &name, source)
            })?;

        planned.overlay(created).map_err(Self::unexpected(name))
    }

    #[instrument(skip_all, fields(id = ?state.id), err)]
    async fn read(
        &self,
        state: &UserPoolClientModel,
    ) -> Result<Refreshed<UserPoolClientModel>, ResourceError> {
        let key = Self::key_of(state)?;
        match self.describe(&key).await? {
            Some(client) => Ok(Refreshed::Present(
                state
                    .clone()
                    .overlay(client)
                    .map_err(Self::unexpected(&key.client_id))?,
            )),
            None => Ok(Refreshed::Gone),
        }
    }

    #[instrument(skip_all, fields(id = ?prior.id), err)]
    async fn update(
        &self,
        prior: &UserPoolClientModel,
        planned: UserPoolClientModel,
    ) -> Result<UserPoolClientModel, ResourceError> {
        self.validate_planned(&planned)?;

        let client_id = match planned.id.clone().or_else(|| prior.id.clone()) {
            Some(id) => id,
            None => {
                return Err(ResourceError::MissingIdentifier {
                    resource: RESOURCE_NAME,
                    field: "id",
                });
            }
        };
        let input = UpdateUserPoolClientInput {
            user_pool_id: planned.user_pool_id.clone(),
            client_id: client_id.clone(),
            client_name: planned.name.clone(),
            settings: planned.settings(),
        };

        let updated = retry_when_error_code(
            self.update_timeout,
            &[ErrorCode::ConcurrentModificationException],
            || self.client.update_user_pool_client(input.clone()),
        )
        .await
        .map_err(|source| {
            ResourceError::remote(Operation::Updating, RESOURCE_NAME, &client_id, source)
        })?;

        planned
            .overlay(updated)
            .map_err(Self::unexpected(&client_id))
    }

    #[instrument(skip_all, fields(id = ?state.id), err)]
    async fn delete(&self, state: &UserPoolClientModel) -> Result<(), ResourceError> {
        let key = Self::key_of(state)?;
        debug!(%key, "deleting {RESOURCE_NAME}");
        match self
            .client
            .delete_user_pool_client(&key.user_pool_id, &key.client_id)
            .await
        {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => Ok(()),
            Err(source) => Err(ResourceError::remote(
                Operation::Deleting,
                RESOURCE_NAME,
                &key.client_id,
                source,
            )),
        }
    }

    fn import(&self, id: &str) -> Result<UserPoolClientKey, ResourceError> {
        let parts = TwoPartId::parse(id, '/', "user-pool-id/client-id")?;
        let user_pool_id = parts
            .first
            .parse::<UserPoolId>()
            .map_err(|e| ValidationErrors::single("user_pool_id", e))?;
        let client_id = parts
            .second
            .parse::<ClientId>()
            .map_err(|e| ValidationErrors::single("id", e))?;
        Ok(UserPoolClientKey {
            user_pool_id,
            client_id,
        })
    }

    #[instrument(skip_all, fields(key = %key), err)]
    async fn read_by_key(
        &self,
        key: &UserPoolClientKey,
    ) -> Result<Refreshed<UserPoolClientModel>, ResourceError> {
        match self.describe(key).await? {
            Some(client) => Ok(Refreshed::Present(
                UserPoolClientModel::from_remote(client)
                    .map_err(Self::unexpected(&key.client_id))?,
            )),
            None => Ok(Refreshed::Gone),
        }
    }
}
