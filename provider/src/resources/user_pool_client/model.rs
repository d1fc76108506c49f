use std::{collections::BTreeSet, fmt};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use stratus_api::cognito::{
    AnalyticsConfigurationType, TokenValidityUnitsType, UserPoolClientSettings,
    UserPoolClientType,
};
use stratus_common::{
    singleton,
    types::{
        ValidationError,
        arn::Arn,
        user_pool::{ClientId, ClientName, UserPoolId},
    },
};

pub type StringSet = BTreeSet<String>;

/// The generated app client secret. Kept in state, redacted in debug output.
pub struct ClientSecret(SecretString);

impl ClientSecret {
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<String> for ClientSecret {
    fn from(value: String) -> Self {
        Self(SecretString::from(value))
    }
}

impl Clone for ClientSecret {
    fn clone(&self) -> Self {
        Self::from(self.expose().to_owned())
    }
}

impl PartialEq for ClientSecret {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Serialize for ClientSecret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.expose())
    }
}

impl<'de> Deserialize<'de> for ClientSecret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::from)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsConfiguration {
    #[serde(default)]
    pub application_arn: Option<Arn>,
    #[serde(default)]
    pub application_id: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub role_arn: Option<Arn>,
    #[serde(default)]
    pub user_data_shared: Option<bool>,
}

impl AnalyticsConfiguration {
    fn expand(&self) -> AnalyticsConfigurationType {
        AnalyticsConfigurationType {
            application_arn: self.application_arn.clone().map(Into::into),
            application_id: self.application_id.clone(),
            external_id: self.external_id.clone(),
            role_arn: self.role_arn.clone().map(Into::into),
            user_data_shared: self.user_data_shared.unwrap_or(false),
        }
    }

    fn flatten(remote: AnalyticsConfigurationType) -> Result<Self, ValidationError> {
        Ok(Self {
            application_arn: remote.application_arn.map(|a| a.parse()).transpose()?,
            application_id: remote.application_id,
            external_id: remote.external_id,
            role_arn: remote.role_arn.map(|a| a.parse()).transpose()?,
            user_data_shared: Some(remote.user_data_shared),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenValidityUnits {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl TokenValidityUnits {
    fn expand(&self) -> TokenValidityUnitsType {
        TokenValidityUnitsType {
            access_token: self.access_token.clone(),
            id_token: self.id_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }

    /// `None` when the service reported no units at all.
    fn flatten(remote: Option<TokenValidityUnitsType>) -> Option<Self> {
        remote.filter(|u| !u.is_empty()).map(|u| Self {
            access_token: u.access_token,
            id_token: u.id_token,
            refresh_token: u.refresh_token,
        })
    }
}

/// Identifies an app client within its user pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPoolClientKey {
    pub user_pool_id: UserPoolId,
    pub client_id: ClientId,
}

impl fmt::Display for UserPoolClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.user_pool_id, self.client_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPoolClientModel {
    #[serde(default)]
    pub id: Option<ClientId>,
    pub user_pool_id: UserPoolId,
    pub name: ClientName,
    #[serde(default)]
    pub access_token_validity: Option<i32>,
    #[serde(default)]
    pub id_token_validity: Option<i32>,
    #[serde(default)]
    pub refresh_token_validity: Option<i32>,
    #[serde(default)]
    pub auth_session_validity: Option<i32>,
    #[serde(default)]
    pub allowed_oauth_flows: Option<StringSet>,
    #[serde(default)]
    pub allowed_oauth_flows_user_pool_client: Option<bool>,
    #[serde(default)]
    pub allowed_oauth_scopes: Option<StringSet>,
    #[serde(default)]
    pub callback_urls: Option<StringSet>,
    #[serde(default)]
    pub logout_urls: Option<StringSet>,
    #[serde(default)]
    pub default_redirect_uri: Option<String>,
    #[serde(default)]
    pub client_secret: Option<ClientSecret>,
    #[serde(default)]
    pub enable_propagate_additional_user_context_data: Option<bool>,
    #[serde(default)]
    pub enable_token_revocation: Option<bool>,
    #[serde(default)]
    pub explicit_auth_flows: Option<StringSet>,
    #[serde(default)]
    pub generate_secret: Option<bool>,
    #[serde(default)]
    pub prevent_user_existence_errors: Option<String>,
    #[serde(default)]
    pub read_attributes: Option<StringSet>,
    #[serde(default)]
    pub write_attributes: Option<StringSet>,
    #[serde(default)]
    pub supported_identity_providers: Option<StringSet>,
    #[serde(default, with = "singleton")]
    pub analytics_configuration: Option<AnalyticsConfiguration>,
    #[serde(default, with = "singleton")]
    pub token_validity_units: Option<TokenValidityUnits>,
}

fn to_list(set: &Option<StringSet>) -> Option<Vec<String>> {
    set.as_ref().map(|s| s.iter().cloned().collect())
}

fn to_set(list: Vec<String>) -> Option<StringSet> {
    Some(list.into_iter().collect())
}

impl UserPoolClientModel {
    pub fn new(user_pool_id: UserPoolId, name: ClientName) -> Self {
        Self {
            id: None,
            user_pool_id,
            name,
            access_token_validity: None,
            id_token_validity: None,
            refresh_token_validity: None,
            auth_session_validity: None,
            allowed_oauth_flows: None,
            allowed_oauth_flows_user_pool_client: None,
            allowed_oauth_scopes: None,
            callback_urls: None,
            logout_urls: None,
            default_redirect_uri: None,
            client_secret: None,
            enable_propagate_additional_user_context_data: None,
            enable_token_revocation: None,
            explicit_auth_flows: None,
            generate_secret: None,
            prevent_user_existence_errors: None,
            read_attributes: None,
            write_attributes: None,
            supported_identity_providers: None,
            analytics_configuration: None,
            token_validity_units: None,
        }
    }

    pub fn key(&self) -> Option<UserPoolClientKey> {
        self.id.clone().map(|client_id| UserPoolClientKey {
            user_pool_id: self.user_pool_id.clone(),
            client_id,
        })
    }

    /// Request settings for create and update. Unset attributes are omitted.
    pub fn settings(&self) -> UserPoolClientSettings {
        UserPoolClientSettings {
            refresh_token_validity: self.refresh_token_validity,
            access_token_validity: self.access_token_validity,
            id_token_validity: self.id_token_validity,
            auth_session_validity: self.auth_session_validity,
            token_validity_units: self.token_validity_units.as_ref().map(|u| u.expand()),
            read_attributes: to_list(&self.read_attributes),
            write_attributes: to_list(&self.write_attributes),
            explicit_auth_flows: to_list(&self.explicit_auth_flows),
            supported_identity_providers: to_list(&self.supported_identity_providers),
            callback_urls: to_list(&self.callback_urls),
            logout_urls: to_list(&self.logout_urls),
            default_redirect_uri: self.default_redirect_uri.clone(),
            allowed_oauth_flows: to_list(&self.allowed_oauth_flows),
            allowed_oauth_scopes: to_list(&self.allowed_oauth_scopes),
            allowed_oauth_flows_user_pool_client: self.allowed_oauth_flows_user_pool_client,
            analytics_configuration: self.analytics_configuration.as_ref().map(|a| a.expand()),
            prevent_user_existence_errors: self.prevent_user_existence_errors.clone(),
            enable_token_revocation: self.enable_token_revocation,
            enable_propagate_additional_user_context_data: self
                .enable_propagate_additional_user_context_data,
        }
    }

    /// Build a model from the service's description alone.
    pub fn from_remote(remote: UserPoolClientType) -> Result<Self, ValidationError> {
        let user_pool_id = remote.user_pool_id.parse()?;
        let name = remote.client_name.parse()?;
        Self::new(user_pool_id, name).overlay(remote)
    }

    /// Overlay every value the service returned. Attributes the service does
    /// not report, such as `generate_secret`, are left as they are.
    pub fn overlay(self, remote: UserPoolClientType) -> Result<Self, ValidationError> {
        let UserPoolClientType {
            user_pool_id,
            client_name,
            client_id,
            client_secret,
            creation_date: _,
            last_modified_date: _,
            refresh_token_validity,
            access_token_validity,
            id_token_validity,
            auth_session_validity,
            token_validity_units,
            read_attributes,
            write_attributes,
            explicit_auth_flows,
            supported_identity_providers,
            callback_urls,
            logout_urls,
            default_redirect_uri,
            allowed_oauth_flows,
            allowed_oauth_scopes,
            allowed_oauth_flows_user_pool_client,
            analytics_configuration,
            prevent_user_existence_errors,
            enable_token_revocation,
            enable_propagate_additional_user_context_data,
        } = remote;

        Ok(Self {
            id: Some(client_id.parse()?),
            user_pool_id: user_pool_id.parse()?,
            name: client_name.parse()?,
            access_token_validity,
            id_token_validity,
            refresh_token_validity: Some(refresh_token_validity),
            auth_session_validity,
            allowed_oauth_flows: to_set(allowed_oauth_flows),
            allowed_oauth_flows_user_pool_client: Some(allowed_oauth_flows_user_pool_client),
            allowed_oauth_scopes: to_set(allowed_oauth_scopes),
            callback_urls: to_set(callback_urls),
            logout_urls: to_set(logout_urls),
            default_redirect_uri,
            client_secret: client_secret.map(ClientSecret::from).or(self.client_secret),
            enable_propagate_additional_user_context_data,
            enable_token_revocation,
            explicit_auth_flows: to_set(explicit_auth_flows),
            generate_secret: self.generate_secret,
            prevent_user_existence_errors,
            read_attributes: to_set(read_attributes),
            write_attributes: to_set(write_attributes),
            supported_identity_providers: to_set(supported_identity_providers),
            analytics_configuration: analytics_configuration
                .map(AnalyticsConfiguration::flatten)
                .transpose()?,
            token_validity_units: TokenValidityUnits::flatten(token_validity_units),
        })
    }
}
