use compact_str::CompactString;

use super::{ValidationError, strings::impl_validated_str};
use crate::caps;

/// User pool identifier, e.g. `us-east-1_aBcDeFgHi`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserPoolId(CompactString);

impl UserPoolId {
    const MAX_LENGTH: usize = caps::MAX_USER_POOL_ID_LEN;
}

impl TryFrom<CompactString> for UserPoolId {
    type Error = ValidationError;

    fn try_from(id: CompactString) -> Result<Self, Self::Error> {
        if id.is_empty() {
            return Err("User pool id must not be empty".into());
        }

        if id.len() > Self::MAX_LENGTH {
            return Err(format!(
                "User pool id must not exceed {} characters in length",
                Self::MAX_LENGTH
            )
            .into());
        }

        let well_formed = id.rsplit_once('_').is_some_and(|(region, suffix)| {
            !region.is_empty()
                && !suffix.is_empty()
                && region
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                && suffix.chars().all(|c| c.is_ascii_alphanumeric())
        });
        if !well_formed {
            return Err(format!("User pool id `{id}` must look like `<region>_<suffix>`").into());
        }

        Ok(Self(id))
    }
}

impl_validated_str!(UserPoolId);

/// App client identifier assigned by the service.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientId(CompactString);

impl ClientId {
    const MAX_LENGTH: usize = caps::MAX_CLIENT_ID_LEN;
}

impl TryFrom<CompactString> for ClientId {
    type Error = ValidationError;

    fn try_from(id: CompactString) -> Result<Self, Self::Error> {
        if id.is_empty() {
            return Err("Client id must not be empty".into());
        }

        if id.len() > Self::MAX_LENGTH {
            return Err(format!(
                "Client id must not exceed {} characters in length",
                Self::MAX_LENGTH
            )
            .into());
        }

        if id
            .chars()
            .any(|c| !c.is_ascii_alphanumeric() && c != '_' && c != '+')
        {
            return Err("Client id must comprise letters, numbers, `_` and `+`".into());
        }

        Ok(Self(id))
    }
}

impl_validated_str!(ClientId);

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientName(CompactString);

impl ClientName {
    const MAX_LENGTH: usize = caps::MAX_CLIENT_NAME_LEN;
}

impl TryFrom<CompactString> for ClientName {
    type Error = ValidationError;

    fn try_from(name: CompactString) -> Result<Self, Self::Error> {
        if name.is_empty() {
            return Err("Client name must not be empty".into());
        }

        if name.len() > Self::MAX_LENGTH {
            return Err(format!(
                "Client name must not exceed {} characters in length",
                Self::MAX_LENGTH
            )
            .into());
        }

        if name.chars().any(|c| {
            !c.is_ascii_alphanumeric()
                && !c.is_ascii_whitespace()
                && !matches!(c, '_' | '+' | '=' | ',' | '.' | '@' | '-')
        }) {
            return Err(
                "Client name must comprise letters, numbers, spaces and the characters `_+=,.@-`"
                    .into(),
            );
        }

        Ok(Self(name))
    }
}

impl_validated_str!(ClientName);

/// Letters, marks, symbols, numbers and punctuation: anything that is neither
/// whitespace nor a control character.
fn is_printable(c: char) -> bool {
    !c.is_whitespace() && !c.is_control()
}

/// Callback, logout and default redirect URLs.
pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() || url.len() > caps::MAX_URL_LEN {
        return Err(format!(
            "URL must be between 1 and {} characters in length",
            caps::MAX_URL_LEN
        )
        .into());
    }
    if !url.chars().all(is_printable) {
        return Err(format!("URL `{url}` must not contain whitespace or control characters").into());
    }
    Ok(())
}

pub fn validate_identity_provider_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() || name.len() > caps::MAX_IDENTITY_PROVIDER_NAME_LEN {
        return Err(format!(
            "Identity provider name must be between 1 and {} characters in length",
            caps::MAX_IDENTITY_PROVIDER_NAME_LEN
        )
        .into());
    }
    if !name.chars().all(is_printable) {
        return Err(format!(
            "Identity provider name `{name}` must not contain whitespace or control characters"
        )
        .into());
    }
    Ok(())
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString, strum::VariantNames,
)]
#[strum(serialize_all = "snake_case")]
pub enum OAuthFlowType {
    Code,
    Implicit,
    ClientCredentials,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString, strum::VariantNames,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ExplicitAuthFlowsType {
    AdminNoSrpAuth,
    CustomAuthFlowOnly,
    UserPasswordAuth,
    AllowAdminUserPasswordAuth,
    AllowCustomAuth,
    AllowUserPasswordAuth,
    AllowUserSrpAuth,
    AllowRefreshTokenAuth,
    AllowUserAuth,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString, strum::VariantNames,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PreventUserExistenceErrorTypes {
    Legacy,
    Enabled,
}

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
#[strum(serialize_all = "lowercase")]
pub enum TimeUnitsType {
    Seconds,
    Minutes,
    #[default]
    Hours,
    Days,
}
