use stratus_api::error::{ErrorCode, ServiceError};
use stratus_common::types::{
    log_stream::{LogGroupName, LogStreamName},
    user_pool::{ClientId, UserPoolId},
};

#[derive(Debug, Clone, thiserror::Error)]
#[error("User pool {user_pool_id} does not exist.")]
pub struct UserPoolNotFoundError {
    pub user_pool_id: UserPoolId,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("User pool client {client_id} does not exist.")]
pub struct UserPoolClientNotFoundError {
    pub client_id: ClientId,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("The specified log group does not exist: {log_group_name}")]
pub struct LogGroupNotFoundError {
    pub log_group_name: LogGroupName,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("The specified log stream does not exist: {log_stream_name}")]
pub struct LogStreamNotFoundError {
    pub log_stream_name: LogStreamName,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("The specified log stream already exists: {log_stream_name}")]
pub struct LogStreamAlreadyExistsError {
    pub log_stream_name: LogStreamName,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct InvalidParameterError(pub String);

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserPoolClientError {
    #[error(transparent)]
    Injected(ServiceError),
    #[error(transparent)]
    UserPoolNotFound(#[from] UserPoolNotFoundError),
    #[error(transparent)]
    ClientNotFound(#[from] UserPoolClientNotFoundError),
    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameterError),
}

impl From<UserPoolClientError> for ServiceError {
    fn from(e: UserPoolClientError) -> Self {
        let code = match &e {
            UserPoolClientError::Injected(e) => return e.clone(),
            UserPoolClientError::UserPoolNotFound(_) | UserPoolClientError::ClientNotFound(_) => {
                ErrorCode::ResourceNotFoundException
            }
            UserPoolClientError::InvalidParameter(_) => ErrorCode::InvalidParameterException,
        };
        ServiceError::new(code, e.to_string())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LogStreamError {
    #[error(transparent)]
    Injected(ServiceError),
    #[error(transparent)]
    LogGroupNotFound(#[from] LogGroupNotFoundError),
    #[error(transparent)]
    LogStreamNotFound(#[from] LogStreamNotFoundError),
    #[error(transparent)]
    LogStreamAlreadyExists(#[from] LogStreamAlreadyExistsError),
    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameterError),
}

impl From<LogStreamError> for ServiceError {
    fn from(e: LogStreamError) -> Self {
        let code = match &e {
            LogStreamError::Injected(e) => return e.clone(),
            LogStreamError::LogGroupNotFound(_) | LogStreamError::LogStreamNotFound(_) => {
                ErrorCode::ResourceNotFoundException
            }
            LogStreamError::LogStreamAlreadyExists(_) => ErrorCode::ResourceAlreadyExistsException,
            LogStreamError::InvalidParameter(_) => ErrorCode::InvalidParameterException,
        };
        ServiceError::new(code, e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_service_code() {
        let err: ServiceError = UserPoolClientError::from(UserPoolClientNotFoundError {
            client_id: "1example23456789".parse().unwrap(),
        })
        .into();
        assert!(err.is_not_found());
        assert_eq!(
            err.message,
            "User pool client 1example23456789 does not exist."
        );
    }

    #[test]
    fn injected_errors_pass_through() {
        let injected = ServiceError::new(ErrorCode::TooManyRequestsException, "slow down");
        let err: ServiceError = LogStreamError::Injected(injected.clone()).into();
        assert_eq!(err, injected);
    }
}
