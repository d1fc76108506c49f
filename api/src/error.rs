use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
// Keep this alphabetized.
pub enum ErrorCode {
    ConcurrentModificationException,
    InternalErrorException,
    InvalidParameterException,
    LimitExceededException,
    NotAuthorizedException,
    Other,
    ResourceAlreadyExistsException,
    ResourceNotFoundException,
    ServiceUnavailableException,
    TooManyRequestsException,
}

impl ErrorCode {
    /// Map a raw service error code, as carried in the error metadata, onto a
    /// known code. Unrecognised codes become [`ErrorCode::Other`].
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or(Self::Other)
    }

    pub fn is_throttling(self) -> bool {
        matches!(
            self,
            Self::TooManyRequestsException | Self::LimitExceededException
        )
    }
}

/// An error returned by a remote service call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ServiceError {
    pub code: ErrorCode,
    pub message: String,
}

impl ServiceError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Build from a raw code, keeping the raw spelling in the message when it
    /// does not map onto a known [`ErrorCode`].
    pub fn from_raw(code: Option<&str>, message: Option<&str>) -> Self {
        let message = message.unwrap_or("no error message").to_owned();
        match code {
            Some(raw) => match ErrorCode::from_code(raw) {
                ErrorCode::Other => Self::new(ErrorCode::Other, format!("{raw}: {message}")),
                code => Self::new(code, message),
            },
            None => Self::new(ErrorCode::Other, message),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceNotFoundException, message)
    }

    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code
    }

    pub fn is_not_found(&self) -> bool {
        self.is(ErrorCode::ResourceNotFoundException)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::known("ResourceNotFoundException", ErrorCode::ResourceNotFoundException)]
    #[case::conflict(
        "ConcurrentModificationException",
        ErrorCode::ConcurrentModificationException
    )]
    #[case::unknown("UserPoolTaggingException", ErrorCode::Other)]
    #[case::empty("", ErrorCode::Other)]
    fn maps_raw_codes(#[case] raw: &str, #[case] expected: ErrorCode) {
        assert_eq!(ErrorCode::from_code(raw), expected);
    }

    #[test]
    fn unknown_code_is_kept_in_message() {
        let err = ServiceError::from_raw(Some("UserPoolTaggingException"), Some("nope"));
        assert_eq!(err.code, ErrorCode::Other);
        assert_eq!(err.to_string(), "Other: UserPoolTaggingException: nope");
    }

    #[test]
    fn known_code_display() {
        let err = ServiceError::not_found("User pool client 1abc does not exist.");
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "ResourceNotFoundException: User pool client 1abc does not exist."
        );
    }
}
