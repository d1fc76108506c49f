use std::fmt;

use stratus_api::error::ServiceError;
use stratus_common::types::{ValidationError, resources::TwoPartIdError};

/// A single attribute that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeError {
    /// Dotted attribute path, e.g. `analytics_configuration.0.role_arn`.
    pub path: String,
    pub message: String,
}

impl AttributeError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for AttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Every validation failure of a document, reported together.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
pub struct ValidationErrors(pub Vec<AttributeError>);

impl ValidationErrors {
    pub fn single(path: impl Into<String>, error: impl Into<ValidationError>) -> Self {
        Self(vec![AttributeError::new(path, error.into().0)])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeError> {
        self.0.iter()
    }

    pub fn push(&mut self, error: AttributeError) {
        self.0.push(error);
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => f.write_str("validation failed"),
            [single] => write!(f, "{single}"),
            many => {
                write!(f, "{} validation errors:", many.len())?;
                for error in many {
                    write!(f, "\n  - {error}")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Creating,
    Reading,
    Updating,
    Deleting,
}

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("{op} {resource} ({id}): {source}")]
    Remote {
        op: Operation,
        resource: &'static str,
        id: String,
        #[source]
        source: ServiceError,
    },
    #[error("{resource} ({id}) not found")]
    NotFound { resource: &'static str, id: String },
    #[error("{resource} state is missing `{field}`")]
    MissingIdentifier {
        resource: &'static str,
        field: &'static str,
    },
    #[error(transparent)]
    InvalidImportId(#[from] TwoPartIdError),
    #[error("{resource} does not support in-place update")]
    UpdateNotSupported { resource: &'static str },
    #[error("{resource} ({id}): unexpected response: {source}")]
    UnexpectedResponse {
        resource: &'static str,
        id: String,
        #[source]
        source: ValidationError,
    },
    #[error("malformed resource document: {0}")]
    Document(#[from] serde_json::Error),
}

impl ResourceError {
    pub fn remote(
        op: Operation,
        resource: &'static str,
        id: impl ToString,
        source: ServiceError,
    ) -> Self {
        Self::Remote {
            op,
            resource,
            id: id.to_string(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Remote { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use stratus_api::error::ErrorCode;

    use super::*;

    #[test]
    fn remote_error_message() {
        let err = ResourceError::remote(
            Operation::Creating,
            "Cognito User Pool Client",
            "web",
            ServiceError::new(ErrorCode::InvalidParameterException, "bad scope"),
        );
        assert_eq!(
            err.to_string(),
            "creating Cognito User Pool Client (web): InvalidParameterException: bad scope"
        );
    }

    #[test]
    fn aggregated_validation_message() {
        let errors = ValidationErrors(vec![
            AttributeError::new("name", "missing required argument"),
            AttributeError::new("refresh_token_validity", "out of range"),
        ]);
        assert_eq!(
            errors.to_string(),
            "2 validation errors:\n  - name: missing required argument\n  - refresh_token_validity: out of range"
        );
        assert_eq!(
            ValidationErrors::single("id", "bad").to_string(),
            "id: bad"
        );
    }
}
