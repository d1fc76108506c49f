use stratus_provider::{
    LogStream, Resource, UserPoolClient,
    resources::{log_stream::log_stream_schema, user_pool_client::user_pool_client_schema},
    schema::ResourceSchema,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, strum::Display)]
pub enum ResourceType {
    #[value(name = "aws_cognito_user_pool_client")]
    #[strum(serialize = "aws_cognito_user_pool_client")]
    UserPoolClient,
    #[value(name = "aws_cloudwatch_log_stream")]
    #[strum(serialize = "aws_cloudwatch_log_stream")]
    LogStream,
}

impl ResourceType {
    /// Built without connecting, so offline commands never resolve
    /// credentials.
    pub fn schema(self) -> ResourceSchema {
        match self {
            Self::UserPoolClient => user_pool_client_schema(UserPoolClient::TYPE_NAME),
            Self::LogStream => log_stream_schema(LogStream::TYPE_NAME),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ResourceType::UserPoolClient)]
    #[case(ResourceType::LogStream)]
    fn schema_type_name_matches(#[case] resource: ResourceType) {
        assert_eq!(resource.schema().type_name, resource.to_string());
    }
}
