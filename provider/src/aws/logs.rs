use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_cloudwatchlogs::{Client, types};
use stratus_api::{
    error::ServiceError,
    logs::{CloudWatchLogs, DescribeLogStreamsInput, DescribeLogStreamsOutput, LogStream},
};
use stratus_common::types::{
    log_stream::{LogGroupName, LogStreamName},
    resources::Page,
};

use super::service_error;

/// [`CloudWatchLogs`] over the CloudWatch Logs SDK client.
#[derive(Debug, Clone)]
pub struct AwsLogs {
    client: Client,
}

impl AwsLogs {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

fn stream_from_sdk(stream: &types::LogStream) -> LogStream {
    LogStream {
        log_stream_name: stream.log_stream_name().unwrap_or_default().to_owned(),
        arn: stream.arn().map(str::to_owned),
        creation_time: stream.creation_time(),
        first_event_timestamp: stream.first_event_timestamp(),
        last_event_timestamp: stream.last_event_timestamp(),
        last_ingestion_time: stream.last_ingestion_time(),
    }
}

#[async_trait]
impl CloudWatchLogs for AwsLogs {
    async fn create_log_stream(
        &self,
        log_group_name: &LogGroupName,
        log_stream_name: &LogStreamName,
    ) -> Result<(), ServiceError> {
        self.client
            .create_log_stream()
            .log_group_name(log_group_name.to_string())
            .log_stream_name(log_stream_name.to_string())
            .send()
            .await
            .map_err(service_error)?;
        Ok(())
    }

    async fn describe_log_streams(
        &self,
        input: DescribeLogStreamsInput,
    ) -> Result<DescribeLogStreamsOutput, ServiceError> {
        let prefix = (!input.log_stream_name_prefix.is_empty())
            .then(|| String::from(input.log_stream_name_prefix));
        let output = self
            .client
            .describe_log_streams()
            .log_group_name(input.log_group_name)
            .set_log_stream_name_prefix(prefix)
            .set_next_token(input.next_token)
            .limit(input.limit.as_usize() as i32)
            .send()
            .await
            .map_err(service_error)?;
        Ok(Page::new(
            output
                .log_streams()
                .iter()
                .map(stream_from_sdk)
                .collect::<Vec<_>>(),
            output.next_token().map(str::to_owned),
        ))
    }

    async fn delete_log_stream(
        &self,
        log_group_name: &LogGroupName,
        log_stream_name: &LogStreamName,
    ) -> Result<(), ServiceError> {
        self.client
            .delete_log_stream()
            .log_group_name(log_group_name.to_string())
            .log_stream_name(log_stream_name.to_string())
            .send()
            .await
            .map_err(service_error)?;
        Ok(())
    }
}
