use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stratus_common::types::{
    log_stream::{LogGroupName, LogStreamName, LogStreamNamePrefix},
    resources::{ListLimit, Page},
};

use crate::error::ServiceError;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogStream {
    pub log_stream_name: String,
    pub arn: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub creation_time: Option<i64>,
    pub first_event_timestamp: Option<i64>,
    pub last_event_timestamp: Option<i64>,
    pub last_ingestion_time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeLogStreamsInput {
    pub log_group_name: LogGroupName,
    /// Filter to streams whose names begin with this prefix.
    pub log_stream_name_prefix: LogStreamNamePrefix,
    /// Continuation token from the previous page.
    pub next_token: Option<String>,
    /// Number of results per page, up to 50.
    pub limit: ListLimit,
}

impl DescribeLogStreamsInput {
    pub fn new(log_group_name: LogGroupName) -> Self {
        Self {
            log_group_name,
            log_stream_name_prefix: LogStreamNamePrefix::default(),
            next_token: None,
            limit: ListLimit::default(),
        }
    }

    pub fn with_prefix(self, log_stream_name_prefix: impl Into<LogStreamNamePrefix>) -> Self {
        Self {
            log_stream_name_prefix: log_stream_name_prefix.into(),
            ..self
        }
    }

    pub fn with_next_token(self, next_token: Option<String>) -> Self {
        Self { next_token, ..self }
    }

    pub fn with_limit(self, limit: impl Into<ListLimit>) -> Self {
        Self {
            limit: limit.into(),
            ..self
        }
    }
}

pub type DescribeLogStreamsOutput = Page<LogStream>;

/// The subset of the CloudWatch Logs API used for log streams.
#[async_trait]
pub trait CloudWatchLogs: Send + Sync {
    async fn create_log_stream(
        &self,
        log_group_name: &LogGroupName,
        log_stream_name: &LogStreamName,
    ) -> Result<(), ServiceError>;

    /// One page of streams in name order. A missing log group is a
    /// `ResourceNotFoundException`.
    async fn describe_log_streams(
        &self,
        input: DescribeLogStreamsInput,
    ) -> Result<DescribeLogStreamsOutput, ServiceError>;

    async fn delete_log_stream(
        &self,
        log_group_name: &LogGroupName,
        log_stream_name: &LogStreamName,
    ) -> Result<(), ServiceError>;
}
