use std::ops::Bound;

use async_trait::async_trait;
use stratus_api::{
    error::ServiceError,
    logs::{CloudWatchLogs, DescribeLogStreamsInput, DescribeLogStreamsOutput, LogStream},
};
use stratus_common::types::{
    log_stream::{LogGroupName, LogStreamName},
    resources::Page,
};
use time::OffsetDateTime;
use tracing::debug;

use super::{
    Backend,
    error::{
        InvalidParameterError, LogGroupNotFoundError, LogStreamAlreadyExistsError,
        LogStreamError, LogStreamNotFoundError,
    },
    faults::Operation,
};

const REGION: &str = "us-east-1";
const ACCOUNT_ID: &str = "123456789012";

fn log_stream_arn(log_group_name: &LogGroupName, log_stream_name: &LogStreamName) -> String {
    format!(
        "arn:aws:logs:{REGION}:{ACCOUNT_ID}:log-group:{log_group_name}:log-stream:{log_stream_name}"
    )
}

fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

impl Backend {
    fn create_stream(
        &self,
        log_group_name: &LogGroupName,
        log_stream_name: &LogStreamName,
    ) -> Result<(), LogStreamError> {
        let mut state = self
            .enter(Operation::CreateLogStream)
            .map_err(LogStreamError::Injected)?;
        let group = state
            .log_groups
            .get_mut(log_group_name)
            .ok_or_else(|| LogGroupNotFoundError {
                log_group_name: log_group_name.clone(),
            })?;
        if group.streams.contains_key(log_stream_name) {
            return Err(LogStreamAlreadyExistsError {
                log_stream_name: log_stream_name.clone(),
            }
            .into());
        }

        let stream = LogStream {
            log_stream_name: log_stream_name.to_string(),
            arn: Some(log_stream_arn(log_group_name, log_stream_name)),
            creation_time: Some(now_millis()),
            ..Default::default()
        };
        debug!(%log_group_name, %log_stream_name, "created log stream");
        group.streams.insert(log_stream_name.clone(), stream);
        Ok(())
    }

    fn describe_streams(
        &self,
        input: DescribeLogStreamsInput,
    ) -> Result<DescribeLogStreamsOutput, LogStreamError> {
        let state = self
            .enter(Operation::DescribeLogStreams)
            .map_err(LogStreamError::Injected)?;
        let group = state
            .log_groups
            .get(&input.log_group_name)
            .ok_or_else(|| LogGroupNotFoundError {
                log_group_name: input.log_group_name.clone(),
            })?;

        // The continuation token is the last stream name of the previous page.
        let start = match &input.next_token {
            Some(token) => {
                let after: LogStreamName = token.parse().map_err(|_| {
                    InvalidParameterError(format!("The specified nextToken is invalid: {token}"))
                })?;
                Bound::Excluded(after)
            }
            None => Bound::Unbounded,
        };
        let prefix: &str = &input.log_stream_name_prefix;
        let page_size = input.limit.as_usize().min(self.page_size);

        let mut matching = group
            .streams
            .range((start, Bound::Unbounded))
            .skip_while(|(name, _)| &***name < prefix)
            .take_while(|(name, _)| name.starts_with(prefix))
            .map(|(_, stream)| stream);

        let values: Vec<LogStream> = matching.by_ref().take(page_size).cloned().collect();
        let next_token = match (matching.next(), values.last()) {
            (Some(_), Some(last)) => Some(last.log_stream_name.clone()),
            _ => None,
        };
        Ok(Page::new(values, next_token))
    }

    fn delete_stream(
        &self,
        log_group_name: &LogGroupName,
        log_stream_name: &LogStreamName,
    ) -> Result<(), LogStreamError> {
        let mut state = self
            .enter(Operation::DeleteLogStream)
            .map_err(LogStreamError::Injected)?;
        let group = state
            .log_groups
            .get_mut(log_group_name)
            .ok_or_else(|| LogGroupNotFoundError {
                log_group_name: log_group_name.clone(),
            })?;
        group
            .streams
            .remove(log_stream_name)
            .ok_or_else(|| LogStreamNotFoundError {
                log_stream_name: log_stream_name.clone(),
            })?;
        debug!(%log_group_name, %log_stream_name, "deleted log stream");
        Ok(())
    }
}

#[async_trait]
impl CloudWatchLogs for Backend {
    async fn create_log_stream(
        &self,
        log_group_name: &LogGroupName,
        log_stream_name: &LogStreamName,
    ) -> Result<(), ServiceError> {
        Ok(self.create_stream(log_group_name, log_stream_name)?)
    }

    async fn describe_log_streams(
        &self,
        input: DescribeLogStreamsInput,
    ) -> Result<DescribeLogStreamsOutput, ServiceError> {
        Ok(self.describe_streams(input)?)
    }

    async fn delete_log_stream(
        &self,
        log_group_name: &LogGroupName,
        log_stream_name: &LogStreamName,
    ) -> Result<(), ServiceError> {
        Ok(self.delete_stream(log_group_name, log_stream_name)?)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use stratus_api::error::ErrorCode;

    use super::*;

    fn group() -> LogGroupName {
        "/app/web".parse().unwrap()
    }

    async fn backend_with_streams(page_size: usize, names: &[&str]) -> Backend {
        let backend = Backend::default().with_page_size(page_size);
        backend.create_log_group(group());
        for name in names {
            backend
                .create_log_stream(&group(), &name.parse().unwrap())
                .await
                .unwrap();
        }
        backend
    }

    async fn all_pages(backend: &Backend, prefix: &str) -> Vec<Vec<String>> {
        let mut pages = Vec::new();
        let mut next_token = None;
        loop {
            let input = DescribeLogStreamsInput::new(group())
                .with_prefix(prefix.parse::<LogStreamName>().unwrap())
                .with_next_token(next_token);
            let page = backend.describe_log_streams(input).await.unwrap();
            pages.push(
                page.values
                    .iter()
                    .map(|s| s.log_stream_name.clone())
                    .collect(),
            );
            if page.next_token.is_none() {
                return pages;
            }
            next_token = page.next_token;
        }
    }

    #[rstest]
    #[case::single_page(10, vec![vec!["app", "app-1", "app-2"]])]
    #[case::split(2, vec![vec!["app", "app-1"], vec!["app-2"]])]
    #[case::exact_fit(3, vec![vec!["app", "app-1", "app-2"]])]
    #[tokio::test]
    async fn pages_prefix_matches_in_name_order(
        #[case] page_size: usize,
        #[case] expected: Vec<Vec<&str>>,
    ) {
        let backend =
            backend_with_streams(page_size, &["web", "app-2", "ap", "app", "app-1"]).await;
        assert_eq!(all_pages(&backend, "app").await, expected);
    }

    #[tokio::test]
    async fn arn_and_creation_time_are_assigned() {
        let backend = backend_with_streams(50, &["i-0abc"]).await;
        let stream = backend
            .log_stream(&group(), &"i-0abc".parse().unwrap())
            .unwrap();
        assert_eq!(
            stream.arn.as_deref(),
            Some("arn:aws:logs:us-east-1:123456789012:log-group:/app/web:log-stream:i-0abc")
        );
        assert!(stream.creation_time.is_some());
    }

    #[tokio::test]
    async fn duplicate_create_fails() {
        let backend = backend_with_streams(50, &["i-0abc"]).await;
        let err = backend
            .create_log_stream(&group(), &"i-0abc".parse().unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceAlreadyExistsException);
    }

    #[tokio::test]
    async fn missing_group_is_not_found() {
        let backend = Backend::default();
        let err = backend
            .describe_log_streams(DescribeLogStreamsInput::new(group()))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
