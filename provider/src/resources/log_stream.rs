use std::{fmt, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stratus_api::logs::{self, CloudWatchLogs, DescribeLogStreamsInput};
use stratus_common::{
    caps,
    types::{
        ValidationError,
        log_stream::{LogGroupName, LogStreamName},
        resources::TwoPartId,
    },
};
use tracing::{debug, instrument, warn};

use super::{Refreshed, Resource};
use crate::{
    error::{Operation, ResourceError, ValidationErrors},
    schema::{AttributeSchema, AttributeType, ResourceSchema, Validator},
};

const RESOURCE_NAME: &str = "CloudWatch Logs Log Stream";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogStreamModel {
    /// Same as `name` once created.
    #[serde(default)]
    pub id: Option<LogStreamName>,
    #[serde(default)]
    pub arn: Option<String>,
    pub log_group_name: LogGroupName,
    pub name: LogStreamName,
}

impl LogStreamModel {
    pub fn new(log_group_name: LogGroupName, name: LogStreamName) -> Self {
        Self {
            id: None,
            arn: None,
            log_group_name,
            name,
        }
    }

    pub fn key(&self) -> LogStreamKey {
        LogStreamKey {
            log_group_name: self.log_group_name.clone(),
            name: self.id.clone().unwrap_or_else(|| self.name.clone()),
        }
    }

    fn with_remote(self, remote: &logs::LogStream) -> Self {
        Self {
            id: Some(self.name.clone()),
            arn: remote.arn.clone(),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogStreamKey {
    pub log_group_name: LogGroupName,
    pub name: LogStreamName,
}

impl fmt::Display for LogStreamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.log_group_name, self.name)
    }
}

/// Page through streams whose names start with `name` until one matches it
/// exactly.
pub async fn find_log_stream_by_two_part_key(
    client: &dyn CloudWatchLogs,
    log_group_name: &LogGroupName,
    name: &LogStreamName,
) -> Result<logs::LogStream, ResourceError> {
    let not_found = || ResourceError::NotFound {
        resource: RESOURCE_NAME,
        id: name.to_string(),
    };

    let mut next_token = None;
    loop {
        let input = DescribeLogStreamsInput::new(log_group_name.clone())
            .with_prefix(name.clone())
            .with_next_token(next_token);
        let page = match client.describe_log_streams(input).await {
            Ok(page) => page,
            Err(e) if e.is_not_found() => return Err(not_found()),
            Err(source) => {
                return Err(ResourceError::remote(
                    Operation::Reading,
                    RESOURCE_NAME,
                    name,
                    source,
                ));
            }
        };

        let is_last = page.is_last();
        if let Some(stream) = page
            .values
            .into_iter()
            .find(|s| s.log_stream_name == name.as_ref())
        {
            return Ok(stream);
        }
        if is_last {
            return Err(not_found());
        }
        next_token = page.next_token;
    }
}

fn log_group_name(value: &str) -> Result<(), ValidationError> {
    value.parse::<LogGroupName>().map(drop)
}

fn log_stream_name(value: &str) -> Result<(), ValidationError> {
    value.parse::<LogStreamName>().map(drop)
}

pub fn log_stream_schema(type_name: &'static str) -> ResourceSchema {
    ResourceSchema::new(type_name)
        .with_description("A log stream within a CloudWatch Logs log group.")
        .attribute(
            AttributeSchema::new("id", AttributeType::String)
                .computed()
                .use_state_for_unknown(),
        )
        .attribute(AttributeSchema::new("arn", AttributeType::String).computed())
        .attribute(
            AttributeSchema::new("log_group_name", AttributeType::String)
                .required()
                .force_new()
                .validate(Validator::length_between(1, caps::MAX_LOG_GROUP_NAME_LEN))
                .validate(Validator::check("log group name", log_group_name)),
        )
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .required()
                .force_new()
                .validate(Validator::check("log stream name", log_stream_name)),
        )
}

#[derive(Clone)]
pub struct LogStream {
    client: Arc<dyn CloudWatchLogs>,
}

impl LogStream {
    pub fn new(client: Arc<dyn CloudWatchLogs>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for LogStream {
    type Model = LogStreamModel;
    type Key = LogStreamKey;

    const TYPE_NAME: &'static str = "aws_cloudwatch_log_stream";

    fn schema(&self) -> ResourceSchema {
        log_stream_schema(Self::TYPE_NAME)
    }

    #[instrument(skip_all, fields(group = %planned.log_group_name, name = %planned.name), err)]
    async fn create(&self, planned: LogStreamModel) -> Result<LogStreamModel, ResourceError> {
        self.validate_planned(&planned)?;

        self.client
            .create_log_stream(&planned.log_group_name, &planned.name)
            .await
            .map_err(|source| {
                ResourceError::remote(Operation::Creating, RESOURCE_NAME, &planned.name, source)
            })?;

        // A freshly created stream that cannot be found is an error, not a
        // removal.
        let created = find_log_stream_by_two_part_key(
            self.client.as_ref(),
            &planned.log_group_name,
            &planned.name,
        )
        .await?;
        Ok(planned.with_remote(&created))
    }

    #[instrument(skip_all, fields(key = %state.key()), err)]
    async fn read(&self, state: &LogStreamModel) -> Result<Refreshed<LogStreamModel>, ResourceError> {
        let key = state.key();
        match find_log_stream_by_two_part_key(self.client.as_ref(), &key.log_group_name, &key.name)
            .await
        {
            Ok(stream) => Ok(Refreshed::Present(state.clone().with_remote(&stream))),
            Err(e) if e.is_not_found() => {
                warn!(id = %key.name, "{RESOURCE_NAME} not found, removing from state");
                Ok(Refreshed::Gone)
            }
            Err(e) => Err(e),
        }
    }

    async fn update(
        &self,
        _prior: &LogStreamModel,
        _planned: LogStreamModel,
    ) -> Result<LogStreamModel, ResourceError> {
        Err(ResourceError::UpdateNotSupported {
            resource: RESOURCE_NAME,
        })
    }

    #[instrument(skip_all, fields(key = %state.key()), err)]
    async fn delete(&self, state: &LogStreamModel) -> Result<(), ResourceError> {
        let key = state.key();
        debug!(%key, "deleting {RESOURCE_NAME}");
        match self
            .client
            .delete_log_stream(&key.log_group_name, &key.name)
            .await
        {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => Ok(()),
            Err(source) => Err(ResourceError::remote(
                Operation::Deleting,
                RESOURCE_NAME,
                &key.name,
                source,
            )),
        }
    }

    fn import(&self, id: &str) -> Result<LogStreamKey, ResourceError> {
        let parts = TwoPartId::parse(id, ':', "log-group-name:log-stream-name")?;
        let log_group_name = parts
            .first
            .parse::<LogGroupName>()
            .map_err(|e| ValidationErrors::single("log_group_name", e))?;
        let name = parts
            .second
            .parse::<LogStreamName>()
            .map_err(|e| ValidationErrors::single("name", e))?;
        Ok(LogStreamKey {
            log_group_name,
            name,
        })
    }

    #[instrument(skip_all, fields(key = %key), err)]
    async fn read_by_key(&self, key: &LogStreamKey) -> Result<Refreshed<LogStreamModel>, ResourceError> {
        self.read(&LogStreamModel::new(key.log_group_name.clone(), key.name.clone()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;
    use rstest::rstest;
    use serde_json::json;
    use stratus_lite::Backend;

    use super::*;
    use crate::plan::PlanAction;

    fn handler() -> LogStream {
        LogStream::new(Arc::new(Backend::default()))
    }

    #[rstest]
    #[case::one_char("a", true)]
    #[case::max_len(&"a".repeat(512), true)]
    #[case::empty("", false)]
    #[case::too_long(&"a".repeat(513), false)]
    #[case::colon("app:1", false)]
    fn name_validation(#[case] name: &str, #[case] valid: bool) {
        let config = json!({ "log_group_name": "/app/web", "name": name });
        assert_eq!(handler().validate(&config).is_ok(), valid);
    }

    #[rstest]
    #[case::no_separator("group")]
    #[case::too_many("group:stream:extra")]
    #[case::slash("group/stream")]
    fn import_rejects_malformed_ids(#[case] id: &str) {
        let err = handler().import(id).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("wrong format of import ID ({id}), use: 'log-group-name:log-stream-name'")
        );
    }

    #[test]
    fn import_splits_key() {
        let key = handler().import("/app/web:i-0abc").unwrap();
        assert_eq!(key.log_group_name.as_ref(), "/app/web");
        assert_eq!(key.name.as_ref(), "i-0abc");
    }

    #[test]
    fn import_rejects_empty_segments() {
        assert_matches!(handler().import(":stream"), Err(ResourceError::Validation(_)));
        assert_matches!(handler().import("group:"), Err(ResourceError::Validation(_)));
    }

    #[test]
    fn any_change_plans_replacement() {
        let mut prior = LogStreamModel::new("/app/web".parse().unwrap(), "one".parse().unwrap());
        prior.id = Some(prior.name.clone());
        prior.arn = Some("arn:aws:logs:us-east-1:123456789012:log-group:/app/web:log-stream:one".to_owned());

        let same = json!({ "log_group_name": "/app/web", "name": "one" });
        assert_eq!(handler().plan(Some(&prior), &same).unwrap().action, PlanAction::NoOp);

        let renamed = json!({ "log_group_name": "/app/web", "name": "two" });
        let change = handler().plan(Some(&prior), &renamed).unwrap();
        assert_eq!(change.action, PlanAction::Replace);
        assert_eq!(change.replace_paths, vec!["name"]);
        assert_eq!(change.planned.arn, None);
    }

    #[tokio::test]
    async fn update_is_not_supported() {
        let model = LogStreamModel::new("/app/web".parse().unwrap(), "one".parse().unwrap());
        assert_matches!(
            handler().update(&model, model.clone()).await,
            Err(ResourceError::UpdateNotSupported { .. })
        );
    }

    proptest! {
        #[test]
        fn plan_carries_configured_name(name in "[a-zA-Z0-9_./-]{1,64}") {
            let config = json!({ "log_group_name": "/app/web", "name": &name });
            let change = handler().plan(None, &config).unwrap();
            prop_assert_eq!(change.action, PlanAction::Create);
            prop_assert_eq!(change.planned.name.as_ref(), name.as_str());
            prop_assert_eq!(change.planned.id, None);
        }
    }
}
