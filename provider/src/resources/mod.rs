pub mod log_stream;
pub mod user_pool_client;

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    error::ResourceError,
    plan::{PlannedChange, plan_change},
    schema::ResourceSchema,
};

/// Outcome of refreshing a resource from the remote service.
#[derive(Debug, Clone, PartialEq)]
pub enum Refreshed<T> {
    Present(T),
    /// The remote entity no longer exists and should be dropped from state.
    Gone,
}

impl<T> Refreshed<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Gone => None,
        }
    }

    pub fn is_gone(&self) -> bool {
        matches!(self, Self::Gone)
    }
}

/// Lifecycle of one externally managed resource type.
#[async_trait]
pub trait Resource: Send + Sync {
    type Model: Debug + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync;
    /// The fields an import identifier resolves to.
    type Key: Debug + Clone + Send + Sync;

    const TYPE_NAME: &'static str;

    fn schema(&self) -> ResourceSchema;

    fn validate(&self, config: &Value) -> Result<(), ResourceError> {
        Ok(self.schema().validate_config(config)?)
    }

    /// Validate a planned model before sending it to the service.
    fn validate_planned(&self, planned: &Self::Model) -> Result<(), ResourceError> {
        let value = serde_json::to_value(planned)?;
        Ok(self.schema().validate_planned(&value)?)
    }

    fn plan(
        &self,
        prior: Option<&Self::Model>,
        config: &Value,
    ) -> Result<PlannedChange<Self::Model>, ResourceError> {
        plan_change(&self.schema(), prior, config)
    }

    async fn create(&self, planned: Self::Model) -> Result<Self::Model, ResourceError>;

    async fn read(&self, state: &Self::Model) -> Result<Refreshed<Self::Model>, ResourceError>;

    async fn update(
        &self,
        prior: &Self::Model,
        planned: Self::Model,
    ) -> Result<Self::Model, ResourceError>;

    async fn delete(&self, state: &Self::Model) -> Result<(), ResourceError>;

    /// Parse an import identifier.
    fn import(&self, id: &str) -> Result<Self::Key, ResourceError>;

    /// Read a resource known only by its key, as after an import.
    async fn read_by_key(&self, key: &Self::Key) -> Result<Refreshed<Self::Model>, ResourceError>;
}
