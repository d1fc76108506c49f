//! Resource handlers for AWS Cognito user pool clients and CloudWatch Logs
//! log streams.
//!
//! Each handler implements [`Resource`]: validate a configuration against its
//! schema, plan a change against prior state, then create, read, update,
//! delete or import the remote entity. Handlers talk to the services through
//! the client traits in `stratus-api`, so they run unchanged against the AWS
//! SDK ([`Provider::connect`]) or an in-memory service
//! ([`Provider::with_clients`]).

pub mod aws;
pub mod error;
pub mod plan;
pub mod provider;
pub mod resources;
pub mod retry;
pub mod schema;

pub use error::{ResourceError, ValidationErrors};
pub use plan::{PlanAction, PlannedChange};
pub use provider::{Provider, ProviderConfig};
pub use resources::{
    Refreshed, Resource, log_stream::LogStream, user_pool_client::UserPoolClient,
};
