//! In-memory implementation of the Cognito Identity Provider and CloudWatch
//! Logs client traits.
//!
//! [`Backend`] behaves like the remote services closely enough to exercise
//! the resource handlers end to end: it assigns identifiers and secrets,
//! fills in service defaults, pages `DescribeLogStreams`, and can be told to
//! fail upcoming calls or to lose entities behind the caller's back.

pub mod backend;

pub use backend::{Backend, Operation};
