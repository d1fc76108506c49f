//! Request and response shapes for the remote services the provider talks to,
//! and the async client traits the resource handlers are written against.
//!
//! Shapes mirror the AWS wire models closely, keeping remote values as plain
//! strings and numbers. Identifiers sent to the service are validated types
//! from `stratus-common`.

pub mod cognito;
pub mod error;
pub mod logs;
