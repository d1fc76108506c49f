use std::collections::{HashMap, VecDeque};

use stratus_api::error::{ErrorCode, ServiceError};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum Operation {
    CreateUserPoolClient,
    DescribeUserPoolClient,
    UpdateUserPoolClient,
    DeleteUserPoolClient,
    CreateLogStream,
    DescribeLogStreams,
    DeleteLogStream,
}

/// Errors queued per operation, returned in order by the next calls.
#[derive(Debug, Default)]
pub(super) struct Faults {
    queued: HashMap<Operation, VecDeque<ErrorCode>>,
}

impl Faults {
    pub fn push(&mut self, op: Operation, code: ErrorCode, times: usize) {
        self.queued
            .entry(op)
            .or_default()
            .extend(std::iter::repeat_n(code, times));
    }

    pub fn pop(&mut self, op: Operation) -> Option<ServiceError> {
        let code = self.queued.get_mut(&op)?.pop_front()?;
        Some(ServiceError::new(code, format!("injected fault for {op}")))
    }
}
