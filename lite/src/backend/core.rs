use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use parking_lot::{Mutex, MutexGuard};
use stratus_api::{
    cognito::UserPoolClientType,
    error::{ErrorCode, ServiceError},
    logs::LogStream,
};
use stratus_common::types::{
    log_stream::{LogGroupName, LogStreamName},
    user_pool::{ClientId, UserPoolId},
};
use tracing::debug;

use super::faults::{Faults, Operation};

#[derive(Debug, Default)]
pub(super) struct UserPool {
    pub clients: BTreeMap<ClientId, UserPoolClientType>,
}

#[derive(Debug, Default)]
pub(super) struct LogGroup {
    pub streams: BTreeMap<LogStreamName, LogStream>,
}

#[derive(Debug, Default)]
pub(super) struct State {
    pub user_pools: BTreeMap<UserPoolId, UserPool>,
    pub log_groups: BTreeMap<LogGroupName, LogGroup>,
    pub faults: Faults,
    pub calls: HashMap<Operation, usize>,
}

/// Shared in-memory service state. Clones observe the same state.
#[derive(Debug, Clone)]
pub struct Backend {
    pub(super) state: Arc<Mutex<State>>,
    pub(super) page_size: usize,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            state: Arc::default(),
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

impl Backend {
    pub const DEFAULT_PAGE_SIZE: usize = 50;

    /// Cap on the number of log streams returned per `DescribeLogStreams`
    /// page, on top of the request's own limit.
    pub fn with_page_size(self, page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..self
        }
    }

    pub fn create_user_pool(&self, user_pool_id: UserPoolId) {
        debug!(%user_pool_id, "creating user pool");
        self.state.lock().user_pools.entry(user_pool_id).or_default();
    }

    pub fn create_log_group(&self, log_group_name: LogGroupName) {
        debug!(%log_group_name, "creating log group");
        self.state
            .lock()
            .log_groups
            .entry(log_group_name)
            .or_default();
    }

    /// Delete a client without going through the API, as another tool
    /// would. Returns whether it existed.
    pub fn remove_user_pool_client(&self, user_pool_id: &UserPoolId, client_id: &ClientId) -> bool {
        self.state
            .lock()
            .user_pools
            .get_mut(user_pool_id)
            .is_some_and(|pool| pool.clients.remove(client_id).is_some())
    }

    /// Delete a log stream without going through the API. Returns whether it
    /// existed.
    pub fn remove_log_stream(
        &self,
        log_group_name: &LogGroupName,
        log_stream_name: &LogStreamName,
    ) -> bool {
        self.state
            .lock()
            .log_groups
            .get_mut(log_group_name)
            .is_some_and(|group| group.streams.remove(log_stream_name).is_some())
    }

    pub fn user_pool_client(
        &self,
        user_pool_id: &UserPoolId,
        client_id: &ClientId,
    ) -> Option<UserPoolClientType> {
        self.state
            .lock()
            .user_pools
            .get(user_pool_id)
            .and_then(|pool| pool.clients.get(client_id).cloned())
    }

    pub fn log_stream(
        &self,
        log_group_name: &LogGroupName,
        log_stream_name: &LogStreamName,
    ) -> Option<LogStream> {
        self.state
            .lock()
            .log_groups
            .get(log_group_name)
            .and_then(|group| group.streams.get(log_stream_name).cloned())
    }

    /// Make the next `times` calls of `op` fail with `code`.
    pub fn inject_fault(&self, op: Operation, code: ErrorCode, times: usize) {
        self.state.lock().faults.push(op, code, times);
    }

    /// Number of calls of `op` received so far, including failed ones.
    pub fn calls(&self, op: Operation) -> usize {
        self.state.lock().calls.get(&op).copied().unwrap_or(0)
    }

    /// Record a call and lock the state for it, unless a fault is queued.
    pub(super) fn enter(&self, op: Operation) -> Result<MutexGuard<'_, State>, ServiceError> {
        let mut state = self.state.lock();
        *state.calls.entry(op).or_default() += 1;
        match state.faults.pop(op) {
            Some(fault) => {
                debug!(%op, code = %fault.code, "returning injected fault");
                Err(fault)
            }
            None => Ok(state),
        }
    }
}
