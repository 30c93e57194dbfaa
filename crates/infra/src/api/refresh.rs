//! Credential refresh coordination
//!
//! A two-state machine (`Idle`, `Refreshing`) owned by one coordinator per
//! client. The first request to fail with 401 while idle moves the machine to
//! `Refreshing` and becomes the leader; every later 401 joins the pending
//! queue instead of starting its own refresh. When the refresh settles the
//! queue is drained in join order and the machine returns to `Idle`.
//!
//! Continuations run outside the lock.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use super::errors::ApiError;

/// Suspended request waiting for the refresh outcome
pub type Continuation = Box<dyn FnOnce(Result<String, ApiError>) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Refreshing,
}

impl fmt::Display for RefreshState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Refreshing => write!(f, "REFRESHING"),
        }
    }
}

/// What a caller must do after joining a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshRole {
    /// Started the refresh and must settle it
    Leader,
    /// Joined a refresh already in flight
    Follower,
}

struct Inner {
    state: RefreshState,
    queue: VecDeque<Continuation>,
}

pub struct RefreshCoordinator {
    inner: Mutex<Inner>,
}

impl Default for RefreshCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self { inner: Mutex::new(Inner { state: RefreshState::Idle, queue: VecDeque::new() }) }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poison_err) => {
                warn!("refresh coordinator mutex poisoned, recovering");
                poison_err.into_inner()
            }
        }
    }

    pub fn state(&self) -> RefreshState {
        self.lock().state
    }

    /// Number of continuations waiting for the current refresh.
    pub fn pending(&self) -> usize {
        self.lock().queue.len()
    }

    /// Move `Idle -> Refreshing`. Returns `false` if a refresh is already in
    /// flight.
    pub fn begin_refresh(&self) -> bool {
        let mut inner = self.lock();
        if inner.state == RefreshState::Refreshing {
            return false;
        }
        inner.state = RefreshState::Refreshing;
        debug!(state = %inner.state, "refresh started");
        true
    }

    /// Append a continuation to the pending queue.
    pub fn enqueue(&self, continuation: Continuation) {
        let mut inner = self.lock();
        inner.queue.push_back(continuation);
        debug!(pending = inner.queue.len(), "request queued for refresh");
    }

    /// Atomically start a refresh or join the one in flight.
    ///
    /// The continuation is queued in both cases, so the leader is settled
    /// together with its followers and always first.
    pub fn begin_or_enqueue(&self, continuation: Continuation) -> RefreshRole {
        let mut inner = self.lock();
        let role = match inner.state {
            RefreshState::Idle => {
                inner.state = RefreshState::Refreshing;
                RefreshRole::Leader
            }
            RefreshState::Refreshing => RefreshRole::Follower,
        };
        inner.queue.push_back(continuation);
        debug!(?role, pending = inner.queue.len(), "joined refresh");
        role
    }

    /// Hand the new credential to every queued continuation, in join order,
    /// and return to `Idle`. Returns how many were resumed.
    pub fn resolve_all(&self, credential: &str) -> usize {
        let drained = self.drain();
        let count = drained.len();
        debug!(resumed = count, "refresh succeeded");
        for continuation in drained {
            continuation(Ok(credential.to_string()));
        }
        count
    }

    /// Fail every queued continuation with `error` and return to `Idle`.
    pub fn reject_all(&self, error: &ApiError) -> usize {
        let drained = self.drain();
        let count = drained.len();
        warn!(rejected = count, error = %error, "refresh failed");
        for continuation in drained {
            continuation(Err(error.clone()));
        }
        count
    }

    fn drain(&self) -> VecDeque<Continuation> {
        let mut inner = self.lock();
        inner.state = RefreshState::Idle;
        std::mem::take(&mut inner.queue)
    }
}
